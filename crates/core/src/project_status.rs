//! Project status codes and their display labels.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a fee-bearing project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Discovery,
    Negociacao,
    Planejado,
    PreVenda,
    AguardandoCliente,
    Aprovado,
    Faturado,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 7] = [
        Self::Discovery,
        Self::Negociacao,
        Self::Planejado,
        Self::PreVenda,
        Self::AguardandoCliente,
        Self::Aprovado,
        Self::Faturado,
    ];

    /// Stored code, e.g. `PRE_VENDA`.
    pub fn code(self) -> &'static str {
        match self {
            Self::Discovery => "DISCOVERY",
            Self::Negociacao => "NEGOCIACAO",
            Self::Planejado => "PLANEJADO",
            Self::PreVenda => "PRE_VENDA",
            Self::AguardandoCliente => "AGUARDANDO_CLIENTE",
            Self::Aprovado => "APROVADO",
            Self::Faturado => "FATURADO",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Discovery => "Discovery",
            Self::Negociacao => "Em negociação",
            Self::Planejado => "Planejado",
            Self::PreVenda => "Pré-venda",
            Self::AguardandoCliente => "Aguardando Cliente",
            Self::Aprovado => "Aprovado",
            Self::Faturado => "Faturado",
        }
    }

    /// Accept either a code or a label; anything else is `Discovery`.
    pub fn normalize(raw: &str) -> ProjectStatus {
        let raw = raw.trim();
        if raw == "Pré-Venda" {
            return Self::PreVenda;
        }
        Self::ALL
            .iter()
            .find(|status| status.code() == raw || status.label() == raw)
            .copied()
            .unwrap_or_default()
    }

    /// Statuses that need follow-up from the sales team.
    pub fn needs_attention(self) -> bool {
        matches!(
            self,
            Self::Negociacao | Self::AguardandoCliente | Self::PreVenda
        )
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
