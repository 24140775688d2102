//! Lead pipeline stages.
//!
//! Stage labels are part of the stored data and serialize with their
//! pt-BR spelling.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A Lead's position in the sales pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    #[serde(rename = "Novo")]
    New,
    #[serde(rename = "Contato")]
    Contacted,
    #[serde(rename = "Apresentação")]
    Presentation,
    #[serde(rename = "Proposta")]
    Proposal,
    #[serde(rename = "Negociação")]
    Negotiation,
    #[serde(rename = "Ganho")]
    Won,
    #[serde(rename = "Pausado")]
    Paused,
    #[serde(rename = "Perdido")]
    Lost,
}

impl Stage {
    /// Stage given to Leads created without an explicit one.
    pub const INITIAL: Stage = Stage::New;

    pub const ALL: [Stage; 8] = [
        Self::New,
        Self::Contacted,
        Self::Presentation,
        Self::Proposal,
        Self::Negotiation,
        Self::Won,
        Self::Paused,
        Self::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "Novo",
            Self::Contacted => "Contato",
            Self::Presentation => "Apresentação",
            Self::Proposal => "Proposta",
            Self::Negotiation => "Negociação",
            Self::Won => "Ganho",
            Self::Paused => "Pausado",
            Self::Lost => "Perdido",
        }
    }

    /// Lenient mapping used for imported or hand-typed values.
    ///
    /// Exact labels win; known aliases map to their stage; anything else is
    /// the initial stage.
    pub fn normalize(raw: &str) -> Stage {
        let trimmed = raw.trim();
        if let Some(stage) = Self::ALL.iter().find(|s| s.as_str() == trimmed) {
            return *stage;
        }

        match trimmed.to_lowercase().as_str() {
            "novo" => Self::New,
            "contato" | "contatado" => Self::Contacted,
            "apresentação" | "apresentacao" | "apresentação de portifolio feita"
            | "apresentacao de portifolio feita" => Self::Presentation,
            "proposta" => Self::Proposal,
            "negociação" | "negociacao" => Self::Negotiation,
            "ganho" | "ganha" | "convertido" | "convertida" | "won" => Self::Won,
            "pausado" | "pausada" => Self::Paused,
            "perdido" | "perdida" => Self::Lost,
            _ => Self::INITIAL,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = CoreError;

    /// Strict parse: only the exact stored labels are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|stage| stage.as_str() == s.trim())
            .copied()
            .ok_or_else(|| CoreError::Validation(format!("Unknown stage: {s}")))
    }
}

// ---------------------------------------------------------------------------
// Opportunity axes
// ---------------------------------------------------------------------------

/// Outcome axis of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpportunityResult {
    #[serde(rename = "Em aberto")]
    Open,
    #[serde(rename = "Ganha")]
    Won,
    #[serde(rename = "Perdida")]
    Lost,
}

/// Activity axis of an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OpportunityState {
    #[serde(rename = "Ativa")]
    Active,
    #[serde(rename = "Pausada")]
    Paused,
}

/// A single stage split into funnel step, outcome, and activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpportunityAxes {
    /// Funnel step; always one of the five open-pipeline stages.
    pub step: Stage,
    pub result: OpportunityResult,
    pub state: OpportunityState,
}

impl OpportunityAxes {
    /// Short status label: the outcome when closed, `Pausada` when paused,
    /// otherwise the funnel step.
    pub fn status_label(&self) -> &'static str {
        match (self.result, self.state) {
            (OpportunityResult::Won, _) => "Ganha",
            (OpportunityResult::Lost, _) => "Perdida",
            (_, OpportunityState::Paused) => "Pausada",
            _ => self.step.as_str(),
        }
    }
}

/// Split a stage into its opportunity axes.
pub fn derive_opportunity_axes(stage: Stage) -> OpportunityAxes {
    match stage {
        Stage::Won => OpportunityAxes {
            step: Stage::Negotiation,
            result: OpportunityResult::Won,
            state: OpportunityState::Active,
        },
        Stage::Lost => OpportunityAxes {
            step: Stage::Negotiation,
            result: OpportunityResult::Lost,
            state: OpportunityState::Active,
        },
        Stage::Paused => OpportunityAxes {
            step: Stage::Contacted,
            result: OpportunityResult::Open,
            state: OpportunityState::Paused,
        },
        open => OpportunityAxes {
            step: open,
            result: OpportunityResult::Open,
            state: OpportunityState::Active,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_stored_labels() {
        assert_eq!(
            serde_json::to_string(&Stage::Presentation).unwrap(),
            "\"Apresentação\""
        );
        let parsed: Stage = serde_json::from_str("\"Negociação\"").unwrap();
        assert_eq!(parsed, Stage::Negotiation);
    }

    #[test]
    fn rejects_unknown_label_on_deserialize() {
        assert!(serde_json::from_str::<Stage>("\"Qualquer\"").is_err());
        assert!("Qualquer".parse::<Stage>().is_err());
    }

    #[test]
    fn normalize_maps_aliases() {
        assert_eq!(Stage::normalize("contatado"), Stage::Contacted);
        assert_eq!(Stage::normalize("Convertido"), Stage::Won);
        assert_eq!(
            Stage::normalize("Apresentacao de portifolio feita"),
            Stage::Presentation
        );
        assert_eq!(Stage::normalize(" Proposta "), Stage::Proposal);
        assert_eq!(Stage::normalize("???"), Stage::INITIAL);
    }

    #[test]
    fn axes_for_closed_and_paused_stages() {
        let won = derive_opportunity_axes(Stage::Won);
        assert_eq!(won.step, Stage::Negotiation);
        assert_eq!(won.status_label(), "Ganha");

        let paused = derive_opportunity_axes(Stage::Paused);
        assert_eq!(paused.step, Stage::Contacted);
        assert_eq!(paused.state, OpportunityState::Paused);
        assert_eq!(paused.status_label(), "Pausada");

        let open = derive_opportunity_axes(Stage::Proposal);
        assert_eq!(open.result, OpportunityResult::Open);
        assert_eq!(open.status_label(), "Proposta");
    }
}
