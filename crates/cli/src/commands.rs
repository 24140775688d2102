//! Report subcommands. Each one renders a JSON value for stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use leadbook_core::error::CoreError;
use leadbook_core::error_tags::{normalize_error, RawError};
use leadbook_core::import::ImportResult;
use leadbook_core::locale_number::{format_currency, format_locale_number, parse_locale_number};
use leadbook_core::types::DbId;
use leadbook_db::{Directory, FinanceService, MemoryStore, Snapshot};
use serde_json::{json, Value};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List customers derived from the Leads' companies.
    Customers,
    /// List the contacts of one customer.
    Contacts { customer_id: DbId },
    /// Show a project's pass-through and net figures.
    Totals { project_id: DbId },
    /// Show a project's commission split across the collaborator roster.
    Commissions { project_id: DbId },
    /// Parse a locally formatted amount such as "R$ 1.234,56".
    ParseAmount { text: String },
    /// Split a store error message into its tag and friendly text.
    ExplainError { text: String },
    /// Summarize an import result file written by the CSV importer.
    ImportReport { path: PathBuf },
}

impl Command {
    /// Whether the command reads the record snapshot.
    pub fn needs_store(&self) -> bool {
        matches!(
            self,
            Self::Customers | Self::Contacts { .. } | Self::Totals { .. } | Self::Commissions { .. }
        )
    }
}

/// Read a snapshot file. A missing file is an empty store.
pub async fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "snapshot not found, starting empty");
            return Ok(Snapshot::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading snapshot {}", path.display()));
        }
    };
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        leads = snapshot.leads.len(),
        collaborators = snapshot.collaborators.len(),
        projects = snapshot.projects.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

fn failure(err: CoreError) -> anyhow::Error {
    anyhow::anyhow!("[{}] {}", err.tag(), err.friendly_message())
}

pub async fn execute(
    command: Command,
    store: Arc<MemoryStore>,
    fraction_digits: usize,
) -> anyhow::Result<Value> {
    match command {
        Command::Customers => {
            let customers = Directory::new(store)
                .list_customers()
                .await
                .map_err(failure)?;
            Ok(serde_json::to_value(customers)?)
        }
        Command::Contacts { customer_id } => {
            let contacts = Directory::new(store)
                .list_contacts_by_customer(customer_id)
                .await
                .map_err(failure)?;
            Ok(serde_json::to_value(contacts)?)
        }
        Command::Totals { project_id } => {
            let totals = FinanceService::new(store)
                .project_totals(project_id)
                .await
                .map_err(failure)?;
            Ok(json!({
                "project_id": project_id,
                "totals": totals,
                "formatted": {
                    "pass_through": format_currency(totals.pass_through),
                    "net_service": format_currency(totals.net_service),
                    "net_license_commission": format_currency(totals.net_license_commission),
                    "total_net": format_currency(totals.total_net),
                },
            }))
        }
        Command::Commissions { project_id } => {
            let commissions = FinanceService::new(store)
                .project_commissions(project_id)
                .await
                .map_err(failure)?;
            let total: f64 = commissions.iter().map(|c| c.total).sum();
            Ok(json!({
                "project_id": project_id,
                "commissions": commissions,
                "total": total,
                "total_formatted": format_currency(total),
            }))
        }
        Command::ParseAmount { text } => {
            let value = parse_locale_number(&text);
            Ok(json!({
                "input": text,
                "value": value,
                "formatted": format_locale_number(value, fraction_digits),
                "currency": format_currency(value),
            }))
        }
        Command::ExplainError { text } => {
            let normalized = normalize_error(&RawError::from(text));
            Ok(serde_json::to_value(normalized)?)
        }
        Command::ImportReport { path } => {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading import result {}", path.display()))?;
            let result: ImportResult = serde_json::from_str(&raw)
                .with_context(|| format!("parsing import result {}", path.display()))?;
            Ok(import_report(&result))
        }
    }
}

fn import_report(result: &ImportResult) -> Value {
    let rows: Vec<String> = result.errors.iter().map(|e| e.describe()).collect();
    json!({
        "summary": result.summary_line(),
        "has_errors": result.has_errors(),
        "errors": rows,
    })
}

#[cfg(test)]
mod tests {
    use leadbook_db::models::lead::Lead;

    use super::*;

    fn store() -> Arc<MemoryStore> {
        let lead = |id: DbId, company: &str| Lead {
            id,
            company: company.into(),
            contact_name: format!("contact {id}"),
            ..Default::default()
        };
        Arc::new(MemoryStore::with_snapshot(Snapshot {
            leads: vec![lead(1, "ACME"), lead(2, " acme "), lead(3, "Globex")],
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn customers_report_lists_groups() {
        let report = execute(Command::Customers, store(), 2).await.unwrap();
        let customers = report.as_array().unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0]["id"], 1);
        assert_eq!(customers[0]["contact_count"], 2);
    }

    #[tokio::test]
    async fn unknown_customer_reports_tag() {
        let err = execute(Command::Contacts { customer_id: 2 }, store(), 2)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "[NOT_FOUND] customer with id 2 not found");
    }

    #[tokio::test]
    async fn parse_amount_formats_with_configured_digits() {
        let report = execute(
            Command::ParseAmount {
                text: "R$ 1.234,56".into(),
            },
            store(),
            1,
        )
        .await
        .unwrap();
        assert_eq!(report["value"], 1234.56);
        assert_eq!(report["formatted"], "1.234,6");
    }

    #[tokio::test]
    async fn explain_error_ignores_unanchored_tags() {
        let text = "Erro genérico [RESTORE_INVALID_SQLITE]";
        let report = execute(
            Command::ExplainError { text: text.into() },
            store(),
            2,
        )
        .await
        .unwrap();
        assert_eq!(report["tag"], Value::Null);
        assert_eq!(report["friendlyMessage"], text);
    }

    #[test]
    fn import_report_describes_rows() {
        let result = ImportResult {
            imported: 3,
            skipped: 1,
            errors: vec![leadbook_core::import::ImportError::new(
                2,
                "missing e-mail",
                "Acme",
                "",
            )],
        };
        let report = import_report(&result);
        assert_eq!(report["summary"], "imported 3 · skipped 1 · errors 1");
        assert_eq!(report["has_errors"], true);
        assert_eq!(report["errors"][0], "row 2: missing e-mail");
    }

    #[tokio::test]
    async fn missing_snapshot_is_empty() {
        let snapshot = load_snapshot(Path::new("/nonexistent/leadbook.json"))
            .await
            .unwrap();
        assert!(snapshot.leads.is_empty());
    }
}
