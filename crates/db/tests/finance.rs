//! Integration tests for the collaborator roster and project finance.
//!
//! - Collaborator CRUD with local validation
//! - Computed project fields stamped on save
//! - Commission split across the roster
//! - Not-found projects and tagged store rejections

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use leadbook_core::error::CoreError;
use leadbook_db::models::collaborator::CollaboratorPayload;
use leadbook_db::models::project::ProjectPayload;
use leadbook_db::{FinanceService, MemoryStore};

use common::{lead, seeded_store};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn collaborator(name: &str) -> CollaboratorPayload {
    CollaboratorPayload {
        name: name.to_string(),
        notes: None,
    }
}

fn reference_project(lead_id: i64) -> ProjectPayload {
    ProjectPayload {
        lead_id,
        name: "ERP rollout".into(),
        gross_service: Some(10000.0),
        gross_licenses: Some(5000.0),
        gross_license_commission: Some(1000.0),
        tax_pct: Some(10.0),
        fund_pct: Some(5.0),
        ..Default::default()
    }
}

fn service() -> FinanceService<Arc<MemoryStore>> {
    FinanceService::new(Arc::new(seeded_store(vec![lead(1, "ACME", "Ana")])))
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Collaborators go through create, update, list and delete.
#[tokio::test]
async fn test_collaborator_crud() {
    let finance = service();

    let created = finance
        .create_collaborator(&collaborator(" Rita "))
        .await
        .unwrap();
    assert_eq!(created.name, "Rita");

    let updated = finance
        .update_collaborator(
            created.id,
            &CollaboratorPayload {
                name: "Rita Lee".into(),
                notes: Some("presales lead".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.notes, "presales lead");

    let roster = finance.list_collaborators().await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].name, "Rita Lee");

    finance.delete_collaborator(created.id).await.unwrap();
    assert!(finance.list_collaborators().await.unwrap().is_empty());
}

/// Blank names never reach the store.
#[tokio::test]
async fn test_collaborator_requires_name() {
    let finance = service();

    let err = finance
        .create_collaborator(&collaborator("   "))
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Validation(ref msg) if msg.starts_with("name"));
}

/// Unknown ids come back tagged by the store.
#[tokio::test]
async fn test_unknown_collaborator_keeps_store_tag() {
    let finance = service();

    let err = finance.delete_collaborator(77).await.unwrap_err();
    assert_matches!(err, CoreError::Invocation { ref tag, .. } if tag == "RECORD_NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Saving a project stamps its computed fields and default percentages.
#[tokio::test]
async fn test_project_save_stamps_totals() {
    let finance = service();

    let project = finance.create_project(&reference_project(1)).await.unwrap();
    assert!(close(project.pass_through, 4000.0));
    assert!(close(project.net_service, 8550.0));
    assert!(close(project.net_license_commission, 855.0));
    assert!(close(project.total_net, 9405.0));
    assert_eq!(project.pct_fixed, 10.0);
    assert_eq!(project.pct_implementation, 5.0);

    let totals = finance.project_totals(project.id).await.unwrap();
    assert!(close(totals.total_net, 9405.0));
}

/// Five single-role collaborators get their role's share; the unassigned
/// sixth is left out.
#[tokio::test]
async fn test_project_commissions_split_by_role() {
    let finance = service();

    let mut ids = Vec::new();
    for name in ["Fixo", "Pre", "Impl", "Com", "Ind", "Nobody"] {
        ids.push(finance.create_collaborator(&collaborator(name)).await.unwrap().id);
    }
    let project = finance
        .create_project(&ProjectPayload {
            fixed_ids: Some(vec![ids[0]]),
            presales_ids: Some(vec![ids[1]]),
            implementation_ids: Some(vec![ids[2]]),
            commercial_ids: Some(vec![ids[3]]),
            referral_ids: Some(vec![ids[4]]),
            ..reference_project(1)
        })
        .await
        .unwrap();

    let commissions = finance.project_commissions(project.id).await.unwrap();
    assert_eq!(commissions.len(), 5);

    let expected = [
        ("Com", 427.5),
        ("Fixo", 940.5),
        ("Impl", 427.5),
        ("Ind", 427.5),
        ("Pre", 855.0),
    ];
    for (row, (name, total)) in commissions.iter().zip(expected) {
        assert_eq!(row.collaborator_name, name);
        assert!(close(row.total, total), "{name}: expected {total}, got {}", row.total);
    }
    assert!(commissions.iter().all(|c| c.collaborator_id != ids[5]));
}

/// The roster is ordered by name, whatever the creation order, and
/// commission rows follow it.
#[tokio::test]
async fn test_roster_and_commissions_are_ordered_by_name() {
    let finance = service();

    let zeca = finance.create_collaborator(&collaborator("Zeca")).await.unwrap();
    let ana = finance.create_collaborator(&collaborator("Ana")).await.unwrap();

    let names: Vec<String> = finance
        .list_collaborators()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Ana", "Zeca"]);

    let project = finance
        .create_project(&ProjectPayload {
            fixed_ids: Some(vec![zeca.id]),
            presales_ids: Some(vec![ana.id]),
            ..reference_project(1)
        })
        .await
        .unwrap();

    let commissions = finance.project_commissions(project.id).await.unwrap();
    let ids: Vec<i64> = commissions.iter().map(|c| c.collaborator_id).collect();
    assert_eq!(ids, vec![ana.id, zeca.id]);
}

/// Unknown projects are reported as not found.
#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let finance = service();

    let err = finance.project_commissions(9).await.unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "project", id: 9 });
}

/// Projects must point at an existing Lead.
#[tokio::test]
async fn test_project_for_missing_lead_is_rejected() {
    let finance = service();

    let err = finance
        .create_project(&reference_project(55))
        .await
        .unwrap_err();
    assert_eq!(err.tag(), "RECORD_NOT_FOUND");
    assert_eq!(err.friendly_message(), "lead 55 not found");
}
