//! Collaborator roster and project finance.

use leadbook_core::commission::{
    compute_commissions, compute_project_totals, CollaboratorCommission, ProjectTotals,
};
use leadbook_core::error::CoreError;
use leadbook_core::log_redaction::build_payload_summary;
use leadbook_core::types::DbId;
use validator::Validate;

use crate::invoke::{id_summary, invoke};
use crate::models::collaborator::{Collaborator, CollaboratorPayload};
use crate::models::project::{Project, ProjectPayload};
use crate::store::{CollaboratorStore, ProjectStore};

fn summary_of<T: serde::Serialize>(payload: &T) -> String {
    build_payload_summary(&[(
        "payload",
        serde_json::to_value(payload).unwrap_or(serde_json::Value::Null),
    )])
}

pub struct FinanceService<S> {
    store: S,
}

impl<S> FinanceService<S>
where
    S: CollaboratorStore + ProjectStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // -----------------------------------------------------------------------
    // Collaborators
    // -----------------------------------------------------------------------

    pub async fn list_collaborators(&self) -> Result<Vec<Collaborator>, CoreError> {
        invoke(
            "list_collaborators",
            String::new(),
            self.store.list_collaborators(),
        )
        .await
    }

    pub async fn create_collaborator(
        &self,
        payload: &CollaboratorPayload,
    ) -> Result<Collaborator, CoreError> {
        payload.validate()?;
        invoke(
            "create_collaborator",
            summary_of(payload),
            self.store.create_collaborator(payload),
        )
        .await
    }

    pub async fn update_collaborator(
        &self,
        id: DbId,
        payload: &CollaboratorPayload,
    ) -> Result<Collaborator, CoreError> {
        payload.validate()?;
        invoke(
            "update_collaborator",
            summary_of(payload),
            self.store.update_collaborator(id, payload),
        )
        .await
    }

    pub async fn delete_collaborator(&self, id: DbId) -> Result<(), CoreError> {
        invoke(
            "delete_collaborator",
            id_summary(id),
            self.store.delete_collaborator(id),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub async fn list_projects(&self) -> Result<Vec<Project>, CoreError> {
        invoke("list_projects", String::new(), self.store.list_projects()).await
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, CoreError> {
        payload.validate()?;
        invoke(
            "create_project",
            summary_of(payload),
            self.store.create_project(payload),
        )
        .await
    }

    pub async fn update_project(
        &self,
        id: DbId,
        payload: &ProjectPayload,
    ) -> Result<Project, CoreError> {
        payload.validate()?;
        invoke(
            "update_project",
            summary_of(payload),
            self.store.update_project(id, payload),
        )
        .await
    }

    pub async fn delete_project(&self, id: DbId) -> Result<(), CoreError> {
        invoke(
            "delete_project",
            id_summary(id),
            self.store.delete_project(id),
        )
        .await
    }

    async fn project(&self, id: DbId) -> Result<Project, CoreError> {
        self.list_projects()
            .await?
            .into_iter()
            .find(|project| project.id == id)
            .ok_or(CoreError::NotFound {
                entity: "project",
                id,
            })
    }

    /// Totals recomputed from the project's gross figures, not the stored ones.
    pub async fn project_totals(&self, project_id: DbId) -> Result<ProjectTotals, CoreError> {
        let project = self.project(project_id).await?;
        Ok(compute_project_totals(&project.finance()))
    }

    /// Per-collaborator commission split for one project, in roster order.
    pub async fn project_commissions(
        &self,
        project_id: DbId,
    ) -> Result<Vec<CollaboratorCommission>, CoreError> {
        let (project, roster) =
            futures::try_join!(self.project(project_id), self.list_collaborators())?;
        let commissions = compute_commissions(&project.finance(), &roster);
        tracing::debug!(
            project_id,
            roster = roster.len(),
            paid = commissions.len(),
            "commissions computed"
        );
        Ok(commissions)
    }
}
