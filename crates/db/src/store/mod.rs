//! Asynchronous CRUD contract of the external record store.
//!
//! Every entity is reachable through four primitives (list, create, update,
//! delete). Rejections come back as [`RawError`]s in the store's own wording,
//! possibly carrying a leading `[TAG]`; callers normalize them through
//! [`crate::invoke::invoke`].

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use leadbook_core::error_tags::RawError;
use leadbook_core::types::DbId;

use crate::models::collaborator::{Collaborator, CollaboratorPayload};
use crate::models::lead::{Lead, LeadPayload};
use crate::models::project::{Project, ProjectPayload};

pub type StoreResult<T> = Result<T, RawError>;

#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>>;
    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead>;
    async fn update_lead(&self, id: DbId, payload: &LeadPayload) -> StoreResult<Lead>;
    async fn delete_lead(&self, id: DbId) -> StoreResult<()>;
}

#[async_trait]
pub trait CollaboratorStore: Send + Sync {
    /// Roster ordered by name.
    async fn list_collaborators(&self) -> StoreResult<Vec<Collaborator>>;
    async fn create_collaborator(&self, payload: &CollaboratorPayload) -> StoreResult<Collaborator>;
    async fn update_collaborator(
        &self,
        id: DbId,
        payload: &CollaboratorPayload,
    ) -> StoreResult<Collaborator>;
    async fn delete_collaborator(&self, id: DbId) -> StoreResult<()>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn list_projects(&self) -> StoreResult<Vec<Project>>;
    async fn create_project(&self, payload: &ProjectPayload) -> StoreResult<Project>;
    async fn update_project(&self, id: DbId, payload: &ProjectPayload) -> StoreResult<Project>;
    async fn delete_project(&self, id: DbId) -> StoreResult<()>;
}

// Shared handles forward to the inner store so one store can back several
// services at once.

#[async_trait]
impl<S: LeadStore + ?Sized> LeadStore for Arc<S> {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        (**self).list_leads().await
    }

    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead> {
        (**self).create_lead(payload).await
    }

    async fn update_lead(&self, id: DbId, payload: &LeadPayload) -> StoreResult<Lead> {
        (**self).update_lead(id, payload).await
    }

    async fn delete_lead(&self, id: DbId) -> StoreResult<()> {
        (**self).delete_lead(id).await
    }
}

#[async_trait]
impl<S: CollaboratorStore + ?Sized> CollaboratorStore for Arc<S> {
    async fn list_collaborators(&self) -> StoreResult<Vec<Collaborator>> {
        (**self).list_collaborators().await
    }

    async fn create_collaborator(&self, payload: &CollaboratorPayload) -> StoreResult<Collaborator> {
        (**self).create_collaborator(payload).await
    }

    async fn update_collaborator(
        &self,
        id: DbId,
        payload: &CollaboratorPayload,
    ) -> StoreResult<Collaborator> {
        (**self).update_collaborator(id, payload).await
    }

    async fn delete_collaborator(&self, id: DbId) -> StoreResult<()> {
        (**self).delete_collaborator(id).await
    }
}

#[async_trait]
impl<S: ProjectStore + ?Sized> ProjectStore for Arc<S> {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        (**self).list_projects().await
    }

    async fn create_project(&self, payload: &ProjectPayload) -> StoreResult<Project> {
        (**self).create_project(payload).await
    }

    async fn update_project(&self, id: DbId, payload: &ProjectPayload) -> StoreResult<Project> {
        (**self).update_project(id, payload).await
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<()> {
        (**self).delete_project(id).await
    }
}
