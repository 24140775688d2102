//! In-memory record store.
//!
//! Applies the same rules as the production store: payload validation,
//! `[RECORD_NOT_FOUND]` rejections for unknown ids, computed project fields
//! and cascading project deletes when their Lead goes away.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use leadbook_core::error::CoreError;
use leadbook_core::error_tags::{tagged_error, ErrorTag, RawError};
use leadbook_core::stage::Stage;
use leadbook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use validator::Validate;

use super::{CollaboratorStore, LeadStore, ProjectStore, StoreResult};
use crate::models::collaborator::{Collaborator, CollaboratorPayload};
use crate::models::lead::{Lead, LeadPayload};
use crate::models::project::{Project, ProjectPayload};

/// Serializable copy of every table, used to seed and dump a [`MemoryStore`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub leads: Vec<Lead>,
    pub collaborators: Vec<Collaborator>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Default)]
struct Tables {
    leads: BTreeMap<DbId, Lead>,
    collaborators: BTreeMap<DbId, Collaborator>,
    projects: BTreeMap<DbId, Project>,
    last_lead_id: DbId,
    last_collaborator_id: DbId,
    last_project_id: DbId,
}

impl Tables {
    fn next_lead_id(&mut self) -> DbId {
        self.last_lead_id += 1;
        self.last_lead_id
    }

    fn next_collaborator_id(&mut self) -> DbId {
        self.last_collaborator_id += 1;
        self.last_collaborator_id
    }

    fn next_project_id(&mut self) -> DbId {
        self.last_project_id += 1;
        self.last_project_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. Ids are kept; new records continue after the highest one.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let mut tables = Tables::default();
        for lead in snapshot.leads {
            tables.last_lead_id = tables.last_lead_id.max(lead.id);
            tables.leads.insert(lead.id, lead);
        }
        for collaborator in snapshot.collaborators {
            tables.last_collaborator_id = tables.last_collaborator_id.max(collaborator.id);
            tables.collaborators.insert(collaborator.id, collaborator);
        }
        for project in snapshot.projects {
            tables.last_project_id = tables.last_project_id.max(project.id);
            tables.projects.insert(project.id, project);
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        let tables = self.tables.read().await;
        Snapshot {
            leads: tables.leads.values().cloned().collect(),
            collaborators: tables.collaborators.values().cloned().collect(),
            projects: tables.projects.values().cloned().collect(),
        }
    }
}

fn invalid(entity: &str, errors: validator::ValidationErrors) -> RawError {
    RawError::new(format!(
        "invalid {entity}: {}",
        CoreError::from(errors).friendly_message()
    ))
}

fn missing(entity: &str, id: DbId) -> RawError {
    RawError::new(tagged_error(
        ErrorTag::RecordNotFound,
        format!("{entity} {id} not found"),
    ))
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

fn stamp_lead(id: DbId, payload: &LeadPayload, previous: Option<&Lead>, now: Timestamp) -> Lead {
    let entering_contacted =
        payload.stage == Stage::Contacted && previous.map_or(true, |lead| lead.stage != Stage::Contacted);
    let last_contacted_at = if entering_contacted {
        Some(now)
    } else {
        previous.and_then(|lead| lead.last_contacted_at)
    };

    Lead {
        id,
        // Kept as typed; grouping normalizes it.
        company: payload.company.clone(),
        contact_name: trimmed(&payload.contact_name),
        job_title: trimmed(&payload.job_title),
        email: trimmed(&payload.email),
        phone: trimmed(&payload.phone),
        linkedin: trimmed(&payload.linkedin),
        location: trimmed(&payload.location),
        country: trimmed(&payload.country),
        state: trimmed(&payload.state),
        city: trimmed(&payload.city),
        company_size: trimmed(&payload.company_size),
        industry: trimmed(&payload.industry),
        interest: trimmed(&payload.interest),
        stage: payload.stage,
        notes: trimmed(&payload.notes),
        rating: payload.rating,
        created_at: previous.map_or(now, |lead| lead.created_at),
        updated_at: now,
        last_contacted_at,
        next_followup_at: payload.next_followup_at,
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        Ok(self.tables.read().await.leads.values().cloned().collect())
    }

    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead> {
        payload.validate().map_err(|e| invalid("lead", e))?;
        let mut tables = self.tables.write().await;
        let id = tables.next_lead_id();
        let lead = stamp_lead(id, payload, None, Utc::now());
        tables.leads.insert(id, lead.clone());
        Ok(lead)
    }

    async fn update_lead(&self, id: DbId, payload: &LeadPayload) -> StoreResult<Lead> {
        payload.validate().map_err(|e| invalid("lead", e))?;
        let mut tables = self.tables.write().await;
        let current = tables.leads.get(&id).ok_or_else(|| missing("lead", id))?;
        let lead = stamp_lead(id, payload, Some(current), Utc::now());
        tables.leads.insert(id, lead.clone());
        Ok(lead)
    }

    async fn delete_lead(&self, id: DbId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.leads.remove(&id).ok_or_else(|| missing("lead", id))?;
        tables.projects.retain(|_, project| project.lead_id != id);
        Ok(())
    }
}

#[async_trait]
impl CollaboratorStore for MemoryStore {
    async fn list_collaborators(&self) -> StoreResult<Vec<Collaborator>> {
        let mut roster: Vec<Collaborator> = self
            .tables
            .read()
            .await
            .collaborators
            .values()
            .cloned()
            .collect();
        // Roster order is by name; commission rows follow it.
        roster.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(roster)
    }

    async fn create_collaborator(&self, payload: &CollaboratorPayload) -> StoreResult<Collaborator> {
        payload.validate().map_err(|e| invalid("collaborator", e))?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let collaborator = Collaborator {
            id: tables.next_collaborator_id(),
            name: trimmed(&payload.name),
            notes: payload.notes.as_deref().map(trimmed).unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        tables
            .collaborators
            .insert(collaborator.id, collaborator.clone());
        Ok(collaborator)
    }

    async fn update_collaborator(
        &self,
        id: DbId,
        payload: &CollaboratorPayload,
    ) -> StoreResult<Collaborator> {
        payload.validate().map_err(|e| invalid("collaborator", e))?;
        let mut tables = self.tables.write().await;
        let current = tables
            .collaborators
            .get_mut(&id)
            .ok_or_else(|| missing("collaborator", id))?;
        current.name = trimmed(&payload.name);
        current.notes = payload.notes.as_deref().map(trimmed).unwrap_or_default();
        current.updated_at = Utc::now();
        Ok(current.clone())
    }

    async fn delete_collaborator(&self, id: DbId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .collaborators
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing("collaborator", id))
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn list_projects(&self) -> StoreResult<Vec<Project>> {
        Ok(self.tables.read().await.projects.values().cloned().collect())
    }

    async fn create_project(&self, payload: &ProjectPayload) -> StoreResult<Project> {
        payload.validate().map_err(|e| invalid("project", e))?;
        let mut tables = self.tables.write().await;
        if !tables.leads.contains_key(&payload.lead_id) {
            return Err(missing("lead", payload.lead_id));
        }
        let now = Utc::now();
        let id = tables.next_project_id();
        let project = payload.clone().into_project(id, now, now);
        tables.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn update_project(&self, id: DbId, payload: &ProjectPayload) -> StoreResult<Project> {
        payload.validate().map_err(|e| invalid("project", e))?;
        let mut tables = self.tables.write().await;
        if !tables.leads.contains_key(&payload.lead_id) {
            return Err(missing("lead", payload.lead_id));
        }
        let created_at = tables
            .projects
            .get(&id)
            .map(|project| project.created_at)
            .ok_or_else(|| missing("project", id))?;
        let project = payload.clone().into_project(id, created_at, Utc::now());
        tables.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn delete_project(&self, id: DbId) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .projects
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing("project", id))
    }
}

#[cfg(test)]
mod tests {
    use leadbook_core::error_tags::normalize_error;

    use super::*;

    fn payload(company: &str, contact: &str) -> LeadPayload {
        LeadPayload {
            company: company.into(),
            contact_name: contact.into(),
            email: format!("{}@example.com", contact.to_lowercase()),
            phone: "11987654321".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let a = store.create_lead(&payload("Acme", "Ana")).await.unwrap();
        let b = store.create_lead(&payload("Acme", "Bia")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.list_leads().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn ids_continue_after_seeded_snapshot() {
        let store = MemoryStore::with_snapshot(Snapshot {
            leads: vec![Lead {
                id: 41,
                ..Default::default()
            }],
            ..Default::default()
        });
        let lead = store.create_lead(&payload("Acme", "Ana")).await.unwrap();
        assert_eq!(lead.id, 42);
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_without_tag() {
        let store = MemoryStore::new();
        let err = store.create_lead(&payload("Acme", " ")).await.unwrap_err();
        assert!(err.message().contains("contact_name"));
        assert_eq!(normalize_error(&err).tag, None);
    }

    #[tokio::test]
    async fn unknown_id_is_rejected_with_tag() {
        let store = MemoryStore::new();
        let err = store.delete_lead(9).await.unwrap_err();
        assert_eq!(
            normalize_error(&err).tag.as_deref(),
            Some("RECORD_NOT_FOUND")
        );
    }

    #[tokio::test]
    async fn entering_contacted_stamps_last_contact() {
        let store = MemoryStore::new();
        let lead = store.create_lead(&payload("Acme", "Ana")).await.unwrap();
        assert!(lead.last_contacted_at.is_none());

        let mut next = LeadPayload::from_lead(&lead);
        next.stage = Stage::Contacted;
        let updated = store.update_lead(lead.id, &next).await.unwrap();
        assert!(updated.last_contacted_at.is_some());
        assert_eq!(updated.created_at, lead.created_at);
    }

    #[tokio::test]
    async fn deleting_a_lead_cascades_to_its_projects() {
        let store = MemoryStore::new();
        let lead = store.create_lead(&payload("Acme", "Ana")).await.unwrap();
        store
            .create_project(&ProjectPayload {
                lead_id: lead.id,
                name: "Rollout".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        store.delete_lead(lead.id).await.unwrap();
        assert!(store.list_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn project_requires_existing_lead() {
        let store = MemoryStore::new();
        let err = store
            .create_project(&ProjectPayload {
                lead_id: 3,
                name: "Rollout".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(err.message().starts_with("[RECORD_NOT_FOUND]"));
    }
}
