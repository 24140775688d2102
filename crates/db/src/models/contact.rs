//! Contact view of a single Lead, and its DTO.

use leadbook_core::types::{DbId, Timestamp};
use leadbook_core::validation::not_blank_rule;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::lead::{Lead, LeadPayload};

/// A Lead's personal fields, seen as a contact of its customer group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    /// Id of the underlying Lead.
    pub id: DbId,
    pub customer_id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub job_title: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contact {
    pub fn from_lead(lead: &Lead, customer_id: DbId) -> Self {
        Self {
            id: lead.id,
            customer_id,
            name: lead.contact_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            linkedin: lead.linkedin.clone(),
            job_title: lead.job_title.clone(),
            notes: lead.notes.clone(),
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// DTO for creating or updating a contact.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ContactPayload {
    pub customer_id: DbId,
    #[validate(custom(function = "not_blank_rule"))]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
}

impl ContactPayload {
    /// Write the contact fields into a Lead payload. Absent optional fields
    /// keep the target's current value.
    pub fn apply_to(&self, target: &mut LeadPayload) {
        target.contact_name = self.name.trim().to_string();
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            target.email = email.trim().to_string();
        }
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            target.phone = phone.trim().to_string();
        }
        if let Some(linkedin) = &self.linkedin {
            target.linkedin = linkedin.clone();
        }
        if let Some(job_title) = &self.job_title {
            target.job_title = job_title.clone();
        }
        if let Some(notes) = &self.notes {
            target.notes = notes.clone();
        }
    }
}
