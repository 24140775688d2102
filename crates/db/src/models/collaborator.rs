//! Collaborator entity model and DTO.

use leadbook_core::commission::Payee;
use leadbook_core::types::{DbId, Timestamp};
use leadbook_core::validation::not_blank_rule;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Someone who can earn commissions. Role membership lives on projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collaborator {
    pub id: DbId,
    pub name: String,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Payee for Collaborator {
    fn payee_id(&self) -> DbId {
        self.id
    }

    fn payee_name(&self) -> &str {
        &self.name
    }
}

/// DTO for creating or updating a collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CollaboratorPayload {
    #[validate(custom(function = "not_blank_rule"))]
    pub name: String,
    pub notes: Option<String>,
}
