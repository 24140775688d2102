//! Lead record model and DTO.

use chrono::{NaiveDate, Utc};
use leadbook_core::company::CompanyMember;
use leadbook_core::stage::Stage;
use leadbook_core::types::{DbId, Timestamp};
use leadbook_core::validation::{email_rule, not_blank_rule, phone_rule};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Country given to synthesized Leads that do not carry one.
pub const DEFAULT_COUNTRY: &str = "Brasil";

/// Phone given to synthesized Leads that do not carry one.
pub const DEFAULT_PHONE: &str = "0000000000";

/// Domain of generated placeholder addresses. `.invalid` never resolves.
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "placeholder.invalid";

/// A sales lead as stored by the record store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lead {
    pub id: DbId,
    pub company: String,
    pub contact_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub location: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub company_size: String,
    pub industry: String,
    pub interest: String,
    pub stage: Stage,
    pub notes: String,
    pub rating: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub last_contacted_at: Option<Timestamp>,
    pub next_followup_at: Option<NaiveDate>,
}

impl CompanyMember for Lead {
    fn member_id(&self) -> DbId {
        self.id
    }

    fn company(&self) -> &str {
        &self.company
    }
}

/// Full Lead payload for create and update.
///
/// Updates replace every field, so partial edits start from
/// [`LeadPayload::from_lead`] and override only what changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LeadPayload {
    pub company: String,
    #[validate(custom(function = "not_blank_rule"))]
    pub contact_name: String,
    pub job_title: String,
    #[validate(custom(function = "email_rule"))]
    pub email: String,
    #[validate(custom(function = "phone_rule"))]
    pub phone: String,
    pub linkedin: String,
    pub location: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub company_size: String,
    pub industry: String,
    pub interest: String,
    pub stage: Stage,
    pub notes: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
    pub next_followup_at: Option<NaiveDate>,
}

impl LeadPayload {
    /// Copy every writable field of an existing Lead.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            company: lead.company.clone(),
            contact_name: lead.contact_name.clone(),
            job_title: lead.job_title.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            linkedin: lead.linkedin.clone(),
            location: lead.location.clone(),
            country: lead.country.clone(),
            state: lead.state.clone(),
            city: lead.city.clone(),
            company_size: lead.company_size.clone(),
            industry: lead.industry.clone(),
            interest: lead.interest.clone(),
            stage: lead.stage,
            notes: lead.notes.clone(),
            rating: lead.rating,
            next_followup_at: lead.next_followup_at,
        }
    }

    /// Log-safe JSON view of the payload.
    pub fn summary(&self) -> String {
        leadbook_core::log_redaction::build_payload_summary(&[(
            "payload",
            serde_json::to_value(self).unwrap_or(serde_json::Value::Null),
        )])
    }
}

/// Generate a unique placeholder address for a Lead created without one.
pub fn placeholder_email(kind: &str) -> String {
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{kind}-{}-{}@{PLACEHOLDER_EMAIL_DOMAIN}",
        Utc::now().timestamp_millis(),
        &nonce[..8]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> LeadPayload {
        LeadPayload {
            company: "Acme".into(),
            contact_name: "Ana".into(),
            email: "ana@acme.com".into(),
            phone: "(11) 98765-4321".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn blank_company_is_allowed() {
        let payload = LeadPayload {
            company: "  ".into(),
            ..valid_payload()
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn rejects_missing_contact_bad_email_and_short_phone() {
        let payload = LeadPayload {
            contact_name: " ".into(),
            email: "ana".into(),
            phone: "1234".into(),
            rating: Some(9),
            ..valid_payload()
        };
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("contact_name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("rating"));
    }

    #[test]
    fn from_lead_copies_writable_fields() {
        let lead = Lead {
            id: 3,
            company: "Acme".into(),
            contact_name: "Ana".into(),
            stage: Stage::Proposal,
            rating: Some(4),
            ..Default::default()
        };
        let payload = LeadPayload::from_lead(&lead);
        assert_eq!(payload.company, "Acme");
        assert_eq!(payload.stage, Stage::Proposal);
        assert_eq!(payload.rating, Some(4));
    }

    #[test]
    fn placeholder_emails_are_unique_and_well_formed() {
        let a = placeholder_email("customer");
        let b = placeholder_email("customer");
        assert_ne!(a, b);
        assert!(leadbook_core::validation::is_valid_email(&a));
        assert!(a.starts_with("customer-"));
    }

    #[test]
    fn summary_redacts_personal_fields() {
        let summary = valid_payload().summary();
        assert!(!summary.contains("ana@acme.com"));
        assert!(summary.contains("[REDACTED]"));
    }
}
