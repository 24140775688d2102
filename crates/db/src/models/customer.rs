//! Customer view derived from a company group of Leads, and its DTO.

use leadbook_core::company::{display_company, CompanyGroup};
use leadbook_core::stage::Stage;
use leadbook_core::types::{DbId, Timestamp};
use leadbook_core::validation::not_blank_rule;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::lead::{placeholder_email, Lead, LeadPayload, DEFAULT_COUNTRY, DEFAULT_PHONE};

/// A company as seen through its primary (lowest-id) Lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    /// Id of the primary Lead.
    pub id: DbId,
    pub name: String,
    pub notes: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub company_size: String,
    pub industry: String,
    pub rating: Option<i64>,
    /// Number of Leads (contacts) in the group.
    pub contact_count: usize,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Customer {
    pub fn from_group(group: &CompanyGroup<'_, Lead>) -> Self {
        Self::from_primary(group.primary, group.members.len())
    }

    pub fn from_primary(primary: &Lead, contact_count: usize) -> Self {
        Self {
            id: primary.id,
            name: display_company(&primary.company).to_string(),
            notes: primary.notes.clone(),
            phone: primary.phone.clone(),
            country: primary.country.clone(),
            state: primary.state.clone(),
            city: primary.city.clone(),
            company_size: primary.company_size.clone(),
            industry: primary.industry.clone(),
            rating: primary.rating,
            contact_count,
            created_at: primary.created_at,
            updated_at: primary.updated_at,
        }
    }
}

/// DTO for creating or updating a customer.
///
/// On update only `name` and the fields that are `Some` are written to
/// every Lead of the group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CustomerPayload {
    #[validate(custom(function = "not_blank_rule"))]
    pub name: String,
    pub notes: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
}

impl CustomerPayload {
    /// Merge the customer-level fields into a Lead payload, leaving its
    /// contact-specific fields untouched.
    pub fn apply_to(&self, target: &mut LeadPayload) {
        target.company = self.name.trim().to_string();
        if let Some(notes) = &self.notes {
            target.notes = notes.clone();
        }
        if let Some(phone) = &self.phone {
            target.phone = phone.clone();
        }
        if let Some(country) = &self.country {
            target.country = country.clone();
        }
        if let Some(state) = &self.state {
            target.state = state.clone();
        }
        if let Some(city) = &self.city {
            target.city = city.clone();
        }
        if let Some(size) = &self.company_size {
            target.company_size = size.clone();
        }
        if let Some(industry) = &self.industry {
            target.industry = industry.clone();
        }
        if self.rating.is_some() {
            target.rating = self.rating;
        }
    }

    /// Synthesize the Lead that backs a brand-new customer.
    pub fn to_new_lead(&self) -> LeadPayload {
        let mut payload = LeadPayload {
            contact_name: self.name.trim().to_string(),
            email: placeholder_email("customer"),
            phone: DEFAULT_PHONE.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            stage: Stage::INITIAL,
            ..Default::default()
        };
        self.apply_to(&mut payload);
        if payload.phone.trim().is_empty() {
            payload.phone = DEFAULT_PHONE.to_string();
        }
        if payload.country.trim().is_empty() {
            payload.country = DEFAULT_COUNTRY.to_string();
        }
        payload
    }
}
