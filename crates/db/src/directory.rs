//! Customers and contacts synthesized from Leads.
//!
//! Nothing here is stored. Every call lists the Leads afresh, buckets them
//! by normalized company and translates the requested Customer or Contact
//! operation into Lead writes. Customer identity is the lowest Lead id of a
//! bucket, so renames that make two companies collide (or diverge) merge or
//! split their customers on the next read.

use leadbook_core::company::{company_key, derive_groups, find_group, CompanyIndex};
use leadbook_core::error::CoreError;
use leadbook_core::stage::Stage;
use leadbook_core::types::DbId;
use leadbook_core::validation::{
    require_email_shape, require_phone_if_present, require_phone_shape,
};
use validator::Validate;

use crate::batch::run_batch;
use crate::invoke::{id_summary, invoke};
use crate::models::contact::{Contact, ContactPayload};
use crate::models::customer::{Customer, CustomerPayload};
use crate::models::lead::{placeholder_email, Lead, LeadPayload, DEFAULT_COUNTRY, DEFAULT_PHONE};
use crate::store::LeadStore;

pub struct Directory<S> {
    store: S,
}

impl<S: LeadStore> Directory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn leads(&self) -> Result<Vec<Lead>, CoreError> {
        invoke("list_leads", String::new(), self.store.list_leads()).await
    }

    // -----------------------------------------------------------------------
    // Customers
    // -----------------------------------------------------------------------

    /// One customer per company group, ordered by normalized company.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, CoreError> {
        let leads = self.leads().await?;
        Ok(derive_groups(&leads).iter().map(Customer::from_group).collect())
    }

    /// Create the Lead that backs a new customer. Its id is the customer id.
    pub async fn create_customer(&self, payload: &CustomerPayload) -> Result<Customer, CoreError> {
        payload.validate()?;
        require_phone_shape(payload.phone.as_deref(), "phone")?;

        let lead_payload = payload.to_new_lead();
        let lead = invoke(
            "create_lead",
            lead_payload.summary(),
            self.store.create_lead(&lead_payload),
        )
        .await?;

        tracing::info!(customer_id = lead.id, "customer created");
        Ok(Customer::from_primary(&lead, 1))
    }

    /// Write the customer-level fields to every Lead of the group.
    ///
    /// Each Lead keeps its own contact fields. A supplied phone must be a
    /// real number since it overwrites every Lead. Writes run concurrently
    /// and any rejection surfaces as [`CoreError::PartialBatch`].
    pub async fn update_customer(
        &self,
        id: DbId,
        payload: &CustomerPayload,
    ) -> Result<Customer, CoreError> {
        payload.validate()?;
        require_phone_if_present(payload.phone.as_deref(), "phone")?;

        let leads = self.leads().await?;
        let group = find_group(&leads, id).ok_or(CoreError::NotFound {
            entity: "customer",
            id,
        })?;

        let tasks: Vec<_> = group
            .members
            .iter()
            .map(|lead| {
                let mut merged = LeadPayload::from_lead(lead);
                payload.apply_to(&mut merged);
                let lead_id = lead.id;
                (lead_id, async move {
                    invoke(
                        "update_lead",
                        merged.summary(),
                        self.store.update_lead(lead_id, &merged),
                    )
                    .await
                })
            })
            .collect();

        let updated = run_batch(tasks).await.into_result("update_customer")?;
        tracing::info!(customer_id = id, leads = updated.len(), "customer updated");

        let count = updated.len();
        updated
            .into_iter()
            .map(|(_, lead)| lead)
            .min_by_key(|lead| lead.id)
            .map(|primary| Customer::from_primary(&primary, count))
            .ok_or(CoreError::NotFound {
                entity: "customer",
                id,
            })
    }

    /// Delete every Lead of the group. Returns the deleted Lead ids.
    pub async fn delete_customer(&self, id: DbId) -> Result<Vec<DbId>, CoreError> {
        let leads = self.leads().await?;
        let group = find_group(&leads, id).ok_or(CoreError::NotFound {
            entity: "customer",
            id,
        })?;

        let tasks: Vec<_> = group
            .member_ids()
            .into_iter()
            .map(|lead_id| {
                (lead_id, async move {
                    invoke(
                        "delete_lead",
                        id_summary(lead_id),
                        self.store.delete_lead(lead_id),
                    )
                    .await
                })
            })
            .collect();

        let deleted: Vec<DbId> = run_batch(tasks)
            .await
            .into_result("delete_customer")?
            .into_iter()
            .map(|(lead_id, ())| lead_id)
            .collect();
        tracing::info!(customer_id = id, leads = deleted.len(), "customer deleted");
        Ok(deleted)
    }

    // -----------------------------------------------------------------------
    // Contacts
    // -----------------------------------------------------------------------

    pub async fn list_contacts_by_customer(&self, customer_id: DbId) -> Result<Vec<Contact>, CoreError> {
        let leads = self.leads().await?;
        let group = find_group(&leads, customer_id).ok_or(CoreError::NotFound {
            entity: "customer",
            id: customer_id,
        })?;
        Ok(group
            .members
            .iter()
            .map(|lead| Contact::from_lead(lead, group.id()))
            .collect())
    }

    /// Add a Lead to an existing company group.
    ///
    /// The new Lead copies the group's company as typed, so it lands in the
    /// same bucket, and starts at the initial pipeline stage.
    pub async fn create_contact(&self, payload: &ContactPayload) -> Result<Contact, CoreError> {
        validate_contact(payload)?;

        let leads = self.leads().await?;
        let group = find_group(&leads, payload.customer_id).ok_or(CoreError::NotFound {
            entity: "customer",
            id: payload.customer_id,
        })?;
        let primary = group.primary;

        let mut lead_payload = LeadPayload {
            company: primary.company.clone(),
            email: placeholder_email("contact"),
            phone: DEFAULT_PHONE.to_string(),
            country: if primary.country.trim().is_empty() {
                DEFAULT_COUNTRY.to_string()
            } else {
                primary.country.clone()
            },
            state: primary.state.clone(),
            city: primary.city.clone(),
            company_size: primary.company_size.clone(),
            industry: primary.industry.clone(),
            stage: Stage::INITIAL,
            ..Default::default()
        };
        payload.apply_to(&mut lead_payload);

        let lead = invoke(
            "create_lead",
            lead_payload.summary(),
            self.store.create_lead(&lead_payload),
        )
        .await?;

        let customer_id = group.id().min(lead.id);
        tracing::info!(contact_id = lead.id, customer_id, "contact created");
        Ok(Contact::from_lead(&lead, customer_id))
    }

    /// Update a contact's Lead. A different `customer_id` moves the contact
    /// into that group by taking over its company.
    pub async fn update_contact(&self, id: DbId, payload: &ContactPayload) -> Result<Contact, CoreError> {
        validate_contact(payload)?;

        let mut leads = self.leads().await?;
        let current = leads
            .iter()
            .find(|lead| lead.id == id)
            .ok_or(CoreError::NotFound {
                entity: "contact",
                id,
            })?;
        let target = find_group(&leads, payload.customer_id).ok_or(CoreError::NotFound {
            entity: "customer",
            id: payload.customer_id,
        })?;

        let mut merged = LeadPayload::from_lead(current);
        if company_key(&current.company) != target.key {
            merged.company = target.primary.company.clone();
        }
        payload.apply_to(&mut merged);

        let lead = invoke(
            "update_lead",
            merged.summary(),
            self.store.update_lead(id, &merged),
        )
        .await?;

        // Group ids can shift when a primary moves out, so re-index with the
        // written Lead in place.
        if let Some(slot) = leads.iter_mut().find(|existing| existing.id == id) {
            *slot = lead.clone();
        }
        let customer_id = CompanyIndex::build(&leads).group_of(id).unwrap_or(id);
        tracing::info!(contact_id = id, customer_id, "contact updated");
        Ok(Contact::from_lead(&lead, customer_id))
    }

    pub async fn delete_contact(&self, id: DbId) -> Result<(), CoreError> {
        let leads = self.leads().await?;
        if !leads.iter().any(|lead| lead.id == id) {
            return Err(CoreError::NotFound {
                entity: "contact",
                id,
            });
        }
        invoke(
            "delete_lead",
            id_summary(id),
            self.store.delete_lead(id),
        )
        .await?;
        tracing::info!(contact_id = id, "contact deleted");
        Ok(())
    }
}

fn validate_contact(payload: &ContactPayload) -> Result<(), CoreError> {
    payload.validate()?;
    require_email_shape(payload.email.as_deref(), "email")?;
    require_phone_shape(payload.phone.as_deref(), "phone")?;
    Ok(())
}
