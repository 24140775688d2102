//! Shared fixtures for the record-layer integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Barrier;
use leadbook_core::error_tags::RawError;
use leadbook_core::types::DbId;
use leadbook_db::models::lead::{Lead, LeadPayload};
use leadbook_db::store::{LeadStore, StoreResult};
use leadbook_db::{MemoryStore, Snapshot};

/// A stored Lead with valid contact fields.
pub fn lead(id: DbId, company: &str, contact: &str) -> Lead {
    Lead {
        id,
        company: company.to_string(),
        contact_name: contact.to_string(),
        email: format!("{}@example.com", contact.to_lowercase()),
        phone: "11987654321".to_string(),
        country: "Brasil".to_string(),
        ..Default::default()
    }
}

pub fn seeded_store(leads: Vec<Lead>) -> MemoryStore {
    MemoryStore::with_snapshot(Snapshot {
        leads,
        ..Default::default()
    })
}

/// Lead store that rejects writes to chosen ids and counts every call.
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub failing_ids: HashSet<DbId>,
    pub reason: String,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_ids: HashSet::new(),
            reason: "database is locked".to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, ids: &[DbId]) -> Self {
        self.failing_ids.extend(ids);
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = reason.to_string();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, id: DbId) -> StoreResult<()> {
        if self.failing_ids.contains(&id) {
            return Err(RawError::new(self.reason.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl LeadStore for FlakyStore {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_leads().await
    }

    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_lead(payload).await
    }

    async fn update_lead(&self, id: DbId, payload: &LeadPayload) -> StoreResult<Lead> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check(id)?;
        self.inner.update_lead(id, payload).await
    }

    async fn delete_lead(&self, id: DbId) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.check(id)?;
        self.inner.delete_lead(id).await
    }
}

/// Lead store whose writes block until `parties` of them are in flight.
///
/// Sequential writes never get past the first one.
pub struct BarrierStore {
    pub inner: MemoryStore,
    barrier: Barrier,
}

impl BarrierStore {
    pub fn new(inner: MemoryStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

#[async_trait]
impl LeadStore for BarrierStore {
    async fn list_leads(&self) -> StoreResult<Vec<Lead>> {
        self.inner.list_leads().await
    }

    async fn create_lead(&self, payload: &LeadPayload) -> StoreResult<Lead> {
        self.inner.create_lead(payload).await
    }

    async fn update_lead(&self, id: DbId, payload: &LeadPayload) -> StoreResult<Lead> {
        self.barrier.wait().await;
        self.inner.update_lead(id, payload).await
    }

    async fn delete_lead(&self, id: DbId) -> StoreResult<()> {
        self.barrier.wait().await;
        self.inner.delete_lead(id).await
    }
}
