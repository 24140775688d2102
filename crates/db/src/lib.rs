//! Leadbook record layer.
//!
//! - [`models`]: Lead, Collaborator and Project records plus the derived
//!   Customer/Contact views and their payload DTOs.
//! - [`store`]: the asynchronous CRUD contract of the external record store
//!   and an in-memory implementation of it.
//! - [`invoke`]: instrumented store calls that normalize rejections.
//! - [`directory`]: customers and contacts synthesized from Leads.
//! - [`finance`]: collaborator roster and project commission service.

pub mod batch;
pub mod directory;
pub mod finance;
pub mod invoke;
pub mod models;
pub mod store;

pub use directory::Directory;
pub use finance::FinanceService;
pub use store::memory::{MemoryStore, Snapshot};
