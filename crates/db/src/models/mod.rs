//! Record structs and DTOs.
//!
//! Persisted records (`Lead`, `Collaborator`, `Project`) each come with a
//! `Deserialize` payload DTO used for both create and update. `Customer` and
//! `Contact` are views derived from Leads and are never stored.

pub mod collaborator;
pub mod contact;
pub mod customer;
pub mod lead;
pub mod project;
