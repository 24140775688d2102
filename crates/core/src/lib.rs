//! Leadbook domain core.
//!
//! Pure, synchronous building blocks shared by the store layer and the CLI:
//!
//! - [`locale_number`]: pt-BR monetary/percentage parsing and formatting.
//! - [`error_tags`]: store error tag vocabulary and the tag normalizer.
//! - [`commission`]: project net totals and per-collaborator commission splits.
//! - [`company`]: company-key normalization and the Lead grouping index.
//! - [`stage`] / [`project_status`]: enumerated pipeline and project vocabularies.
//! - [`import`]: bulk import outcome shapes.
//! - [`log_redaction`]: payload summaries safe to write to logs.

pub mod commission;
pub mod company;
pub mod error;
pub mod error_tags;
pub mod import;
pub mod locale_number;
pub mod log_redaction;
pub mod project_status;
pub mod stage;
pub mod types;
pub mod validation;
