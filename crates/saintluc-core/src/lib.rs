//! saintluc-core
//!
//! Pure domain types for the Saint Luc post-operative blood test score:
//! the typed patient record, the draft form it is validated from, and the
//! immutable score result. No I/O; this is the shared vocabulary of the
//! scoring and CLI crates.

pub mod error;
pub mod form;
pub mod models;

pub use error::{CoreError, FieldError, ValidationErrors};
pub use form::{Field, PatientForm};
pub use models::{AsaScore, Gender, PatientInput, ScoreResult, SurgicalIndication, TreatedHta};
