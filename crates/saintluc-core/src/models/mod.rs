pub(crate) mod patient;
mod result;

pub use patient::{AsaScore, Gender, PatientInput, SurgicalIndication, TreatedHta};
pub use result::ScoreResult;
