pub mod currency;
pub mod formatter;
pub mod insights;
pub mod ltv;

pub use crate::domain::model::{EventOutcome, FieldRole, FieldState, FormEvent, RawValue, SubmitOutcome};
pub use crate::domain::ports::Document;
pub use crate::utils::error::Result;
