//! `matchkit-core`: record model and the text utilities shared by the engine
//! and its callers.

pub mod rationale;
pub mod record;
pub mod value;

pub use rationale::build_rationale;
pub use record::{to_records, Record, RecordKind, ToRecord};
pub use value::serialize_value;
