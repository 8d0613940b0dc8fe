pub mod normalize;
pub mod types;

pub use normalize::normalize;
pub use types::{next_record_id, Enhancement, PromptRecord, StructureOutcome, TitleOutcome};
