mod outcome;
mod record;

pub use outcome::{StructureOutcome, TitleOutcome};
pub use record::{next_record_id, Enhancement, PromptRecord};
