pub mod reveal;
pub mod session;

pub use reveal::Reveal;
pub use session::{DisplayError, Generated, Notice, Outcome, SessionView, SetupError, Workspace};
