pub mod import;
pub mod roster;

pub use import::{RosterCsvImporter, RosterImportError};
pub use roster::{SelectionEngine, SelectionOutcome, SelectionRequest};
