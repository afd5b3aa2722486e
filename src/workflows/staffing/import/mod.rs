//! CSV roster import.
//!
//! Districts hand us roster exports as CSV; this adapter turns them into
//! [`CandidateRecord`]s. It deliberately does not validate scoring inputs —
//! that stays with the selection engine so HTTP and CSV callers get the same
//! fail-fast behavior.

mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::staffing::roster::domain::CandidateRecord;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: usize, detail: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Row { line, detail } => {
                write!(f, "roster row {} could not be parsed: {}", line, detail)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterCsvImporter;

impl RosterCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CandidateRecord>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, RosterImportError> {
        parser::parse_roster(reader)
    }
}
