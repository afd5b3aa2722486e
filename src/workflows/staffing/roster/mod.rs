//! Substitute-teacher roster scoring and selection.
//!
//! The entry point is [`SelectionEngine::select`]: validate each caller-owned
//! record, score it against the request, and return the stable argmax with a
//! per-candidate score trail for auditing.

pub mod domain;
pub(crate) mod intake;
pub mod router;
pub(crate) mod scoring;
pub mod selection;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidatePreferences, CandidateProfile, CandidateRecord, ExpertiseLevel, PerformanceReview,
    SelectionRequest,
};
pub use intake::RosterViolation;
pub use router::{selection_router, SelectionSubmission};
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoreFactor, ScoringConfig, ScoringEngine};
pub use selection::{CandidateScore, SelectionEngine, SelectionError, SelectionOutcome};
