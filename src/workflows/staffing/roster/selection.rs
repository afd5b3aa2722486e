use serde::{Deserialize, Serialize};

use super::domain::{CandidateRecord, SelectionRequest};
use super::intake::{IntakeGuard, RosterViolation};
use super::scoring::{ScoreBreakdown, ScoringConfig, ScoringEngine};

/// Engine composing intake validation, scoring, and the final argmax.
///
/// Selection is a pure function of its inputs: no clock reads, no stored
/// state, no side effects.
pub struct SelectionEngine {
    guard: IntakeGuard,
    scoring: ScoringEngine,
}

impl SelectionEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            guard: IntakeGuard,
            scoring: ScoringEngine::new(config),
        }
    }

    /// Score every candidate independently and return the best-ranked one.
    ///
    /// Candidates tied for the maximum resolve to the earliest index, so
    /// identical inputs always produce identical results.
    pub fn select(
        &self,
        candidates: &[CandidateRecord],
        request: &SelectionRequest,
    ) -> Result<SelectionOutcome, SelectionError> {
        if candidates.is_empty() {
            return Err(SelectionError::EmptyRoster);
        }

        let mut scores = Vec::with_capacity(candidates.len());
        for (index, record) in candidates.iter().enumerate() {
            let label = record.label(index);
            let profile = self
                .guard
                .profile_from_record(record, index)
                .map_err(|violation| SelectionError::Candidate {
                    index,
                    label: label.clone(),
                    violation,
                })?;
            let breakdown = self.scoring.score(&profile, request).map_err(|violation| {
                SelectionError::Candidate {
                    index,
                    label: label.clone(),
                    violation,
                }
            })?;
            scores.push(CandidateScore {
                index,
                label,
                breakdown,
            });
        }

        // Strictly-greater keeps the earliest index on ties; totals are
        // finite because intake rejects non-finite inputs.
        let mut winner_index = 0;
        for score in &scores[1..] {
            if score.breakdown.total > scores[winner_index].breakdown.total {
                winner_index = score.index;
            }
        }

        Ok(SelectionOutcome {
            winner_index,
            winner: candidates[winner_index].clone(),
            scores,
        })
    }
}

/// Scored view of one candidate, index-aligned with the input roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub index: usize,
    pub label: String,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

/// Result of a selection pass: the winning record plus the full score trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutcome {
    pub winner_index: usize,
    pub winner: CandidateRecord,
    pub scores: Vec<CandidateScore>,
}

impl SelectionOutcome {
    pub fn winning_score(&self) -> &CandidateScore {
        &self.scores[self.winner_index]
    }
}

/// Error raised by a selection pass.
///
/// There is no partial result: any invalid input invalidates the whole
/// answer, and an empty roster is a distinct condition the caller must be
/// able to tell apart from a valid winner.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("no candidates available for selection")]
    EmptyRoster,
    #[error("candidate {index} ({label}): {violation}")]
    Candidate {
        index: usize,
        label: String,
        #[source]
        violation: RosterViolation,
    },
}
