use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::domain::{CandidateProfile, CandidateRecord, ExpertiseLevel};

/// Data-integrity failure in a single roster record.
///
/// Scoring an invalid record would silently mis-rank it, so every violation
/// aborts the selection pass instead of defaulting the offending value.
#[derive(Debug, thiserror::Error)]
pub enum RosterViolation {
    #[error("record is missing required field `{field}`")]
    MissingField { field: &'static str },
    #[error("unknown expertise level `{found}` for subject `{subject}` (expected high, medium, or low)")]
    InvalidExpertiseLevel { subject: String, found: String },
    #[error("experience_years must be a finite, non-negative number (found {found})")]
    InvalidExperience { found: f64 },
    #[error("distance_km must be a finite, non-negative number (found {found})")]
    InvalidDistance { found: f64 },
    #[error("performance review dated {recorded_on} has a non-finite score")]
    InvalidReviewScore { recorded_on: NaiveDate },
    #[error("performance review dated {recorded_on} is after the reference date {as_of}")]
    FutureReview {
        recorded_on: NaiveDate,
        as_of: NaiveDate,
    },
}

/// Guard converting raw roster rows into validated [`CandidateProfile`]s.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// Validate one record, failing fast on the first violation.
    ///
    /// Review dates are not checked here: whether a review sits in the future
    /// depends on the reference date, which is only known at scoring time.
    pub fn profile_from_record(
        &self,
        record: &CandidateRecord,
        index: usize,
    ) -> Result<CandidateProfile, RosterViolation> {
        let raw_expertise = record
            .expertise
            .as_ref()
            .ok_or(RosterViolation::MissingField { field: "expertise" })?;
        let experience_years = record
            .experience_years
            .ok_or(RosterViolation::MissingField {
                field: "experience_years",
            })?;
        let distance_km = record.distance_km.ok_or(RosterViolation::MissingField {
            field: "distance_km",
        })?;
        let performance_history =
            record
                .performance_history
                .as_ref()
                .ok_or(RosterViolation::MissingField {
                    field: "performance_history",
                })?;

        if !experience_years.is_finite() || experience_years < 0.0 {
            return Err(RosterViolation::InvalidExperience {
                found: experience_years,
            });
        }
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(RosterViolation::InvalidDistance { found: distance_km });
        }

        let mut expertise = BTreeMap::new();
        for (subject, tag) in raw_expertise {
            let level = ExpertiseLevel::parse(tag).ok_or_else(|| {
                RosterViolation::InvalidExpertiseLevel {
                    subject: subject.clone(),
                    found: tag.clone(),
                }
            })?;
            expertise.insert(subject.clone(), level);
        }

        for review in performance_history {
            if !review.score.is_finite() {
                return Err(RosterViolation::InvalidReviewScore {
                    recorded_on: review.recorded_on,
                });
            }
        }

        let (preferred_schools, preferred_subjects) = match &record.preferences {
            Some(preferences) => (
                preferences.schools.clone().unwrap_or_default(),
                preferences.subjects.clone().unwrap_or_default(),
            ),
            None => (BTreeSet::new(), BTreeSet::new()),
        };

        Ok(CandidateProfile {
            label: record.label(index),
            expertise,
            experience_years,
            distance_km,
            performance_history: performance_history.clone(),
            preferred_schools,
            preferred_subjects,
        })
    }
}
