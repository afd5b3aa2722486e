use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw roster row as supplied by the caller (HTTP payload, CSV export).
///
/// Required fields are modeled as `Option` so a record missing one of them can
/// be rejected per candidate instead of being silently defaulted; upstream
/// data bugs must surface to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Subject name mapped to a proficiency tag, expected to be one of
    /// `high`, `medium`, or `low`. Anything else is a data-integrity error.
    #[serde(default)]
    pub expertise: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub performance_history: Option<Vec<PerformanceReview>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<CandidatePreferences>,
}

impl CandidateRecord {
    /// Diagnostic label for a record; roster rows are not required to carry a
    /// name, so fall back to the record's position in the input.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("candidate #{index}"),
        }
    }
}

/// Dated evaluation from a prior assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    pub score: f64,
    pub recorded_on: NaiveDate,
}

/// Assignment preferences a candidate has stated; both sets are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<BTreeSet<String>>,
}

/// Proficiency tag for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpertiseLevel {
    High,
    Medium,
    Low,
}

impl ExpertiseLevel {
    /// Parse a stored proficiency tag. Tags are trimmed and matched without
    /// case sensitivity; any unrecognized tag is invalid input, never a
    /// silent zero.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ExpertiseLevel::High => "high",
            ExpertiseLevel::Medium => "medium",
            ExpertiseLevel::Low => "low",
        }
    }
}

/// Validated candidate, produced from a [`CandidateRecord`] by the intake
/// guard. All fields are present and numerically sane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub label: String,
    pub expertise: BTreeMap<String, ExpertiseLevel>,
    pub experience_years: f64,
    pub distance_km: f64,
    pub performance_history: Vec<PerformanceReview>,
    pub preferred_schools: BTreeSet<String>,
    pub preferred_subjects: BTreeSet<String>,
}

/// Inputs shared by every candidate scored in one selection pass.
///
/// The reference date is an explicit input rather than a system-clock read so
/// the whole computation stays deterministic and testable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub subject: String,
    pub as_of: NaiveDate,
    /// School the assignment is for; not every invocation context has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_school: Option<String>,
}

impl SelectionRequest {
    pub fn new(subject: impl Into<String>, as_of: NaiveDate) -> Self {
        Self {
            subject: subject.into(),
            as_of,
            target_school: None,
        }
    }

    pub fn with_target_school(mut self, school: impl Into<String>) -> Self {
        self.target_school = Some(school.into());
        self
    }
}
