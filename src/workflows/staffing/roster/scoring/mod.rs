mod config;
mod rules;

pub use config::ScoringConfig;

use serde::{Deserialize, Serialize};

use super::domain::{CandidateProfile, SelectionRequest};
use super::intake::RosterViolation;

/// Stateless engine applying the rubric configuration to a validated profile.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(
        &self,
        profile: &CandidateProfile,
        request: &SelectionRequest,
    ) -> Result<ScoreBreakdown, RosterViolation> {
        let (components, total) = rules::score_profile(profile, request, &self.config)?;
        Ok(ScoreBreakdown { total, components })
    }
}

/// Discrete contribution to a candidate's total, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

/// Factors permitted in the selection rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    SubjectExpertise,
    Experience,
    Proximity,
    PerformanceHistory,
    SchoolPreference,
    SubjectPreference,
}

/// Scored view of a single candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}
