use serde::{Deserialize, Serialize};

use super::super::domain::ExpertiseLevel;

/// Weight table backing the selection rubric.
///
/// The defaults are the contract constants; district deployments may tune
/// them, but every term keeps its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub expertise_high_points: f64,
    pub expertise_medium_points: f64,
    pub expertise_low_points: f64,
    /// Points per year of experience up to the taper threshold.
    pub experience_rate_per_year: f64,
    /// Points per year beyond the taper threshold; later years matter less.
    pub experience_taper_rate: f64,
    pub experience_taper_after_years: f64,
    /// One penalty point per this many kilometers from the school.
    pub proximity_divisor_km: f64,
    /// The proximity penalty saturates here so distance never dominates.
    pub proximity_penalty_cap: f64,
    /// A review this many days old counts for half its score.
    pub review_decay_days: f64,
    pub preference_bonus_points: f64,
}

impl ScoringConfig {
    pub(crate) fn expertise_points(&self, level: ExpertiseLevel) -> f64 {
        match level {
            ExpertiseLevel::High => self.expertise_high_points,
            ExpertiseLevel::Medium => self.expertise_medium_points,
            ExpertiseLevel::Low => self.expertise_low_points,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            expertise_high_points: 30.0,
            expertise_medium_points: 20.0,
            expertise_low_points: 10.0,
            experience_rate_per_year: 0.5,
            experience_taper_rate: 0.25,
            experience_taper_after_years: 10.0,
            proximity_divisor_km: 10.0,
            proximity_penalty_cap: 10.0,
            review_decay_days: 365.0,
            preference_bonus_points: 5.0,
        }
    }
}
