use super::super::domain::{CandidateProfile, SelectionRequest};
use super::super::intake::RosterViolation;
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

pub(crate) fn score_profile(
    profile: &CandidateProfile,
    request: &SelectionRequest,
    config: &ScoringConfig,
) -> Result<(Vec<ScoreComponent>, f64), RosterViolation> {
    let mut components = Vec::new();
    let mut total = 0.0;

    match profile.expertise.get(&request.subject) {
        Some(level) => {
            let points = config.expertise_points(*level);
            components.push(ScoreComponent {
                factor: ScoreFactor::SubjectExpertise,
                points,
                notes: format!("{} expertise in {}", level.label(), request.subject),
            });
            total += points;
        }
        None => {
            components.push(ScoreComponent {
                factor: ScoreFactor::SubjectExpertise,
                points: 0.0,
                notes: format!("no recorded expertise in {}", request.subject),
            });
        }
    }

    let years = profile.experience_years;
    let taper_after = config.experience_taper_after_years;
    let experience_points = if years <= taper_after {
        config.experience_rate_per_year * years
    } else {
        config.experience_rate_per_year * taper_after
            + config.experience_taper_rate * (years - taper_after)
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::Experience,
        points: experience_points,
        notes: format!("{years} year(s) of classroom experience"),
    });
    total += experience_points;

    let raw_penalty = profile.distance_km / config.proximity_divisor_km;
    let penalty = raw_penalty.min(config.proximity_penalty_cap);
    let notes = if raw_penalty > config.proximity_penalty_cap {
        format!(
            "{} km from the school (penalty capped at {})",
            profile.distance_km, config.proximity_penalty_cap
        )
    } else {
        format!("{} km from the school", profile.distance_km)
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::Proximity,
        points: -penalty,
        notes,
    });
    total -= penalty;

    // Recent reviews dominate: a review `review_decay_days` old counts half,
    // one from today counts in full. A review dated after the reference date
    // would decay to more than its face value, so it is a caller error.
    let mut review_points = 0.0;
    for review in &profile.performance_history {
        let days_ago = (request.as_of - review.recorded_on).num_days();
        if days_ago < 0 {
            return Err(RosterViolation::FutureReview {
                recorded_on: review.recorded_on,
                as_of: request.as_of,
            });
        }
        let decay = 1.0 / (1.0 + days_ago as f64 / config.review_decay_days);
        review_points += review.score * decay;
    }
    let notes = if profile.performance_history.is_empty() {
        "no performance reviews on file".to_string()
    } else {
        format!(
            "{} review(s), recency-weighted",
            profile.performance_history.len()
        )
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::PerformanceHistory,
        points: review_points,
        notes,
    });
    total += review_points;

    if let Some(school) = &request.target_school {
        if profile.preferred_schools.contains(school) {
            components.push(ScoreComponent {
                factor: ScoreFactor::SchoolPreference,
                points: config.preference_bonus_points,
                notes: format!("prefers assignments at {school}"),
            });
            total += config.preference_bonus_points;
        }
    }

    if profile.preferred_subjects.contains(&request.subject) {
        components.push(ScoreComponent {
            factor: ScoreFactor::SubjectPreference,
            points: config.preference_bonus_points,
            notes: format!("prefers teaching {}", request.subject),
        });
        total += config.preference_bonus_points;
    }

    Ok((components, total))
}
