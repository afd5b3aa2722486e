use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::workflows::staffing::roster::domain::{
    CandidatePreferences, CandidateRecord, PerformanceReview, SelectionRequest,
};
use crate::workflows::staffing::roster::router::selection_router;
use crate::workflows::staffing::roster::scoring::{ScoreBreakdown, ScoreFactor, ScoringConfig};
use crate::workflows::staffing::roster::selection::SelectionEngine;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

/// Baseline record that scores zero on every term.
pub(super) fn candidate(name: &str) -> CandidateRecord {
    CandidateRecord {
        name: Some(name.to_string()),
        expertise: Some(BTreeMap::new()),
        experience_years: Some(0.0),
        distance_km: Some(0.0),
        performance_history: Some(Vec::new()),
        preferences: None,
    }
}

pub(super) fn with_expertise(
    mut record: CandidateRecord,
    subject: &str,
    level: &str,
) -> CandidateRecord {
    record
        .expertise
        .get_or_insert_with(BTreeMap::new)
        .insert(subject.to_string(), level.to_string());
    record
}

/// Attach a review dated `days_before` days before the reference date;
/// negative values date the review in the future.
pub(super) fn with_review(
    mut record: CandidateRecord,
    score: f64,
    days_before: i64,
) -> CandidateRecord {
    record
        .performance_history
        .get_or_insert_with(Vec::new)
        .push(PerformanceReview {
            score,
            recorded_on: as_of() - Duration::days(days_before),
        });
    record
}

pub(super) fn with_preferences(
    mut record: CandidateRecord,
    schools: &[&str],
    subjects: &[&str],
) -> CandidateRecord {
    record.preferences = Some(CandidatePreferences {
        schools: Some(schools.iter().map(|school| school.to_string()).collect()),
        subjects: Some(subjects.iter().map(|subject| subject.to_string()).collect()),
    });
    record
}

pub(super) fn request(subject: &str) -> SelectionRequest {
    SelectionRequest::new(subject, as_of())
}

pub(super) fn engine() -> SelectionEngine {
    SelectionEngine::new(ScoringConfig::default())
}

pub(super) fn router() -> axum::Router {
    selection_router(Arc::new(engine()))
}

pub(super) fn component_points(breakdown: &ScoreBreakdown, factor: ScoreFactor) -> Option<f64> {
    breakdown
        .components
        .iter()
        .find(|component| component.factor == factor)
        .map(|component| component.points)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
