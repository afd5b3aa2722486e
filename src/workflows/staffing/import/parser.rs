use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::normalizer::{normalize_school, normalize_subject};
use super::RosterImportError;
use crate::workflows::staffing::roster::domain::{
    CandidatePreferences, CandidateRecord, PerformanceReview,
};

/// Cell formats, as produced by the district HR export:
/// `Expertise` is `subject:level` pairs, `Performance History` is
/// `date=score` pairs, and the preference columns are plain lists. All three
/// use `;` between entries.
/// An empty cell under a present column reads as "none of them" (no expertise,
/// no reviews); a column that is absent from the export altogether leaves the
/// field unset so the selection engine can reject the record.
#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Expertise", default)]
    expertise: Option<String>,
    #[serde(
        rename = "Experience Years",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    experience_years: Option<String>,
    #[serde(
        rename = "Distance Km",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    distance_km: Option<String>,
    #[serde(rename = "Performance History", default)]
    performance_history: Option<String>,
    #[serde(
        rename = "Preferred Schools",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    preferred_schools: Option<String>,
    #[serde(
        rename = "Preferred Subjects",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    preferred_subjects: Option<String>,
}

pub(crate) fn parse_roster<R: Read>(reader: R) -> Result<Vec<CandidateRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (offset, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
        // Header occupies line 1.
        let line = offset + 2;
        let row = row?;
        records.push(record_from_row(row, line)?);
    }

    Ok(records)
}

fn record_from_row(row: RosterRow, line: usize) -> Result<CandidateRecord, RosterImportError> {
    let expertise = row
        .expertise
        .as_deref()
        .map(|cell| parse_expertise(cell, line))
        .transpose()?;
    let experience_years = row
        .experience_years
        .as_deref()
        .map(|cell| parse_number(cell, "Experience Years", line))
        .transpose()?;
    let distance_km = row
        .distance_km
        .as_deref()
        .map(|cell| parse_number(cell, "Distance Km", line))
        .transpose()?;
    let performance_history = row
        .performance_history
        .as_deref()
        .map(|cell| parse_reviews(cell, line))
        .transpose()?;

    let schools = row
        .preferred_schools
        .as_deref()
        .map(|cell| parse_list(cell, normalize_school));
    let subjects = row
        .preferred_subjects
        .as_deref()
        .map(|cell| parse_list(cell, normalize_subject));
    let preferences = if schools.is_none() && subjects.is_none() {
        None
    } else {
        Some(CandidatePreferences { schools, subjects })
    };

    Ok(CandidateRecord {
        name: Some(row.name),
        expertise,
        experience_years,
        distance_km,
        performance_history,
        preferences,
    })
}

fn parse_expertise(
    cell: &str,
    line: usize,
) -> Result<BTreeMap<String, String>, RosterImportError> {
    let mut expertise = BTreeMap::new();
    for entry in non_empty_entries(cell) {
        let (subject, level) = entry.split_once(':').ok_or_else(|| RosterImportError::Row {
            line,
            detail: format!("expected `subject:level` in Expertise, found `{entry}`"),
        })?;
        expertise.insert(normalize_subject(subject), level.trim().to_string());
    }
    Ok(expertise)
}

fn parse_reviews(cell: &str, line: usize) -> Result<Vec<PerformanceReview>, RosterImportError> {
    let mut reviews = Vec::new();
    for entry in non_empty_entries(cell) {
        let (date, score) = entry.split_once('=').ok_or_else(|| RosterImportError::Row {
            line,
            detail: format!("expected `date=score` in Performance History, found `{entry}`"),
        })?;
        let recorded_on = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|err| {
            RosterImportError::Row {
                line,
                detail: format!("invalid review date `{}` ({err})", date.trim()),
            }
        })?;
        let score = score
            .trim()
            .parse::<f64>()
            .map_err(|err| RosterImportError::Row {
                line,
                detail: format!("invalid review score `{}` ({err})", score.trim()),
            })?;
        reviews.push(PerformanceReview { score, recorded_on });
    }
    Ok(reviews)
}

fn parse_number(cell: &str, column: &str, line: usize) -> Result<f64, RosterImportError> {
    cell.trim()
        .parse::<f64>()
        .map_err(|err| RosterImportError::Row {
            line,
            detail: format!("invalid number `{}` in {column} ({err})", cell.trim()),
        })
}

fn parse_list(cell: &str, normalize: impl Fn(&str) -> String) -> BTreeSet<String> {
    non_empty_entries(cell).map(|entry| normalize(entry)).collect()
}

fn non_empty_entries(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
