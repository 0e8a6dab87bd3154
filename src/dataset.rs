use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

// Column labels are fixed by the upstream dataset export.
const COL_HOME: &str = "Mandante";
const COL_AWAY: &str = "Visitante";

/// A schema-invalid row in the dataset. Loading is all-or-nothing: the first
/// malformed row aborts the load so the dashboard never starts on a
/// partially read table.
#[derive(Debug, Error)]
pub enum MalformedRecord {
    #[error("data row {row}: date {value:?} does not parse as day/month/year")]
    BadDate { row: usize, value: String },
    #[error("data row {row}: {side} goals {value:?} is not a non-negative integer")]
    BadGoals {
        row: usize,
        side: &'static str,
        value: String,
    },
    #[error("data row {row}: missing {field}")]
    MissingField { row: usize, field: &'static str },
    #[error("data row {row}: {source}")]
    BadRow {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// One match of the dataset. Team names keep their original casing for
/// display; identity comparisons go through the lowercased keys.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub stadium: String,
    pub weekday: String,
    pub home_state: String,
}

impl MatchRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn home_key(&self) -> String {
        self.home_team.to_lowercase()
    }

    pub fn away_key(&self) -> String {
        self.away_team.to_lowercase()
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Mandante")]
    home_team: String,
    #[serde(rename = "Visitante")]
    away_team: String,
    #[serde(rename = "Data")]
    date: String,
    #[serde(rename = "Mandante Placar")]
    home_goals: String,
    #[serde(rename = "Visitante Placar")]
    away_goals: String,
    #[serde(rename = "Arena")]
    stadium: String,
    #[serde(rename = "Dia")]
    weekday: String,
    #[serde(rename = "Estado Mandante")]
    home_state: String,
}

/// The in-memory match table plus the distinct value lists the selection
/// widgets are populated from. Built once at startup, read-only afterwards;
/// queries take `&MatchStore` and never mutate it.
#[derive(Debug, Default)]
pub struct MatchStore {
    records: Vec<MatchRecord>,
    teams: Vec<String>,
    stadiums: Vec<String>,
    years: Vec<i32>,
    weekdays: Vec<String>,
    home_states: Vec<String>,
}

impl MatchStore {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read dataset {}", path.display()))?;
        let store = Self::from_delimited(&raw)
            .with_context(|| format!("parse dataset {}", path.display()))?;
        Ok(store)
    }

    pub fn from_delimited(text: &str) -> Result<Self, MalformedRecord> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
            // 1-based, counting data rows only (header excluded).
            let row_no = idx + 1;
            let raw = row.map_err(|source| MalformedRecord::BadRow {
                row: row_no,
                source,
            })?;
            records.push(validate_row(row_no, raw)?);
        }
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        let mut teams = DistinctList::new();
        let mut stadiums = DistinctList::new();
        let mut weekdays = DistinctList::new();
        let mut home_states = DistinctList::new();
        let mut years: Vec<i32> = Vec::new();
        let mut seen_years: HashSet<i32> = HashSet::new();

        for record in &records {
            // The team list mirrors the upstream widget source: distinct
            // home-side names, lowercased, in encounter order. Every league
            // team hosts matches, so the home column covers them all.
            teams.push(record.home_key());
            stadiums.push(record.stadium.to_lowercase());
            weekdays.push(record.weekday.to_lowercase());
            home_states.push(record.home_state.clone());
            if seen_years.insert(record.year()) {
                years.push(record.year());
            }
        }

        Self {
            records,
            teams: teams.into_vec(),
            stadiums: stadiums.into_vec(),
            years,
            weekdays: weekdays.into_vec(),
            home_states: home_states.into_vec(),
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct team keys (lowercased home-side names) in encounter order.
    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn stadiums(&self) -> &[String] {
        &self.stadiums
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    pub fn home_states(&self) -> &[String] {
        &self.home_states
    }

    /// Observed (min, max) year, used to clamp the year-range widget.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.years.iter().copied().min()?;
        let max = self.years.iter().copied().max()?;
        Some((min, max))
    }
}

fn validate_row(row: usize, raw: RawRow) -> Result<MatchRecord, MalformedRecord> {
    if raw.home_team.is_empty() {
        return Err(MalformedRecord::MissingField {
            row,
            field: COL_HOME,
        });
    }
    if raw.away_team.is_empty() {
        return Err(MalformedRecord::MissingField {
            row,
            field: COL_AWAY,
        });
    }

    let date = NaiveDate::parse_from_str(&raw.date, DATE_FORMAT).map_err(|_| {
        MalformedRecord::BadDate {
            row,
            value: raw.date.clone(),
        }
    })?;
    let home_goals = parse_goals(row, "home", &raw.home_goals)?;
    let away_goals = parse_goals(row, "away", &raw.away_goals)?;

    Ok(MatchRecord {
        date,
        home_team: raw.home_team,
        away_team: raw.away_team,
        home_goals,
        away_goals,
        stadium: raw.stadium,
        weekday: raw.weekday,
        home_state: raw.home_state,
    })
}

fn parse_goals(row: usize, side: &'static str, value: &str) -> Result<u32, MalformedRecord> {
    value
        .parse::<u32>()
        .map_err(|_| MalformedRecord::BadGoals {
            row,
            side,
            value: value.to_string(),
        })
}

struct DistinctList {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl DistinctList {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }

    fn push(&mut self, value: String) {
        if self.seen.insert(value.clone()) {
            self.ordered.push(value);
        }
    }

    fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
