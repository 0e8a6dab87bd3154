use std::collections::BTreeSet;

use crate::dataset::MatchRecord;

/// The query a view issues against the store: an optional team set plus an
/// inclusive year range. Team names are lowercased on construction so all
/// matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    teams: Option<BTreeSet<String>>,
    pub year_range: (i32, i32),
}

impl Selection {
    /// No team filter: every team participates.
    pub fn all(start_year: i32, end_year: i32) -> Self {
        Self {
            teams: None,
            year_range: (start_year, end_year),
        }
    }

    pub fn with_teams<I, S>(teams: I, start_year: i32, end_year: i32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = teams
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .collect();
        Self {
            // An empty set means the user deselected everything, which the
            // upstream widget reports the same as "no filter".
            teams: if set.is_empty() { None } else { Some(set) },
            year_range: (start_year, end_year),
        }
    }

    pub fn teams(&self) -> Option<&BTreeSet<String>> {
        self.teams.as_ref()
    }

    /// True when `name` (any casing) is part of an active team selection.
    /// Always false without one; callers treat "no selection" separately.
    pub fn selects_team(&self, name: &str) -> bool {
        match &self.teams {
            Some(set) => set.contains(&name.to_lowercase()),
            None => false,
        }
    }

    pub fn has_team_filter(&self) -> bool {
        self.teams.is_some()
    }
}

/// Keep records whose year falls in the inclusive range, preserving order.
pub fn filter_by_year<'a>(
    records: &'a [MatchRecord],
    (start_year, end_year): (i32, i32),
) -> Vec<&'a MatchRecord> {
    records
        .iter()
        .filter(|r| {
            let year = r.year();
            year >= start_year && year <= end_year
        })
        .collect()
}

/// Union team filter shared by every aggregator: a record stays when its
/// home side OR its away side is selected, and stays exactly once even when
/// both sides are. With no team set this is the identity filter.
pub fn resolve_team_union<'a>(
    records: &[&'a MatchRecord],
    selection: &Selection,
) -> Vec<&'a MatchRecord> {
    if !selection.has_team_filter() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| selection.selects_team(&r.home_team) || selection.selects_team(&r.away_team))
        .copied()
        .collect()
}

/// Full selection filter: year range first, then the team union.
pub fn filter<'a>(records: &'a [MatchRecord], selection: &Selection) -> Vec<&'a MatchRecord> {
    let by_year = filter_by_year(records, selection.year_range);
    resolve_team_union(&by_year, selection)
}
