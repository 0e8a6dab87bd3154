use std::collections::HashMap;
use std::fmt;

use crate::dataset::MatchStore;
use crate::selection::{Selection, filter, filter_by_year, resolve_team_union};

/// Which side of a match a goal total belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Home,
    Away,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Home => write!(f, "home"),
            Condition::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionTotals {
    pub home_total: u64,
    pub away_total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearConditionRow {
    pub year: i32,
    pub condition: Condition,
    pub goals: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamParetoRow {
    pub team: String,
    pub condition: Condition,
    pub goals: u64,
    /// Running share of the grand total over the sorted order, in [0, 1].
    pub cumulative_share: f64,
}

/// Total goals under each condition for the selection (the pie view).
///
/// Team membership is re-checked per side: a record whose home side alone is
/// selected contributes to `home_total` only. This isolates a selected
/// team's own home/away output instead of also counting goals scored
/// against it on the road.
pub fn condition_totals(store: &MatchStore, selection: &Selection) -> ConditionTotals {
    let by_year = filter_by_year(store.records(), selection.year_range);

    let mut totals = ConditionTotals::default();
    for record in &by_year {
        if side_selected(selection, &record.home_team) {
            totals.home_total += u64::from(record.home_goals);
        }
        if side_selected(selection, &record.away_team) {
            totals.away_total += u64::from(record.away_goals);
        }
    }
    totals
}

/// Goal totals per year and condition over the selection (the bar view).
///
/// Emits a dense series: every year of the requested range gets a home row
/// followed by an away row, zero-valued when nothing matched, ascending by
/// year. Callers rely on that shape and order.
pub fn goals_by_year(store: &MatchStore, selection: &Selection) -> Vec<YearConditionRow> {
    let pool = filter(store.records(), selection);

    let mut by_year: HashMap<i32, (u64, u64)> = HashMap::new();
    for record in &pool {
        let entry = by_year.entry(record.year()).or_default();
        entry.0 += u64::from(record.home_goals);
        entry.1 += u64::from(record.away_goals);
    }

    let (start_year, end_year) = selection.year_range;
    let mut rows = Vec::with_capacity(year_span(start_year, end_year) * 2);
    for year in start_year..=end_year {
        let (home, away) = by_year.get(&year).copied().unwrap_or((0, 0));
        rows.push(YearConditionRow {
            year,
            condition: Condition::Home,
            goals: home,
        });
        rows.push(YearConditionRow {
            year,
            condition: Condition::Away,
            goals: away,
        });
    }
    rows
}

/// Per-team goal totals split by condition, ranked for Pareto inspection.
///
/// Works from the year-filtered set and re-derives the team union itself,
/// so it stays usable whether or not a team selection is active. Teams are
/// enumerated from the home column in encounter order, each contributing a
/// home row and an away row; the full row set is stable-sorted by goals
/// descending and annotated with the cumulative share of the grand total
/// (0.0 throughout when the grand total is zero).
pub fn team_pareto(store: &MatchStore, selection: &Selection) -> Vec<TeamParetoRow> {
    let by_year = filter_by_year(store.records(), selection.year_range);
    let pool = resolve_team_union(&by_year, selection);

    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, TeamSums> = HashMap::new();

    for record in &pool {
        let key = record.home_key();
        let entry = sums.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            TeamSums::new(record.home_team.clone())
        });
        entry.home += u64::from(record.home_goals);
    }
    // Away goals only count for teams that appear on the home side; visitors
    // from outside the enumeration get no row of their own.
    for record in &pool {
        if let Some(entry) = sums.get_mut(&record.away_key()) {
            entry.away += u64::from(record.away_goals);
        }
    }

    let mut rows: Vec<(String, Condition, u64)> = Vec::with_capacity(order.len() * 2);
    for key in &order {
        let entry = &sums[key];
        rows.push((entry.display.clone(), Condition::Home, entry.home));
        rows.push((entry.display.clone(), Condition::Away, entry.away));
    }

    // sort_by is stable: equal totals keep their enumeration order.
    rows.sort_by(|a, b| b.2.cmp(&a.2));

    let grand_total: u64 = rows.iter().map(|r| r.2).sum();
    let mut running = 0u64;
    rows.into_iter()
        .map(|(team, condition, goals)| {
            running += goals;
            let cumulative_share = if grand_total == 0 {
                0.0
            } else {
                running as f64 / grand_total as f64
            };
            TeamParetoRow {
                team,
                condition,
                goals,
                cumulative_share,
            }
        })
        .collect()
}

struct TeamSums {
    display: String,
    home: u64,
    away: u64,
}

impl TeamSums {
    fn new(display: String) -> Self {
        Self {
            display,
            home: 0,
            away: 0,
        }
    }
}

fn side_selected(selection: &Selection, team: &str) -> bool {
    !selection.has_team_filter() || selection.selects_team(team)
}

fn year_span(start_year: i32, end_year: i32) -> usize {
    usize::try_from(i64::from(end_year) - i64::from(start_year) + 1).unwrap_or(0)
}
