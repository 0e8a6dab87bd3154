use std::collections::BTreeSet;

use crate::dataset::MatchStore;
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Totals,
    Yearly,
    Pareto,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            View::Totals => View::Yearly,
            View::Yearly => View::Pareto,
            View::Pareto => View::Totals,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Totals => "Home x Away",
            View::Yearly => "Goals by Year",
            View::Pareto => "Goals by Team",
        }
    }
}

/// UI-side selection state. Holds the widget lists copied from the store
/// plus the user's current picks; every draw rebuilds a `Selection` from it
/// and recomputes the summary tables fresh.
pub struct AppState {
    pub teams: Vec<String>,
    pub selected_teams: BTreeSet<String>,
    pub cursor: usize,
    pub year_bounds: (i32, i32),
    pub start_year: i32,
    pub end_year: i32,
    pub view: View,
}

impl AppState {
    pub fn new(store: &MatchStore) -> Self {
        let year_bounds = store.year_bounds().unwrap_or((0, 0));
        Self {
            teams: store.teams().to_vec(),
            selected_teams: BTreeSet::new(),
            cursor: 0,
            year_bounds,
            start_year: year_bounds.0,
            end_year: year_bounds.1,
            view: View::Totals,
        }
    }

    pub fn selection(&self) -> Selection {
        if self.selected_teams.is_empty() {
            Selection::all(self.start_year, self.end_year)
        } else {
            Selection::with_teams(self.selected_teams.iter(), self.start_year, self.end_year)
        }
    }

    pub fn select_next(&mut self) {
        if !self.teams.is_empty() && self.cursor + 1 < self.teams.len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn toggle_team(&mut self) {
        let Some(team) = self.teams.get(self.cursor) else {
            return;
        };
        if !self.selected_teams.remove(team) {
            self.selected_teams.insert(team.clone());
        }
    }

    pub fn clear_teams(&mut self) {
        self.selected_teams.clear();
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
    }

    pub fn adjust_start_year(&mut self, delta: i32) {
        let next = self.start_year.saturating_add(delta);
        self.start_year = next.clamp(self.year_bounds.0, self.end_year);
    }

    pub fn adjust_end_year(&mut self, delta: i32) {
        let next = self.end_year.saturating_add(delta);
        self.end_year = next.clamp(self.start_year, self.year_bounds.1);
    }

    pub fn team_is_selected(&self, team: &str) -> bool {
        self.selected_teams.contains(team)
    }
}
