use brasileirao_terminal::dataset::MatchStore;
use brasileirao_terminal::selection::{Selection, filter, filter_by_year, resolve_team_union};

const HEADER: &str =
    "Mandante;Visitante;Data;Mandante Placar;Visitante Placar;Arena;Dia;Estado Mandante";

fn store(rows: &[&str]) -> MatchStore {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    MatchStore::from_delimited(&text).expect("valid test table")
}

fn sample() -> MatchStore {
    store(&[
        "TeamA;TeamB;01/05/2020;3;1;Arena Um;Domingo;RJ",
        "TeamB;TeamC;01/05/2021;2;2;Arena Dois;Domingo;SP",
        "TeamC;TeamA;01/05/2022;0;1;Arena Três;Domingo;MG",
    ])
}

#[test]
fn year_filter_is_inclusive_on_both_bounds() {
    let store = sample();
    let kept = filter_by_year(store.records(), (2020, 2021));
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].home_team, "TeamA");
    assert_eq!(kept[1].home_team, "TeamB");

    let single = filter_by_year(store.records(), (2021, 2021));
    assert_eq!(single.len(), 1);
    assert_eq!(single[0].home_team, "TeamB");
}

#[test]
fn year_filter_outside_dataset_is_empty() {
    let store = sample();
    assert!(filter_by_year(store.records(), (1990, 1999)).is_empty());
}

#[test]
fn team_union_keeps_record_matching_on_either_side() {
    let store = sample();
    let by_year = filter_by_year(store.records(), (2020, 2022));
    let selection = Selection::with_teams(["teama"], 2020, 2022);
    let kept = resolve_team_union(&by_year, &selection);
    // TeamA is home in 2020 and away in 2022; the 2021 match has no TeamA.
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].home_team, "TeamA");
    assert_eq!(kept[1].away_team, "TeamA");
}

#[test]
fn team_union_is_case_insensitive() {
    let store = sample();
    let by_year = filter_by_year(store.records(), (2020, 2022));
    let selection = Selection::with_teams(["TEAMA"], 2020, 2022);
    assert_eq!(resolve_team_union(&by_year, &selection).len(), 2);
}

#[test]
fn record_matching_on_both_sides_is_kept_once() {
    let store = sample();
    let by_year = filter_by_year(store.records(), (2020, 2020));
    let selection = Selection::with_teams(["teama", "teamb"], 2020, 2020);
    let kept = resolve_team_union(&by_year, &selection);
    assert_eq!(kept.len(), 1);
}

#[test]
fn empty_team_set_means_no_team_filter() {
    let selection = Selection::with_teams(Vec::<String>::new(), 2020, 2022);
    assert!(!selection.has_team_filter());

    let store = sample();
    assert_eq!(filter(store.records(), &selection).len(), 3);
}

#[test]
fn filter_applies_year_then_union_and_preserves_order() {
    let store = sample();
    let selection = Selection::with_teams(["teamc"], 2021, 2022);
    let kept = filter(store.records(), &selection);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].home_team, "TeamB");
    assert_eq!(kept[1].home_team, "TeamC");
}

#[test]
fn selects_team_is_false_without_active_filter() {
    let selection = Selection::all(2020, 2022);
    assert!(!selection.selects_team("teama"));
    assert!(selection.teams().is_none());
}
