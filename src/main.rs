use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use brasileirao_terminal::aggregate::{Condition, condition_totals, goals_by_year, team_pareto};
use brasileirao_terminal::dataset::MatchStore;
use brasileirao_terminal::state::{AppState, View};

struct App<'a> {
    store: &'a MatchStore,
    state: AppState,
    should_quit: bool,
}

impl<'a> App<'a> {
    fn new(store: &'a MatchStore) -> Self {
        Self {
            store,
            state: AppState::new(store),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.state.cycle_view(),
            KeyCode::Char('1') => self.state.view = View::Totals,
            KeyCode::Char('2') => self.state.view = View::Yearly,
            KeyCode::Char('3') => self.state.view = View::Pareto,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(' ') => self.state.toggle_team(),
            KeyCode::Char('c') => self.state.clear_teams(),
            KeyCode::Char('[') => self.state.adjust_start_year(-1),
            KeyCode::Char(']') => self.state.adjust_start_year(1),
            KeyCode::Char('{') => self.state.adjust_end_year(-1),
            KeyCode::Char('}') => self.state.adjust_end_year(1),
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let path = dataset_path();
    let store = MatchStore::load(&path)
        .with_context(|| format!("load match dataset from {}", path.display()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(&store);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn dataset_path() -> PathBuf {
    if let Some(arg) = env::args().nth(1) {
        return PathBuf::from(arg);
    }
    if let Ok(path) = env::var("BRASILEIRAO_DATA") {
        return PathBuf::from(path);
    }
    PathBuf::from("data/data.txt")
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(1)])
        .split(chunks[1]);

    render_team_panel(frame, body[0], app);
    match app.state.view {
        View::Totals => render_totals(frame, body[1], app),
        View::Yearly => render_yearly(frame, body[1], app),
        View::Pareto => render_pareto(frame, body[1], app),
    }

    let footer = Paragraph::new(footer_text()).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);
}

fn header_text(state: &AppState) -> String {
    let teams = if state.selected_teams.is_empty() {
        "all teams".to_string()
    } else {
        format!("{} team(s)", state.selected_teams.len())
    };
    format!(
        "BRASILEIRÃO | {} | {}-{} | {}",
        state.view.label(),
        state.start_year,
        state.end_year,
        teams
    )
}

fn footer_text() -> &'static str {
    "Tab/1/2/3 View | j/k Move | Space Toggle team | c Clear | [/] Start year | {/} End year | q Quit"
}

fn render_team_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Times").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let years = Paragraph::new(format!(
        "Anos: {} - {}",
        app.state.start_year, app.state.end_year
    ))
    .style(Style::default().add_modifier(Modifier::BOLD));
    let years_area = Rect {
        height: 1,
        ..inner
    };
    frame.render_widget(years, years_area);

    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let visible = list_area.height as usize;
    let (start, end) = visible_range(app.state.cursor, app.state.teams.len(), visible);

    let mut lines: Vec<Line> = Vec::with_capacity(end - start);
    for idx in start..end {
        let team = &app.state.teams[idx];
        let marker = if app.state.team_is_selected(team) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut style = Style::default();
        if idx == app.state.cursor {
            style = style.bg(Color::DarkGray);
        }
        if app.state.team_is_selected(team) {
            style = style.fg(Color::Green);
        }
        lines.push(Line::styled(format!("{marker} {team}"), style));
    }
    frame.render_widget(Paragraph::new(lines), list_area);
}

fn render_totals(frame: &mut Frame, area: Rect, app: &App) {
    let totals = condition_totals(app.store, &app.state.selection());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let grand = totals.home_total + totals.away_total;
    let (home_pct, away_pct) = if grand == 0 {
        (0.0, 0.0)
    } else {
        (
            totals.home_total as f64 * 100.0 / grand as f64,
            totals.away_total as f64 * 100.0 / grand as f64,
        )
    };
    let summary = Paragraph::new(format!(
        "home {} ({home_pct:.1}%)  |  away {} ({away_pct:.1}%)",
        totals.home_total, totals.away_total
    ))
    .block(
        Block::default()
            .title("Gols em casa x fora")
            .borders(Borders::ALL),
    );
    frame.render_widget(summary, chunks[0]);

    let home = Bar::default()
        .value(totals.home_total)
        .label(Line::from("home"))
        .style(Style::default().fg(Color::Green));
    let away = Bar::default()
        .value(totals.away_total)
        .label(Line::from("away"))
        .style(Style::default().fg(Color::Red));

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&[home, away]))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(totals.home_total.max(totals.away_total).max(1));
    frame.render_widget(chart, chunks[1]);
}

fn render_yearly(frame: &mut Frame, area: Rect, app: &App) {
    let rows = goals_by_year(app.store, &app.state.selection());

    let block = Block::default()
        .title("Gols por ano e condição (home=green, away=red)")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let max = rows.iter().map(|r| r.goals).max().unwrap_or(0).max(1);
    let mut chart = BarChart::default()
        .bar_width(3)
        .bar_gap(1)
        .group_gap(2)
        .max(max);

    // Rows arrive as (home, away) pairs per year, ascending.
    for pair in rows.chunks(2) {
        let [home, away] = pair else { continue };
        let bars = [
            Bar::default()
                .value(home.goals)
                .text_value(home.goals.to_string())
                .style(Style::default().fg(Color::Green)),
            Bar::default()
                .value(away.goals)
                .text_value(away.goals.to_string())
                .style(Style::default().fg(Color::Red)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(home.year.to_string()))
                .bars(&bars),
        );
    }
    frame.render_widget(chart, inner);
}

fn render_pareto(frame: &mut Frame, area: Rect, app: &App) {
    let rows = team_pareto(app.store, &app.state.selection());

    let block = Block::default()
        .title("Gols por time e condição")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
    lines.push(Line::styled(
        format!("{:<20} {:<5} {:>6} {:>8}", "Time", "Cond", "Gols", "Acum %"),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    for row in rows.iter().take(inner.height.saturating_sub(1) as usize) {
        let style = match row.condition {
            Condition::Home => Style::default().fg(Color::Green),
            Condition::Away => Style::default().fg(Color::Red),
        };
        lines.push(Line::styled(
            format!(
                "{:<20} {:<5} {:>6} {:>7.1}%",
                row.team,
                row.condition.to_string(),
                row.goals,
                row.cumulative_share * 100.0
            ),
            style,
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}
