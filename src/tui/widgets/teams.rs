// Team widgets: the bidding list on the auction tab and the full team
// table on the teams tab.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::protocol::TeamSnapshot;
use crate::tui::ViewState;

/// Render the bidding list: one row per team with selection and leader
/// highlighting. Enter bids for the highlighted team.
pub fn render_bidding_list(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = &state.snapshot else {
        render_empty(frame, area, "Bidding");
        return;
    };

    let rows: Vec<Row> = snapshot
        .teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let marker = if i == state.selected_team { ">" } else { " " };
            let leader = if team.is_leader { "*" } else { " " };
            let row = Row::new(vec![
                Cell::from(format!("{marker}{leader} {}", team.name)),
                Cell::from(format!(
                    "{}{}",
                    snapshot.currency_symbol, team.budget_remaining
                )),
                Cell::from(slots_label(team)),
            ]);
            style_team_row(row, i == state.selected_team, team.is_leader)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(header_row(&["Team", "Budget", "Roster"]))
    .block(Block::default().borders(Borders::ALL).title("Bidding"));
    frame.render_widget(table, area);
}

/// Render the full team table: budgets and roster occupancy for every
/// team, with roster-full teams flagged.
pub fn render_team_table(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = &state.snapshot else {
        render_empty(frame, area, "Teams");
        return;
    };

    let rows: Vec<Row> = snapshot
        .teams
        .iter()
        .map(|team| {
            let full = if team.players_bought >= team.max_players {
                "FULL"
            } else {
                ""
            };
            let row = Row::new(vec![
                Cell::from(team.name.clone()),
                Cell::from(format!(
                    "{}{}",
                    snapshot.currency_symbol, team.budget_remaining
                )),
                Cell::from(slots_label(team)),
                Cell::from(full),
            ]);
            style_team_row(row, false, team.is_leader)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(6),
        ],
    )
    .header(header_row(&["Team", "Budget", "Roster", ""]))
    .block(Block::default().borders(Borders::ALL).title("Teams"));
    frame.render_widget(table, area);
}

/// Roster occupancy label, e.g. "3/12".
pub fn slots_label(team: &TeamSnapshot) -> String {
    format!("{}/{}", team.players_bought, team.max_players)
}

fn style_team_row(row: Row<'_>, selected: bool, leader: bool) -> Row<'_> {
    let mut style = Style::default();
    if leader {
        style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
    }
    if selected {
        style = style.bg(Color::DarkGray);
    }
    row.style(style)
}

fn header_row<'a>(titles: &[&'a str]) -> Row<'a> {
    Row::new(titles.iter().map(|t| Cell::from(*t)).collect::<Vec<_>>())
        .style(Style::default().add_modifier(Modifier::UNDERLINED))
}

fn render_empty(frame: &mut Frame, area: Rect, title: &str) {
    let paragraph = Paragraph::new("Waiting for auction state...")
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_snapshot;

    #[test]
    fn slots_label_shows_bought_over_max() {
        let team = TeamSnapshot {
            name: "SE GT".into(),
            budget_remaining: 9200,
            players_bought: 3,
            max_players: 12,
            is_leader: false,
        };
        assert_eq!(slots_label(&team), "3/12");
    }

    #[test]
    fn render_both_views_without_panic() {
        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        terminal
            .draw(|frame| render_bidding_list(frame, frame.area(), &state))
            .unwrap();
        state.apply_snapshot(sample_snapshot());
        terminal
            .draw(|frame| render_bidding_list(frame, frame.area(), &state))
            .unwrap();
        terminal
            .draw(|frame| render_team_table(frame, frame.area(), &state))
            .unwrap();
    }
}
