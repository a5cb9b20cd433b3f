// Projector view: a large, minimal display of the player on the block
// and the current bid, for mirroring onto a shared screen.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::AuctionSnapshot;
use crate::tui::ViewState;

/// Render the projector view into the main panel.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = match &state.snapshot {
        Some(snapshot) => projector_lines(snapshot, state.time_left),
        None => vec![Line::from("")],
    };

    // Rough vertical centering inside the bordered area.
    let content_height = lines.len() as u16;
    let pad = (area.height.saturating_sub(content_height + 2)) / 2;
    let mut padded = vec![Line::from(""); pad as usize];
    padded.extend(lines);

    let paragraph = Paragraph::new(padded)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Projector"));
    frame.render_widget(paragraph, area);
}

fn projector_lines(snapshot: &AuctionSnapshot, time_left: u32) -> Vec<Line<'static>> {
    let Some(player) = &snapshot.on_block else {
        return vec![
            Line::from(Span::styled(
                "AUCTION COMPLETE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{} players processed", snapshot.total_players),
                Style::default().fg(Color::Gray),
            )),
        ];
    };

    let bid = match &snapshot.current_leader {
        Some(leader) => format!(
            "{}{} with {}",
            snapshot.currency_symbol, snapshot.current_bid, leader
        ),
        None => "Awaiting first bid".to_string(),
    };

    vec![
        Line::from(Span::styled(
            snapshot.tournament_name.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            player.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            player.primary_strength.clone(),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            bid,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{time_left}s"),
            Style::default().fg(Color::Magenta),
        )),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
