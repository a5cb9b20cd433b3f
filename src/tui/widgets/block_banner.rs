// Block banner: the player on the block, the bid line, and the status line.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::AuctionSnapshot;
use crate::tui::{StatusLine, ViewState};

/// Render the block banner into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = match &state.snapshot {
        Some(snapshot) => banner_lines(snapshot),
        None => vec![Line::from("Loading players...")],
    };

    if state.confirm_quit {
        lines.push(prompt_line("Quit the auction room? (y/n)"));
    } else if state.confirm_reset {
        lines.push(prompt_line(
            "Reset the auction? Results and bids will be cleared. (y/n)",
        ));
    } else if let Some(status) = &state.status {
        lines.push(status_line(status));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("On the Block"),
    );
    frame.render_widget(paragraph, area);
}

fn banner_lines(snapshot: &AuctionSnapshot) -> Vec<Line<'static>> {
    let Some(player) = &snapshot.on_block else {
        return vec![Line::from(Span::styled(
            "All players processed! See the Results tab.",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))];
    };

    let meta = format!(
        "{} | {} | Weekends: {}",
        player.age_group, player.primary_strength, player.availability
    );

    let mut lines = vec![
        Line::from(Span::styled(
            player.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(meta, Style::default().fg(Color::Gray))),
    ];
    if !player.profile_link.is_empty() {
        lines.push(Line::from(Span::styled(
            player.profile_link.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(bid_line(snapshot));
    lines
}

/// The current-bid line: leader and amount, or a nudge when no bid yet,
/// plus the amount the next bid would be.
fn bid_line(snapshot: &AuctionSnapshot) -> Line<'static> {
    let currency = &snapshot.currency_symbol;
    let next = if snapshot.current_bid > 0 {
        snapshot.current_bid + snapshot.bid_increment
    } else {
        snapshot.bid_increment
    };

    let current = match &snapshot.current_leader {
        Some(leader) => format!(
            "Bid: {currency}{} by {leader}",
            snapshot.current_bid
        ),
        None => "No bids yet".to_string(),
    };

    Line::from(vec![
        Span::styled(
            current,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" | Next: {currency}{next}"),
            Style::default().fg(Color::Gray),
        ),
    ])
}

fn status_line(status: &StatusLine) -> Line<'static> {
    let color = if status.is_warning {
        Color::Red
    } else {
        Color::Green
    };
    Line::from(Span::styled(
        status.text.clone(),
        Style::default().fg(color),
    ))
}

fn prompt_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
