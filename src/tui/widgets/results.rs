// Results widgets: the full sale ledger table and the compact sidebar
// summary of recent sales.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::protocol::LedgerRow;
use crate::tui::ViewState;

/// Render the sale ledger table into the main panel.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(snapshot) = &state.snapshot else {
        let paragraph = Paragraph::new("Waiting for auction state...")
            .block(Block::default().borders(Borders::ALL).title("Results"));
        frame.render_widget(paragraph, area);
        return;
    };

    let visible_rows = (area.height as usize).saturating_sub(3);
    let max_offset = snapshot.ledger.len().saturating_sub(visible_rows);
    let offset = state.results_scroll.min(max_offset);

    let rows: Vec<Row> = snapshot
        .ledger
        .iter()
        .skip(offset)
        .map(|row| ledger_row(row, &snapshot.currency_symbol))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Min(12),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Player", "Sold", "Team", "Price"])
            .style(Style::default().add_modifier(Modifier::UNDERLINED)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Results ({} sold)", sold_count(&snapshot.ledger))),
    );
    frame.render_widget(table, area);
}

/// Render the sidebar summary: sold/unsold tallies and the most recent
/// sales, newest first.
pub fn render_summary(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut lines = Vec::new();
    if let Some(snapshot) = &state.snapshot {
        let sold = sold_count(&snapshot.ledger);
        lines.push(Line::from(vec![
            Span::styled(" Sold: ", Style::default().fg(Color::Gray)),
            Span::styled(
                sold.to_string(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  Unsold: {}", snapshot.processed.saturating_sub(sold)),
                Style::default().fg(Color::Gray),
            ),
        ]));
        lines.push(Line::from(""));
        for row in recent_sales(&snapshot.ledger, 8) {
            lines.push(Line::from(Span::styled(
                format!(
                    " {} -> {} ({}{})",
                    row.name, row.sold_to, snapshot.currency_symbol, row.final_price
                ),
                Style::default().fg(Color::White),
            )));
        }
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Sale Summary"),
    );
    frame.render_widget(paragraph, area);
}

fn ledger_row<'a>(row: &'a LedgerRow, currency: &str) -> Row<'a> {
    let (sold_text, style) = if row.sold {
        ("Sold", Style::default().fg(Color::Green))
    } else {
        ("Unsold", Style::default().fg(Color::DarkGray))
    };
    Row::new(vec![
        Cell::from(row.name.as_str()),
        Cell::from(sold_text),
        Cell::from(row.sold_to.as_str()),
        Cell::from(if row.sold {
            format!("{currency}{}", row.final_price)
        } else {
            String::new()
        }),
    ])
    .style(style)
}

pub fn sold_count(ledger: &[LedgerRow]) -> usize {
    ledger.iter().filter(|r| r.sold).count()
}

/// The last `limit` sold rows, newest first.
pub fn recent_sales(ledger: &[LedgerRow], limit: usize) -> Vec<&LedgerRow> {
    ledger.iter().rev().filter(|r| r.sold).take(limit).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_snapshot;

    fn row(name: &str, sold: bool) -> LedgerRow {
        LedgerRow {
            name: name.into(),
            sold,
            sold_to: if sold { "SE GT".into() } else { String::new() },
            final_price: if sold { 200 } else { 0 },
        }
    }

    #[test]
    fn sold_count_ignores_unsold() {
        let ledger = vec![row("a", true), row("b", false), row("c", true)];
        assert_eq!(sold_count(&ledger), 2);
    }

    #[test]
    fn recent_sales_newest_first_and_limited() {
        let ledger = vec![
            row("first", true),
            row("skipped", false),
            row("second", true),
            row("third", true),
        ];
        let recent = recent_sales(&ledger, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].name, "third");
        assert_eq!(recent[1].name, "second");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 30);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        state.apply_snapshot(sample_snapshot());
        state.results_scroll = 500;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        terminal
            .draw(|frame| render_summary(frame, frame.area(), &state))
            .unwrap();
    }
}
