// Status bar: tournament name, auction progress, and countdown readout.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the top status bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = match &state.snapshot {
        Some(snapshot) => format!(
            " {} | Player {}/{} | {}",
            snapshot.tournament_name,
            snapshot.processed.min(snapshot.total_players.saturating_sub(1)) + 1,
            snapshot.total_players,
            timer_readout(state.time_left, state.timer_running),
        ),
        None => " Loading auction...".to_string(),
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Format the countdown for the status bar.
pub fn timer_readout(time_left: u32, running: bool) -> String {
    let state = if running {
        "running"
    } else if time_left == 0 {
        "expired"
    } else {
        "paused"
    };
    format!("Timer {}:{:02} ({})", time_left / 60, time_left % 60, state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_snapshot;

    #[test]
    fn timer_readout_formats_minutes_and_state() {
        assert_eq!(timer_readout(75, true), "Timer 1:15 (running)");
        assert_eq!(timer_readout(9, false), "Timer 0:09 (paused)");
        assert_eq!(timer_readout(0, false), "Timer 0:00 (expired)");
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        state.apply_snapshot(sample_snapshot());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
