// Help bar: keyboard shortcut hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

const NORMAL_HINTS: &str = " Up/Down:Team | Enter:Bid | s:Sell | u:Unsold | t:Timer | o:Reset Timer | e:Export | g:Budgets | l:Reload Teams | r:Reset | 1-4:Tabs | q:Quit";
const CONFIRM_HINTS: &str = " y:Confirm | n/Esc:Cancel";

/// Render the bottom help bar into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = if state.confirm_quit || state.confirm_reset {
        CONFIRM_HINTS
    } else {
        NORMAL_HINTS
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
