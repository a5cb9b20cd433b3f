// Screen layout: panel arrangement and sizing.
//
// Divides the terminal area into fixed zones for the auction room:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Block Banner (6 rows)                             |
// +-------------------------+------------------------+
// | Main Panel (65%)         | Sale Summary (35%)     |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: tournament name, progress, countdown.
    pub status_bar: Rect,
    /// Player card for the player on the block plus the bid line.
    pub block_banner: Rect,
    /// Tab-switched content area: bidding list, teams, results, projector.
    pub main_panel: Rect,
    /// Right column: running sale summary.
    pub sidebar: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Build the auction room layout from the available terminal area.
///
/// Fixed heights for the status bar, block banner, and help bar; the
/// remaining space splits between the main panel and the summary sidebar.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(6), // block banner
            Constraint::Min(8),    // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let block_banner = vertical[1];
    let middle = vertical[2];
    let help_bar = vertical[3];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(middle);

    AppLayout {
        status_bar,
        block_banner,
        main_panel: horizontal[0],
        sidebar: horizontal[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
