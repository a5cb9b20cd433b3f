// TUI auction room: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors relevant parts of the application
// state. The app orchestrator pushes `UiUpdate` messages over an mpsc channel;
// the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::protocol::{AuctionSnapshot, TabId, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// One-line status message shown under the player card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_warning: bool,
}

/// TUI-local state that mirrors the application state for rendering.
///
/// Updated incrementally via `UiUpdate` messages from the app orchestrator.
/// The `render_frame` function reads this struct to draw the auction room.
pub struct ViewState {
    /// Latest full auction snapshot, absent until the first one arrives.
    pub snapshot: Option<AuctionSnapshot>,
    /// Which tab is active in the main panel.
    pub active_tab: TabId,
    /// Latest notice or warning from the orchestrator.
    pub status: Option<StatusLine>,
    /// Whether the quit confirmation prompt is showing.
    pub confirm_quit: bool,
    /// Whether the auction reset confirmation prompt is showing.
    pub confirm_reset: bool,
    /// Index of the highlighted team in the bidding list.
    pub selected_team: usize,
    /// Countdown seconds shown in the banner. Updated by timer ticks
    /// between snapshots.
    pub time_left: u32,
    pub timer_running: bool,
    /// Scroll offset for the results table.
    pub results_scroll: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: None,
            active_tab: TabId::AuctionRoom,
            status: None,
            confirm_quit: false,
            confirm_reset: false,
            selected_team: 0,
            time_left: 0,
            timer_running: false,
            results_scroll: 0,
        }
    }
}

impl ViewState {
    /// Apply a full state snapshot from the app orchestrator.
    ///
    /// Fields not covered by the snapshot (active tab, scroll, selection)
    /// are left unchanged, except the team selection which is clamped to
    /// the new team count.
    pub fn apply_snapshot(&mut self, snapshot: AuctionSnapshot) {
        if !snapshot.teams.is_empty() {
            self.selected_team = self.selected_team.min(snapshot.teams.len() - 1);
        } else {
            self.selected_team = 0;
        }
        self.time_left = snapshot.time_left;
        self.timer_running = snapshot.timer_running;
        self.snapshot = Some(snapshot);
    }

    /// Name of the team currently highlighted in the bidding list.
    pub fn selected_team_name(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .and_then(|s| s.teams.get(self.selected_team))
            .map(|t| t.name.clone())
    }

    pub fn team_count(&self) -> usize {
        self.snapshot.as_ref().map_or(0, |s| s.teams.len())
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::Notice(text) => {
            state.status = Some(StatusLine {
                text,
                is_warning: false,
            });
        }
        UiUpdate::Warning(text) => {
            state.status = Some(StatusLine {
                text,
                is_warning: true,
            });
        }
        UiUpdate::TimerTick { remaining } => {
            state.time_left = remaining;
            state.timer_running = true;
        }
        UiUpdate::TimerExpired => {
            state.time_left = 0;
            state.timer_running = false;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete auction room frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::block_banner::render(frame, layout.block_banner, state);

    match state.active_tab {
        TabId::AuctionRoom => widgets::teams::render_bidding_list(frame, layout.main_panel, state),
        TabId::Teams => widgets::teams::render_team_table(frame, layout.main_panel, state),
        TabId::Results => widgets::results::render(frame, layout.main_panel, state),
        TabId::Projector => widgets::projector::render(frame, layout.main_panel, state),
    }

    widgets::results::render_summary(frame, layout.sidebar, state);
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// This is the main entry point for the terminal UI. It:
/// 1. Initializes the terminal (enters raw mode, enables alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Restore the terminal on panic before the default hook reports it.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            // UI updates from the app orchestrator
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => {
                        apply_ui_update(&mut view_state, ui_update);
                    }
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse events, resize events, etc.
                    }
                    Some(Err(_)) | None => {
                        break;
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
