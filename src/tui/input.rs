// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (tab switching, team
// selection, confirmation prompts).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::protocol::{TabId, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator (e.g. Bid, Sell, Quit). Returns `None` when the key
/// press was handled locally by mutating `ViewState` (tab switching, team
/// selection, confirmation prompts).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }
    if view_state.confirm_reset {
        return handle_confirm_reset(key_event, view_state);
    }

    match key_event.code {
        // Tab switching
        KeyCode::Char('1') => {
            view_state.active_tab = TabId::AuctionRoom;
            None
        }
        KeyCode::Char('2') => {
            view_state.active_tab = TabId::Teams;
            None
        }
        KeyCode::Char('3') => {
            view_state.active_tab = TabId::Results;
            None
        }
        KeyCode::Char('4') => {
            view_state.active_tab = TabId::Projector;
            None
        }

        // Team selection for bidding
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected_team = view_state.selected_team.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let last = view_state.team_count().saturating_sub(1);
            view_state.selected_team = (view_state.selected_team + 1).min(last);
            None
        }

        // Auction commands
        KeyCode::Enter | KeyCode::Char('b') => view_state
            .selected_team_name()
            .map(|team| UserCommand::Bid { team }),
        KeyCode::Char('s') => Some(UserCommand::Sell),
        KeyCode::Char('u') => Some(UserCommand::Skip),
        KeyCode::Char('g') => Some(UserCommand::ApplyStartingBudget),
        KeyCode::Char('e') => Some(UserCommand::Export),
        KeyCode::Char('l') => Some(UserCommand::ReloadTeams),

        // Countdown
        KeyCode::Char('t') | KeyCode::Char(' ') => Some(UserCommand::ToggleTimer),
        KeyCode::Char('o') => Some(UserCommand::ResetTimer),

        // Results table scrolling
        KeyCode::PageUp => {
            view_state.results_scroll = view_state.results_scroll.saturating_sub(page_size());
            None
        }
        KeyCode::PageDown => {
            view_state.results_scroll = view_state.results_scroll.saturating_add(page_size());
            None
        }

        // Destructive operations go through a confirmation prompt
        KeyCode::Char('r') => {
            view_state.confirm_reset = true;
            None
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        // Dismiss the status line
        KeyCode::Esc => {
            view_state.status = None;
            None
        }

        _ => None,
    }
}

/// Handle key events while the quit confirmation prompt is showing.
///
/// `y` or `q` confirms, `n` or `Esc` cancels, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Handle key events while the auction reset confirmation prompt is showing.
///
/// `y` or `r` confirms the reset, `n` or `Esc` cancels, everything else is
/// blocked.
fn handle_confirm_reset(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('r') | KeyCode::Char('R') => {
            view_state.confirm_reset = false;
            Some(UserCommand::ResetAuction)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_reset = false;
            None
        }
        _ => None,
    }
}

/// Page size for PageUp/PageDown scrolling.
fn page_size() -> usize {
    20
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::sample_snapshot;
    use crossterm::event::{KeyEventState, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn state_with_snapshot() -> ViewState {
        let mut state = ViewState::default();
        state.apply_snapshot(sample_snapshot());
        state
    }

    // -- Tab switching --

    #[test]
    fn number_keys_switch_tabs() {
        let mut state = ViewState::default();
        for (code, tab) in [
            (KeyCode::Char('2'), TabId::Teams),
            (KeyCode::Char('3'), TabId::Results),
            (KeyCode::Char('4'), TabId::Projector),
            (KeyCode::Char('1'), TabId::AuctionRoom),
        ] {
            let result = handle_key(key(code), &mut state);
            assert!(result.is_none());
            assert_eq!(state.active_tab, tab);
        }
    }

    // -- Team selection --

    #[test]
    fn down_moves_selection_and_clamps_at_last_team() {
        let mut state = state_with_snapshot();
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.selected_team, 1);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.selected_team, 1, "two teams in the sample snapshot");
    }

    #[test]
    fn up_does_not_underflow() {
        let mut state = state_with_snapshot();
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.selected_team, 0);
    }

    #[test]
    fn vi_keys_move_selection() {
        let mut state = state_with_snapshot();
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.selected_team, 1);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.selected_team, 0);
    }

    // -- Auction commands --

    #[test]
    fn enter_bids_for_selected_team() {
        let mut state = state_with_snapshot();
        let result = handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(
            result,
            Some(UserCommand::Bid {
                team: "SE GT".into()
            })
        );

        handle_key(key(KeyCode::Down), &mut state);
        let result = handle_key(key(KeyCode::Char('b')), &mut state);
        assert_eq!(
            result,
            Some(UserCommand::Bid {
                team: "SE SV".into()
            })
        );
    }

    #[test]
    fn bid_without_snapshot_is_a_noop() {
        let mut state = ViewState::default();
        let result = handle_key(key(KeyCode::Enter), &mut state);
        assert!(result.is_none());
    }

    #[test]
    fn command_keys_map_to_commands() {
        let mut state = state_with_snapshot();
        assert_eq!(
            handle_key(key(KeyCode::Char('s')), &mut state),
            Some(UserCommand::Sell)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('u')), &mut state),
            Some(UserCommand::Skip)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('g')), &mut state),
            Some(UserCommand::ApplyStartingBudget)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('e')), &mut state),
            Some(UserCommand::Export)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('l')), &mut state),
            Some(UserCommand::ReloadTeams)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('t')), &mut state),
            Some(UserCommand::ToggleTimer)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char(' ')), &mut state),
            Some(UserCommand::ToggleTimer)
        );
        assert_eq!(
            handle_key(key(KeyCode::Char('o')), &mut state),
            Some(UserCommand::ResetTimer)
        );
    }

    // -- Reset confirmation --

    #[test]
    fn r_prompts_before_resetting() {
        let mut state = state_with_snapshot();
        let result = handle_key(key(KeyCode::Char('r')), &mut state);
        assert!(result.is_none());
        assert!(state.confirm_reset);

        let result = handle_key(key(KeyCode::Char('y')), &mut state);
        assert_eq!(result, Some(UserCommand::ResetAuction));
        assert!(!state.confirm_reset);
    }

    #[test]
    fn reset_prompt_cancels_on_n_or_esc() {
        for cancel in [KeyCode::Char('n'), KeyCode::Esc] {
            let mut state = state_with_snapshot();
            handle_key(key(KeyCode::Char('r')), &mut state);
            let result = handle_key(key(cancel), &mut state);
            assert!(result.is_none());
            assert!(!state.confirm_reset);
        }
    }

    #[test]
    fn reset_prompt_blocks_other_keys() {
        let mut state = state_with_snapshot();
        handle_key(key(KeyCode::Char('r')), &mut state);
        assert!(handle_key(key(KeyCode::Char('s')), &mut state).is_none());
        assert!(handle_key(key(KeyCode::Char('3')), &mut state).is_none());
        assert_eq!(state.active_tab, TabId::AuctionRoom);
        assert!(state.confirm_reset);
    }

    // -- Quit confirmation --

    #[test]
    fn q_enters_confirm_quit_mode() {
        let mut state = ViewState::default();
        let result = handle_key(key(KeyCode::Char('q')), &mut state);
        assert!(result.is_none());
        assert!(state.confirm_quit);
    }

    #[test]
    fn double_q_workflow_quits() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert_eq!(
            handle_key(key(KeyCode::Char('q')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn quit_prompt_cancels_on_n_or_esc() {
        for cancel in [KeyCode::Char('n'), KeyCode::Esc] {
            let mut state = ViewState::default();
            handle_key(key(KeyCode::Char('q')), &mut state);
            let result = handle_key(key(cancel), &mut state);
            assert!(result.is_none());
            assert!(!state.confirm_quit);
        }
    }

    #[test]
    fn quit_prompt_blocks_other_keys() {
        let mut state = state_with_snapshot();
        handle_key(key(KeyCode::Char('q')), &mut state);
        assert!(handle_key(key(KeyCode::Char('s')), &mut state).is_none());
        assert!(handle_key(key(KeyCode::Down), &mut state).is_none());
        assert_eq!(state.selected_team, 0);
        assert!(state.confirm_quit);
    }

    #[test]
    fn ctrl_c_quits_immediately_from_any_mode() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
        state.confirm_quit = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
        state.confirm_quit = false;
        state.confirm_reset = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    // -- Misc --

    #[test]
    fn esc_dismisses_the_status_line() {
        let mut state = ViewState::default();
        state.status = Some(super::super::StatusLine {
            text: "sold".into(),
            is_warning: false,
        });
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.status.is_none());
    }

    #[test]
    fn page_keys_scroll_results() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.results_scroll, 20);
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.results_scroll, 0);
        // No underflow from zero.
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.results_scroll, 0);
    }

    #[test]
    fn release_and_repeat_events_are_ignored() {
        let mut state = ViewState::default();
        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            let event = KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                kind,
                state: KeyEventState::NONE,
            };
            assert!(handle_key(event, &mut state).is_none());
            assert!(!state.confirm_quit);
        }
    }

    #[test]
    fn unknown_key_returns_none() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('x')), &mut state).is_none());
    }
}
