// Application state and orchestration logic.
//
// The central event loop that coordinates operator commands from the TUI
// and ticks from the countdown task. Owns the auction session and pushes
// UI updates to the TUI render loop. One command is processed at a time;
// there is no other mutator.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::{self, Config};
use crate::engine::{AuctionSession, BidOutcome, SellOutcome, SkipOutcome};
use crate::export;
use crate::protocol::{
    AuctionSnapshot, LedgerRow, PlayerCard, TeamSnapshot, UiUpdate, UserCommand,
};
use crate::timer::{Countdown, TickResult};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub session: AuctionSession,
    pub countdown: Countdown,
    /// Base directory for config reloads (the working directory at startup).
    pub base_dir: PathBuf,
    /// Sender handed to the countdown task whenever it is (re)started.
    tick_tx: mpsc::Sender<()>,
}

impl AppState {
    pub fn new(
        config: Config,
        session: AuctionSession,
        base_dir: PathBuf,
        tick_tx: mpsc::Sender<()>,
    ) -> Self {
        let countdown = Countdown::new(config.auction.timer_seconds);
        AppState {
            config,
            session,
            countdown,
            base_dir,
            tick_tx,
        }
    }

    /// Build an `AuctionSnapshot` from the current session state.
    ///
    /// Captures the player on the block, bid state, per-team budget and
    /// roster occupancy, and the results table in one shot for the TUI.
    pub fn build_snapshot(&self) -> AuctionSnapshot {
        let on_block = self.session.current_player().map(|p| PlayerCard {
            name: p.name.clone(),
            age_group: p.age_group.clone(),
            primary_strength: p.primary_strength.clone(),
            availability: p.availability.clone(),
            profile_link: p.profile_link.clone(),
        });

        let teams = self
            .session
            .registry
            .teams
            .iter()
            .map(|t| TeamSnapshot {
                name: t.name.clone(),
                budget_remaining: t.budget_remaining,
                players_bought: self.session.players_bought(&t.name),
                max_players: self.session.settings.max_players_per_team,
                is_leader: self.session.current_leader.as_deref() == Some(t.name.as_str()),
            })
            .collect();

        let ledger = self
            .session
            .players
            .iter()
            .map(|p| LedgerRow {
                name: p.name.clone(),
                sold: p.sold,
                sold_to: p.sold_to.clone(),
                final_price: p.final_price,
            })
            .collect();

        AuctionSnapshot {
            tournament_name: self.config.tournament.name.clone(),
            currency_symbol: self.config.tournament.currency_symbol.clone(),
            on_block,
            current_bid: self.session.current_bid,
            bid_increment: self.session.settings.bid_increment,
            current_leader: self.session.current_leader.clone(),
            exhausted: self.session.is_exhausted(),
            processed: self.session.processed_count(),
            total_players: self.session.players.len(),
            teams,
            ledger,
            timer_running: self.countdown.is_running(),
            time_left: self.countdown.time_left(),
        }
    }

    /// Handle a single operator command, pushing resulting updates to the
    /// TUI. Every failure is surfaced as a `Warning`; nothing is fatal.
    pub async fn handle_command(&mut self, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
        match cmd {
            UserCommand::Bid { team } => {
                let currency = self.config.tournament.currency_symbol.clone();
                match self.session.place_bid(&team) {
                    BidOutcome::Accepted { .. } => {
                        self.send_snapshot(ui_tx).await;
                    }
                    BidOutcome::UnknownTeam => {
                        let _ = ui_tx
                            .send(UiUpdate::Warning(format!(
                                "'{team}' is not an active team. Update the team list and bid again."
                            )))
                            .await;
                    }
                    BidOutcome::InsufficientBudget { required } => {
                        let _ = ui_tx
                            .send(UiUpdate::Warning(format!(
                                "{team} doesn't have enough budget for the next bid ({currency}{required})."
                            )))
                            .await;
                    }
                    BidOutcome::Exhausted => self.notify_exhausted(ui_tx).await,
                }
            }
            UserCommand::Sell => {
                let on_block = self
                    .session
                    .current_player()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                let currency = self.config.tournament.currency_symbol.clone();
                match self.session.finalize_sale() {
                    SellOutcome::Sold { team, price } => {
                        self.countdown.reset();
                        let _ = ui_tx
                            .send(UiUpdate::Notice(format!(
                                "{on_block} sold to {team} for {currency}{price}."
                            )))
                            .await;
                        self.send_snapshot(ui_tx).await;
                    }
                    SellOutcome::NoLeader => {
                        let _ = ui_tx
                            .send(UiUpdate::Warning(
                                "No leading team yet. Place a bid first.".into(),
                            ))
                            .await;
                    }
                    SellOutcome::LeaderRemoved => {
                        let _ = ui_tx
                            .send(UiUpdate::Warning(
                                "Leading team is no longer in the teams list. \
                                 Please bid again after updating teams."
                                    .into(),
                            ))
                            .await;
                        self.send_snapshot(ui_tx).await;
                    }
                    SellOutcome::Exhausted => self.notify_exhausted(ui_tx).await,
                }
            }
            UserCommand::Skip => {
                let on_block = self
                    .session
                    .current_player()
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                match self.session.skip_current() {
                    SkipOutcome::Skipped => {
                        self.countdown.reset();
                        let _ = ui_tx
                            .send(UiUpdate::Notice(format!("{on_block} marked unsold.")))
                            .await;
                        self.send_snapshot(ui_tx).await;
                    }
                    SkipOutcome::Exhausted => self.notify_exhausted(ui_tx).await,
                }
            }
            UserCommand::ApplyStartingBudget => {
                self.session.apply_starting_budget_to_all();
                let _ = ui_tx
                    .send(UiUpdate::Notice("Budgets updated for all teams.".into()))
                    .await;
                self.send_snapshot(ui_tx).await;
            }
            UserCommand::ResetAuction => {
                self.session.reset_auction();
                self.countdown.reset();
                let _ = ui_tx
                    .send(UiUpdate::Notice(
                        "Auction state cleared. Budgets unchanged.".into(),
                    ))
                    .await;
                self.send_snapshot(ui_tx).await;
            }
            UserCommand::ToggleTimer => {
                if self.countdown.is_running() {
                    self.countdown.pause();
                    let _ = ui_tx.send(UiUpdate::Notice("Countdown paused.".into())).await;
                } else if self.countdown.time_left() == 0 {
                    let _ = ui_tx
                        .send(UiUpdate::Warning(
                            "Countdown is at zero. Reset the timer first.".into(),
                        ))
                        .await;
                } else {
                    self.countdown.start(self.tick_tx.clone());
                    let _ = ui_tx
                        .send(UiUpdate::Notice("Countdown started.".into()))
                        .await;
                }
                self.send_snapshot(ui_tx).await;
            }
            UserCommand::ResetTimer => {
                self.countdown.reset();
                self.send_snapshot(ui_tx).await;
            }
            UserCommand::Export => {
                let path = self.config.data.results.clone();
                match export::export_ledger(&path, &self.session.players) {
                    Ok(()) => {
                        let _ = ui_tx
                            .send(UiUpdate::Notice(format!("Results exported to {path}.")))
                            .await;
                    }
                    Err(e) => {
                        warn!("export failed: {}", e);
                        let _ = ui_tx
                            .send(UiUpdate::Warning(format!("Export failed: {e}")))
                            .await;
                    }
                }
            }
            UserCommand::ReloadTeams => {
                match config::load_config_from(&self.base_dir) {
                    Ok(fresh) => {
                        let leader_cleared = self.session.sync_teams(&fresh.teams);
                        self.config.teams = fresh.teams;
                        if leader_cleared {
                            let _ = ui_tx
                                .send(UiUpdate::Warning(
                                    "Leading team was removed; current bid cleared.".into(),
                                ))
                                .await;
                        }
                        let _ = ui_tx
                            .send(UiUpdate::Notice("Team list reloaded.".into()))
                            .await;
                        self.send_snapshot(ui_tx).await;
                    }
                    Err(e) => {
                        warn!("team reload failed: {}", e);
                        let _ = ui_tx
                            .send(UiUpdate::Warning(format!("Team reload failed: {e}")))
                            .await;
                    }
                }
            }
            UserCommand::SwitchTab(_) => {
                // Tab state lives in the TUI; no app-level action needed.
            }
            UserCommand::Quit => {
                // Handled in the main loop.
            }
        }
    }

    async fn notify_exhausted(&self, ui_tx: &mpsc::Sender<UiUpdate>) {
        let _ = ui_tx
            .send(UiUpdate::Notice(
                "All players processed! See the Results tab.".into(),
            ))
            .await;
    }

    async fn send_snapshot(&self, ui_tx: &mpsc::Sender<UiUpdate>) {
        let _ = ui_tx
            .send(UiUpdate::Snapshot(Box::new(self.build_snapshot())))
            .await;
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. Operator commands from the TUI
/// 2. Ticks from the countdown task
///
/// Pushes UI updates through `ui_tx` for the TUI render loop. The countdown
/// never blocks a command: its task only sends ticks, and the decrement
/// happens here, interleaved with command handling.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut tick_rx: mpsc::Receiver<()>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    // Initial snapshot so the TUI has something to draw before the first
    // command.
    state.send_snapshot(&ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => state.handle_command(cmd, &ui_tx).await,
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            tick = tick_rx.recv() => {
                if tick.is_none() {
                    // All tick senders dropped; nothing left to count.
                    continue;
                }
                match state.countdown.on_tick() {
                    TickResult::Running { remaining } => {
                        let _ = ui_tx.send(UiUpdate::TimerTick { remaining }).await;
                    }
                    TickResult::Expired => {
                        let _ = ui_tx.send(UiUpdate::TimerExpired).await;
                        let _ = ui_tx
                            .send(UiUpdate::Warning(
                                "Out of time! Sell or mark unsold to continue.".into(),
                            ))
                            .await;
                    }
                    TickResult::Stale => {}
                }
            }
        }
    }

    state.countdown.pause();
    info!("Application event loop exiting");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AuctionConfig, DataPaths, TournamentSection};
    use crate::players::PlayerRecord;

    fn test_config(results_path: &str) -> Config {
        Config {
            tournament: TournamentSection {
                name: "Test Cup".into(),
                currency_symbol: "Rs".into(),
            },
            auction: AuctionConfig {
                bid_increment: 100,
                max_players_per_team: 12,
                starting_budget: 10000,
                timer_seconds: 30,
            },
            teams: vec!["A".into(), "B".into()],
            data: DataPaths {
                players: "data/players.csv".into(),
                results: results_path.into(),
            },
        }
    }

    fn test_players(count: usize) -> Vec<PlayerRecord> {
        (1..=count)
            .map(|i| PlayerRecord {
                name: format!("Player {i}"),
                age_group: "Open".into(),
                primary_strength: "Batter".into(),
                availability: "Yes".into(),
                profile_link: String::new(),
                sold: false,
                sold_to: String::new(),
                final_price: 0,
            })
            .collect()
    }

    fn test_state(results_path: &str) -> (AppState, mpsc::Receiver<()>) {
        let config = test_config(results_path);
        let session = AuctionSession::new(
            config.auction.clone(),
            &config.teams,
            test_players(2),
        );
        let (tick_tx, tick_rx) = mpsc::channel(8);
        let state = AppState::new(config, session, std::env::temp_dir(), tick_tx);
        (state, tick_rx)
    }

    /// Drain all pending updates from the channel.
    fn drain(rx: &mut mpsc::Receiver<UiUpdate>) -> Vec<UiUpdate> {
        let mut updates = Vec::new();
        while let Ok(u) = rx.try_recv() {
            updates.push(u);
        }
        updates
    }

    fn has_warning(updates: &[UiUpdate], needle: &str) -> bool {
        updates.iter().any(|u| match u {
            UiUpdate::Warning(msg) => msg.contains(needle),
            _ => false,
        })
    }

    fn last_snapshot(updates: &[UiUpdate]) -> Option<AuctionSnapshot> {
        updates.iter().rev().find_map(|u| match u {
            UiUpdate::Snapshot(s) => Some((**s).clone()),
            _ => None,
        })
    }

    #[tokio::test]
    async fn accepted_bid_pushes_a_snapshot() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state
            .handle_command(UserCommand::Bid { team: "A".into() }, &ui_tx)
            .await;

        let updates = drain(&mut ui_rx);
        let snapshot = last_snapshot(&updates).expect("snapshot after accepted bid");
        assert_eq!(snapshot.current_bid, 100);
        assert_eq!(snapshot.current_leader.as_deref(), Some("A"));
        assert!(snapshot.teams.iter().any(|t| t.name == "A" && t.is_leader));
    }

    #[tokio::test]
    async fn unknown_team_bid_surfaces_a_warning_only() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state
            .handle_command(UserCommand::Bid { team: "Ghost".into() }, &ui_tx)
            .await;

        let updates = drain(&mut ui_rx);
        assert!(has_warning(&updates, "not an active team"));
        assert!(last_snapshot(&updates).is_none());
        assert_eq!(state.session.current_bid, 0);
    }

    #[tokio::test]
    async fn sell_without_leader_warns_and_changes_nothing() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state.handle_command(UserCommand::Sell, &ui_tx).await;

        let updates = drain(&mut ui_rx);
        assert!(has_warning(&updates, "No leading team"));
        assert_eq!(state.session.current_index, 0);
    }

    #[tokio::test]
    async fn sell_debits_budget_and_resets_the_countdown() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state
            .handle_command(UserCommand::Bid { team: "A".into() }, &ui_tx)
            .await;
        state.countdown.start(state.tick_tx.clone());
        state.handle_command(UserCommand::Sell, &ui_tx).await;

        assert!(!state.countdown.is_running());
        assert_eq!(state.countdown.time_left(), 30);

        let updates = drain(&mut ui_rx);
        let snapshot = last_snapshot(&updates).unwrap();
        assert_eq!(snapshot.processed, 1);
        let team_a = snapshot.teams.iter().find(|t| t.name == "A").unwrap();
        assert_eq!(team_a.budget_remaining, 9900);
        assert_eq!(team_a.players_bought, 1);
        assert_eq!(snapshot.ledger[0].sold_to, "A");
        assert_eq!(snapshot.ledger[0].final_price, 100);
    }

    #[tokio::test]
    async fn commands_after_exhaustion_report_completion() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state.handle_command(UserCommand::Skip, &ui_tx).await;
        state.handle_command(UserCommand::Skip, &ui_tx).await;
        drain(&mut ui_rx);

        state
            .handle_command(UserCommand::Bid { team: "A".into() }, &ui_tx)
            .await;
        let updates = drain(&mut ui_rx);
        assert!(updates.iter().any(|u| match u {
            UiUpdate::Notice(msg) => msg.contains("All players processed"),
            _ => false,
        }));
    }

    #[tokio::test]
    async fn reset_auction_clears_ledger_but_keeps_budgets() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state
            .handle_command(UserCommand::Bid { team: "B".into() }, &ui_tx)
            .await;
        state.handle_command(UserCommand::Sell, &ui_tx).await;
        state.handle_command(UserCommand::ResetAuction, &ui_tx).await;

        let updates = drain(&mut ui_rx);
        let snapshot = last_snapshot(&updates).unwrap();
        assert_eq!(snapshot.processed, 0);
        assert!(snapshot.ledger.iter().all(|r| !r.sold));
        // B still paid for the sale made before the reset.
        let team_b = snapshot.teams.iter().find(|t| t.name == "B").unwrap();
        assert_eq!(team_b.budget_remaining, 9900);
    }

    #[tokio::test]
    async fn apply_starting_budget_restores_every_team() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state
            .handle_command(UserCommand::Bid { team: "B".into() }, &ui_tx)
            .await;
        state.handle_command(UserCommand::Sell, &ui_tx).await;
        state
            .handle_command(UserCommand::ApplyStartingBudget, &ui_tx)
            .await;

        let updates = drain(&mut ui_rx);
        let snapshot = last_snapshot(&updates).unwrap();
        assert!(snapshot.teams.iter().all(|t| t.budget_remaining == 10000));
    }

    #[tokio::test]
    async fn toggle_timer_starts_then_pauses() {
        let (mut state, _tick_rx) = test_state("unused.csv");
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state.handle_command(UserCommand::ToggleTimer, &ui_tx).await;
        assert!(state.countdown.is_running());
        state.handle_command(UserCommand::ToggleTimer, &ui_tx).await;
        assert!(!state.countdown.is_running());
        assert_eq!(state.countdown.time_left(), 30);
        drain(&mut ui_rx);
    }

    #[tokio::test]
    async fn export_writes_the_ledger_file() {
        let path = std::env::temp_dir().join("auction_app_export_test.csv");
        let _ = std::fs::remove_file(&path);
        let (mut state, _tick_rx) = test_state(path.to_str().unwrap());
        let (ui_tx, mut ui_rx) = mpsc::channel(32);

        state
            .handle_command(UserCommand::Bid { team: "A".into() }, &ui_tx)
            .await;
        state.handle_command(UserCommand::Sell, &ui_tx).await;
        state.handle_command(UserCommand::Export, &ui_tx).await;

        let updates = drain(&mut ui_rx);
        assert!(updates.iter().any(|u| match u {
            UiUpdate::Notice(msg) => msg.contains("exported"),
            _ => false,
        }));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().count() == 3); // header + 2 players
        assert!(content.contains("Player 1"));
        assert!(content.contains("True,A,100"));

        let _ = std::fs::remove_file(&path);
    }
}
