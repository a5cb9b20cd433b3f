// Auction engine: the per-player bidding state machine.
//
// One player is "on the block" at a time, addressed by a cursor into the
// player queue. Teams bid in fixed increments against their remaining
// budget; the auctioneer finalizes each player as sold or unsold, which is
// the only way the cursor advances. Every failure mode is a recoverable,
// operator-visible outcome, never an error path.

use tracing::{info, warn};

use crate::config::AuctionConfig;
use crate::players::PlayerRecord;
use crate::roster::{self, RosterRegistry};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Where the engine is in the per-player progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Player on the block, no bid placed yet.
    AwaitingBid,
    /// Player on the block with an active bid and leader.
    BidActive,
    /// Cursor has moved past the last player. Terminal.
    Exhausted,
}

/// Result of a `place_bid` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    Accepted { amount: u32 },
    /// The team is not in the active registry. State unchanged.
    UnknownTeam,
    /// The team cannot cover the next bid. State unchanged.
    InsufficientBudget { required: u32 },
    /// All players already processed.
    Exhausted,
}

/// Result of a `finalize_sale` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SellOutcome {
    Sold { team: String, price: u32 },
    /// No leading team yet. State unchanged.
    NoLeader,
    /// The leader was removed from the roster mid-bid; the bid has been
    /// cleared and the operator must re-bid.
    LeaderRemoved,
    /// All players already processed.
    Exhausted,
}

/// Result of a `skip_current` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipOutcome {
    Skipped,
    /// All players already processed.
    Exhausted,
}

// ---------------------------------------------------------------------------
// AuctionSession
// ---------------------------------------------------------------------------

/// The complete auction state: player queue, roster registry, and cursor.
///
/// Owned by a single controller and mutated through the operation methods
/// below; there are no other writers.
///
/// Invariant: `current_bid == 0` if and only if `current_leader` is `None`.
#[derive(Debug, Clone)]
pub struct AuctionSession {
    pub settings: AuctionConfig,
    /// The ordered player queue. Sale fields are owned by the engine.
    pub players: Vec<PlayerRecord>,
    pub registry: RosterRegistry,
    /// 0-based pointer into the player queue; the player at this index is
    /// on the block. Only ever increments (sell/skip) or resets to 0.
    pub current_index: usize,
    /// Current high bid; 0 means no bid placed yet.
    pub current_bid: u32,
    /// The team holding the current high bid, if any.
    pub current_leader: Option<String>,
}

impl AuctionSession {
    pub fn new(settings: AuctionConfig, team_names: &[String], players: Vec<PlayerRecord>) -> Self {
        let registry = RosterRegistry::new(team_names, settings.starting_budget);
        AuctionSession {
            settings,
            players,
            registry,
            current_index: 0,
            current_bid: 0,
            current_leader: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.current_index >= self.players.len() {
            Phase::Exhausted
        } else if self.current_bid > 0 {
            Phase::BidActive
        } else {
            Phase::AwaitingBid
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase() == Phase::Exhausted
    }

    /// The player currently on the block, if any.
    pub fn current_player(&self) -> Option<&PlayerRecord> {
        self.players.get(self.current_index)
    }

    /// Number of players already sold or skipped.
    pub fn processed_count(&self) -> usize {
        self.current_index.min(self.players.len())
    }

    pub fn players_bought(&self, team: &str) -> u32 {
        roster::players_bought(&self.players, team)
    }

    pub fn slots_left(&self, team: &str) -> u32 {
        roster::slots_left(&self.players, team, self.settings.max_players_per_team)
    }

    /// Place the next incremental bid for `team` on the player on the block.
    ///
    /// The next amount is `current_bid + increment`, or the bare increment
    /// when no bid has been placed yet. A team may raise its own leading
    /// bid; there is no rule against self-outbidding. Roster slots are not
    /// checked here either: a team at max roster can still bid and win.
    pub fn place_bid(&mut self, team: &str) -> BidOutcome {
        if self.is_exhausted() {
            return BidOutcome::Exhausted;
        }

        let required = if self.current_bid > 0 {
            self.current_bid + self.settings.bid_increment
        } else {
            self.settings.bid_increment
        };

        let Some(entry) = self.registry.team(team) else {
            warn!("bid rejected: '{}' is not an active team", team);
            return BidOutcome::UnknownTeam;
        };

        if entry.budget_remaining < required {
            warn!(
                "bid rejected: {} cannot cover next bid of {} (budget {})",
                team, required, entry.budget_remaining
            );
            return BidOutcome::InsufficientBudget { required };
        }

        self.current_bid = required;
        self.current_leader = Some(team.to_string());
        info!("bid accepted: {} at {}", team, required);
        BidOutcome::Accepted { amount: required }
    }

    /// Sell the player on the block to the leading team.
    ///
    /// Writes the sale fields, debits the leader's budget by the final bid,
    /// advances the cursor, and clears the bid state. If the leader was
    /// removed from the roster after bidding, the bid is cleared instead
    /// and the operator must re-bid.
    pub fn finalize_sale(&mut self) -> SellOutcome {
        if self.is_exhausted() {
            return SellOutcome::Exhausted;
        }

        let Some(leader) = self.current_leader.clone() else {
            warn!("sale rejected: no leading team yet");
            return SellOutcome::NoLeader;
        };

        if !self.registry.contains(&leader) {
            warn!(
                "sale rejected: leading team '{}' is no longer in the roster; bid cleared",
                leader
            );
            self.clear_bid();
            return SellOutcome::LeaderRemoved;
        }

        let price = self.current_bid;
        self.players[self.current_index].mark_sold(&leader, price);
        self.registry.debit(&leader, price);
        info!(
            "sold: {} -> {} for {}",
            self.players[self.current_index].name, leader, price
        );
        self.advance();
        SellOutcome::Sold { team: leader, price }
    }

    /// Mark the player on the block unsold and move on.
    ///
    /// Overwrites the sale fields to the unsold state regardless of prior
    /// content, discards any active bid without charging anyone, and
    /// advances the cursor.
    pub fn skip_current(&mut self) -> SkipOutcome {
        if self.is_exhausted() {
            return SkipOutcome::Exhausted;
        }

        self.players[self.current_index].clear_sale();
        info!("unsold: {}", self.players[self.current_index].name);
        self.advance();
        SkipOutcome::Skipped
    }

    /// Clear all results and bids and return to the first player.
    ///
    /// Budgets are deliberately untouched; use
    /// `apply_starting_budget_to_all` to restore them.
    pub fn reset_auction(&mut self) {
        self.current_index = 0;
        self.clear_bid();
        for player in &mut self.players {
            player.clear_sale();
        }
        info!("auction reset: results and bids cleared, budgets unchanged");
    }

    /// Reconcile the registry with an updated team list.
    ///
    /// If the current bid leader is among the removed teams, the bid is
    /// cleared in the same step so a finalize can never charge a team that
    /// no longer exists. Returns `true` when the bid was cleared.
    pub fn sync_teams(&mut self, names: &[String]) -> bool {
        let removed = self
            .registry
            .sync(names, self.settings.starting_budget);
        match &self.current_leader {
            Some(leader) if removed.contains(leader) => {
                warn!("leading team '{}' removed; clearing current bid", leader);
                self.clear_bid();
                true
            }
            _ => false,
        }
    }

    /// Push the configured starting budget to every team.
    pub fn apply_starting_budget_to_all(&mut self) {
        self.registry
            .apply_starting_budget_to_all(self.settings.starting_budget);
    }

    fn clear_bid(&mut self) {
        self.current_bid = 0;
        self.current_leader = None;
    }

    fn advance(&mut self) {
        self.current_index += 1;
        self.clear_bid();
        if self.is_exhausted() {
            info!("all players processed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
