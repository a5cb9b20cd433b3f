// Message types exchanged between the app orchestrator and the TUI.

/// Which tab is active in the main panel. Mirrors the four views of the
/// auction room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    AuctionRoom,
    Teams,
    Results,
    Projector,
}

/// Commands issued by the operator through the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Place the next incremental bid for a team.
    Bid { team: String },
    /// Sell the player on the block to the leading team.
    Sell,
    /// Mark the player on the block unsold and move on.
    Skip,
    /// Push the configured starting budget to every team.
    ApplyStartingBudget,
    /// Clear all results and bids and return to the first player.
    ResetAuction,
    /// Start the countdown if stopped, pause it if running.
    ToggleTimer,
    /// Stop the countdown and restore the configured duration.
    ResetTimer,
    /// Write the sale ledger CSV.
    Export,
    /// Re-read the team list from the config file and sync the registry.
    ReloadTeams,
    SwitchTab(TabId),
    Quit,
}

/// Updates pushed from the orchestrator to the TUI render loop.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    /// Full refresh of the auction view.
    Snapshot(Box<AuctionSnapshot>),
    /// Informational message for the status line.
    Notice(String),
    /// Recoverable problem the operator should see.
    Warning(String),
    TimerTick { remaining: u32 },
    TimerExpired,
}

/// Display fields for the player currently on the block.
#[derive(Debug, Clone, Default)]
pub struct PlayerCard {
    pub name: String,
    pub age_group: String,
    pub primary_strength: String,
    pub availability: String,
    pub profile_link: String,
}

/// Per-team display line: budget plus roster occupancy derived from the
/// player queue.
#[derive(Debug, Clone)]
pub struct TeamSnapshot {
    pub name: String,
    pub budget_remaining: u32,
    pub players_bought: u32,
    pub max_players: u32,
    pub is_leader: bool,
}

/// One row of the results table.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub name: String,
    pub sold: bool,
    pub sold_to: String,
    pub final_price: u32,
}

/// Everything the TUI needs to draw one frame of auction state.
#[derive(Debug, Clone)]
pub struct AuctionSnapshot {
    pub tournament_name: String,
    pub currency_symbol: String,
    pub on_block: Option<PlayerCard>,
    pub current_bid: u32,
    /// Step for the next bid, for display alongside the current bid.
    pub bid_increment: u32,
    pub current_leader: Option<String>,
    /// True once every player has been processed.
    pub exhausted: bool,
    pub processed: usize,
    pub total_players: usize,
    pub teams: Vec<TeamSnapshot>,
    pub ledger: Vec<LedgerRow>,
    pub timer_running: bool,
    pub time_left: u32,
}
