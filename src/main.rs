// Auction room entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Ensure config files exist, load config
// 3. Load the player source CSV
// 4. Build the auction session
// 5. Create mpsc channels
// 6. Spawn the app logic task
// 7. Run the TUI event loop until the operator quits
// 8. Cleanup on exit

use auction_room::app;
use auction_room::config;
use auction_room::engine;
use auction_room::players;
use auction_room::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Auction room starting up");

    // 2. Load config (copying bundled defaults on first run)
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: tournament={}, {} teams, {}{} starting budget",
        config.tournament.name,
        config.teams.len(),
        config.tournament.currency_symbol,
        config.auction.starting_budget
    );

    // 3. Load the player source
    let player_list = players::load_players(&config.data.players)
        .context("failed to load the player source CSV")?;
    info!("Loaded {} players from {}", player_list.len(), config.data.players);

    // 4. Build the auction session
    let session = engine::AuctionSession::new(config.auction.clone(), &config.teams, player_list);

    // 5. Create mpsc channels
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (tick_tx, tick_rx) = mpsc::channel(32);

    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let app_state = app::AppState::new(config, session, base_dir, tick_tx);

    // 6. Spawn the app logic task
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(cmd_rx, tick_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. The TUI consumes ui_rx and sends commands through cmd_tx.
    //    It blocks until the operator presses 'q' or Ctrl+C.
    info!("Auction room ready");
    if let Err(e) = tui::run(ui_rx, cmd_tx).await {
        error!("TUI error: {}", e);
    }

    // 8. Cleanup: wait for the app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    info!("Auction room shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("auction-room.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("auction_room=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
