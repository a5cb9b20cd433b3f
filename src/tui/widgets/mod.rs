// TUI widget modules for each auction room panel.

pub mod block_banner;
pub mod help_bar;
pub mod projector;
pub mod results;
pub mod status_bar;
pub mod teams;
