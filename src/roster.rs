// Roster registry: the active team set and budget bookkeeping.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::players::PlayerRecord;

/// The state of a single team during the auction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team name, unique within the active roster.
    pub name: String,
    /// Remaining budget.
    pub budget_remaining: u32,
}

/// The set of active teams, in display order.
///
/// Roster counts are intentionally not stored here: how many players a team
/// has bought is always derived from the player queue (see
/// [`players_bought`]) so the two can never drift apart.
#[derive(Debug, Clone, Default)]
pub struct RosterRegistry {
    pub teams: Vec<Team>,
}

impl RosterRegistry {
    /// Create a registry with one team per name, each at the starting budget.
    pub fn new(names: &[String], starting_budget: u32) -> Self {
        RosterRegistry {
            teams: names
                .iter()
                .map(|n| Team {
                    name: n.clone(),
                    budget_remaining: starting_budget,
                })
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.teams.iter().any(|t| t.name == name)
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    /// Reconcile the registry against a new team-name list.
    ///
    /// Names already registered keep their budget; newly present names are
    /// created at the starting budget; registered teams missing from the
    /// list are removed. The registry takes on the order of `names`.
    ///
    /// Returns the names that were removed so the engine can clear the
    /// current bid if the leader was among them.
    pub fn sync(&mut self, names: &[String], starting_budget: u32) -> Vec<String> {
        let removed: Vec<String> = self
            .teams
            .iter()
            .filter(|t| !names.contains(&t.name))
            .map(|t| t.name.clone())
            .collect();

        let old = std::mem::take(&mut self.teams);
        self.teams = names
            .iter()
            .map(|n| {
                old.iter()
                    .find(|t| &t.name == n)
                    .cloned()
                    .unwrap_or_else(|| Team {
                        name: n.clone(),
                        budget_remaining: starting_budget,
                    })
            })
            .collect();

        if !removed.is_empty() {
            info!("Removed teams from roster: {}", removed.join(", "));
        }
        removed
    }

    /// Reset every active team's budget to the starting budget,
    /// unconditionally, including teams with spend.
    pub fn apply_starting_budget_to_all(&mut self, starting_budget: u32) {
        for team in &mut self.teams {
            team.budget_remaining = starting_budget;
        }
        info!("Applied starting budget {} to all teams", starting_budget);
    }

    /// Subtract `amount` from a team's budget.
    ///
    /// The caller validates the amount against the budget before calling;
    /// this performs no bound check of its own.
    pub fn debit(&mut self, name: &str, amount: u32) {
        debug_assert!(
            self.team(name).is_some_and(|t| t.budget_remaining >= amount),
            "debit precondition violated for team '{name}'"
        );
        if let Some(team) = self.teams.iter_mut().find(|t| t.name == name) {
            team.budget_remaining = team.budget_remaining.saturating_sub(amount);
        }
    }
}

/// How many players in the queue have been sold to this team. Derived from
/// the queue rather than stored to avoid double-bookkeeping drift.
pub fn players_bought(players: &[PlayerRecord], team: &str) -> u32 {
    players.iter().filter(|p| p.sold_to == team).count() as u32
}

/// Roster slots the team has left, floored at zero.
pub fn slots_left(players: &[PlayerRecord], team: &str, max_players_per_team: u32) -> u32 {
    max_players_per_team.saturating_sub(players_bought(players, team))
}

/// Parse operator-entered team names: one per line, trimmed, blank lines
/// ignored, duplicates dropped keeping the first occurrence.
pub fn parse_team_names(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter(|l| seen.insert(l.to_string()))
        .map(str::to_string)
        .collect()
}
