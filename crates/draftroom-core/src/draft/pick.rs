// Derived views over a draft: who made each pick, and what a given user
// can do right now.

use serde::Serialize;

use super::state::Draft;

/// One completed pick, attributed to the drafter whose turn it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickRecord {
    /// 1-based pick number.
    pub number: usize,
    pub selection: String,
    pub drafter: String,
}

/// A user's relationship to a draft at this moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum ViewerRole {
    /// It is this user's turn.
    OnTheClock,
    /// A participant waiting on someone else.
    Waiting { current: String },
    /// Not in the drafter list.
    Spectator { current: String },
    /// No turns left, for anyone.
    Complete,
}

impl Draft {
    /// Every pick so far with its number and drafter. Pick `k` (0-indexed)
    /// belongs to `drafters[k % drafters.len()]`.
    pub fn pick_history(&self) -> Vec<PickRecord> {
        let drafters = self.drafters();
        self.picks_so_far()
            .iter()
            .enumerate()
            .map(|(k, selection)| PickRecord {
                number: k + 1,
                selection: selection.clone(),
                drafter: drafters[k % drafters.len()].clone(),
            })
            .collect()
    }

    /// Classify `username` against this draft. Exact, case-sensitive match.
    pub fn role_of(&self, username: &str) -> ViewerRole {
        if self.is_complete() {
            return ViewerRole::Complete;
        }
        let current = self.current_drafter();
        if username == current {
            ViewerRole::OnTheClock
        } else if self.drafters().iter().any(|d| d == username) {
            ViewerRole::Waiting {
                current: current.to_string(),
            }
        } else {
            ViewerRole::Spectator {
                current: current.to_string(),
            }
        }
    }
}
