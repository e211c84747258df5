// Draft state: the option pool, turn order, and round-robin progress.

use serde::Serialize;

use crate::error::DraftError;

/// Whether a draft still has turns to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftStatus {
    InProgress,
    Complete,
}

/// The complete state of one draft.
///
/// Fields are private so the only ways to obtain a `Draft` are
/// [`Draft::create`] and [`Draft::apply_pick`], both of which uphold:
/// - `drafters` is non-empty and fixed for the lifetime of the draft;
/// - `current_drafter` is an element of `drafters`;
/// - `picks_so_far.len() == current_round - 1`;
/// - pick `k` (0-indexed) was made by `drafters[k % drafters.len()]`;
/// - nothing in `picks_so_far` is still in `options`.
///
/// The serialized field names match the JSON the browser client reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Draft {
    /// Remaining pool; shrinks by exactly one per pick.
    #[serde(rename = "draftOptions")]
    options: Vec<String>,
    /// Turn order.
    drafters: Vec<String>,
    /// Rounds per drafter times the number of drafters.
    #[serde(rename = "totalRounds")]
    total_rounds: usize,
    /// 1-based pick counter. Exceeds `total_rounds` once the draft is over.
    #[serde(rename = "currRound")]
    current_round: usize,
    /// Whose turn it is.
    #[serde(rename = "currDrafter")]
    current_drafter: String,
    /// Selections in the order they were made.
    #[serde(rename = "picksSoFar")]
    picks_so_far: Vec<String>,
}

impl Draft {
    /// Build a new draft after checking, in order:
    /// 1. at least one drafter ([`DraftError::InvalidDrafters`]);
    /// 2. at least one round per drafter ([`DraftError::InvalidRounds`]);
    /// 3. enough options for every pick ([`DraftError::InsufficientOptions`]).
    ///
    /// `options` and `drafters` must already be free of duplicates; that is
    /// the caller's job and is not re-checked here.
    pub fn create(
        options: Vec<String>,
        drafters: Vec<String>,
        rounds_per_drafter: u32,
    ) -> Result<Self, DraftError> {
        let Some(first) = drafters.first().cloned() else {
            return Err(DraftError::InvalidDrafters);
        };

        if rounds_per_drafter == 0 {
            return Err(DraftError::InvalidRounds);
        }

        let total_rounds = (rounds_per_drafter as usize).saturating_mul(drafters.len());
        if options.len() < total_rounds {
            return Err(DraftError::InsufficientOptions {
                available: options.len(),
                required: total_rounds,
            });
        }

        Ok(Draft {
            options,
            drafters,
            total_rounds,
            current_round: 1,
            current_drafter: first,
            picks_so_far: Vec::new(),
        })
    }

    /// The drafter after `current_drafter`, wrapping to the first drafter
    /// after the last one.
    ///
    /// Fails with [`DraftError::UnknownDrafter`] only if the invariants
    /// have been broken.
    pub fn next_drafter(&self) -> Result<&str, DraftError> {
        let idx = self
            .drafters
            .iter()
            .position(|d| *d == self.current_drafter)
            .ok_or_else(|| DraftError::UnknownDrafter {
                drafter: self.current_drafter.clone(),
            })?;

        let next = if idx + 1 == self.drafters.len() {
            &self.drafters[0]
        } else {
            &self.drafters[idx + 1]
        };
        Ok(next)
    }

    /// Apply one pick and return the resulting draft. `self` is never
    /// modified, so a rejected pick leaves the draft exactly as it was.
    ///
    /// Checks, in order: turn ownership, completion, availability.
    pub fn apply_pick(&self, requesting_drafter: &str, selection: &str) -> Result<Draft, DraftError> {
        if requesting_drafter != self.current_drafter {
            return Err(DraftError::NotYourTurn {
                requested: requesting_drafter.to_string(),
                current: self.current_drafter.clone(),
            });
        }

        if self.is_complete() {
            return Err(DraftError::DraftAlreadyComplete {
                total_rounds: self.total_rounds,
            });
        }

        let Some(idx) = self.options.iter().position(|o| o == selection) else {
            return Err(DraftError::OptionNotAvailable {
                selection: selection.to_string(),
            });
        };

        // Computed against the pre-pick state: the turn that was just used.
        let next = self.next_drafter()?.to_string();

        let mut options = self.options.clone();
        let picked = options.remove(idx);
        let mut picks_so_far = self.picks_so_far.clone();
        picks_so_far.push(picked);

        Ok(Draft {
            options,
            drafters: self.drafters.clone(),
            total_rounds: self.total_rounds,
            current_round: self.current_round + 1,
            current_drafter: next,
            picks_so_far,
        })
    }

    pub fn status(&self) -> DraftStatus {
        if self.current_round > self.total_rounds {
            DraftStatus::Complete
        } else {
            DraftStatus::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == DraftStatus::Complete
    }

    /// Number of turns left before the draft completes.
    pub fn picks_remaining(&self) -> usize {
        (self.total_rounds + 1).saturating_sub(self.current_round)
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn drafters(&self) -> &[String] {
        &self.drafters
    }

    pub fn total_rounds(&self) -> usize {
        self.total_rounds
    }

    pub fn current_round(&self) -> usize {
        self.current_round
    }

    pub fn current_drafter(&self) -> &str {
        &self.current_drafter
    }

    pub fn picks_so_far(&self) -> &[String] {
        &self.picks_so_far
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
