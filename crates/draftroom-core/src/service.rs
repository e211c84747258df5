// The operations transport code calls: create, check id, retrieve, pick.
//
// Every operation reads the registry, delegates decisions to the engine,
// and writes the result back. Nothing here blocks or awaits.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::draft::{Draft, PickRecord, ViewerRole};
use crate::error::DraftError;
use crate::registry::Registry;

/// Input for [`DraftService::create_draft`].
///
/// `options` and `drafters` must already be trimmed, non-blank and free of
/// duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDraft {
    pub id: String,
    pub options: Vec<String>,
    pub drafters: Vec<String>,
    pub rounds_per_drafter: u32,
}

/// Result of a create request that did not fail validation.
///
/// A taken id is an ordinary outcome for the client, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(Draft),
    AlreadyExists,
}

/// A draft as seen by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftView {
    pub draft: Draft,
    pub role: ViewerRole,
    pub history: Vec<PickRecord>,
}

/// Owns the registry and exposes the draft operations.
#[derive(Debug, Default)]
pub struct DraftService {
    registry: Registry,
}

impl DraftService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate and register a new draft.
    ///
    /// An existing id short-circuits to [`CreateOutcome::AlreadyExists`]
    /// before the draft itself is checked. Losing an insert race to a
    /// concurrent create of the same id yields the same outcome.
    pub fn create_draft(&self, request: NewDraft) -> Result<CreateOutcome, DraftError> {
        let NewDraft {
            id,
            options,
            drafters,
            rounds_per_drafter,
        } = request;

        if self.registry.has(&id) {
            warn!("Create rejected: draft '{id}' already exists");
            return Ok(CreateOutcome::AlreadyExists);
        }

        let draft = Draft::create(options, drafters, rounds_per_drafter).map_err(|e| {
            warn!("Create rejected for draft '{id}': {e}");
            e
        })?;

        match self.registry.insert(&id, draft.clone()) {
            Ok(()) => {
                info!(
                    "Created draft '{id}': {} drafters, {} options, {} total rounds",
                    draft.drafters().len(),
                    draft.options().len(),
                    draft.total_rounds()
                );
                Ok(CreateOutcome::Created(draft))
            }
            Err(DraftError::AlreadyExists { .. }) => {
                warn!("Create rejected: draft '{id}' was registered concurrently");
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    /// `true` when no draft is registered under `id`.
    pub fn check_id_available(&self, id: &str) -> bool {
        let available = !self.registry.has(id);
        debug!("Id '{id}' available: {available}");
        available
    }

    pub fn retrieve_draft(&self, id: &str) -> Result<Draft, DraftError> {
        debug!("Retrieving draft '{id}'");
        self.registry.get(id)
    }

    /// Apply a pick to the draft stored under `id`. The check and the write
    /// happen under the draft's lock, so two concurrent picks cannot both
    /// claim the same turn.
    pub fn make_pick(
        &self,
        id: &str,
        requesting_drafter: &str,
        selection: &str,
    ) -> Result<Draft, DraftError> {
        match self
            .registry
            .update(id, |draft| draft.apply_pick(requesting_drafter, selection))
        {
            Ok(draft) => {
                info!(
                    "Draft '{id}': {requesting_drafter} picked '{selection}' (pick {} of {}), next up {}",
                    draft.current_round() - 1,
                    draft.total_rounds(),
                    draft.current_drafter()
                );
                Ok(draft)
            }
            Err(e) => {
                warn!("Pick rejected on draft '{id}' from {requesting_drafter}: {e}");
                Err(e)
            }
        }
    }

    /// Snapshot of a draft plus what `username` can do and who picked what.
    pub fn view_draft(&self, id: &str, username: &str) -> Result<DraftView, DraftError> {
        let draft = self.registry.get(id)?;
        let role = draft.role_of(username);
        let history = draft.pick_history();
        Ok(DraftView {
            draft,
            role,
            history,
        })
    }

    /// Drop every draft.
    pub fn reset(&self) {
        info!("Clearing all drafts");
        self.registry.clear();
    }
}
