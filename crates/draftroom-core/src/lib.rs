// Library root: the draft state machine, its in-memory registry, and the
// operation surface the transport layer calls into.

pub mod draft;
pub mod error;
pub mod registry;
pub mod service;

pub use draft::{Draft, DraftStatus, PickRecord, ViewerRole};
pub use error::{DraftError, ErrorKind};
pub use registry::Registry;
pub use service::{CreateOutcome, DraftService, DraftView, NewDraft};
