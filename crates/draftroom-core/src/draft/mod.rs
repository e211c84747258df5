pub mod pick;
pub mod state;

pub use pick::{PickRecord, ViewerRole};
pub use state::{Draft, DraftStatus};
