//! Weekly availability editing.
//! The board drives the drag gesture and category toggles; the reconciler
//! writes finished gestures through an `AvailabilityStore`, either inline or
//! on the background worker.

mod board;
mod error;
pub mod reconciler;
pub mod store;
mod worker;

pub use board::AvailabilityBoard;
pub use error::AvailabilityError;
pub use reconciler::{
    fetch_week, reconcile, PersistedSlots, ReconcileJob, ReconcileOutcome, ReconcilePlan,
};
pub use store::{AvailabilityStore, SqliteStore};
pub use worker::ReconcileWorker;
