//! Engine errors
//!
//! What escapes the behaviour engine to its caller. Recoverable render
//! failures are contained by the rollback path and never appear here; a
//! discrepancy between declared and displayed state is treated as worse
//! than a crash, so the unrecoverable flavors always propagate.

use crate::component::RenderError;
use crate::descriptor::ValidationError;

/// Failure surfaced by a component instance
#[derive(Debug, thiserror::Error)]
pub enum BehaviourError {
    /// An attribute transform rejected a value at the point of read/write
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The synthetic initial render failed; there is no prior value to
    /// revert to, so nothing was committed
    #[error("failed initial render of custom element: {source}")]
    InitialRender {
        #[source]
        source: RenderError,
    },

    /// The recovery render for a rolled-back attribute failed as well; the
    /// displayed state can no longer be reconciled with the declared state
    #[error("failed to restore old state of custom element after <{attribute}> change: {source}")]
    UnrecoverableState {
        attribute: String,
        #[source]
        source: RenderError,
    },
}
