//! Upload trigger events.

use serde::{Deserialize, Serialize};

/// A finalized-object notification from the object store.
///
/// One event is delivered per finalized object; duplicate deliveries for the
/// same object are possible and are not de-duplicated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectFinalized {
    /// The bucket holding the object
    pub bucket: String,
    /// The full object name within the bucket
    pub name: String,
}
