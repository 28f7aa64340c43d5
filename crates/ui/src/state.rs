//! Interaction state machines for the edit and delete modals.

use lore_core::types::DbId;

/// Edit modal lifecycle: `Closed -> Loading -> Open -> Submitting -> Closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Closed,
    /// Fetching the record; the modal is not shown yet.
    Loading { id: DbId },
    /// Modal shown and pre-filled.
    Open { id: DbId },
    /// Update request in flight; the modal stays visible.
    Submitting { id: DbId },
}

/// Delete confirmation lifecycle: `Idle -> Confirming -> Deleting -> Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    Confirming { id: DbId, name: String },
    Deleting { id: DbId, name: String },
}

impl DeleteState {
    /// The pending-delete id, set from the Delete click until the flow ends.
    pub fn pending(&self) -> Option<DbId> {
        match self {
            DeleteState::Idle => None,
            DeleteState::Confirming { id, .. } | DeleteState::Deleting { id, .. } => Some(*id),
        }
    }
}
