use thiserror::Error;

use crate::engine::state::CritterStateKind;

#[derive(Error, Debug)]
pub enum CritterError {
    #[error("illegal state order, expected {expected:?} in slot {slot} but found {found:?}")]
    StateOrder {
        slot: usize,
        expected: CritterStateKind,
        found: CritterStateKind,
    },

    #[error("controller is already wired; attach_states must be called exactly once")]
    AlreadyWired,

    #[error("controller has not been wired; call attach_states before ticking")]
    NotWired,

    #[error("unknown entity: {0:?}")]
    UnknownEntity(crate::core::types::EntityId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("definition parse error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CritterError>;
