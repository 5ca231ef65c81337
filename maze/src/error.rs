use thiserror::Error;

use crate::{Coord, DoorPlacement, Rect};

/// Errors from building a maze
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid maze configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("gave up after {attempts} attempts to place room {placed}")]
    AttemptsExhausted { placed: usize, attempts: u32 },
}

/// A configuration that cannot produce a maze
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze size must be larger than 0")]
    ZeroSize,

    #[error("a maze of {size} rooms does not fit in {area} cells")]
    SizeExceedsBounds { size: usize, area: u64 },

    #[error("bounds {0:?} do not contain the first room")]
    OriginOutOfBounds(Rect),

    #[error("no room can be extended after placing {placed} of {target} rooms")]
    NoAvailableRoom { placed: usize, target: usize },
}

/// Misuse of the door bookkeeping of a single room
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    #[error("room {0:?} already has 4 doors")]
    NoFreeSlot(Coord),

    #[error("room {0:?} already has a {1} door")]
    DuplicatePlacement(Coord, DoorPlacement),

    #[error("room {0:?} has no {1} door")]
    MissingDoor(Coord, DoorPlacement),
}
