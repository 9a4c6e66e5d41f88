use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::engine::GamePhase;

/// Why a move request was refused. The game state is never touched when one
/// of these is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    /// Source and target of an Add belong to the same player.
    SameOwner,
    /// The Add source is not one of the mover's hands.
    NotYourHand,
    DeadSource,
    DeadTarget,
    SplitNotAllowed {
        left: u8,
        right: u8,
    },
    OutOfRange(u8),
    UnknownHand(String),
    WrongPhase {
        operation: &'static str,
        phase: GamePhase,
    },
    /// A scheduled move was computed for a turn that no longer exists.
    StaleTicket,
}

impl Display for InvalidMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InvalidMove::SameOwner => write!(f, "cannot add to your own hand"),
            InvalidMove::NotYourHand => write!(f, "source hand belongs to the other player"),
            InvalidMove::DeadSource => write!(f, "source hand is dead"),
            InvalidMove::DeadTarget => write!(f, "target hand is dead"),
            InvalidMove::SplitNotAllowed { left, right } => {
                write!(f, "split {}/{} is not allowed", left, right)
            }
            InvalidMove::OutOfRange(v) => write!(f, "hand value {} is out of range", v),
            InvalidMove::UnknownHand(s) => write!(f, "unknown hand: {s}"),
            InvalidMove::WrongPhase { operation, phase } => {
                write!(f, "{} is not allowed in {:?} phase", operation, phase)
            }
            InvalidMove::StaleTicket => write!(f, "move was scheduled for an earlier turn"),
        }
    }
}

impl Error for InvalidMove {}
