//! Host-facing graph commands.
//!
//! # Responsibility
//! - Name every action a host can bind to a key or menu entry.
//! - Parse keyboard-style command names (`up`, `volume-down`, `select:sink-0`).

use crate::control::cascade::{CascadeOutcome, VolumeDirection};
use crate::model::graph::{EdgeId, ElementIdParseError, ElementRef, NodeId};
use crate::selection::category::{HorizontalDirection, VerticalDirection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One user action against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphCommand {
    Navigate(VerticalDirection),
    NavigateHorizontal(HorizontalDirection),
    Select(ElementRef),
    Deselect,
    ToggleMute,
    AdjustVolume(VolumeDirection),
    DeleteSelected,
    /// Re-route a stream edge onto another device node.
    SwapEdge { edge: EdgeId, target: NodeId },
}

/// What a dispatched command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Selection command; `true` when the selection changed.
    Selection(bool),
    /// Mutation command.
    Control(CascadeOutcome),
}

impl CommandOutcome {
    /// Number of control requests the command submitted.
    pub fn issued(self) -> usize {
        match self {
            Self::Selection(_) => 0,
            Self::Control(outcome) => outcome.issued(),
        }
    }
}

/// Command-name parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphCommandParseError {
    /// Name is not a known command.
    Unknown(String),
    /// Command needs an argument that was not given.
    MissingArgument(&'static str),
    /// Argument is not a valid element id.
    InvalidElement(ElementIdParseError),
    /// Swap arguments are not an edge followed by a node.
    InvalidSwap(String),
}

impl Display for GraphCommandParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(value) => write!(f, "unknown command `{value}`"),
            Self::MissingArgument(command) => write!(f, "command `{command}` needs an argument"),
            Self::InvalidElement(err) => write!(f, "{err}"),
            Self::InvalidSwap(value) => {
                write!(f, "invalid swap `{value}`; expected swap:<edge-id>:<node-id>")
            }
        }
    }
}

impl Error for GraphCommandParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidElement(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ElementIdParseError> for GraphCommandParseError {
    fn from(value: ElementIdParseError) -> Self {
        Self::InvalidElement(value)
    }
}

impl FromStr for GraphCommand {
    type Err = GraphCommandParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (name, argument) = match value.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (value, None),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "up" => Self::Navigate(VerticalDirection::Up),
            "down" => Self::Navigate(VerticalDirection::Down),
            "left" => Self::NavigateHorizontal(HorizontalDirection::Left),
            "right" => Self::NavigateHorizontal(HorizontalDirection::Right),
            "deselect" => Self::Deselect,
            "mute" => Self::ToggleMute,
            "volume-up" => Self::AdjustVolume(VolumeDirection::Up),
            "volume-down" => Self::AdjustVolume(VolumeDirection::Down),
            "delete" => Self::DeleteSelected,
            "select" => {
                let argument = argument.ok_or(GraphCommandParseError::MissingArgument("select"))?;
                return Ok(Self::Select(argument.parse()?));
            }
            "swap" => {
                let argument = argument.ok_or(GraphCommandParseError::MissingArgument("swap"))?;
                return parse_swap(argument);
            }
            _ => return Err(GraphCommandParseError::Unknown(value.to_string())),
        };
        match argument {
            Some(_) => Err(GraphCommandParseError::Unknown(value.to_string())),
            None => Ok(command),
        }
    }
}

fn parse_swap(argument: &str) -> Result<GraphCommand, GraphCommandParseError> {
    let invalid = || GraphCommandParseError::InvalidSwap(argument.to_string());
    let (edge, target) = argument.split_once(':').ok_or_else(invalid)?;
    match (edge.parse::<ElementRef>()?, target.parse::<ElementRef>()?) {
        (ElementRef::Edge(edge), ElementRef::Node(target)) => {
            Ok(GraphCommand::SwapEdge { edge, target })
        }
        _ => Err(invalid()),
    }
}
