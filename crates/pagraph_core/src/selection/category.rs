//! Logical categories and their cyclic navigation order.
//!
//! The ring follows the signal path: source -> source-output ->
//! client/module -> sink-input -> sink, then wraps back to source.

use crate::model::graph::{EdgeKind, NodeKind};

/// Navigation class of a graph element. Clients and modules share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalCategory {
    Source,
    SourceOutput,
    ClientOrModule,
    SinkInput,
    Sink,
}

/// Direction within one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalDirection {
    Up,
    Down,
}

/// Direction across categories; `Left` walks toward sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
}

/// Fixed cyclic order over `LogicalCategory`.
pub struct CategoryRing;

impl CategoryRing {
    pub const ORDER: [LogicalCategory; 5] = [
        LogicalCategory::Source,
        LogicalCategory::SourceOutput,
        LogicalCategory::ClientOrModule,
        LogicalCategory::SinkInput,
        LogicalCategory::Sink,
    ];

    /// Position of `category` in `ORDER`.
    pub fn position(category: LogicalCategory) -> usize {
        match category {
            LogicalCategory::Source => 0,
            LogicalCategory::SourceOutput => 1,
            LogicalCategory::ClientOrModule => 2,
            LogicalCategory::SinkInput => 3,
            LogicalCategory::Sink => 4,
        }
    }

    pub fn next(category: LogicalCategory) -> LogicalCategory {
        let len = Self::ORDER.len();
        Self::ORDER[(Self::position(category) + 1) % len]
    }

    pub fn previous(category: LogicalCategory) -> LogicalCategory {
        let len = Self::ORDER.len();
        Self::ORDER[(Self::position(category) + len - 1) % len]
    }

    pub fn step(category: LogicalCategory, direction: HorizontalDirection) -> LogicalCategory {
        match direction {
            HorizontalDirection::Left => Self::previous(category),
            HorizontalDirection::Right => Self::next(category),
        }
    }

    pub fn category_of_node(kind: NodeKind) -> LogicalCategory {
        match kind {
            NodeKind::Source => LogicalCategory::Source,
            NodeKind::Client | NodeKind::Module => LogicalCategory::ClientOrModule,
            NodeKind::Sink => LogicalCategory::Sink,
        }
    }

    /// Monitor relations sit outside the ring and return `None`.
    pub fn category_of_edge(kind: EdgeKind) -> Option<LogicalCategory> {
        match kind {
            EdgeKind::SourceOutput => Some(LogicalCategory::SourceOutput),
            EdgeKind::SinkInput => Some(LogicalCategory::SinkInput),
            EdgeKind::MonitorSource => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CategoryRing, HorizontalDirection, LogicalCategory};
    use crate::model::graph::{EdgeKind, NodeKind};

    #[test]
    fn next_and_previous_wrap_around() {
        assert_eq!(
            CategoryRing::next(LogicalCategory::Sink),
            LogicalCategory::Source
        );
        assert_eq!(
            CategoryRing::previous(LogicalCategory::Source),
            LogicalCategory::Sink
        );
        assert_eq!(
            CategoryRing::step(LogicalCategory::SourceOutput, HorizontalDirection::Right),
            LogicalCategory::ClientOrModule
        );
        assert_eq!(
            CategoryRing::step(LogicalCategory::SinkInput, HorizontalDirection::Left),
            LogicalCategory::ClientOrModule
        );
    }

    #[test]
    fn positions_match_order() {
        for (position, category) in CategoryRing::ORDER.iter().enumerate() {
            assert_eq!(CategoryRing::position(*category), position);
        }
    }

    #[test]
    fn clients_and_modules_share_a_category() {
        assert_eq!(
            CategoryRing::category_of_node(NodeKind::Client),
            CategoryRing::category_of_node(NodeKind::Module)
        );
        assert_eq!(CategoryRing::category_of_edge(EdgeKind::MonitorSource), None);
    }
}
