//! Selection state and keyboard-style navigation.
//!
//! # Responsibility
//! - Hold at most one selected node or edge of the current projection.
//! - Re-resolve the selection after every projection.
//! - Move the selection within a category (up/down) or across categories
//!   along the signal path (left/right).
//!
//! # Invariants
//! - A selection never outlives its element: `refresh` empties it when the
//!   id is gone.
//! - Navigation never fails; with no candidate the selection is unchanged.

use crate::graph::projector::Projection;
use crate::model::graph::{ElementRef, GraphEdge, GraphNode};
use crate::model::object::ObjectIndex;
use crate::selection::category::{
    CategoryRing, HorizontalDirection, LogicalCategory, VerticalDirection,
};
use std::sync::Arc;

/// Selected element instance taken from a projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedElement {
    Node(Arc<GraphNode>),
    Edge(Arc<GraphEdge>),
}

impl SelectedElement {
    pub fn element_ref(&self) -> ElementRef {
        match self {
            Self::Node(node) => ElementRef::Node(node.id),
            Self::Edge(edge) => ElementRef::Edge(edge.id),
        }
    }

    pub fn index(&self) -> ObjectIndex {
        match self {
            Self::Node(node) => node.index,
            Self::Edge(edge) => edge.index,
        }
    }

    pub fn category(&self) -> Option<LogicalCategory> {
        match self {
            Self::Node(node) => Some(CategoryRing::category_of_node(node.kind)),
            Self::Edge(edge) => CategoryRing::category_of_edge(edge.kind),
        }
    }

    /// One-hop adjacency: an edge and one of its endpoint nodes.
    fn is_adjacent_to(&self, other: &SelectedElement) -> bool {
        match (self, other) {
            (Self::Edge(edge), Self::Node(node)) | (Self::Node(node), Self::Edge(edge)) => {
                edge.touches(node.id)
            }
            (Self::Node(_), Self::Node(_)) | (Self::Edge(_), Self::Edge(_)) => false,
        }
    }

    fn sort_key(&self) -> (bool, ObjectIndex, ElementRef) {
        (
            matches!(self, Self::Edge(_)),
            self.index(),
            self.element_ref(),
        )
    }
}

/// Single-element selection over the current projection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<SelectedElement>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SelectedElement> {
        self.current.as_ref()
    }

    pub fn element_ref(&self) -> Option<ElementRef> {
        self.current.as_ref().map(SelectedElement::element_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn select_node(&mut self, node: Arc<GraphNode>) {
        self.current = Some(SelectedElement::Node(node));
    }

    pub fn select_edge(&mut self, edge: Arc<GraphEdge>) {
        self.current = Some(SelectedElement::Edge(edge));
    }

    pub fn deselect(&mut self) {
        self.current = None;
    }

    /// Selects `element` if it exists in `projection`; returns whether it did.
    pub fn select(&mut self, projection: &Projection, element: ElementRef) -> bool {
        match resolve(projection, element) {
            Some(found) => {
                self.current = Some(found);
                true
            }
            None => false,
        }
    }

    /// Re-resolves the selection against a new projection.
    ///
    /// Returns `false` when a previous selection was dropped.
    pub fn refresh(&mut self, projection: &Projection) -> bool {
        let Some(element) = self.element_ref() else {
            return true;
        };
        self.current = resolve(projection, element);
        self.current.is_some()
    }

    /// Moves within the current category, wrapping at both ends.
    ///
    /// With nothing selected the client/module category is used; `Down`
    /// then picks its first element and `Up` its last.
    pub fn navigate(&mut self, projection: &Projection, direction: VerticalDirection) -> bool {
        let category = match &self.current {
            Some(selected) => match selected.category() {
                Some(category) => category,
                None => return false,
            },
            None => LogicalCategory::ClientOrModule,
        };
        let candidates = candidates(projection, category);
        let count = candidates.len();
        if count == 0 {
            return false;
        }

        let position = self.current.as_ref().and_then(|selected| {
            candidates
                .iter()
                .position(|candidate| candidate.element_ref() == selected.element_ref())
        });
        let target = match (position, direction) {
            (Some(position), VerticalDirection::Down) => (position + 1) % count,
            (Some(position), VerticalDirection::Up) => (position + count - 1) % count,
            (None, VerticalDirection::Down) => 0,
            (None, VerticalDirection::Up) => count - 1,
        };
        self.replace(candidates.into_iter().nth(target))
    }

    /// Moves one hop along the signal path, preferring connected elements.
    ///
    /// Search order: adjacent in the next category, adjacent two categories
    /// away, first of the next category, first two categories away.
    pub fn navigate_horizontal(
        &mut self,
        projection: &Projection,
        direction: HorizontalDirection,
    ) -> bool {
        let Some(current) = self.current.clone() else {
            let (preferred, fallback) = match direction {
                HorizontalDirection::Left => {
                    (LogicalCategory::SourceOutput, LogicalCategory::Source)
                }
                HorizontalDirection::Right => (LogicalCategory::SinkInput, LogicalCategory::Sink),
            };
            let found = first_of(projection, preferred).or_else(|| first_of(projection, fallback));
            return self.replace(found);
        };
        let Some(category) = current.category() else {
            return false;
        };

        let one_step = CategoryRing::step(category, direction);
        let two_steps = CategoryRing::step(one_step, direction);
        let found = adjacent_in(projection, one_step, &current)
            .or_else(|| adjacent_in(projection, two_steps, &current))
            .or_else(|| first_of(projection, one_step))
            .or_else(|| first_of(projection, two_steps));
        self.replace(found)
    }

    fn replace(&mut self, found: Option<SelectedElement>) -> bool {
        match found {
            Some(element) => {
                let changed = self.current.as_ref() != Some(&element);
                self.current = Some(element);
                changed
            }
            None => false,
        }
    }
}

fn resolve(projection: &Projection, element: ElementRef) -> Option<SelectedElement> {
    match element {
        ElementRef::Node(id) => projection
            .node(id)
            .map(|node| SelectedElement::Node(Arc::clone(node))),
        ElementRef::Edge(id) => projection
            .edge(id)
            .map(|edge| SelectedElement::Edge(Arc::clone(edge))),
    }
}

/// Elements of `category`, nodes before edges, ascending by index.
fn candidates(projection: &Projection, category: LogicalCategory) -> Vec<SelectedElement> {
    let nodes = projection
        .nodes()
        .filter(|node| CategoryRing::category_of_node(node.kind) == category)
        .map(|node| SelectedElement::Node(Arc::clone(node)));
    let edges = projection
        .edges()
        .filter(|edge| CategoryRing::category_of_edge(edge.kind) == Some(category))
        .map(|edge| SelectedElement::Edge(Arc::clone(edge)));
    let mut all: Vec<SelectedElement> = nodes.chain(edges).collect();
    all.sort_by_key(SelectedElement::sort_key);
    all
}

fn first_of(projection: &Projection, category: LogicalCategory) -> Option<SelectedElement> {
    candidates(projection, category).into_iter().next()
}

fn adjacent_in(
    projection: &Projection,
    category: LogicalCategory,
    current: &SelectedElement,
) -> Option<SelectedElement> {
    candidates(projection, category)
        .into_iter()
        .find(|candidate| candidate.is_adjacent_to(current))
}
