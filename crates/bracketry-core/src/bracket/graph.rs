//! The bracket arena.
//!
//! [`BracketGraph`] owns every [`BracketNode`] of one tournament in insertion
//! order, plus an id-to-position index. All algorithms run against a graph
//! value; nothing here performs I/O or keeps state between calls.

use std::collections::HashMap;

use super::edge::{Edge, EdgeKind};
use super::node::{BracketNode, Lane, MatchId, MatchKind};

/// The full node set of one tournament bracket, keyed by id.
///
/// Construction normalizes blank edge ids to `None` but does not validate;
/// use [`validate()`](crate::validate) or [`BracketGraph::validate()`] for
/// that. Insertion order is preserved and drives every ordering decision the
/// algorithms make, which keeps their output deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BracketGraph {
    pub(super) nodes: Vec<BracketNode>,
    pub(super) index: HashMap<MatchId, usize>,
}

impl BracketGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a node collection.
    ///
    /// If two nodes share an id, the first one is kept. The validator reports
    /// duplicates; this constructor only has to produce a usable lookup.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = BracketNode>,
    {
        let mut graph = Self::new();
        for mut node in nodes {
            if graph.index.contains_key(&node.id) {
                #[cfg(feature = "tracing")]
                tracing::warn!("bracket_graph: duplicate match id {} ignored", node.id);
                continue;
            }
            node.normalize();
            graph.index.insert(node.id.clone(), graph.nodes.len());
            graph.nodes.push(node);
        }
        graph
    }

    /// Number of matches.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the graph has no matches.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a match by id.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&BracketNode> {
        self.position(id).map(|idx| &self.nodes[idx])
    }

    /// `true` if a match with this id exists.
    pub fn contains(&self, id: impl AsRef<str>) -> bool {
        self.index.contains_key(id.as_ref())
    }

    /// All matches in insertion order.
    #[inline]
    pub fn nodes(&self) -> &[BracketNode] {
        &self.nodes
    }

    /// Iterates over matches in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, BracketNode> {
        self.nodes.iter()
    }

    /// Consumes the graph, returning its nodes in insertion order.
    pub fn into_nodes(self) -> Vec<BracketNode> {
        self.nodes
    }

    /// Every advancement edge as recorded on the source nodes, including
    /// edges whose target does not resolve.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes.iter().flat_map(|node| {
            EdgeKind::ALL.into_iter().filter_map(move |kind| {
                node.next(kind).map(|to| Edge {
                    from: node.id.clone(),
                    to: to.clone(),
                    kind,
                })
            })
        })
    }

    /// Structural role of a match, or `None` if the id is unknown.
    ///
    /// Computing a single kind scans the graph for incoming edges; algorithms
    /// that need many kinds build an [`Incoming`] tally once instead.
    pub fn kind(&self, id: impl AsRef<str>) -> Option<MatchKind> {
        let idx = self.position(id)?;
        let incoming = Incoming::tally(self);
        Some(self.classify(idx, incoming.of(idx)))
    }

    // --- Internal helpers ---

    pub(super) fn position(&self, id: impl AsRef<str>) -> Option<usize> {
        self.index.get(id.as_ref()).copied()
    }

    /// Resolves a predecessor field of the node at `idx`, ignoring
    /// self references.
    pub(super) fn resolve_from(&self, idx: usize, id: Option<&MatchId>) -> Option<usize> {
        id.and_then(|id| self.position(id)).filter(|&p| p != idx)
    }

    #[inline]
    pub(super) fn lane_at(&self, idx: usize) -> Lane {
        self.nodes[idx].lane()
    }

    /// Classifies the node at `idx` from its inputs.
    ///
    /// `incoming` lists the resolved advancement edges into the node; the
    /// candidate filter passes an edited list to classify a target as if a
    /// new edge already existed. A node without stored predecessors is a
    /// first round match unless its incoming edges come from both lanes.
    /// Otherwise the kind follows the [`Seating`] of its inputs, so an edge
    /// whose source has not been written into a predecessor slot yet still
    /// counts as one of the two inputs.
    pub(super) fn classify(&self, idx: usize, incoming: &[(usize, EdgeKind)]) -> MatchKind {
        if self.resolved_predecessors(idx) == [None, None] {
            let mut lanes = incoming.iter().map(|&(source, _)| self.lane_at(source));
            let joins_lanes = lanes
                .next()
                .is_some_and(|first| lanes.any(|lane| lane != first));
            return if joins_lanes {
                MatchKind::LaneMerge
            } else {
                MatchKind::FirstRound
            };
        }

        match self.seating(idx, incoming).slots {
            [Some(l), Some(r)] if l == r => MatchKind::LaneMerge,
            [Some(l), Some(r)] if self.lane_at(l) != self.lane_at(r) => MatchKind::LaneMerge,
            _ => MatchKind::StandardAdvance,
        }
    }

    /// Resolved left and right predecessor positions of the node at `idx`.
    pub(super) fn resolved_predecessors(&self, idx: usize) -> [Option<usize>; 2] {
        self.nodes[idx]
            .predecessors()
            .map(|pred| self.resolve_from(idx, pred))
    }

    /// Seats every incoming edge of the node at `idx`.
    ///
    /// Each edge claims a slot its source already holds, else the first free
    /// slot (left, then right). Edges that find neither overflow.
    pub(super) fn seating(&self, idx: usize, incoming: &[(usize, EdgeKind)]) -> Seating {
        let mut slots = self.resolved_predecessors(idx);
        let mut claimed = [false; 2];
        let mut overflow = Vec::new();

        for &(source, _) in incoming {
            let slot = (0..2)
                .find(|&i| !claimed[i] && slots[i] == Some(source))
                .or_else(|| (0..2).find(|&i| slots[i].is_none()));
            match slot {
                Some(i) => {
                    slots[i] = Some(source);
                    claimed[i] = true;
                }
                None => overflow.push(source),
            }
        }

        Seating { slots, overflow }
    }
}

/// The two input slots of a match with its incoming edges seated.
pub(crate) struct Seating {
    /// Stored predecessors, with free slots filled by unseated edges.
    pub(crate) slots: [Option<usize>; 2],
    /// Sources of edges that found no slot.
    pub(crate) overflow: Vec<usize>,
}

impl Seating {
    /// `true` if more inputs reach the match than it has slots.
    pub(crate) fn overflows(&self) -> bool {
        !self.overflow.is_empty()
    }

    /// Every input: slot holders left to right, then the overflow.
    pub(crate) fn sources(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().flatten().chain(&self.overflow).copied()
    }
}

impl<'a> IntoIterator for &'a BracketGraph {
    type Item = &'a BracketNode;
    type IntoIter = core::slice::Iter<'a, BracketNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl FromIterator<BracketNode> for BracketGraph {
    fn from_iter<I: IntoIterator<Item = BracketNode>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

/// Resolved incoming advancement edges per node position.
///
/// Self references and dangling targets are left out. Built once per pass so
/// that classifying every node stays linear in the graph size.
pub(crate) struct Incoming(Vec<Vec<(usize, EdgeKind)>>);

impl Incoming {
    pub(crate) fn tally(graph: &BracketGraph) -> Self {
        let mut incoming = vec![Vec::new(); graph.len()];
        for (from, node) in graph.nodes.iter().enumerate() {
            for kind in EdgeKind::ALL {
                if let Some(to) = node.next(kind).and_then(|id| graph.position(id))
                    && to != from
                {
                    incoming[to].push((from, kind));
                }
            }
        }
        Self(incoming)
    }

    #[inline]
    pub(crate) fn of(&self, idx: usize) -> &[(usize, EdgeKind)] {
        &self.0[idx]
    }
}
