//! Next-match candidate filtering.
//!
//! When an editor links a match's winner or loser to another match, only some
//! targets keep the bracket sound. [`filter_valid_next_match_candidates`]
//! computes that set up front so the edit surface never offers an illegal
//! choice:
//!
//! - the source itself is excluded (no self link);
//! - every ancestor of the source is excluded, since linking forward to an
//!   ancestor closes a cycle. Ancestors are found backward through the
//!   predecessor fields *and* through existing winner/loser edges, so the
//!   filter stays sound even when the two disagree mid-edit;
//! - targets whose lane does not fit are excluded unless the target is a
//!   lane merge once the new edge is counted among its inputs;
//! - targets whose two input slots are already taken, by stored
//!   predecessors or by other incoming edges, are excluded.
//!
//! One backward sweep plus one incoming-edge tally: linear in graph size.

use std::collections::VecDeque;

use super::edge::EdgeKind;
use super::error::BracketError;
use super::graph::{BracketGraph, Incoming};
use super::node::{MatchId, MatchKind};

/// Returns the matches that `source`'s `kind` edge may legally point to.
///
/// The result is in graph insertion order and holds no duplicates. An empty
/// result means only "none" may be offered. An unknown `source` yields an
/// empty result.
///
/// # Example
///
/// ```rust
/// use bracketry_core::{
///     BracketGraph, BracketNode, EdgeKind, MatchId, filter_valid_next_match_candidates,
/// };
///
/// let graph = BracketGraph::from_nodes([
///     BracketNode::new("sf1", 1).with_winner_next("final"),
///     BracketNode::new("sf2", 2),
///     BracketNode::new("final", 3).with_previous_left("sf1"),
/// ]);
///
/// let picks = filter_valid_next_match_candidates(&graph, "sf2", EdgeKind::Winner);
/// assert_eq!(picks, vec![MatchId::from("sf1"), MatchId::from("final")]);
///
/// // sf1 already feeds the final, so the final cannot point back at it.
/// let picks = filter_valid_next_match_candidates(&graph, "final", EdgeKind::Winner);
/// assert_eq!(picks, vec![MatchId::from("sf2")]);
/// ```
pub fn filter_valid_next_match_candidates(
    graph: &BracketGraph,
    source: impl AsRef<str>,
    kind: EdgeKind,
) -> Vec<MatchId> {
    let Some(src) = graph.position(source) else {
        return Vec::new();
    };

    let blocked = ancestors(graph, src);
    let incoming = Incoming::tally(graph);

    let candidates: Vec<MatchId> = (0..graph.len())
        .filter(|&idx| !blocked[idx])
        .filter(|&idx| fits(graph, &incoming, src, kind, idx).is_ok())
        .map(|idx| graph.nodes[idx].id.clone())
        .collect();

    #[cfg(feature = "tracing")]
    tracing::trace!(
        "bracket_candidates: {} {kind} -> {} of {} matches",
        graph.nodes[src].id,
        candidates.len(),
        graph.len()
    );

    candidates
}

impl BracketGraph {
    /// Method form of [`filter_valid_next_match_candidates`].
    pub fn candidates(&self, source: impl AsRef<str>, kind: EdgeKind) -> Vec<MatchId> {
        filter_valid_next_match_candidates(self, source, kind)
    }

    /// Explains why `target` is not a legal `kind` link for `source`, or
    /// returns `Ok` if it is.
    ///
    /// # Errors
    ///
    /// Returns the error the validator would raise for the new edge.
    pub fn check_link(
        &self,
        source: impl AsRef<str>,
        kind: EdgeKind,
        target: impl AsRef<str>,
    ) -> Result<(), BracketError> {
        let source = source.as_ref();
        let target = target.as_ref();
        let src = self
            .position(source)
            .ok_or_else(|| BracketError::UnknownMatch { id: source.into() })?;
        let source_id = &self.nodes[src].id;

        if source == target {
            return Err(BracketError::SelfReference {
                node: source_id.clone(),
                field: kind.field(),
            });
        }
        let Some(dst) = self.position(target) else {
            return Err(BracketError::DanglingReference {
                node: source_id.clone(),
                field: kind.field(),
                target: target.into(),
            });
        };
        if let Some(path) = feed_path(self, dst, src) {
            let mut cycle = Vec::with_capacity(path.len() + 1);
            cycle.push(source_id.clone());
            cycle.extend(path.into_iter().map(|idx| self.nodes[idx].id.clone()));
            return Err(BracketError::Cycle {
                at: source_id.clone(),
                path: cycle,
            });
        }

        fits(self, &Incoming::tally(self), src, kind, dst)
    }
}

/// Marks `src` and every match that feeds into it, directly or transitively.
fn ancestors(graph: &BracketGraph, src: usize) -> Vec<bool> {
    let feeders = feeders(graph);
    let mut blocked = vec![false; graph.len()];
    let mut queue = VecDeque::from([src]);
    blocked[src] = true;

    while let Some(idx) = queue.pop_front() {
        for &feeder in &feeders[idx] {
            if !blocked[feeder] {
                blocked[feeder] = true;
                queue.push_back(feeder);
            }
        }
    }
    blocked
}

/// For every match, the matches that feed it: its resolvable predecessors
/// plus the sources of any resolvable winner/loser edge into it.
fn feeders(graph: &BracketGraph) -> Vec<Vec<usize>> {
    let mut feeders = vec![Vec::new(); graph.len()];
    for (idx, node) in graph.nodes.iter().enumerate() {
        for pred in node.predecessors() {
            if let Some(p) = graph.resolve_from(idx, pred) {
                feeders[idx].push(p);
            }
        }
        for kind in EdgeKind::ALL {
            if let Some(next) = graph.resolve_from(idx, node.next(kind)) {
                feeders[next].push(idx);
            }
        }
    }
    feeders
}

/// Shortest feed chain from `from` to `to` (inclusive), if any.
fn feed_path(graph: &BracketGraph, from: usize, to: usize) -> Option<Vec<usize>> {
    let feeders = feeders(graph);
    let mut feeds = vec![Vec::new(); graph.len()];
    for (idx, list) in feeders.iter().enumerate() {
        for &feeder in list {
            feeds[feeder].push(idx);
        }
    }

    let mut parent: Vec<Option<usize>> = vec![None; graph.len()];
    let mut seen = vec![false; graph.len()];
    let mut queue = VecDeque::from([from]);
    seen[from] = true;

    while let Some(idx) = queue.pop_front() {
        if idx == to {
            let mut path = vec![to];
            let mut cursor = to;
            while let Some(prev) = parent[cursor] {
                path.push(prev);
                cursor = prev;
            }
            path.reverse();
            return Some(path);
        }
        for &next in &feeds[idx] {
            if !seen[next] {
                seen[next] = true;
                parent[next] = Some(idx);
                queue.push_back(next);
            }
        }
    }
    None
}

/// Lane and slot rules for a hypothetical `src --kind--> dst` edge, judged
/// exactly as the validator would judge it once written.
fn fits(
    graph: &BracketGraph,
    incoming: &Incoming,
    src: usize,
    kind: EdgeKind,
    dst: usize,
) -> Result<(), BracketError> {
    // The source's current edge of this kind is being replaced.
    let mut edges_in: Vec<(usize, EdgeKind)> = incoming
        .of(dst)
        .iter()
        .copied()
        .filter(|&edge| edge != (src, kind))
        .collect();
    edges_in.push((src, kind));
    edges_in.sort_by_key(|&(from, k)| (from, k == EdgeKind::Loser));

    let seating = graph.seating(dst, &edges_in);
    if seating.overflows() {
        return Err(BracketError::SlotOverflow {
            node: graph.nodes[dst].id.clone(),
            sources: seating
                .sources()
                .map(|from| graph.nodes[from].id.clone())
                .collect(),
        });
    }

    let expected = graph.lane_at(src).expected_target(kind);
    if graph.lane_at(dst) != expected && graph.classify(dst, &edges_in) != MatchKind::LaneMerge {
        return Err(BracketError::LaneViolation {
            from: graph.nodes[src].id.clone(),
            to: graph.nodes[dst].id.clone(),
            kind,
            expected,
        });
    }

    Ok(())
}
