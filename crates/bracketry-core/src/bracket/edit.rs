//! Edit operations.
//!
//! Every mutation of a [`BracketGraph`] goes through one of three methods:
//! [`insert`](BracketGraph::insert), [`remove`](BracketGraph::remove) and
//! [`link`](BracketGraph::link). `link` is the full edit pipeline: the
//! candidate rules run first, then the change is applied to a copy, the copy
//! is validated, and only a clean copy replaces the graph. A rejected edit
//! leaves the graph exactly as it was.

use super::edge::{EdgeField, EdgeKind};
use super::error::{BracketError, ValidationResult};
use super::graph::BracketGraph;
use super::node::{BracketNode, MatchId};

impl BracketGraph {
    /// Adds a match at the end of the graph.
    ///
    /// Blank edge ids on the node are normalized away. Edges are stored as
    /// given; run [`validate()`](Self::validate) to check them.
    ///
    /// # Errors
    ///
    /// [`BracketError::DuplicateId`] if a match with the same id exists.
    pub fn insert(&mut self, mut node: BracketNode) -> Result<(), BracketError> {
        if self.contains(&node.id) {
            return Err(BracketError::DuplicateId { id: node.id });
        }
        node.normalize();

        #[cfg(feature = "tracing")]
        tracing::debug!("bracket_insert: match {} (#{})", node.id, node.display_number);

        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Removes a match and clears every field of other matches that
    /// referenced it. Returns the removed match.
    ///
    /// # Errors
    ///
    /// [`BracketError::UnknownMatch`] if `id` is not in the graph.
    pub fn remove(&mut self, id: impl AsRef<str>) -> Result<BracketNode, BracketError> {
        let id = id.as_ref();
        let idx = self
            .position(id)
            .ok_or_else(|| BracketError::UnknownMatch { id: id.into() })?;

        let removed = self.nodes.remove(idx);
        for node in &mut self.nodes {
            for field in EdgeField::ALL {
                let slot = node.field_mut(field);
                if slot.as_ref() == Some(&removed.id) {
                    *slot = None;
                }
            }
        }
        self.reindex();

        #[cfg(feature = "tracing")]
        tracing::debug!("bracket_remove: match {}", removed.id);

        Ok(removed)
    }

    /// Points `source`'s `kind` edge at `target`, or clears it with `None`.
    ///
    /// Predecessor slots follow the edge: the source leaves a slot of its old
    /// target and takes the first free slot of the new one.
    ///
    /// # Errors
    ///
    /// Returns every error found, with the first being the reason to show:
    /// - the candidate rules ([`check_link`](Self::check_link)) for `target`;
    /// - otherwise, whatever the validator reports for the edited graph.
    ///
    /// The graph is unchanged on error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bracketry_core::{BracketGraph, BracketNode, EdgeKind, MatchId};
    ///
    /// let mut graph = BracketGraph::from_nodes([
    ///     BracketNode::new("sf1", 1),
    ///     BracketNode::new("sf2", 2),
    ///     BracketNode::new("final", 3),
    /// ]);
    ///
    /// graph.link("sf1", EdgeKind::Winner, Some(MatchId::from("final")))?;
    /// graph.link("sf2", EdgeKind::Winner, Some(MatchId::from("final")))?;
    ///
    /// let fin = graph.get("final").unwrap();
    /// assert_eq!(fin.previous_left_id, Some(MatchId::from("sf1")));
    /// assert_eq!(fin.previous_right_id, Some(MatchId::from("sf2")));
    ///
    /// // Closing a cycle is refused.
    /// assert!(graph.link("final", EdgeKind::Winner, Some(MatchId::from("sf1"))).is_err());
    /// # Ok::<(), bracketry_core::ValidationErrors>(())
    /// ```
    pub fn link(
        &mut self,
        source: impl AsRef<str>,
        kind: EdgeKind,
        target: Option<MatchId>,
    ) -> ValidationResult<()> {
        let source = source.as_ref();
        let src = self
            .position(source)
            .ok_or_else(|| BracketError::UnknownMatch { id: source.into() })?;
        let target = target.filter(|t| !t.is_blank());

        if let Some(target) = &target {
            self.check_link(source, kind, target)?;
        }

        let mut edited = self.clone();
        let old = edited.nodes[src].next(kind).cloned();
        edited.nodes[src].set_next(kind, target.clone());
        if let Some(old) = &old {
            edited.sync_slots(src, old)?;
        }
        if let Some(target) = &target {
            edited.sync_slots(src, target)?;
        }

        edited.validate()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "bracket_link: {} {kind} {} -> {}",
            edited.nodes[src].id,
            old.as_ref().map_or("none", MatchId::as_str),
            target.as_ref().map_or("none", MatchId::as_str)
        );

        *self = edited;
        Ok(())
    }

    // --- Internal helpers ---

    fn reindex(&mut self) {
        self.index.clear();
        for (idx, node) in self.nodes.iter().enumerate() {
            self.index.insert(node.id.clone(), idx);
        }
    }

    /// Makes the number of predecessor slots of `target` holding `src`
    /// match the number of edges from `src` into it.
    ///
    /// Fails with [`BracketError::SlotOverflow`] if `src` needs a slot and
    /// both are taken.
    fn sync_slots(&mut self, src: usize, target: &MatchId) -> Result<(), BracketError> {
        let Some(dst) = self.position(target) else {
            return Ok(());
        };
        if dst == src {
            return Ok(());
        }

        let source_node = &self.nodes[src];
        let source_id = source_node.id.clone();
        let edges = EdgeKind::ALL
            .into_iter()
            .filter(|&k| source_node.next(k) == Some(target))
            .count();

        let node = &mut self.nodes[dst];
        let held = node
            .predecessors()
            .into_iter()
            .filter(|p| *p == Some(&source_id))
            .count();

        if held > edges {
            for field in [EdgeField::PreviousRight, EdgeField::PreviousLeft] {
                let slot = node.field_mut(field);
                if slot.as_ref() == Some(&source_id) {
                    *slot = None;
                    break;
                }
            }
        } else if held < edges {
            let free = [EdgeField::PreviousLeft, EdgeField::PreviousRight]
                .into_iter()
                .find(|&field| node.field(field).is_none());
            let Some(field) = free else {
                let mut sources: Vec<MatchId> =
                    node.predecessors().into_iter().flatten().cloned().collect();
                sources.push(source_id);
                return Err(BracketError::SlotOverflow {
                    node: node.id.clone(),
                    sources,
                });
            };
            *node.field_mut(field) = Some(source_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<MatchId> {
        Some(MatchId::from(s))
    }

    fn four() -> BracketGraph {
        BracketGraph::from_nodes([
            BracketNode::new("q1", 1).with_winner_next("sf"),
            BracketNode::new("q2", 2).with_winner_next("sf"),
            BracketNode::new("sf", 3)
                .with_previous(Some("q1"), Some("q2"))
                .with_winner_next("f"),
            BracketNode::new("q3", 4),
            BracketNode::new("f", 5).with_previous_left("sf"),
        ])
    }

    #[test]
    fn insert_rejects_duplicate() {
        let mut graph = four();
        let err = graph.insert(BracketNode::new("q1", 9)).unwrap_err();
        assert_eq!(err, BracketError::DuplicateId { id: "q1".into() });
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn insert_appends_normalized() {
        let mut graph = four();
        graph
            .insert(BracketNode::new("extra", 6).with_loser_next(" "))
            .unwrap();
        assert_eq!(graph.nodes().last().map(|n| n.id.as_str()), Some("extra"));
        assert!(graph.get("extra").is_some_and(BracketNode::is_terminal));
    }

    #[test]
    fn remove_clears_references() {
        let mut graph = four();
        let removed = graph.remove("sf").unwrap();
        assert_eq!(removed.id.as_str(), "sf");
        assert!(!graph.contains("sf"));
        assert_eq!(graph.get("q1").and_then(|n| n.winner_next_match_id.clone()), None);
        assert_eq!(graph.get("f").and_then(|n| n.previous_left_id.clone()), None);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn remove_keeps_lookup_consistent() {
        let mut graph = four();
        graph.remove("q1").unwrap();
        for (idx, node) in graph.nodes().iter().enumerate() {
            assert_eq!(graph.position(&node.id), Some(idx));
        }
        assert!(graph.remove("q1").is_err());
    }

    #[test]
    fn link_fills_first_free_slot() {
        let mut graph = four();
        graph.link("q3", EdgeKind::Winner, id("f")).unwrap();
        let f = graph.get("f").unwrap();
        assert_eq!(f.previous_left_id, id("sf"));
        assert_eq!(f.previous_right_id, id("q3"));
    }

    #[test]
    fn relink_moves_slot() {
        let mut graph = four();
        graph.link("q3", EdgeKind::Winner, id("f")).unwrap();
        graph.remove("sf").unwrap();
        graph.link("q3", EdgeKind::Winner, None).unwrap();
        let f = graph.get("f").unwrap();
        assert_eq!(f.previous_left_id, None);
        assert_eq!(f.previous_right_id, None);
        assert!(graph.get("q3").is_some_and(BracketNode::is_terminal));
    }

    #[test]
    fn link_refuses_cycle_without_mutation() {
        let mut graph = four();
        let before = graph.clone();
        let err = graph.link("f", EdgeKind::Winner, id("q1")).unwrap_err();
        assert!(matches!(err.first(), BracketError::Cycle { .. }));
        assert_eq!(graph, before);
    }

    #[test]
    fn link_refuses_full_target() {
        let mut graph = four();
        let err = graph.link("q3", EdgeKind::Winner, id("sf")).unwrap_err();
        assert!(matches!(err.first(), BracketError::SlotOverflow { .. }));
    }

    #[test]
    fn link_refuses_unknown_source_and_target() {
        let mut graph = four();
        assert!(matches!(
            graph.link("nope", EdgeKind::Winner, None).unwrap_err().first(),
            BracketError::UnknownMatch { .. }
        ));
        assert!(matches!(
            graph.link("q3", EdgeKind::Winner, id("ghost")).unwrap_err().first(),
            BracketError::DanglingReference { .. }
        ));
    }

    #[test]
    fn reset_edges_share_both_slots() {
        let mut graph = BracketGraph::from_nodes([
            BracketNode::new("gf1", 1),
            BracketNode::new("gf2", 2),
        ]);
        graph.link("gf1", EdgeKind::Winner, id("gf2")).unwrap();
        graph.link("gf1", EdgeKind::Loser, id("gf2")).unwrap();
        let gf2 = graph.get("gf2").unwrap();
        assert_eq!(gf2.previous_left_id, id("gf1"));
        assert_eq!(gf2.previous_right_id, id("gf1"));

        graph.link("gf1", EdgeKind::Loser, None).unwrap();
        let gf2 = graph.get("gf2").unwrap();
        assert_eq!(gf2.previous_left_id, id("gf1"));
        assert_eq!(gf2.previous_right_id, None);
    }

    #[test]
    fn link_into_filled_slots_refused() {
        let mut graph = BracketGraph::from_nodes([
            BracketNode::new("x", 1),
            BracketNode::new("y", 2),
            BracketNode::new("t", 3).with_previous(Some("x"), Some("y")),
            BracketNode::new("s", 4),
        ]);
        let before = graph.clone();
        let err = graph.link("s", EdgeKind::Winner, id("t")).unwrap_err();
        assert_eq!(
            err.first(),
            &BracketError::SlotOverflow {
                node: "t".into(),
                sources: vec!["x".into(), "y".into(), "s".into()],
            }
        );
        assert_eq!(graph, before);
    }

    #[test]
    fn sync_slots_reports_missing_seat() {
        // s's edge is already written but t has no slot left for it.
        let mut graph = BracketGraph::from_nodes([
            BracketNode::new("x", 1),
            BracketNode::new("y", 2),
            BracketNode::new("t", 3).with_previous(Some("x"), Some("y")),
            BracketNode::new("s", 4).with_winner_next("t"),
        ]);
        let err = graph.sync_slots(3, &MatchId::from("t")).unwrap_err();
        assert_eq!(
            err,
            BracketError::SlotOverflow {
                node: "t".into(),
                sources: vec!["x".into(), "y".into(), "s".into()],
            }
        );
        let t = graph.get("t").unwrap();
        assert_eq!(t.previous_left_id, id("x"));
        assert_eq!(t.previous_right_id, id("y"));
    }
}
