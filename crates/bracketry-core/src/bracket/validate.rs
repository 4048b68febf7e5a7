//! Graph validation.
//!
//! Validation runs in four passes over a normalized [`BracketGraph`]:
//!
//! 1. **References**: self references and dangling ids in any of the four
//!    edge fields. Offending edges are reported and dropped from the passes
//!    below, so one bad id does not also surface as a lane or cycle error.
//! 2. **Cycles**: iterative depth-first search along winner and loser edges
//!    with white/grey/black marking. Reaching a grey node closes a cycle.
//! 3. **Lanes**: every surviving edge must land in the lane its kind expects
//!    unless the target is a [`MatchKind::LaneMerge`].
//! 4. **Slots**: a match has two inputs. Filled predecessor slots and
//!    incoming advancement edges that no slot accounts for share them.
//!
//! All errors are collected; nothing fails fast.

use std::collections::{HashMap, HashSet};

use super::edge::{EdgeField, EdgeKind};
use super::error::{BracketError, ValidationErrors, ValidationResult};
use super::graph::{BracketGraph, Incoming};
use super::node::{BracketNode, MatchId, MatchKind};

/// Validates a raw node collection and returns the normalized graph.
///
/// Duplicate ids and duplicate display numbers are detected on the raw input
/// before the graph is built, since the arena keeps only the first node of a
/// repeated id.
///
/// # Errors
///
/// Returns every structural error found, in detection order.
///
/// # Example
///
/// ```rust
/// use bracketry_core::{BracketError, BracketNode, validate};
///
/// let nodes = [BracketNode::new("a", 1).with_winner_next("ghost")];
/// let errors = validate(&nodes).unwrap_err();
/// assert!(matches!(errors.first(), BracketError::DanglingReference { .. }));
/// ```
pub fn validate(nodes: &[BracketNode]) -> ValidationResult {
    let mut errors = duplicate_errors(nodes);
    let graph = BracketGraph::from_nodes(nodes.iter().cloned());
    check_structure(&graph, &mut errors);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "bracket_validate: {} matches, {} errors",
        graph.len(),
        errors.len()
    );

    match ValidationErrors::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(graph),
    }
}

impl BracketGraph {
    /// Validates this graph in place.
    ///
    /// The arena cannot hold duplicate ids, so only display numbers are
    /// checked for uniqueness here.
    ///
    /// # Errors
    ///
    /// Returns every structural error found, in detection order.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut errors = duplicate_errors(&self.nodes);
        check_structure(self, &mut errors);
        match ValidationErrors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }
}

fn duplicate_errors(nodes: &[BracketNode]) -> Vec<BracketError> {
    let mut errors = Vec::new();

    let mut seen: HashSet<&MatchId> = HashSet::with_capacity(nodes.len());
    for node in nodes {
        if !seen.insert(&node.id) {
            errors.push(BracketError::DuplicateId {
                id: node.id.clone(),
            });
        }
    }

    // Numbers in order of first appearance.
    let mut order: Vec<u32> = Vec::new();
    let mut by_number: HashMap<u32, Vec<MatchId>> = HashMap::new();
    for node in nodes {
        let holders = by_number.entry(node.display_number).or_default();
        if holders.is_empty() {
            order.push(node.display_number);
        }
        holders.push(node.id.clone());
    }
    for number in order {
        if let Some(holders) = by_number.remove(&number)
            && holders.len() > 1
        {
            errors.push(BracketError::DuplicateDisplayNumber {
                number,
                nodes: holders,
            });
        }
    }

    errors
}

fn check_structure(graph: &BracketGraph, errors: &mut Vec<BracketError>) {
    let outgoing = check_references(graph, errors);
    check_cycles(graph, &outgoing, errors);

    let incoming = Incoming::tally(graph);
    check_lanes(graph, &outgoing, &incoming, errors);
    check_slots(graph, &incoming, errors);
}

/// Reports self and dangling references and returns the resolvable
/// advancement edges, by source position.
fn check_references(
    graph: &BracketGraph,
    errors: &mut Vec<BracketError>,
) -> Vec<Vec<(usize, EdgeKind)>> {
    let mut outgoing = vec![Vec::new(); graph.len()];

    for (idx, node) in graph.nodes.iter().enumerate() {
        for field in EdgeField::ALL {
            let Some(target) = node.field(field) else {
                continue;
            };
            if *target == node.id {
                errors.push(BracketError::SelfReference {
                    node: node.id.clone(),
                    field,
                });
                continue;
            }
            let Some(to) = graph.position(target) else {
                errors.push(BracketError::DanglingReference {
                    node: node.id.clone(),
                    field,
                    target: target.clone(),
                });
                continue;
            };
            if let Some(kind) = field.edge_kind() {
                outgoing[idx].push((to, kind));
            }
        }
    }

    outgoing
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

fn check_cycles(
    graph: &BracketGraph,
    outgoing: &[Vec<(usize, EdgeKind)>],
    errors: &mut Vec<BracketError>,
) {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    // (node, index of the next outgoing edge to follow)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..graph.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::InProgress;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, cursor) = *frame;
            frame.1 += 1;

            let Some(&(next, _)) = outgoing[node].get(cursor) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };

            match marks[next] {
                Mark::Unvisited => {
                    marks[next] = Mark::InProgress;
                    stack.push((next, 0));
                }
                Mark::InProgress => {
                    let start = stack.iter().position(|&(n, _)| n == next).unwrap_or(0);
                    let path = stack[start..]
                        .iter()
                        .map(|&(n, _)| graph.nodes[n].id.clone())
                        .chain(core::iter::once(graph.nodes[next].id.clone()))
                        .collect();
                    errors.push(BracketError::Cycle {
                        at: graph.nodes[next].id.clone(),
                        path,
                    });
                }
                Mark::Done => {}
            }
        }
    }
}

fn check_lanes(
    graph: &BracketGraph,
    outgoing: &[Vec<(usize, EdgeKind)>],
    incoming: &Incoming,
    errors: &mut Vec<BracketError>,
) {
    let kinds: Vec<MatchKind> = (0..graph.len())
        .map(|idx| graph.classify(idx, incoming.of(idx)))
        .collect();

    for (from, edges) in outgoing.iter().enumerate() {
        for &(to, kind) in edges {
            let expected = graph.lane_at(from).expected_target(kind);
            if graph.lane_at(to) != expected && kinds[to] != MatchKind::LaneMerge {
                errors.push(BracketError::LaneViolation {
                    from: graph.nodes[from].id.clone(),
                    to: graph.nodes[to].id.clone(),
                    kind,
                    expected,
                });
            }
        }
    }
}

fn check_slots(graph: &BracketGraph, incoming: &Incoming, errors: &mut Vec<BracketError>) {
    for (idx, node) in graph.nodes.iter().enumerate() {
        let seating = graph.seating(idx, incoming.of(idx));
        if seating.overflows() {
            errors.push(BracketError::SlotOverflow {
                node: node.id.clone(),
                sources: seating
                    .sources()
                    .map(|from| graph.nodes[from].id.clone())
                    .collect(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::node::Lane;

    fn single_elim_four() -> Vec<BracketNode> {
        vec![
            BracketNode::new("b", 1).with_winner_next("d"),
            BracketNode::new("c", 2).with_winner_next("d"),
            BracketNode::new("d", 3).with_previous(Some("b"), Some("c")),
        ]
    }

    #[test]
    fn valid_bracket_passes() {
        let graph = validate(&single_elim_four()).unwrap();
        assert_eq!(graph.len(), 3);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn blank_tokens_are_normalized_in_result() {
        let mut nodes = single_elim_four();
        nodes[2].winner_next_match_id = Some(MatchId::from(""));
        nodes[2].loser_next_match_id = Some(MatchId::from("  "));
        let graph = validate(&nodes).unwrap();
        assert!(graph.get("d").is_some_and(BracketNode::is_terminal));
    }

    #[test]
    fn dangling_reference_rejected() {
        let nodes = [BracketNode::new("a", 1).with_winner_next("ghost")];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(
            errors.first(),
            &BracketError::DanglingReference {
                node: "a".into(),
                field: EdgeField::WinnerNext,
                target: "ghost".into(),
            }
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn dangling_predecessor_rejected() {
        let nodes = [BracketNode::new("a", 1).with_previous_left("nowhere")];
        let errors = validate(&nodes).unwrap_err();
        assert!(matches!(
            errors.first(),
            BracketError::DanglingReference { field: EdgeField::PreviousLeft, .. }
        ));
    }

    #[test]
    fn self_reference_rejected_without_cycle_error() {
        let nodes = [BracketNode::new("a", 1).with_winner_next("a")];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first(),
            &BracketError::SelfReference {
                node: "a".into(),
                field: EdgeField::WinnerNext,
            }
        );
    }

    #[test]
    fn two_node_cycle_rejected() {
        let nodes = [
            BracketNode::new("a", 1).with_winner_next("b"),
            BracketNode::new("b", 2).with_winner_next("a"),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(
            errors.first(),
            &BracketError::Cycle {
                at: "a".into(),
                path: vec!["a".into(), "b".into(), "a".into()],
            }
        );
    }

    #[test]
    fn cycle_through_loser_edge_rejected() {
        let nodes = [
            BracketNode::new("a", 1).with_loser_next("b"),
            BracketNode::new("b", 2).in_losers_bracket().with_winner_next("c"),
            BracketNode::new("c", 3).in_losers_bracket().with_loser_next("a"),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, BracketError::Cycle { .. })));
    }

    #[test]
    fn shared_descendant_is_not_a_cycle() {
        // Diamond: a and b both feed c, c feeds d.
        let nodes = [
            BracketNode::new("a", 1).with_winner_next("c"),
            BracketNode::new("b", 2).with_winner_next("c"),
            BracketNode::new("c", 3)
                .with_previous(Some("a"), Some("b"))
                .with_winner_next("d"),
            BracketNode::new("d", 4).with_previous_left("c"),
        ];
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn merge_match_accepted() {
        let nodes = [
            BracketNode::new("wf", 1).with_winner_next("gf").with_loser_next("lf"),
            BracketNode::new("lf", 2)
                .in_losers_bracket()
                .with_previous_right("wf")
                .with_winner_next("gf"),
            BracketNode::new("gf", 3).with_previous(Some("wf"), Some("lf")),
        ];
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn losers_winner_into_winners_bracket_rejected() {
        let nodes = [
            BracketNode::new("w1", 1).with_winner_next("w2"),
            BracketNode::new("w1b", 2).with_winner_next("w2"),
            BracketNode::new("l1", 3).in_losers_bracket().with_winner_next("w3"),
            BracketNode::new("w2", 4).with_previous(Some("w1"), Some("w1b")),
            BracketNode::new("w3", 5),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first(),
            &BracketError::LaneViolation {
                from: "l1".into(),
                to: "w3".into(),
                kind: EdgeKind::Winner,
                expected: Lane::Losers,
            }
        );
    }

    #[test]
    fn unseated_feeder_from_other_lane_is_a_merge() {
        // Only lf's edge is written; gf's right slot is still empty.
        let nodes = [
            BracketNode::new("wf", 1).with_winner_next("gf"),
            BracketNode::new("lf", 2).in_losers_bracket().with_winner_next("gf"),
            BracketNode::new("gf", 3).with_previous_left("wf"),
        ];
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn losers_winner_into_full_winners_match_rejected() {
        let nodes = [
            BracketNode::new("w1", 1).with_winner_next("w2"),
            BracketNode::new("w1b", 2).with_winner_next("w2"),
            BracketNode::new("l1", 3).in_losers_bracket().with_winner_next("w2"),
            BracketNode::new("w2", 4).with_previous(Some("w1"), Some("w1b")),
        ];
        let errors = validate(&nodes).unwrap_err().into_vec();
        assert_eq!(
            errors,
            vec![
                BracketError::LaneViolation {
                    from: "l1".into(),
                    to: "w2".into(),
                    kind: EdgeKind::Winner,
                    expected: Lane::Losers,
                },
                BracketError::SlotOverflow {
                    node: "w2".into(),
                    sources: vec!["w1".into(), "w1b".into(), "l1".into()],
                },
            ]
        );
    }

    #[test]
    fn loser_must_drop_into_losers_bracket() {
        let nodes = [
            BracketNode::new("w1", 1).with_loser_next("w2"),
            BracketNode::new("w2", 2).with_previous_left("w1"),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert!(matches!(
            errors.first(),
            BracketError::LaneViolation { kind: EdgeKind::Loser, expected: Lane::Losers, .. }
        ));
    }

    #[test]
    fn overbooked_match_rejected() {
        let nodes = [
            BracketNode::new("a", 1).with_winner_next("d"),
            BracketNode::new("b", 2).with_winner_next("d"),
            BracketNode::new("c", 3).with_winner_next("d"),
            BracketNode::new("d", 4),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(
            errors.first(),
            &BracketError::SlotOverflow {
                node: "d".into(),
                sources: vec!["a".into(), "b".into(), "c".into()],
            }
        );
    }

    #[test]
    fn edge_into_filled_slots_overflows() {
        // t's slots hold x and y; s's edge has nowhere to sit.
        let nodes = [
            BracketNode::new("x", 1),
            BracketNode::new("y", 2),
            BracketNode::new("s", 3).with_winner_next("t"),
            BracketNode::new("t", 4).with_previous(Some("x"), Some("y")),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(
            errors.first(),
            &BracketError::SlotOverflow {
                node: "t".into(),
                sources: vec!["x".into(), "y".into(), "s".into()],
            }
        );
    }

    #[test]
    fn duplicates_reported() {
        let nodes = [
            BracketNode::new("a", 1),
            BracketNode::new("a", 2),
            BracketNode::new("b", 2),
        ];
        let errors = validate(&nodes).unwrap_err().into_vec();
        assert_eq!(errors[0], BracketError::DuplicateId { id: "a".into() });
        assert_eq!(
            errors[1],
            BracketError::DuplicateDisplayNumber {
                number: 2,
                nodes: vec!["a".into(), "b".into()],
            }
        );
    }

    #[test]
    fn all_errors_collected() {
        let nodes = [
            BracketNode::new("a", 1).with_winner_next("ghost"),
            BracketNode::new("b", 2).with_winner_next("b"),
            BracketNode::new("c", 3).with_winner_next("d"),
            BracketNode::new("d", 4).with_winner_next("c"),
        ];
        let errors = validate(&nodes).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors.as_slice()[0], BracketError::DanglingReference { .. }));
        assert!(matches!(errors.as_slice()[1], BracketError::SelfReference { .. }));
        assert!(matches!(errors.as_slice()[2], BracketError::Cycle { .. }));
    }

    #[test]
    fn validation_is_deterministic() {
        let nodes = [
            BracketNode::new("a", 1).with_winner_next("b"),
            BracketNode::new("b", 2).with_winner_next("c"),
            BracketNode::new("c", 3).with_winner_next("a"),
            BracketNode::new("x", 4).with_loser_next("y"),
            BracketNode::new("y", 5),
        ];
        assert_eq!(validate(&nodes), validate(&nodes));
    }
}
