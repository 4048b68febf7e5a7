//! Round layout for bracket views.
//!
//! [`generate_rounds`] rebuilds the column-by-column layout a bracket view
//! draws. The walk starts from the final round (matches that advance nowhere)
//! and expands backward through predecessor slots, one round per step:
//!
//! - a missing or unresolvable predecessor slot becomes a `None` placeholder,
//!   keeping the two-slots-per-match alignment for byes;
//! - a predecessor already placed is skipped, so a match shared through a
//!   lane merge appears once;
//! - a predecessor from the other lane becomes a `None` placeholder unless it
//!   is a first-round match or a lane merge.
//!
//! The walk stops at the first round with no real match in it. Rounds are
//! returned first round first, final round last.
//!
//! Malformed graphs never panic: cycles end at already placed matches and
//! dangling ids turn into placeholders.

use super::graph::{BracketGraph, Incoming};
use super::node::{Lane, MatchId, MatchKind};

/// One column of the bracket; `None` is an empty slot.
pub type Round = Vec<Option<MatchId>>;

/// All columns of a bracket view, first round first.
pub type Rounds = Vec<Round>;

/// Which lane a bracket view follows when walking backward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BracketView {
    /// The winners bracket (and all of single elimination).
    #[default]
    Winners,
    /// The losers bracket of a double elimination tournament.
    Losers,
}

impl BracketView {
    /// View for a "show losers bracket" toggle.
    pub fn from_losers_toggle(show_losers: bool) -> Self {
        if show_losers {
            Self::Losers
        } else {
            Self::Winners
        }
    }

    /// The lane this view follows.
    pub fn lane(self) -> Lane {
        match self {
            Self::Winners => Lane::Winners,
            Self::Losers => Lane::Losers,
        }
    }
}

/// Builds the round matrix for one bracket view.
///
/// Returns an empty matrix if no match is terminal (every match advances
/// somewhere, which only a cyclic graph can do).
///
/// # Example
///
/// ```rust
/// use bracketry_core::{BracketGraph, BracketNode, BracketView, MatchId, generate_rounds};
///
/// let graph = BracketGraph::from_nodes([
///     BracketNode::new("b", 1).with_winner_next("d"),
///     BracketNode::new("c", 2).with_winner_next("d"),
///     BracketNode::new("d", 3).with_previous(Some("b"), Some("c")),
/// ]);
///
/// let rounds = generate_rounds(&graph, BracketView::Winners);
/// assert_eq!(rounds.len(), 2);
/// assert_eq!(rounds[0], vec![Some(MatchId::from("b")), Some(MatchId::from("c"))]);
/// assert_eq!(rounds[1], vec![Some(MatchId::from("d"))]);
/// ```
pub fn generate_rounds(graph: &BracketGraph, view: BracketView) -> Rounds {
    let finals: Vec<usize> = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_terminal())
        .map(|(idx, _)| idx)
        .collect();
    if finals.is_empty() {
        return Rounds::new();
    }

    let incoming = Incoming::tally(graph);
    let kinds: Vec<MatchKind> = (0..graph.len())
        .map(|idx| graph.classify(idx, incoming.of(idx)))
        .collect();
    let lane = view.lane();
    let in_view =
        |idx: usize| kinds[idx] != MatchKind::StandardAdvance || graph.lane_at(idx) == lane;

    let mut placed = vec![false; graph.len()];
    for &idx in &finals {
        placed[idx] = true;
    }

    let mut columns: Vec<Vec<Option<usize>>> = vec![finals.into_iter().map(Some).collect()];
    loop {
        let Some(current) = columns.last() else {
            break;
        };

        let mut next = Vec::with_capacity(current.len() * 2);
        let mut progressed = false;
        for &idx in current.iter().flatten() {
            for pred in graph.nodes[idx].predecessors() {
                match graph.resolve_from(idx, pred) {
                    None => next.push(None),
                    Some(p) if placed[p] => {}
                    Some(p) if !in_view(p) => next.push(None),
                    Some(p) => {
                        placed[p] = true;
                        progressed = true;
                        next.push(Some(p));
                    }
                }
            }
        }

        if !progressed {
            break;
        }
        columns.push(next);
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "bracket_rounds: {view:?} view, {} rounds, {} of {} matches placed",
        columns.len(),
        placed.iter().filter(|&&p| p).count(),
        graph.len()
    );

    columns
        .into_iter()
        .rev()
        .map(|column| {
            column
                .into_iter()
                .map(|slot| slot.map(|idx| graph.nodes[idx].id.clone()))
                .collect()
        })
        .collect()
}

impl BracketGraph {
    /// Method form of [`generate_rounds`].
    pub fn rounds(&self, view: BracketView) -> Rounds {
        generate_rounds(self, view)
    }
}

/// Human label for the round at `index` (first round = 0) out of `total`.
pub fn round_label(index: usize, total: usize, view: BracketView) -> String {
    let from_final = total.saturating_sub(index + 1);
    match view {
        BracketView::Winners => match from_final {
            0 => "Final".to_string(),
            1 => "Semifinals".to_string(),
            2 => "Quarterfinals".to_string(),
            _ => format!("Round {}", index + 1),
        },
        BracketView::Losers => match from_final {
            0 => "Final".to_string(),
            _ => format!("Losers Round {}", index + 1),
        },
    }
}
