//! Structural errors.

use thiserror::Error;

use super::edge::{EdgeField, EdgeKind};
use super::node::{Lane, MatchId};

fn join_ids(ids: &[MatchId]) -> String {
    ids.iter()
        .map(MatchId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_path(ids: &[MatchId]) -> String {
    ids.iter()
        .map(MatchId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// A structural problem in a bracket graph.
///
/// Every variant names the offending match ids; [`node_ids()`](Self::node_ids)
/// returns them uniformly for callers that only need to highlight matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Following advancement edges from `at` leads back to `at`.
    #[error("cycle detected at match {at}: {}", join_path(.path))]
    Cycle {
        /// Match at which the cycle closed.
        at: MatchId,
        /// The cycle, starting and ending at `at`.
        path: Vec<MatchId>,
    },

    /// An edge field references the node's own id.
    #[error("match {node} references itself in {field}")]
    SelfReference {
        /// The offending match.
        node: MatchId,
        /// Field holding the reference.
        field: EdgeField,
    },

    /// An edge field references an id that is not in the graph.
    #[error("match {node} references missing match {target} in {field}")]
    DanglingReference {
        /// The offending match.
        node: MatchId,
        /// Field holding the reference.
        field: EdgeField,
        /// The id that did not resolve.
        target: MatchId,
    },

    /// An advancement edge crosses into the wrong lane.
    #[error("{kind} of match {from} cannot advance to match {to}: expected a {expected} match")]
    LaneViolation {
        /// Source of the edge.
        from: MatchId,
        /// Target of the edge.
        to: MatchId,
        /// Which edge of the source.
        kind: EdgeKind,
        /// Lane the target would need to have.
        expected: Lane,
    },

    /// More advancement edges lead into a match than it has slots.
    #[error("match {node} is fed by more than two links (from {})", join_ids(.sources))]
    SlotOverflow {
        /// The overbooked match.
        node: MatchId,
        /// Sources of every incoming edge, in graph order.
        sources: Vec<MatchId>,
    },

    /// Two matches share an id.
    #[error("duplicate match id {id}")]
    DuplicateId {
        /// The repeated id.
        id: MatchId,
    },

    /// Two matches share a display number.
    #[error("display number {number} is used by more than one match ({})", join_ids(.nodes))]
    DuplicateDisplayNumber {
        /// The repeated number.
        number: u32,
        /// Every match carrying it, in graph order.
        nodes: Vec<MatchId>,
    },

    /// An edit named a match that is not in the graph.
    #[error("unknown match {id}")]
    UnknownMatch {
        /// The id that did not resolve.
        id: MatchId,
    },
}

impl BracketError {
    /// The match ids this error is about.
    pub fn node_ids(&self) -> Vec<&MatchId> {
        match self {
            Self::Cycle { at, .. } => vec![at],
            Self::SelfReference { node, .. }
            | Self::DanglingReference { node, .. }
            | Self::SlotOverflow { node, .. } => vec![node],
            Self::LaneViolation { from, to, .. } => vec![from, to],
            Self::DuplicateId { id } | Self::UnknownMatch { id } => vec![id],
            Self::DuplicateDisplayNumber { nodes, .. } => nodes.iter().collect(),
        }
    }
}

/// Every error found in one validation pass, in detection order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(Vec<BracketError>);

impl ValidationErrors {
    /// Wraps a list of errors, or returns `None` if there are none.
    pub fn from_vec(errors: Vec<BracketError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    /// The first error, which is what an edit surface shows.
    pub fn first(&self) -> &BracketError {
        &self.0[0]
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors in detection order.
    pub fn iter(&self) -> core::slice::Iter<'_, BracketError> {
        self.0.iter()
    }

    /// The errors as a slice.
    pub fn as_slice(&self) -> &[BracketError] {
        &self.0
    }

    /// Unwraps into the underlying list.
    pub fn into_vec(self) -> Vec<BracketError> {
        self.0
    }
}

impl From<BracketError> for ValidationErrors {
    fn from(error: BracketError) -> Self {
        Self(vec![error])
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a BracketError;
    type IntoIter = core::slice::Iter<'a, BracketError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = BracketError;
    type IntoIter = std::vec::IntoIter<BracketError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Result of validating a bracket: the normalized graph, or every error found.
pub type ValidationResult<T = super::BracketGraph> = Result<T, ValidationErrors>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_display_lists_path() {
        let err = BracketError::Cycle {
            at: "a".into(),
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cycle detected at match a: a -> b -> a");
    }

    #[test]
    fn dangling_display_names_field_and_target() {
        let err = BracketError::DanglingReference {
            node: "a".into(),
            field: EdgeField::WinnerNext,
            target: "ghost".into(),
        };
        assert_eq!(
            err.to_string(),
            "match a references missing match ghost in winner_next_match_id"
        );
    }

    #[test]
    fn lane_violation_names_both_ends() {
        let err = BracketError::LaneViolation {
            from: "l1".into(),
            to: "w2".into(),
            kind: EdgeKind::Winner,
            expected: Lane::Losers,
        };
        assert_eq!(err.node_ids(), vec![&MatchId::from("l1"), &MatchId::from("w2")]);
        assert!(err.to_string().contains("expected a losers bracket match"));
    }

    #[test]
    fn validation_errors_join_messages() {
        let errors = ValidationErrors::from_vec(vec![
            BracketError::DuplicateId { id: "a".into() },
            BracketError::UnknownMatch { id: "b".into() },
        ])
        .unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.first(), &BracketError::DuplicateId { id: "a".into() });
        assert_eq!(
            errors.to_string(),
            "duplicate match id a; unknown match b"
        );
    }

    #[test]
    fn empty_error_list_is_not_an_error() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
    }
}
