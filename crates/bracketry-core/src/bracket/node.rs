//! Bracket node types.
//!
//! Each match in a bracket is one [`BracketNode`]: an identity plus four
//! directed edge fields that refer to other matches by [`MatchId`]. Edges are
//! plain ids resolved through the owning [`BracketGraph`](super::BracketGraph),
//! never references, so deleting a match or detecting a dangling edge is a
//! lookup rather than a pointer walk.

use core::borrow::Borrow;
use core::fmt;

use super::edge::{EdgeField, EdgeKind};

/// Opaque identifier of a match.
///
/// Ids are supplied by the data layer and are stable across edits. A blank
/// (empty or whitespace-only) id in an edge field means "no reference".
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MatchId(String);

impl MatchId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty or whitespace only.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MatchId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&MatchId> for MatchId {
    fn from(id: &MatchId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for MatchId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MatchId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Which half of a double-elimination bracket a match belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
    /// The winners (upper) bracket. Single elimination lives entirely here.
    Winners,
    /// The losers (lower) bracket.
    Losers,
}

impl Lane {
    /// Lane for an `is_losers_bracket` flag.
    #[inline]
    pub fn from_flag(is_losers_bracket: bool) -> Self {
        if is_losers_bracket {
            Self::Losers
        } else {
            Self::Winners
        }
    }

    /// The lane a match reached via an edge of `kind` from this lane must have.
    ///
    /// Winners stay in their own lane; losers always drop into the losers
    /// bracket. Lane merge matches are exempt (see [`MatchKind::LaneMerge`]).
    #[inline]
    pub fn expected_target(self, kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Winner => self,
            EdgeKind::Loser => Self::Losers,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winners => f.write_str("winners bracket"),
            Self::Losers => f.write_str("losers bracket"),
        }
    }
}

/// Structural role of a match, derived from its surroundings.
///
/// Computed per pass by [`BracketGraph::kind`](super::BracketGraph::kind) and
/// never stored on the node, so it cannot go stale after an edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// No resolvable predecessor on either side: an entry match.
    FirstRound,
    /// Fed by at least one earlier match of a single lane.
    StandardAdvance,
    /// Joins the two lanes: predecessors from different lanes, the reset
    /// final whose two predecessors are the same match, or a
    /// predecessor-less final whose incoming links come from both lanes.
    LaneMerge,
}

/// One match in a tournament bracket.
///
/// # Example
///
/// ```rust
/// use bracketry_core::{BracketNode, Lane};
///
/// let semi = BracketNode::new("sf1", 1).with_winner_next("final");
/// let final_ = BracketNode::new("final", 3).with_previous(Some("sf1"), Some("sf2"));
///
/// assert_eq!(semi.lane(), Lane::Winners);
/// assert!(final_.is_terminal());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BracketNode {
    /// Unique identity of the match.
    pub id: MatchId,

    /// Human-facing match number, independent of graph position.
    #[cfg_attr(feature = "serde", serde(alias = "displayNumber"))]
    pub display_number: u32,

    /// Match feeding the left slot, if any.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "previousLeftId",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub previous_left_id: Option<MatchId>,

    /// Match feeding the right slot, if any.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "previousRightId",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub previous_right_id: Option<MatchId>,

    /// Match the winner advances to.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "winnerNextMatchId",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub winner_next_match_id: Option<MatchId>,

    /// Match the loser advances to (double elimination only).
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            alias = "loserNextMatchId",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub loser_next_match_id: Option<MatchId>,

    /// Lane tag: `true` if the match belongs to the losers bracket.
    #[cfg_attr(feature = "serde", serde(default, alias = "isLosersBracket"))]
    pub is_losers_bracket: bool,
}

impl BracketNode {
    /// Creates an unlinked winners-bracket match.
    pub fn new(id: impl Into<MatchId>, display_number: u32) -> Self {
        Self {
            id: id.into(),
            display_number,
            previous_left_id: None,
            previous_right_id: None,
            winner_next_match_id: None,
            loser_next_match_id: None,
            is_losers_bracket: false,
        }
    }

    /// Sets both predecessor slots.
    pub fn with_previous<L, R>(mut self, left: Option<L>, right: Option<R>) -> Self
    where
        L: Into<MatchId>,
        R: Into<MatchId>,
    {
        self.previous_left_id = left.map(Into::into);
        self.previous_right_id = right.map(Into::into);
        self
    }

    /// Sets only the left predecessor.
    pub fn with_previous_left(mut self, id: impl Into<MatchId>) -> Self {
        self.previous_left_id = Some(id.into());
        self
    }

    /// Sets only the right predecessor.
    pub fn with_previous_right(mut self, id: impl Into<MatchId>) -> Self {
        self.previous_right_id = Some(id.into());
        self
    }

    /// Sets the winner's next match.
    pub fn with_winner_next(mut self, id: impl Into<MatchId>) -> Self {
        self.winner_next_match_id = Some(id.into());
        self
    }

    /// Sets the loser's next match.
    pub fn with_loser_next(mut self, id: impl Into<MatchId>) -> Self {
        self.loser_next_match_id = Some(id.into());
        self
    }

    /// Moves the match into the losers bracket.
    pub fn in_losers_bracket(mut self) -> Self {
        self.is_losers_bracket = true;
        self
    }

    /// The lane this match belongs to.
    #[inline]
    pub fn lane(&self) -> Lane {
        Lane::from_flag(self.is_losers_bracket)
    }

    /// The advancement edge of the given kind.
    #[inline]
    pub fn next(&self, kind: EdgeKind) -> Option<&MatchId> {
        match kind {
            EdgeKind::Winner => self.winner_next_match_id.as_ref(),
            EdgeKind::Loser => self.loser_next_match_id.as_ref(),
        }
    }

    /// Replaces the advancement edge of the given kind.
    pub fn set_next(&mut self, kind: EdgeKind, target: Option<MatchId>) {
        match kind {
            EdgeKind::Winner => self.winner_next_match_id = target,
            EdgeKind::Loser => self.loser_next_match_id = target,
        }
    }

    /// Left and right predecessors, in slot order.
    #[inline]
    pub fn predecessors(&self) -> [Option<&MatchId>; 2] {
        [
            self.previous_left_id.as_ref(),
            self.previous_right_id.as_ref(),
        ]
    }

    /// Returns the value of an edge field.
    pub fn field(&self, field: EdgeField) -> Option<&MatchId> {
        match field {
            EdgeField::PreviousLeft => self.previous_left_id.as_ref(),
            EdgeField::PreviousRight => self.previous_right_id.as_ref(),
            EdgeField::WinnerNext => self.winner_next_match_id.as_ref(),
            EdgeField::LoserNext => self.loser_next_match_id.as_ref(),
        }
    }

    /// Mutable access to an edge field.
    pub fn field_mut(&mut self, field: EdgeField) -> &mut Option<MatchId> {
        match field {
            EdgeField::PreviousLeft => &mut self.previous_left_id,
            EdgeField::PreviousRight => &mut self.previous_right_id,
            EdgeField::WinnerNext => &mut self.winner_next_match_id,
            EdgeField::LoserNext => &mut self.loser_next_match_id,
        }
    }

    /// `true` if neither the winner nor the loser advances anywhere.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner_next_match_id.is_none() && self.loser_next_match_id.is_none()
    }

    /// Converts blank edge ids to `None`.
    pub(crate) fn normalize(&mut self) {
        for field in EdgeField::ALL {
            let slot = self.field_mut(field);
            if slot.as_ref().is_some_and(MatchId::is_blank) {
                *slot = None;
            }
        }
    }
}
