//! Edge kinds and field names.
//!
//! A bracket has two kinds of advancement edge (winner and loser) stored on the
//! source match, and two predecessor fields stored on the target match. Edges
//! have no identity of their own: an [`Edge`] is a view produced on demand from
//! the node fields.

use core::fmt;

use super::node::MatchId;

/// Kind of advancement edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// The winner of the source match advances along this edge.
    Winner,
    /// The loser of the source match advances along this edge.
    Loser,
}

impl EdgeKind {
    /// Both kinds, winner first.
    pub const ALL: [Self; 2] = [Self::Winner, Self::Loser];

    /// The node field holding this edge.
    #[inline]
    pub fn field(self) -> EdgeField {
        match self {
            Self::Winner => EdgeField::WinnerNext,
            Self::Loser => EdgeField::LoserNext,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner => f.write_str("winner"),
            Self::Loser => f.write_str("loser"),
        }
    }
}

/// One of the four id-valued fields of a [`BracketNode`](super::BracketNode).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeField {
    /// `previous_left_id`
    PreviousLeft,
    /// `previous_right_id`
    PreviousRight,
    /// `winner_next_match_id`
    WinnerNext,
    /// `loser_next_match_id`
    LoserNext,
}

impl EdgeField {
    /// All fields in declaration order.
    pub const ALL: [Self; 4] = [
        Self::PreviousLeft,
        Self::PreviousRight,
        Self::WinnerNext,
        Self::LoserNext,
    ];

    /// Field name as it appears in bracket files.
    pub fn name(self) -> &'static str {
        match self {
            Self::PreviousLeft => "previous_left_id",
            Self::PreviousRight => "previous_right_id",
            Self::WinnerNext => "winner_next_match_id",
            Self::LoserNext => "loser_next_match_id",
        }
    }

    /// The advancement edge kind stored in this field, if it is one.
    pub fn edge_kind(self) -> Option<EdgeKind> {
        match self {
            Self::WinnerNext => Some(EdgeKind::Winner),
            Self::LoserNext => Some(EdgeKind::Loser),
            Self::PreviousLeft | Self::PreviousRight => None,
        }
    }
}

impl fmt::Display for EdgeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A directed advancement edge between two matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Source match.
    pub from: MatchId,
    /// Destination match.
    pub to: MatchId,
    /// Whether the winner or the loser travels this edge.
    pub kind: EdgeKind,
}
