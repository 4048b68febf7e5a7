//! Fresh bracket generation.
//!
//! [`generate_bracket`] produces the node set for a new single or double
//! elimination bracket with every edge wired in both directions: each match
//! records its two feeding matches, and each feeding match records where its
//! winner (and loser) goes. The result always passes validation.
//!
//! Ids are readable labels:
//!
//! | Id | Match |
//! |----|-------|
//! | `W{r}-{j}` | winners round `r`, position `j` (1-based) |
//! | `L{r}-{j}` | losers round `r`, position `j` |
//! | `GF1`, `GF2` | grand final and its reset |
//! | `3P` | third place match |
//!
//! Display numbers count up from 1 in creation order.

use std::collections::HashMap;

use thiserror::Error;

use crate::bracket::{BracketNode, EdgeKind, MatchId};

/// Largest supported entrant count.
pub const MAX_ENTRANTS: u32 = 4096;

/// Tournament format to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum BracketFormat {
    /// One loss and out.
    SingleElimination {
        /// Add a match between the two semifinal losers.
        #[cfg_attr(feature = "serde", serde(default))]
        third_place: bool,
    },
    /// Two losses and out, with a losers bracket.
    DoubleElimination {
        /// Add a second grand final for when the losers bracket side wins
        /// the first.
        #[cfg_attr(feature = "serde", serde(default = "default_reset"))]
        grand_final_reset: bool,
    },
}

#[cfg(feature = "serde")]
fn default_reset() -> bool {
    true
}

impl BracketFormat {
    /// Single elimination without a third place match.
    pub const SINGLE: Self = Self::SingleElimination { third_place: false };

    /// Double elimination with a grand final reset.
    pub const DOUBLE: Self = Self::DoubleElimination {
        grand_final_reset: true,
    };

    /// Returns `true` for double elimination.
    pub fn is_double(self) -> bool {
        matches!(self, Self::DoubleElimination { .. })
    }
}

impl Default for BracketFormat {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl core::fmt::Display for BracketFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::SingleElimination { third_place: false } => f.write_str("single elimination"),
            Self::SingleElimination { third_place: true } => {
                f.write_str("single elimination with third place match")
            }
            Self::DoubleElimination {
                grand_final_reset: true,
            } => f.write_str("double elimination"),
            Self::DoubleElimination {
                grand_final_reset: false,
            } => f.write_str("double elimination without reset"),
        }
    }
}

/// Invalid generator input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A bracket needs at least two entrants.
    #[error("a bracket needs at least 2 entrants, got {0}")]
    TooFewEntrants(u32),

    /// Entrant count above [`MAX_ENTRANTS`].
    #[error("{0} entrants exceeds the maximum of {MAX_ENTRANTS}")]
    TooManyEntrants(u32),

    /// A third place match was requested for a bracket without semifinals.
    #[error("a third place match needs two semifinals (at least 4 entrants), got {0}")]
    NoSemifinals(u32),
}

/// Seed order of the first round for a bracket of `size` slots.
///
/// Pairs `(seeds[2i], seeds[2i + 1])` meet in the first round; the fold keeps
/// the top seeds apart until the latest possible round.
///
/// ```rust
/// use bracketry_core::seed_positions;
///
/// assert_eq!(seed_positions(8), vec![1, 8, 4, 5, 2, 7, 3, 6]);
/// ```
pub fn seed_positions(size: u32) -> Vec<u32> {
    let mut seeds = vec![1u32];
    while seeds.len() < size as usize {
        let n = seeds.len() as u32;
        seeds = seeds
            .iter()
            .flat_map(|&seed| [seed, (n * 2 + 1).saturating_sub(seed)])
            .collect();
    }
    seeds
}

/// Generates the node set for a new bracket.
///
/// # Errors
///
/// [`GenerateError`] if `entrants` is out of range, or a third place match is
/// requested for fewer than four entrants.
///
/// # Example
///
/// ```rust
/// use bracketry_core::{BracketFormat, generate_bracket, validate};
///
/// let nodes = generate_bracket(6, BracketFormat::SINGLE)?;
/// // Eight slots, two byes: W1 has two matches, then two semis and a final.
/// assert_eq!(nodes.len(), 5);
/// assert!(validate(&nodes).is_ok());
/// # Ok::<(), bracketry_core::GenerateError>(())
/// ```
pub fn generate_bracket(
    entrants: u32,
    format: BracketFormat,
) -> Result<Vec<BracketNode>, GenerateError> {
    if entrants < 2 {
        return Err(GenerateError::TooFewEntrants(entrants));
    }
    if entrants > MAX_ENTRANTS {
        return Err(GenerateError::TooManyEntrants(entrants));
    }

    let size = entrants.next_power_of_two();
    let nodes = match format {
        BracketFormat::SingleElimination { third_place } => {
            if third_place && entrants < 4 {
                return Err(GenerateError::NoSemifinals(entrants));
            }
            single_elimination(entrants, size, third_place)
        }
        BracketFormat::DoubleElimination { grand_final_reset } => {
            double_elimination(size, grand_final_reset)
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "bracket_generate: {entrants} entrants, {format}, {} matches",
        nodes.len()
    );

    Ok(nodes)
}

/// Where a new match's slot comes from.
#[derive(Clone, Copy)]
enum Slot<'a> {
    Empty,
    Winner(&'a MatchId),
    Loser(&'a MatchId),
}

/// Appends matches and wires both directions of every edge.
#[derive(Default)]
struct Builder {
    nodes: Vec<BracketNode>,
    index: HashMap<MatchId, usize>,
}

impl Builder {
    fn push(&mut self, id: MatchId, losers: bool, left: Slot<'_>, right: Slot<'_>) -> MatchId {
        let mut node = BracketNode::new(id.clone(), self.nodes.len() as u32 + 1);
        node.is_losers_bracket = losers;

        for (slot, is_left) in [(left, true), (right, false)] {
            let (source, kind) = match slot {
                Slot::Empty => continue,
                Slot::Winner(source) => (source, EdgeKind::Winner),
                Slot::Loser(source) => (source, EdgeKind::Loser),
            };
            if is_left {
                node.previous_left_id = Some(source.clone());
            } else {
                node.previous_right_id = Some(source.clone());
            }
            if let Some(&idx) = self.index.get(source) {
                self.nodes[idx].set_next(kind, Some(id.clone()));
            }
        }

        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        id
    }
}

fn winners_id(round: usize, position: usize) -> MatchId {
    MatchId::new(format!("W{round}-{}", position + 1))
}

fn losers_id(round: usize, position: usize) -> MatchId {
    MatchId::new(format!("L{round}-{}", position + 1))
}

fn winner_of(id: Option<&MatchId>) -> Slot<'_> {
    id.map_or(Slot::Empty, Slot::Winner)
}

fn single_elimination(entrants: u32, size: u32, third_place: bool) -> Vec<BracketNode> {
    let seeds = seed_positions(size);
    let mut builder = Builder::default();

    // A pairing against a seed beyond the field is a bye: no match, and the
    // receiving slot stays empty.
    let mut previous: Vec<Option<MatchId>> = seeds
        .chunks(2)
        .enumerate()
        .map(|(j, pair)| {
            let bye = pair.iter().any(|&seed| seed > entrants);
            (!bye).then(|| builder.push(winners_id(1, j), false, Slot::Empty, Slot::Empty))
        })
        .collect();

    let mut round = 2;
    let mut semifinals = Vec::new();
    while previous.len() > 1 {
        if previous.len() == 2 {
            semifinals = previous.iter().flatten().cloned().collect();
        }
        let current: Vec<Option<MatchId>> = previous
            .chunks(2)
            .enumerate()
            .map(|(j, pair)| {
                Some(builder.push(
                    winners_id(round, j),
                    false,
                    winner_of(pair[0].as_ref()),
                    winner_of(pair[1].as_ref()),
                ))
            })
            .collect();
        previous = current;
        round += 1;
    }

    if third_place && let [left, right] = semifinals.as_slice() {
        builder.push(
            MatchId::from("3P"),
            true,
            Slot::Loser(left),
            Slot::Loser(right),
        );
    }

    builder.nodes
}

fn double_elimination(size: u32, reset: bool) -> Vec<BracketNode> {
    let rounds = size.trailing_zeros() as usize;
    let mut builder = Builder::default();

    let mut winners: Vec<Vec<MatchId>> = Vec::with_capacity(rounds);
    winners.push(
        (0..size as usize / 2)
            .map(|j| builder.push(winners_id(1, j), false, Slot::Empty, Slot::Empty))
            .collect(),
    );
    for round in 2..=rounds {
        let current: Vec<MatchId> = winners[round - 2]
            .chunks(2)
            .enumerate()
            .map(|(j, pair)| {
                builder.push(
                    winners_id(round, j),
                    false,
                    Slot::Winner(&pair[0]),
                    Slot::Winner(&pair[1]),
                )
            })
            .collect();
        winners.push(current);
    }

    // Losers rounds come in pairs per winners round after the first: an odd
    // round that halves the field, then an even round where its winners meet
    // the players dropping from winners round `i + 1`.
    let mut losers: Vec<Vec<MatchId>> = Vec::new();
    for i in 1..rounds {
        let count = winners[i].len();
        let odd_round = i * 2 - 1;
        let odd: Vec<MatchId> = (0..count)
            .map(|j| {
                let (left, right) = match losers.last() {
                    None => (
                        Slot::Loser(&winners[0][j * 2]),
                        Slot::Loser(&winners[0][j * 2 + 1]),
                    ),
                    Some(even) => (Slot::Winner(&even[j * 2]), Slot::Winner(&even[j * 2 + 1])),
                };
                builder.push(losers_id(odd_round, j), true, left, right)
            })
            .collect();

        let even: Vec<MatchId> = (0..count)
            .map(|j| {
                builder.push(
                    losers_id(odd_round + 1, j),
                    true,
                    Slot::Winner(&odd[j]),
                    Slot::Loser(&winners[i][j]),
                )
            })
            .collect();
        losers.push(odd);
        losers.push(even);
    }

    let Some(winners_final) = winners.last().and_then(|round| round.first()).cloned() else {
        return builder.nodes;
    };
    let losers_side = match losers.last().and_then(|round| round.first()) {
        Some(losers_final) => Slot::Winner(losers_final),
        None => Slot::Loser(&winners_final),
    };
    let gf1 = builder.push(
        MatchId::from("GF1"),
        false,
        Slot::Winner(&winners_final),
        losers_side,
    );

    if reset {
        builder.push(
            MatchId::from("GF2"),
            false,
            Slot::Winner(&gf1),
            Slot::Loser(&gf1),
        );
    }

    builder.nodes
}
