//! Bracketry Core - tournament bracket graph engine
//!
//! This crate models a single or double elimination tournament as a directed
//! graph of matches and provides the passes that keep that graph sound while
//! it is edited.
//!
//! # Core Abstractions
//!
//! ## Model
//!
//! - [`BracketNode`] - One match: id, display number, two predecessor slots,
//!   winner and loser advancement edges, lane tag
//! - [`BracketGraph`] - Arena of matches in insertion order with id lookup
//! - [`Lane`], [`EdgeKind`], [`MatchKind`] - Lanes, edge kinds, and the
//!   structural role of a match
//!
//! ## Passes
//!
//! - [`validate()`] - Structural invariants: acyclicity, slots, lanes,
//!   references, uniqueness. Collects every error into [`ValidationErrors`]
//! - [`filter_valid_next_match_candidates()`] - Legal targets for a winner or
//!   loser edge
//! - [`generate_rounds()`] - Round-by-round layout for a [`BracketView`]
//!
//! ## Building and Editing
//!
//! - [`generate_bracket()`] - Node set for a fresh bracket in a
//!   [`BracketFormat`]
//! - [`BracketGraph::insert`], [`BracketGraph::remove`],
//!   [`BracketGraph::link`] - Edits; `link` commits only what validates
//!
//! # Features
//!
//! - `serde` - `Serialize`/`Deserialize` for the model types. Field names
//!   accept both `snake_case` and the `camelCase` used by JSON data layers.
//! - `tracing` - `debug`-level events from the passes and edits.
//!
//! # Example
//!
//! ```rust
//! use bracketry_core::{BracketFormat, BracketView, EdgeKind, generate_bracket, validate};
//!
//! let nodes = generate_bracket(8, BracketFormat::DOUBLE)?;
//! let graph = validate(&nodes).expect("generated brackets are sound");
//!
//! // Where may the first winners semifinal send its loser?
//! let targets = graph.candidates("W2-1", EdgeKind::Loser);
//! assert!(targets.iter().any(|id| id.as_str() == "L2-1"));
//!
//! let rounds = graph.rounds(BracketView::Losers);
//! assert_eq!(rounds.last().map(Vec::len), Some(1));
//! # Ok::<(), bracketry_core::GenerateError>(())
//! ```
//!
//! # Design Principles
//!
//! - **Pure passes**: every algorithm is a function of one graph snapshot
//! - **Ids, not pointers**: edges are match ids resolved through the arena
//! - **Deterministic**: output order follows insertion order
//! - **Total**: malformed input produces errors or placeholders, never panics

pub mod bracket;
pub mod generate;

// Re-export main types at crate root
pub use bracket::{
    BracketError, BracketGraph, BracketNode, BracketView, Edge, EdgeField, EdgeKind, Lane,
    MatchId, MatchKind, Round, Rounds, ValidationErrors, ValidationResult,
    filter_valid_next_match_candidates, generate_rounds, round_label, validate,
};
pub use generate::{BracketFormat, GenerateError, MAX_ENTRANTS, generate_bracket, seed_positions};
