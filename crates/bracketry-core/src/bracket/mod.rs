//! Bracket graph model and the algorithms that run over it.
//!
//! A tournament bracket is a directed graph of matches. Each [`BracketNode`]
//! stores its own adjacency as match ids: two predecessor slots, and the
//! match its winner and its loser advance to. The node set lives in a
//! [`BracketGraph`] arena; ids are resolved through the graph's index and are
//! never held as references.
//!
//! # Passes
//!
//! Every algorithm is a pure function of one graph snapshot:
//!
//! - [`validate()`] checks the structural invariants and collects every
//!   [`BracketError`] it finds.
//! - [`filter_valid_next_match_candidates()`] lists the matches an advancement
//!   edge may point to without breaking those invariants.
//! - [`generate_rounds()`] lays the graph out as rounds for a
//!   [`BracketView`].
//!
//! Mutations go through [`BracketGraph::insert`], [`BracketGraph::remove`]
//! and [`BracketGraph::link`]; `link` only commits edits that validate.
//!
//! # Lanes and merges
//!
//! Double elimination splits matches into a winners and a losers [`Lane`].
//! A winner stays in its lane and a loser drops into the losers lane. The
//! exception is a [`MatchKind::LaneMerge`] match, where the two lanes meet:
//! the grand final and its reset. [`MatchKind`] is derived from structure on
//! every pass and never stored.

mod candidates;
pub mod edge;
mod edit;
pub mod error;
mod graph;
pub mod node;
mod rounds;
mod validate;

pub use candidates::filter_valid_next_match_candidates;
pub use edge::{Edge, EdgeField, EdgeKind};
pub use error::{BracketError, ValidationErrors, ValidationResult};
pub use graph::BracketGraph;
pub use node::{BracketNode, Lane, MatchId, MatchKind};
pub use rounds::{BracketView, Round, Rounds, generate_rounds, round_label};
pub use validate::validate;
