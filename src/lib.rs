//! A Texas Hold'em hand evaluator and equity calculator: 52-bit card masks,
//! a branchless table-driven 5-to-7-card evaluator, range notation parsing,
//! and exact/sampled/range-vs-range/live equity calculation.

#[macro_use]
extern crate lazy_static;

pub mod cardset;
pub mod combinatorics;
pub mod constants;
pub mod equity;
pub mod error;
pub mod evaluator;
pub mod range;
pub mod suits;
pub mod tables;

pub use cardset::{Board, CardSet, HoleCards, Street};
pub use equity::{
    completion_count, exact_equity, range_vs_range_equity, sampled_equity, stream_equity,
    EquityReport, LiveEquity, LiveUpdate,
};
pub use error::{EquityError, ParseError};
pub use evaluator::evaluate;
pub use range::{parse_card, parse_hole_cards, parse_range, Range};
