//! Error taxonomy (spec §7). Four kinds of failure, only two of which are
//! ever an `Err`: invalid notation at the parsing boundary, and resource
//! exhaustion ("ranges too narrow") during live sampling. Precondition
//! violations are programming errors (debug-assert, not `Result`) and
//! cancellation is a distinct outcome carried by the live-streaming API's
//! own return type, not an error variant.

use thiserror::Error;

/// Malformed textual input at the parsing boundary (spec §6 grammars). Never
/// reaches the evaluator — everything past this point operates on validated
/// card masks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid card: {0:?}")]
    InvalidCard(String),
    #[error("invalid hole cards: {0:?}")]
    InvalidHoleCards(String),
    #[error("duplicate card in list: {0:?}")]
    DuplicateCard(String),
    #[error("invalid range term: {0:?}")]
    InvalidRangeTerm(String),
    #[error("invalid suit filter: {0:?}")]
    InvalidSuitFilter(String),
}

/// Failures surfaced by the equity engine. `ConflictingHoldings` covers the
/// precondition on overlapping hole cards/board/dead cards that §7 kind 2
/// calls "fatal" — it is still returned as a `Result` here (rather than only
/// debug-asserted) because equity inputs routinely come from untrusted
/// range combinations assembled at runtime, unlike the evaluator's raw mask
/// input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EquityError {
    #[error("player holdings overlap the board, dead cards, or each other")]
    ConflictingHoldings,
    #[error("board must have 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardSize(u32),
    #[error("need at least 2 players")]
    TooFewPlayers,
    #[error("ranges too narrow: {skipped} of {attempted} iterations were skipped")]
    RangesTooNarrow { skipped: u64, attempted: u64 },
}
