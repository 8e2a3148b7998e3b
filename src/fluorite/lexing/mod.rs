//! Scanner
//!
//!     This module turns source text into a lazy stream of tokens. The rule
//!     table lives in [base_tokenization] as a logos-derived enum: matching
//!     takes the longest match, and declaration priority breaks equal-length
//!     ties, which is why the reserved words (`do`, `end`) sit above the
//!     general identifier rule — an identical-length match on a reserved
//!     word must win over being read as a plain identifier.
//!
//!     Besides the token rules, the scanner skips rather than emits:
//!         - runs of horizontal whitespace,
//!         - line comments (`#` to end of line),
//!         - a newline run before the first real token (leading whitespace),
//!         - a newline run that ends the source (trailing whitespace).
//!
//!     A newline together with the indentation that follows it is captured
//!     as a single line-break token. The captured text marks a statement
//!     boundary and nothing more; the rewriting pass replaces it with a
//!     canonical empty line-break token.
//!
//! Apply Markers
//!
//!     The stream produced here is raw: it contains no apply markers yet.
//!     Feed it through [transformations::apply_markers::ApplyMarkers] to
//!     obtain the stream the parser consumes.

pub mod base_tokenization;
pub mod transformations;

pub use base_tokenization::{scan, LexError, Scanner};
