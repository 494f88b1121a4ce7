// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Rivet: a builder and bit-field visualizer for 32-bit RISC-V
//! instruction words.
//!
//! The core is a pair of pure functions over an [`InstructionSpec`]:
//! [`encode`] produces the 32-bit word (binary and hex renderings), and
//! [`decompose`] produces the ordered, labeled bit groups whose
//! concatenation reproduces that word. Both consult the same immediate
//! width policy on [`Format`] and share one set of field renderings, so
//! the two views can never drift apart.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        CLI / TUI front-end          │
//! ├──────────────────┬──────────────────┤
//! │     Encoder      │    Decomposer    │
//! ├──────────────────┴──────────────────┤
//! │      Width policy (Format)          │
//! └─────────────────────────────────────┘
//! ```
//!
//! Everything below the front-end is stateless and side-effect free:
//! calls may be issued concurrently from any number of callers with no
//! coordination.

pub mod encoding;
pub mod registers;

pub use encoding::{
    BitField, EncodedInstruction, FieldKind, Format, InstructionSpec, decompose, encode,
};
