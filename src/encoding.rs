//! Instruction word encoding core.
//!
//! Pure, stateless mapping from an [`InstructionSpec`] to its 32-bit
//! machine word and to the ordered list of named bit fields that make up
//! that word. Both views are built from the same normalized field
//! renderings, so concatenating the decomposition always reproduces the
//! encoded binary.

mod fields;
mod format;
mod spec;
mod word;

pub use fields::{BitField, FieldKind, decompose};
pub use format::{Format, ParseFormatError};
pub use spec::{
    FUNCT3_WIDTH, FUNCT7_WIDTH, InstructionSpec, OPCODE_WIDTH, REGISTER_WIDTH, WORD_WIDTH,
};
pub use word::{EncodedInstruction, encode};
