//! CLI command implementations for Rivet.

pub(crate) mod build;
pub(crate) mod encode;
pub(crate) mod fields;
pub(crate) mod formats;
pub(crate) mod registers;

mod output;

use clap::ValueEnum;
use rivet::encoding::{FUNCT3_WIDTH, FUNCT7_WIDTH, OPCODE_WIDTH};
use rivet::{Format, InstructionSpec};
use std::error::Error;
use std::fmt;

/// Output format for the `encode` and `fields` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Instruction format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    /// R-type (register-register).
    R,
    /// I-type (immediate / load).
    I,
    /// S-type (store).
    S,
    /// B-type (branch).
    B,
    /// U-type (upper immediate).
    U,
    /// J-type (jump).
    J,
}

impl FormatArg {
    /// The corresponding library format.
    pub(crate) fn as_format(self) -> Format {
        match self {
            Self::R => Format::R,
            Self::I => Format::I,
            Self::S => Format::S,
            Self::B => Format::B,
            Self::U => Format::U,
            Self::J => Format::J,
        }
    }
}

/// Instruction field values shared by the encode and fields commands.
#[derive(Debug, clap::Args)]
pub(crate) struct SpecArgs {
    /// Instruction format (R, I, S, B, U, J)
    #[arg(short, long)]
    pub(crate) format: FormatArg,

    /// Opcode bits (up to 7 binary digits)
    #[arg(long, default_value = "0000000")]
    pub(crate) opcode: String,

    /// Funct3 bits (up to 3 binary digits)
    #[arg(long, default_value = "000")]
    pub(crate) funct3: String,

    /// Funct7 bits (up to 7 binary digits, R-type only)
    #[arg(long, default_value = "0000000")]
    pub(crate) funct7: String,

    /// First source register (0-31)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..32))]
    pub(crate) rs1: Option<u8>,

    /// Second source register (0-31)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..32))]
    pub(crate) rs2: Option<u8>,

    /// Destination register (0-31)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..32))]
    pub(crate) rd: Option<u8>,

    /// Immediate value (decimal, or hex with a 0x prefix)
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub(crate) imm: String,
}

impl SpecArgs {
    /// Validate the raw arguments and build the spec.
    ///
    /// # Errors
    ///
    /// Returns an error for non-binary digit patterns, patterns longer
    /// than their slot, or an unparsable immediate.
    pub(crate) fn to_spec(&self) -> Result<InstructionSpec, CliError> {
        Ok(InstructionSpec {
            format: self.format.as_format(),
            rs1: self.rs1,
            rs2: self.rs2,
            rd: self.rd,
            immediate: parse_immediate(&self.imm)?,
            opcode: parse_bits(&self.opcode, OPCODE_WIDTH, "opcode")?,
            funct3: parse_bits(&self.funct3, FUNCT3_WIDTH, "funct3")?,
            funct7: parse_bits(&self.funct7, FUNCT7_WIDTH, "funct7")?,
        })
    }
}

/// Validate a binary digit pattern for a fixed-width slot.
fn parse_bits(value: &str, width: usize, name: &str) -> Result<String, CliError> {
    if !value.chars().all(|c| c == '0' || c == '1') {
        return Err(CliError::new(format!(
            "{name} must contain only binary digits, got {value:?}"
        )));
    }
    if value.len() > width {
        return Err(CliError::new(format!(
            "{name} must be at most {width} bits, got {} digits",
            value.len()
        )));
    }
    Ok(value.to_string())
}

/// Parse a signed immediate from decimal or `0x`-prefixed hex.
fn parse_immediate(value: &str) -> Result<i32, CliError> {
    let trimmed = value.trim();
    let (negative, magnitude) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let parsed = if let Some(hex) = magnitude
        .strip_prefix("0x")
        .or_else(|| magnitude.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16)
    } else {
        magnitude.parse::<i64>()
    };

    let magnitude = parsed
        .map_err(|_| CliError::new(format!("invalid immediate value: {value:?}")))?;
    let signed = if negative { -magnitude } else { magnitude };

    i32::try_from(signed)
        .map_err(|_| CliError::new(format!("immediate {value} does not fit in 32 bits")))
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits_accepts_short_patterns() {
        assert_eq!(parse_bits("0110011", 7, "opcode").unwrap(), "0110011");
        assert_eq!(parse_bits("11", 7, "opcode").unwrap(), "11");
        assert_eq!(parse_bits("", 3, "funct3").unwrap(), "");
    }

    #[test]
    fn test_parse_bits_rejects_bad_input() {
        assert!(parse_bits("012", 7, "opcode").is_err());
        assert!(parse_bits("00000000", 7, "opcode").is_err());
    }

    #[test]
    fn test_parse_immediate_decimal_and_hex() {
        assert_eq!(parse_immediate("42").unwrap(), 42);
        assert_eq!(parse_immediate("-1").unwrap(), -1);
        assert_eq!(parse_immediate("0xFFFFF").unwrap(), 0xF_FFFF);
        assert_eq!(parse_immediate("-0x10").unwrap(), -16);
        assert_eq!(parse_immediate(" 8 ").unwrap(), 8);
    }

    #[test]
    fn test_parse_immediate_rejects_garbage() {
        assert!(parse_immediate("abc").is_err());
        assert!(parse_immediate("0x").is_err());
        assert!(parse_immediate("99999999999999").is_err());
    }
}
