//! Instruction formats and the immediate width policy.

use std::fmt;
use std::str::FromStr;

/// One of the six RISC-V base instruction encodings.
///
/// Each format fixes a 32-bit field layout; the format is chosen before
/// any field values are filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Register-register operations (ADD, SUB, SLL). Two source
    /// registers and one destination register.
    #[default]
    R,
    /// Register-immediate operations (ADDI, SLTI) and loads (LW, LB).
    /// One source register, an immediate, and a destination register.
    I,
    /// Store operations (SW, SH, SB). Two source registers and an
    /// immediate forming the memory offset.
    S,
    /// Branch operations (BEQ, BNE, BLT). Compares two registers and
    /// branches to a PC-relative target.
    B,
    /// Upper-immediate operations (LUI, AUIPC). Places a 20-bit
    /// immediate in the upper bits of the destination register.
    U,
    /// Jump operations (JAL). Jumps to a PC-relative target and stores
    /// the return address.
    J,
}

impl Format {
    /// All six formats, in canonical order.
    pub const ALL: [Self; 6] = [Self::R, Self::I, Self::S, Self::B, Self::U, Self::J];

    /// Number of immediate bits the format carries.
    ///
    /// Single source of truth for both the encoder and the decomposer.
    #[must_use]
    pub const fn immediate_width(self) -> usize {
        match self {
            Self::R => 0,
            Self::I | Self::S | Self::B => 12,
            Self::U | Self::J => 20,
        }
    }

    /// Largest unsigned value the immediate slot can hold.
    #[must_use]
    pub const fn max_unsigned(self) -> u32 {
        (1u32 << self.immediate_width()) - 1
    }

    /// Whether the layout has an rs1 slot.
    #[must_use]
    pub const fn uses_rs1(self) -> bool {
        matches!(self, Self::R | Self::I | Self::S | Self::B)
    }

    /// Whether the layout has an rs2 slot.
    #[must_use]
    pub const fn uses_rs2(self) -> bool {
        matches!(self, Self::R | Self::S | Self::B)
    }

    /// Whether the layout has an rd slot.
    #[must_use]
    pub const fn uses_rd(self) -> bool {
        matches!(self, Self::R | Self::I | Self::U | Self::J)
    }

    /// Whether the layout has a funct7 slot.
    #[must_use]
    pub const fn uses_funct7(self) -> bool {
        matches!(self, Self::R)
    }

    /// Whether the layout carries an immediate.
    #[must_use]
    pub const fn uses_immediate(self) -> bool {
        !matches!(self, Self::R)
    }

    /// One-line description of what the format is used for.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::R => {
                "Register-register operations (ADD, SUB, SLL). \
                 Two source registers and one destination register."
            }
            Self::I => {
                "Register-immediate operations (ADDI, SLTI) and loads (LW, LB). \
                 One source register, an immediate, and a destination register."
            }
            Self::S => {
                "Store operations (SW, SH, SB). \
                 Two source registers and an immediate forming the memory offset."
            }
            Self::B => {
                "Branch operations (BEQ, BNE, BLT). \
                 Compares two registers and branches to a PC-relative target."
            }
            Self::U => {
                "Upper-immediate operations (LUI, AUIPC). \
                 Places a 20-bit immediate in the upper bits of the destination register."
            }
            Self::J => {
                "Jump operations (JAL). \
                 Jumps to a PC-relative target and stores the return address."
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::R => 'R',
            Self::I => 'I',
            Self::S => 'S',
            Self::B => 'B',
            Self::U => 'U',
            Self::J => 'J',
        };
        write!(f, "{letter}")
    }
}

/// Error returned when a string does not name an instruction format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormatError;

impl fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected one of R, I, S, B, U, J")
    }
}

impl std::error::Error for ParseFormatError {}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "R" | "r" => Ok(Self::R),
            "I" | "i" => Ok(Self::I),
            "S" | "s" => Ok(Self::S),
            "B" | "b" => Ok(Self::B),
            "U" | "u" => Ok(Self::U),
            "J" | "j" => Ok(Self::J),
            _ => Err(ParseFormatError),
        }
    }
}
