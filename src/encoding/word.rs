//! Field assembly into the 32-bit machine word.

use super::spec::{WORD_WIDTH, fit_bits};
use super::{Format, InstructionSpec};

/// The rendered 32-bit machine word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInstruction {
    /// 32-character binary rendering, most-significant bit first.
    pub binary: String,
    /// Hexadecimal rendering: `0x` followed by 8 uppercase digits.
    pub hex: String,
}

impl EncodedInstruction {
    /// The word as an unsigned 32-bit integer.
    #[must_use]
    pub fn word(&self) -> u32 {
        u32::from_str_radix(&self.binary, 2).unwrap_or(0)
    }
}

/// Assemble the instruction word for a spec.
///
/// Every field is rendered at its fixed width (unset registers as
/// `00000`, the immediate truncated to the format's width) and the
/// groups are concatenated MSB-first in the format's layout order.
/// Total and deterministic: malformed bit patterns are padded or
/// truncated, never rejected.
///
/// The S and B layouts place the high 7 and low 5 immediate bits around
/// the register slots. For B (and J) the immediate is laid in as a
/// contiguous two's-complement value; the ISA's permuted branch/jump bit
/// orders appear only in the decomposition labels, not in the word.
#[must_use]
pub fn encode(spec: &InstructionSpec) -> EncodedInstruction {
    let opcode = spec.opcode_bits();
    let funct3 = spec.funct3_bits();
    let funct7 = spec.funct7_bits();
    let rs1 = spec.rs1_bits();
    let rs2 = spec.rs2_bits();
    let rd = spec.rd_bits();
    let imm = spec.immediate_bits();

    let assembled = match spec.format {
        Format::R => format!("{funct7}{rs2}{rs1}{funct3}{rd}{opcode}"),
        Format::I => format!("{imm}{rs1}{funct3}{rd}{opcode}"),
        Format::S | Format::B => {
            // 12-bit immediate by the width policy
            let (hi, lo) = imm.split_at(7);
            format!("{hi}{rs2}{rs1}{funct3}{lo}{opcode}")
        }
        Format::U | Format::J => format!("{imm}{rd}{opcode}"),
    };

    let binary = fit_bits(&assembled, WORD_WIDTH);
    let word = u32::from_str_radix(&binary, 2).unwrap_or(0);
    let hex = format!("0x{word:08X}");

    EncodedInstruction { binary, hex }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_zero_specs() {
        for format in Format::ALL {
            let out = encode(&InstructionSpec::new(format));
            assert_eq!(out.binary, "0".repeat(32), "format {format}");
            assert_eq!(out.hex, "0x00000000", "format {format}");
        }
    }

    #[test]
    fn test_r_type_add() {
        // add x3, x1, x2
        let spec = InstructionSpec {
            format: Format::R,
            rs1: Some(1),
            rs2: Some(2),
            rd: Some(3),
            opcode: "0110011".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(out.binary, "00000000001000001000000110110011");
        assert_eq!(out.hex, "0x002081B3");
    }

    #[test]
    fn test_i_type_load() {
        // lw x5, 4(x2)
        let spec = InstructionSpec {
            format: Format::I,
            rs1: Some(2),
            rd: Some(5),
            immediate: 4,
            opcode: "0000011".to_string(),
            funct3: "010".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(out.binary, "00000000010000010010001010000011");
        assert_eq!(out.hex, "0x00412283");
    }

    #[test]
    fn test_i_type_negative_immediate() {
        // addi x1, x0, -1
        let spec = InstructionSpec {
            format: Format::I,
            rs1: Some(0),
            rd: Some(1),
            immediate: -1,
            opcode: "0010011".to_string(),
            ..InstructionSpec::default()
        };
        assert_eq!(encode(&spec).hex, "0xFFF00093");
    }

    #[test]
    fn test_s_type_store() {
        // sw x2, 8(x1)
        let spec = InstructionSpec {
            format: Format::S,
            rs1: Some(1),
            rs2: Some(2),
            immediate: 8,
            opcode: "0100011".to_string(),
            funct3: "010".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(out.binary, "00000000001000001010010000100011");
        assert_eq!(out.hex, "0x0020A423");
    }

    #[test]
    fn test_u_type_max_immediate() {
        // lui x1, 0xFFFFF
        let spec = InstructionSpec {
            format: Format::U,
            rd: Some(1),
            immediate: 0xF_FFFF,
            opcode: "0110111".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(out.binary, "11111111111111111111000010110111");
        assert_eq!(out.hex, "0xFFFFF0B7");
    }

    #[test]
    fn test_b_type_contiguous_immediate() {
        // beq x1, x2 with an offset of 8: the low immediate bits land
        // around the register slots in order, high 7 then low 5
        let spec = InstructionSpec {
            format: Format::B,
            rs1: Some(1),
            rs2: Some(2),
            immediate: 8,
            opcode: "1100011".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(out.binary, "00000000001000001000010001100011");
        assert_eq!(out.hex, "0x00208463");
    }

    #[test]
    fn test_j_type() {
        let spec = InstructionSpec {
            format: Format::J,
            rd: Some(1),
            immediate: 1,
            opcode: "1101111".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(out.binary, "00000000000000000001000011101111");
        assert_eq!(out.hex, "0x000010EF");
    }

    #[test]
    fn test_unused_slots_encode_as_zero() {
        // rs2 set on an I-type spec has no slot to land in
        let with_rs2 = InstructionSpec {
            format: Format::I,
            rs2: Some(7),
            ..InstructionSpec::default()
        };
        let without = InstructionSpec::new(Format::I);
        assert_eq!(encode(&with_rs2), encode(&without));
    }

    #[test]
    fn test_short_opcode_is_padded() {
        let spec = InstructionSpec {
            opcode: "11".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(&out.binary[25..], "0000011");
    }

    #[test]
    fn test_long_opcode_keeps_low_bits() {
        let spec = InstructionSpec {
            opcode: "110110011".to_string(),
            ..InstructionSpec::default()
        };
        let out = encode(&spec);
        assert_eq!(&out.binary[25..], "0110011");
    }

    #[test]
    fn test_word_matches_hex() {
        let spec = InstructionSpec {
            format: Format::U,
            rd: Some(1),
            immediate: 0xF_FFFF,
            opcode: "0110111".to_string(),
            ..InstructionSpec::default()
        };
        assert_eq!(encode(&spec).word(), 0xFFFF_F0B7);
    }
}
