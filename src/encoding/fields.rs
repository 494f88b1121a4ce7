//! Decomposition of a spec into named, width-tagged bit groups.

use super::spec::{FUNCT3_WIDTH, FUNCT7_WIDTH, OPCODE_WIDTH, REGISTER_WIDTH};
use super::{Format, InstructionSpec};

/// Presentation category of a bit group.
///
/// Carries no encoding semantics; renderers use it to pick colors and
/// labels for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// funct7 slot.
    Funct7,
    /// rs2 register selector.
    Rs2,
    /// rs1 register selector.
    Rs1,
    /// funct3 slot.
    Funct3,
    /// rd register selector.
    Rd,
    /// Opcode slot.
    Opcode,
    /// Immediate bits (whole or partial).
    Imm,
}

impl FieldKind {
    /// Lowercase label for the category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Funct7 => "funct7",
            Self::Rs2 => "rs2",
            Self::Rs1 => "rs1",
            Self::Funct3 => "funct3",
            Self::Rd => "rd",
            Self::Opcode => "opcode",
            Self::Imm => "imm",
        }
    }
}

/// One named bit group of a decomposed instruction word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitField {
    /// Slot label, e.g. `"imm[11:0]"` or `"rs1"`.
    pub name: &'static str,
    /// Number of bits in the group.
    pub width: usize,
    /// Rendered bits, exactly `width` characters.
    pub value: String,
    /// Presentation category.
    pub kind: FieldKind,
}

impl BitField {
    fn new(name: &'static str, width: usize, value: String, kind: FieldKind) -> Self {
        Self {
            name,
            width,
            value,
            kind,
        }
    }
}

/// Decompose a spec into its layout's bit groups, MSB-first.
///
/// Field values are rendered exactly as [`super::encode`] renders them,
/// so concatenating the returned values reproduces the encoded binary.
/// The immediate slot names keep the ISA's permuted branch/jump bit
/// labels even though the bits themselves are laid in contiguously.
#[must_use]
pub fn decompose(spec: &InstructionSpec) -> Vec<BitField> {
    let opcode = || BitField::new("opcode", OPCODE_WIDTH, spec.opcode_bits(), FieldKind::Opcode);
    let funct3 = || BitField::new("funct3", FUNCT3_WIDTH, spec.funct3_bits(), FieldKind::Funct3);
    let rs1 = || BitField::new("rs1", REGISTER_WIDTH, spec.rs1_bits(), FieldKind::Rs1);
    let rs2 = || BitField::new("rs2", REGISTER_WIDTH, spec.rs2_bits(), FieldKind::Rs2);
    let rd = || BitField::new("rd", REGISTER_WIDTH, spec.rd_bits(), FieldKind::Rd);

    match spec.format {
        Format::R => vec![
            BitField::new("funct7", FUNCT7_WIDTH, spec.funct7_bits(), FieldKind::Funct7),
            rs2(),
            rs1(),
            funct3(),
            rd(),
            opcode(),
        ],
        Format::I => vec![
            BitField::new("imm[11:0]", 12, spec.immediate_bits(), FieldKind::Imm),
            rs1(),
            funct3(),
            rd(),
            opcode(),
        ],
        Format::S | Format::B => {
            let imm = spec.immediate_bits();
            let (hi, lo) = imm.split_at(7);
            let (hi_name, lo_name) = if spec.format == Format::S {
                ("imm[11:5]", "imm[4:0]")
            } else {
                ("imm[12|10:5]", "imm[4:1|11]")
            };
            vec![
                BitField::new(hi_name, 7, hi.to_string(), FieldKind::Imm),
                rs2(),
                rs1(),
                funct3(),
                BitField::new(lo_name, 5, lo.to_string(), FieldKind::Imm),
                opcode(),
            ]
        }
        Format::U => vec![
            BitField::new("imm[31:12]", 20, spec.immediate_bits(), FieldKind::Imm),
            rd(),
            opcode(),
        ],
        Format::J => vec![
            BitField::new("imm[20|10:1|11|19:12]", 20, spec.immediate_bits(), FieldKind::Imm),
            rd(),
            opcode(),
        ],
    }
}
