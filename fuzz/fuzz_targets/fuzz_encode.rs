#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rivet::{Format, InstructionSpec, decompose, encode};

/// Structured input for encoder fuzzing.
#[derive(Arbitrary, Debug)]
struct EncodeInput {
    /// Format selector (reduced modulo 6).
    format: u8,
    /// Register slots, including out-of-range indices.
    rs1: Option<u8>,
    rs2: Option<u8>,
    rd: Option<u8>,
    /// Immediate, any 32-bit value.
    immediate: i32,
    /// Raw bit patterns, including over-long and empty ones.
    opcode: Vec<bool>,
    funct3: Vec<bool>,
    funct7: Vec<bool>,
}

fn bits(raw: &[bool]) -> String {
    // Cap well above any declared width to exercise truncation
    raw.iter()
        .take(12)
        .map(|b| if *b { '1' } else { '0' })
        .collect()
}

fuzz_target!(|input: EncodeInput| {
    let format = Format::ALL[(input.format % 6) as usize];
    let spec = InstructionSpec {
        format,
        rs1: input.rs1,
        rs2: input.rs2,
        rd: input.rd,
        immediate: input.immediate,
        opcode: bits(&input.opcode),
        funct3: bits(&input.funct3),
        funct7: bits(&input.funct7),
    };

    let out = encode(&spec);
    assert_eq!(out.binary.len(), 32);
    assert!(out.binary.bytes().all(|b| b == b'0' || b == b'1'));
    assert!(out.hex.starts_with("0x"));
    assert_eq!(out.hex.len(), 10);

    let fields = decompose(&spec);
    assert_eq!(fields.iter().map(|f| f.width).sum::<usize>(), 32);
    let concat: String = fields.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(concat, out.binary);
});
