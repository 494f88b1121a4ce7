//! Property-based tests for the encoding core.
//!
//! These tests verify the structural invariants shared by the encoder
//! and the decomposer. Run with: cargo test --release prop_encoding

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

use proptest::prelude::*;

use rivet::{FieldKind, Format, InstructionSpec, decompose, encode};

fn arb_format() -> impl Strategy<Value = Format> {
    prop_oneof![
        Just(Format::R),
        Just(Format::I),
        Just(Format::S),
        Just(Format::B),
        Just(Format::U),
        Just(Format::J),
    ]
}

fn arb_spec() -> impl Strategy<Value = InstructionSpec> {
    (
        arb_format(),
        prop::option::of(0u8..32),
        prop::option::of(0u8..32),
        prop::option::of(0u8..32),
        any::<i32>(),
        "[01]{0,7}",
        "[01]{0,3}",
        "[01]{0,7}",
    )
        .prop_map(
            |(format, rs1, rs2, rd, immediate, opcode, funct3, funct7)| InstructionSpec {
                format,
                rs1,
                rs2,
                rd,
                immediate,
                opcode,
                funct3,
                funct7,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        max_global_rejects: 65536,
        ..ProptestConfig::with_cases(10000)
    })]

    /// The binary rendering is always exactly 32 binary digits.
    #[test]
    fn prop_binary_is_32_bits(spec in arb_spec()) {
        let out = encode(&spec);
        prop_assert_eq!(out.binary.len(), 32);
        prop_assert!(out.binary.chars().all(|c| c == '0' || c == '1'));
    }

    /// The hex rendering is always 0x plus 8 uppercase hex digits.
    #[test]
    fn prop_hex_shape(spec in arb_spec()) {
        let out = encode(&spec);
        prop_assert!(out.hex.starts_with("0x"));
        prop_assert_eq!(out.hex.len(), 10);
        prop_assert!(
            out.hex[2..]
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        );
    }

    /// Binary and hex renderings describe the same 32-bit value.
    #[test]
    fn prop_hex_binary_round_trip(spec in arb_spec()) {
        let out = encode(&spec);
        let from_binary = u32::from_str_radix(&out.binary, 2).unwrap();
        let from_hex = u32::from_str_radix(&out.hex[2..], 16).unwrap();
        prop_assert_eq!(from_binary, from_hex);
        prop_assert_eq!(out.word(), from_binary);
    }

    /// Concatenating the decomposition reproduces the encoded binary.
    #[test]
    fn prop_decomposition_matches_word(spec in arb_spec()) {
        let out = encode(&spec);
        let fields = decompose(&spec);

        let concat: String = fields.iter().map(|f| f.value.as_str()).collect();
        prop_assert_eq!(concat, out.binary);

        let total: usize = fields.iter().map(|f| f.width).sum();
        prop_assert_eq!(total, 32);

        for field in &fields {
            prop_assert_eq!(field.value.len(), field.width);
        }
    }

    /// A zero immediate always renders as all-zero immediate groups.
    #[test]
    fn prop_zero_immediate_gives_zero_groups(
        format in arb_format(),
        rs1 in prop::option::of(0u8..32),
        rs2 in prop::option::of(0u8..32),
        rd in prop::option::of(0u8..32),
    ) {
        let spec = InstructionSpec {
            format,
            rs1,
            rs2,
            rd,
            immediate: 0,
            ..InstructionSpec::default()
        };
        for field in decompose(&spec) {
            if field.kind == FieldKind::Imm {
                prop_assert!(field.value.chars().all(|c| c == '0'), "{}", field.name);
            }
        }
    }

    /// Immediate bits above the format's width never reach the word.
    #[test]
    fn prop_truncation_is_confined(spec in arb_spec(), high in any::<i32>()) {
        let width = spec.format.immediate_width();
        prop_assume!(width > 0);

        let mask = (1u32 << width) - 1;
        let rewritten = ((spec.immediate as u32) & mask) | ((high as u32) & !mask);
        let altered = InstructionSpec {
            immediate: rewritten as i32,
            ..spec.clone()
        };

        prop_assert_eq!(encode(&altered), encode(&spec));
    }

    /// Encoding is a pure function of the spec.
    #[test]
    fn prop_encode_is_deterministic(spec in arb_spec()) {
        prop_assert_eq!(encode(&spec), encode(&spec));
        prop_assert_eq!(decompose(&spec), decompose(&spec));
    }

    /// Register indices above 31 behave as their 5-bit truncation.
    #[test]
    fn prop_register_indices_are_masked(spec in arb_spec(), index in any::<u8>()) {
        let raw = InstructionSpec {
            rs1: Some(index),
            ..spec.clone()
        };
        let masked = InstructionSpec {
            rs1: Some(index & 0x1F),
            ..spec
        };
        prop_assert_eq!(encode(&raw), encode(&masked));
    }
}
