//! Output formatting utilities for CLI.

use rivet::{BitField, EncodedInstruction, FieldKind, InstructionSpec, registers};
use serde::Serialize;

/// JSON-serializable encoded instruction.
#[derive(Debug, Serialize)]
pub(super) struct JsonInstruction {
    /// Format letter.
    pub(super) format: String,
    /// 32-character binary rendering.
    pub(super) binary: String,
    /// Hexadecimal rendering.
    pub(super) hex: String,
    /// The word as an unsigned integer.
    pub(super) word: u32,
    /// Decomposed bit groups, MSB-first.
    pub(super) fields: Vec<JsonBitField>,
}

/// JSON-serializable bit group.
#[derive(Debug, Serialize)]
pub(super) struct JsonBitField {
    /// Slot label.
    pub(super) name: &'static str,
    /// Bit count.
    pub(super) width: usize,
    /// Rendered bits.
    pub(super) value: String,
    /// Presentation category.
    pub(super) kind: &'static str,
}

impl JsonInstruction {
    /// Build the JSON mirror of an encoding result.
    pub(super) fn new(
        spec: &InstructionSpec,
        encoded: &EncodedInstruction,
        fields: &[BitField],
    ) -> Self {
        Self {
            format: spec.format.to_string(),
            binary: encoded.binary.clone(),
            hex: encoded.hex.clone(),
            word: encoded.word(),
            fields: fields
                .iter()
                .map(|f| JsonBitField {
                    name: f.name,
                    width: f.width,
                    value: f.value.clone(),
                    kind: f.kind.label(),
                })
                .collect(),
        }
    }
}

/// Group a binary string into space-separated nibbles.
pub(super) fn group_nibbles(binary: &str) -> String {
    let chars: Vec<char> = binary.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Annotation for a register slot: the selected register or "unused".
fn register_note(spec: &InstructionSpec, kind: FieldKind) -> Option<String> {
    let reg = match kind {
        FieldKind::Rs1 => spec.rs1,
        FieldKind::Rs2 => spec.rs2,
        FieldKind::Rd => spec.rd,
        _ => return None,
    };
    Some(reg.map_or_else(
        || "(unused)".to_string(),
        |r| format!("(x{r}/{})", registers::abi_name(r)),
    ))
}

/// Render the decomposition as an aligned two-column table.
pub(super) fn field_table(spec: &InstructionSpec, fields: &[BitField]) -> String {
    let name_width = fields.iter().map(|f| f.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    for field in fields {
        out.push_str(&format!("  {:<name_width$}  {}", field.name, field.value));
        if let Some(note) = register_note(spec, field.kind) {
            out.push_str(&format!("  {note}"));
        }
        out.push('\n');
    }
    out
}

/// Format a full encoding result as human-readable text.
pub(super) fn format_text(
    spec: &InstructionSpec,
    encoded: &EncodedInstruction,
    fields: &[BitField],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Format: {}\n", spec.format));
    out.push_str(&format!("Binary: {}\n", group_nibbles(&encoded.binary)));
    out.push_str(&format!("Hex:    {}\n\n", encoded.hex));
    out.push_str(&field_table(spec, fields));

    out
}
