//! Formats command implementation - reference listing.

use super::CliError;
use rivet::{Format, InstructionSpec, decompose};

/// Execute the formats command.
///
/// # Errors
///
/// Infallible today; the signature matches the other commands.
pub(crate) fn execute() -> Result<(), CliError> {
    for format in Format::ALL {
        println!("{format} - {}", format.description());
        println!("    layout:    {}", layout_row(format));
        println!("    immediate: {}", immediate_note(format));
        println!();
    }

    println!("Branch and jump immediates are laid into their slots as contiguous");
    println!("low-order bits; the slot labels keep the ISA bit names.");

    Ok(())
}

/// Render a format's 32-bit layout as `name(width)` groups, MSB-first.
fn layout_row(format: Format) -> String {
    decompose(&InstructionSpec::new(format))
        .iter()
        .map(|f| format!("{}({})", f.name, f.width))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn immediate_note(format: Format) -> String {
    let width = format.immediate_width();
    if width == 0 {
        "none".to_string()
    } else {
        format!("{width} bits (0x0 - 0x{:X})", format.max_unsigned())
    }
}
