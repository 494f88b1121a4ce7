//! Registers command implementation - ABI name listing.

use super::CliError;
use rivet::registers::ABI_NAMES;

/// Execute the registers command.
///
/// # Errors
///
/// Infallible today; the signature matches the other commands.
pub(crate) fn execute() -> Result<(), CliError> {
    // Four columns of eight, read down each column
    for row in 0..8 {
        let mut line = String::new();
        for col in 0..4 {
            let index = col * 8 + row;
            line.push_str(&format!("x{index:<3} {:<6}  ", ABI_NAMES[index]));
        }
        println!("{}", line.trim_end());
    }

    Ok(())
}
