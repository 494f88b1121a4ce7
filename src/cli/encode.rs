//! Encode command implementation.

use super::output::{JsonInstruction, format_text};
use super::{CliError, OutputFormat, SpecArgs};
use rivet::{decompose, encode};

/// Execute the encode command.
///
/// # Errors
///
/// Returns an error if the field arguments fail validation.
pub(crate) fn execute(args: &SpecArgs, output: OutputFormat) -> Result<(), CliError> {
    let spec = args.to_spec()?;
    let encoded = encode(&spec);
    let fields = decompose(&spec);

    match output {
        OutputFormat::Text => {
            print!("{}", format_text(&spec, &encoded, &fields));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonInstruction::new(&spec, &encoded, &fields))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
