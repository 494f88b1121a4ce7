//! Fields command implementation - decomposition-only view.

use super::output::{JsonInstruction, field_table};
use super::{CliError, OutputFormat, SpecArgs};
use rivet::{decompose, encode};

/// Execute the fields command.
///
/// # Errors
///
/// Returns an error if the field arguments fail validation.
pub(crate) fn execute(args: &SpecArgs, output: OutputFormat) -> Result<(), CliError> {
    let spec = args.to_spec()?;
    let fields = decompose(&spec);

    match output {
        OutputFormat::Text => {
            print!("{}", field_table(&spec, &fields));
        }
        OutputFormat::Json => {
            // Keep the same envelope as `encode` so consumers can reuse
            // one schema for both commands.
            let encoded = encode(&spec);
            let json = serde_json::to_string_pretty(&JsonInstruction::new(&spec, &encoded, &fields))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
