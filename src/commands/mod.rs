pub mod analyze;
pub mod evaluate;
pub mod init;

use crate::io::output::OutputFormat;

/// Resolve the output format: explicit CLI choice, then the configured
/// default, then JSON.
pub fn resolve_format(cli_format: Option<OutputFormat>) -> OutputFormat {
    cli_format
        .or_else(|| {
            crate::config::get_default_format()
                .as_deref()
                .and_then(OutputFormat::from_name)
        })
        .unwrap_or(OutputFormat::Json)
}
