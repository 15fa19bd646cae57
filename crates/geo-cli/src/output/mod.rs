use serde::Serialize;

use crate::cli::OutputFormat;

/// Print `value` as pretty JSON, or the text block built by `text`.
pub fn output<T: Serialize>(
    value: &T,
    text: impl FnOnce() -> String,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Text => text(),
    };
    println!("{rendered}");
    Ok(())
}
