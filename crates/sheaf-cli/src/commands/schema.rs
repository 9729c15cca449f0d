//! Schema command implementation.

use crate::cli::SchemaArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;
use sheaf_config::SheafConfig;

/// Print or write the JSON schema of the configuration file.
pub async fn execute(args: SchemaArgs) -> Result<()> {
    let json = config_schema_json()?;
    utils::write_output(args.out.as_deref(), &json).await?;

    if let Some(out) = &args.out {
        ui::success(&format!("Schema written to {}", out.display()));
    }
    Ok(())
}

/// JSON schema of [`SheafConfig`], pretty-printed.
pub fn config_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(SheafConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
