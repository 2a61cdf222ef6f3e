//! `schema`: print the JSON Schema of configuration documents.
//!
//! Editors can use the output to validate `renovate.json` while typing.

use renovate_config::SchemaValidator;
use tracing::instrument;

use crate::commands::to_json;
use crate::errors::Error;

#[cfg(test)]
#[path = "schema_cmd_tests.rs"]
mod tests;

/// Execute the schema command
#[instrument]
pub fn execute() -> Result<(), Error> {
    println!("{}", render_schema()?);
    Ok(())
}

pub fn render_schema() -> Result<String, Error> {
    let schema = SchemaValidator::generate_schema()?;
    to_json(&schema)
}
