//! Version 1 of the on-disk configuration format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::configuration::MissingParameterPolicy;
use crate::connection_settings::DatabaseConnectionSettings;
use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::library::QueryLibrary;

pub const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
const CONFIGURATION_JSONSCHEMA_FILENAME: &str = "schema.json";

/// Initial configuration: the query library plus enough information to reach
/// the database files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using.
    pub version: u32,
    #[serde(default)]
    pub connection: DatabaseConnectionSettings,
    /// What to do when a template placeholder has no request parameter.
    #[serde(default)]
    pub on_missing_parameter: MissingParameterPolicy,
    #[serde(default)]
    pub queries: QueryLibrary,
}

impl ParsedConfiguration {
    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            connection: DatabaseConnectionSettings::default(),
            on_missing_parameter: MissingParameterPolicy::default(),
            queries: QueryLibrary::empty(),
        }
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoError(format!(
                    "{}: {}",
                    configuration_file.display(),
                    err
                ))
            })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file,
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    fs::write(
        &configuration_file,
        serde_json::to_string_pretty(parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    // the jsonschema file documents the configuration format next to it
    let configuration_jsonschema_file_path =
        out_dir.as_ref().join(CONFIGURATION_JSONSCHEMA_FILENAME);

    let output = schemars::schema_for!(ParsedConfiguration);
    fs::write(
        &configuration_jsonschema_file_path,
        serde_json::to_string_pretty(&output)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}
