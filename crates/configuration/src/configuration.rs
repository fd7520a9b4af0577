//! Configuration for the connector.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::connection_settings::DatabaseConnectionSettings;
use crate::error::MakeRuntimeConfigurationError;
use crate::library::QueryLibrary;
use crate::version1::{ParsedConfiguration, CURRENT_VERSION};

/// How the compiler treats a placeholder with no matching request parameter.
///
/// Deployments disagree on the right rule, so both are available and the
/// choice is made in the configuration file.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MissingParameterPolicy {
    /// Bind SQL NULL for the missing value.
    #[default]
    BindNull,
    /// Fail the operation with a missing-parameter error.
    Reject,
}

/// The 'Configuration' type collects all the information necessary to serve
/// queries at runtime.
///
/// 'ParsedConfiguration' deals with the concrete serialized format; values of
/// this type are produced from it using 'make_runtime_configuration', which
/// is where configuration format evolution is dealt with.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub queries: QueryLibrary,
    pub connection: DatabaseConnectionSettings,
    pub on_missing_parameter: MissingParameterPolicy,
}

/// Interpret a parsed configuration as runtime configuration.
pub fn make_runtime_configuration(
    parsed: ParsedConfiguration,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    if parsed.version != CURRENT_VERSION {
        return Err(MakeRuntimeConfigurationError::UnknownVersion {
            expected: CURRENT_VERSION,
            got: parsed.version,
        });
    }
    Ok(Configuration {
        queries: parsed.queries,
        connection: parsed.connection,
        on_missing_parameter: parsed.on_missing_parameter,
    })
}
