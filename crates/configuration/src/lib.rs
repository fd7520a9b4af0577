pub mod configuration;
pub mod connection_settings;
pub mod error;
pub mod library;
pub mod version1;

pub use configuration::{make_runtime_configuration, Configuration, MissingParameterPolicy};
pub use connection_settings::DatabaseConnectionSettings;
pub use library::{LookupError, QueryLibrary, DEFAULT_SCOPE};
pub use version1::{
    parse_configuration, write_parsed_configuration, ParsedConfiguration, CONFIGURATION_FILENAME,
};
