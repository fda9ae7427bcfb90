#![forbid(unsafe_code)]

use poem_openapi::Object;
use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("tutorial_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Inaccessible logger configuration file.
    #[error("Unable to access the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),

    #[error("Unable to render template {}: {}", .0, .1)]
    RenderError(String, String),

    #[error("Catalog service error: {}", .0)]
    CatalogError(String),

    #[error("Form sink error: {}", .0)]
    SinkError(String),

    #[error("Site export error: {}", .0)]
    ExportError(String),
}

// ***************************************************************************
//                             JSON Error Payload
// ***************************************************************************
/// The body of every non-success JSON response.
#[derive(Object, Debug)]
pub struct HttpError {
    pub error: String,
}

impl HttpError {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}
