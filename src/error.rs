use std::path::PathBuf;

use thiserror::Error;

/// Main application error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("File {} not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing credential: environment variable {variable} is not set")]
    MissingCredential { variable: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status error: {status} for {url} - {message}")]
    HttpStatus {
        url: String,
        status: u16,
        message: String,
    },

    #[error("Chat completion returned no usable choice")]
    EmptyCompletion,

    #[error("Malformed review XML: {details}")]
    MalformedXml { details: String },

    #[error("Unexpected review shape: {details}")]
    UnexpectedShape { details: String },

    #[error("LibXML2 internal error: {details}")]
    LibXml2Internal { details: String },
}

/// LibXML2-specific error types
#[derive(Error, Debug)]
pub enum LibXml2Error {
    #[error("Schema parsing failed: null pointer returned")]
    SchemaParseFailed,

    #[error("Validation context creation failed")]
    ValidationContextCreationFailed,

    #[error("Document parsing failed: {details}")]
    DocumentParseFailed { details: String },

    #[error("Document validation failed with code {code}")]
    ValidationFailed { code: i32 },

    #[error("Memory allocation failed in libxml2")]
    MemoryAllocation,

    #[error("Input too large for libxml2: {size} bytes")]
    InputTooLarge { size: usize },
}

impl From<LibXml2Error> for ReviewError {
    fn from(err: LibXml2Error) -> Self {
        match err {
            LibXml2Error::DocumentParseFailed { details } => ReviewError::MalformedXml { details },
            other => ReviewError::LibXml2Internal {
                details: other.to_string(),
            },
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ReviewError>;

/// LibXML2 result type alias
pub type LibXml2Result<T> = std::result::Result<T, LibXml2Error>;
