use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown feed: {0}")]
    UnknownFeed(String),

    // Network errors (connection failures, timeouts, non-success status)
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // Extraction errors
    #[error("Unexpected page shape: {0}")]
    UnexpectedShape(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Unparsable date: {0}")]
    DateParse(String),

    // Storage errors
    #[error("Malformed history: {0}")]
    MalformedHistory(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Rendering errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MirrorError {
    /// Short label used in run reports and logs
    pub fn kind(&self) -> &'static str {
        match self {
            MirrorError::Config(_) => "config",
            MirrorError::UnknownFeed(_) => "unknown_feed",
            MirrorError::UpstreamUnavailable(_) => "upstream_unavailable",
            MirrorError::InvalidUrl(_) => "invalid_url",
            MirrorError::UnexpectedShape(_) => "unexpected_shape",
            MirrorError::Selector(_) => "selector",
            MirrorError::DateParse(_) => "date_parse",
            MirrorError::MalformedHistory(_) => "malformed_history",
            MirrorError::Json(_) => "json",
            MirrorError::Xml(_) => "xml",
            MirrorError::Io(_) => "io",
        }
    }
}

pub type MirrorResult<T> = Result<T, MirrorError>;
