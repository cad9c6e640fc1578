use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Request to {url} failed: {source}")]
    TransportError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Malformed CSV from {origin}{}: {message}", .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    ParseError {
        origin: String,
        line: Option<u64>,
        message: String,
    },

    #[error("Missing column '{field}' in {origin} (line {line})")]
    MissingFieldError {
        field: String,
        origin: String,
        line: u64,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    FileSystem,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that ended with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::TransportError { .. } | EtlError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            EtlError::ParseError { .. }
            | EtlError::MissingFieldError { .. }
            | EtlError::CsvError(_) => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::FileSystem,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::FileSystem => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::TransportError { .. } => {
                "Check the network connection and that the open data portal is reachable"
            }
            EtlError::HttpStatusError { status, .. } if *status == 404 => {
                "The dataset may not be published for this year yet; check --year / --station-year"
            }
            EtlError::HttpStatusError { .. } => "The portal rejected the request; try again later",
            EtlError::ParseError { .. } => {
                "The published CSV changed shape; inspect the source file"
            }
            EtlError::MissingFieldError { .. } => {
                "The published CSV no longer carries an expected column; inspect the source header"
            }
            EtlError::CsvError(_) => {
                "A mapped row could not be encoded as CSV; inspect the offending source row"
            }
            EtlError::IoError(_) => "Check that the output directory exists and is writable",
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or CLI flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Download failed: {self}"),
            ErrorCategory::Data => format!("Unexpected source data: {self}"),
            ErrorCategory::FileSystem => format!("Could not write output: {self}"),
            ErrorCategory::Configuration => format!("Invalid configuration: {self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
