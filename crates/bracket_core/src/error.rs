use thiserror::Error;

#[derive(Error, Debug)]
pub enum BracketError {
    #[error("Missing data source: {path}")]
    MissingDataSource { path: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid reference data: {0}")]
    InvalidData(String),

    #[error("No strength entry for team: {team}")]
    MissingStrength { team: String },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Weight must be within [0, 1], got {0}")]
    InvalidWeight(f64),

    #[error("Unknown round id: {0}")]
    UnknownRound(String),

    #[error("Slot {slot} out of range for {round_id} ({slots} slots)")]
    SlotOutOfRange {
        round_id: String,
        slot: usize,
        slots: usize,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Who is at fault for an error, as seen by the calling application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reference data is missing or unreadable (server-side, 5xx).
    Configuration,
    /// The request itself was bad (4xx).
    ClientInput,
}

impl BracketError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BracketError::MissingDataSource { .. }
            | BracketError::Io { .. }
            | BracketError::Csv { .. }
            | BracketError::InvalidData(_)
            | BracketError::MissingStrength { .. } => ErrorKind::Configuration,
            BracketError::UnknownStrategy(_)
            | BracketError::InvalidWeight(_)
            | BracketError::UnknownRound(_)
            | BracketError::SlotOutOfRange { .. }
            | BracketError::InvalidRequest(_)
            | BracketError::Serialization(_) => ErrorKind::ClientInput,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

pub type Result<T> = std::result::Result<T, BracketError>;
