//! Domain error types.

/// Top-level error type for tradelab.
#[derive(Debug, thiserror::Error)]
pub enum TradelabError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("csv error: {reason}")]
    Csv { reason: String },

    #[error("missing column {column}")]
    MissingColumn { column: String },

    #[error("unexpected table shape: {reason}")]
    Schema { reason: String },

    #[error("no valid date format found for {token}")]
    DateFormat { token: String },

    #[error("could not convert {value:?} to a number: {reason}")]
    NumericFormat { value: String, reason: String },

    #[error("invalid prediction {value:?} (expected up/down, 1/0 or true/false)")]
    InvalidPrediction { value: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("series is not strictly increasing by date: {reason}")]
    UnorderedSeries { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for TradelabError {
    fn from(err: csv::Error) -> Self {
        TradelabError::Csv {
            reason: err.to_string(),
        }
    }
}

impl From<&TradelabError> for std::process::ExitCode {
    fn from(err: &TradelabError) -> Self {
        let code: u8 = match err {
            TradelabError::Io(_) => 1,
            TradelabError::ConfigParse { .. } | TradelabError::ConfigInvalid { .. } => 2,
            TradelabError::Csv { .. }
            | TradelabError::MissingColumn { .. }
            | TradelabError::Schema { .. } => 3,
            TradelabError::DateFormat { .. }
            | TradelabError::NumericFormat { .. }
            | TradelabError::InvalidPrediction { .. } => 4,
            TradelabError::InvalidParameter { .. } | TradelabError::UnorderedSeries { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
