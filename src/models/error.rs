use super::options::Slot;

/// Broad category an [`AppError`] falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally before any request was issued.
    Validation,
    /// The request could not be completed or the upstream answered badly.
    Transport,
    /// The upstream answered, but had nothing for the selection.
    NoData,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Please select cities of different names")]
    DuplicateCity,

    #[error("Please select two cities and a parameter to compare")]
    IncompleteSelection,

    #[error("{0}")]
    Transport(String),

    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No {parameter} measurement available for city {}", join_slots(.slots))]
    NoData { slots: Vec<Slot>, parameter: String },
}

impl AppError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateCity | Self::IncompleteSelection => ErrorKind::Validation,
            Self::NoData { .. } => ErrorKind::NoData,
            Self::Transport(_)
            | Self::Upstream { .. }
            | Self::InvalidResponse(_)
            | Self::ConfigError(_) => ErrorKind::Transport,
        }
    }
}

fn join_slots(slots: &[Slot]) -> String {
    slots
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
