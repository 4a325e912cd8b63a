//! Engine error type.
//!
//! Only conditions the caller has to act on are errors. Recoverable
//! situations (asset fallback, malformed preset tokens, pool growth) are
//! logged and play continues.

use super::entity::CardSlot;

/// Errors surfaced by the engine.
#[derive(Debug, thiserror::Error)]
pub enum PairsError {
    #[error("invalid board dimensions {rows}x{cols}: at least 2 cards required")]
    InvalidDimensions { rows: u32, cols: u32 },

    #[error("malformed preset entry {token:?}, expected WxH")]
    MalformedPreset { token: String },

    #[error("no card images available (folder {folder:?})")]
    NoAssets { folder: String },

    #[error("unknown card {0}")]
    UnknownCard(CardSlot),

    #[error("no card at position {position} (board holds {len})")]
    InvalidPosition { position: usize, len: usize },

    #[error("no round in progress")]
    NoActiveRound,

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("persistence error: {reason}")]
    Persistence {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("corrupt snapshot: {reason}")]
    CorruptSnapshot { reason: String },
}

impl PairsError {
    pub(crate) fn persistence(
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, PairsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = PairsError::InvalidDimensions { rows: 1, cols: 1 };
        assert_eq!(
            err.to_string(),
            "invalid board dimensions 1x1: at least 2 cards required"
        );

        let err = PairsError::MalformedPreset { token: "bad".into() };
        assert_eq!(err.to_string(), "malformed preset entry \"bad\", expected WxH");

        assert_eq!(
            PairsError::UnknownCard(CardSlot(7)).to_string(),
            "unknown card Card(7)"
        );
    }

    #[test]
    fn test_persistence_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = PairsError::persistence("read snapshot", io);
        assert_eq!(err.to_string(), "persistence error: read snapshot");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PairsError>();
    }
}
