//! Catalog lookup errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors raised while resolving content references.
///
/// Content files name other entries (a hull's default outfits, a fleet's
/// hulls); these errors report references that do not resolve.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("'{owner}' refers to unknown outfit '{name}'")]
    UnknownOutfit { owner: String, name: String },

    #[error("'{owner}' refers to unknown ship '{name}'")]
    UnknownShip { owner: String, name: String },

    #[error("'{owner}' refers to unknown faction '{name}'")]
    UnknownFaction { owner: String, name: String },

    #[error("duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("{0} file does not contain any entries")]
    Empty(&'static str),
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Empty(_) => ErrorSeverity::Fatal,
            Self::UnknownOutfit { .. }
            | Self::UnknownShip { .. }
            | Self::UnknownFaction { .. }
            | Self::Duplicate { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownOutfit { .. } => "CATALOG_UNKNOWN_OUTFIT",
            Self::UnknownShip { .. } => "CATALOG_UNKNOWN_SHIP",
            Self::UnknownFaction { .. } => "CATALOG_UNKNOWN_FACTION",
            Self::Duplicate { .. } => "CATALOG_DUPLICATE",
            Self::Empty(_) => "CATALOG_EMPTY",
        }
    }
}
