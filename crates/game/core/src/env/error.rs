//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::env::{BuildingId, ProductionId};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is a wiring mistake and fatal for the engine. A missing
/// definition is a bad reference in a command and only fails that command.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("ProductionOracle not available")]
    ProductionsNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("production {0:?} not found")]
    ProductionNotFound(ProductionId),

    #[error("building {0:?} not found")]
    BuildingNotFound(BuildingId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapNotAvailable | ProductionsNotAvailable | ConfigNotAvailable | RngNotAvailable => {
                ErrorSeverity::Fatal
            }
            ProductionNotFound(_) | BuildingNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            ProductionsNotAvailable => "ORACLE_PRODUCTIONS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ProductionNotFound(_) => "ORACLE_PRODUCTION_NOT_FOUND",
            BuildingNotFound(_) => "ORACLE_BUILDING_NOT_FOUND",
        }
    }
}
