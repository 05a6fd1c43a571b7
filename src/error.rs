//! Error types shared by the simulation core

use thiserror::Error;

/// Failure raised by the simulation core.
///
/// Everything except `Timeout` signals a broken configuration or a caller
/// bug; `Timeout` means an encounter never finished within the tick limit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("invocation level {0} must be a non-negative multiple of 5")]
    InvalidInvocation(u32),
    #[error("path level {0} must be within 0..=6")]
    InvalidPath(u32),
    #[error("special attack energy {0} is outside 0..=100")]
    EnergyOutOfRange(f64),
    #[error("special attack energy amount {0} must be a finite non-negative number")]
    InvalidEnergyAmount(f64),
    #[error("cannot consume {requested} special attack energy, only {available} available")]
    InsufficientEnergy { requested: f64, available: f64 },
    #[error("fight did not finish within {limit} ticks")]
    Timeout { limit: u32 },
}
