//! Configuration types
//!
//! Device addressing and plausibility limits. The limits are empirical
//! sanity bounds rather than datasheet ranges, so they are carried as
//! configuration instead of being baked into the drivers.

pub mod devices;
pub mod limits;

#[cfg(feature = "toml")]
pub mod toml;

pub use devices::*;
pub use limits::*;

#[cfg(feature = "toml")]
pub use self::toml::parse_config;

use core::fmt;

/// Configuration validation / parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Device address does not fit in 7 bits
    InvalidAddress(u8),
    /// A limit range has its minimum above its maximum
    InvertedRange,
    /// Limit is NaN or infinite
    NonFiniteLimit,
    /// Document is not valid TOML or has wrongly typed values
    Syntax,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(addr) => write!(f, "address {:#04x} is not a 7-bit address", addr),
            Self::InvertedRange => f.write_str("limit minimum is above maximum"),
            Self::NonFiniteLimit => f.write_str("limit is not a finite number"),
            Self::Syntax => f.write_str("malformed configuration document"),
        }
    }
}
