//! TOML configuration loading
//!
//! Every table and key is optional; anything left out keeps its default.
//!
//! ```toml
//! [ccs811]
//! bus = 1
//! address = 0x5B
//!
//! [ccs811.limits]
//! max_etvoc_ppb = 1200
//!
//! [max30102.limits]
//! max_temperature_c = 85.0
//! temperature_offset_c = -0.5
//! ```

use super::{ConfigError, SensorConfig};

/// Parse and validate a TOML configuration document
pub fn parse_config(input: &str) -> Result<SensorConfig, ConfigError> {
    let config: SensorConfig = ::toml::from_str(input).map_err(|_| ConfigError::Syntax)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClimateLimits, GasLimits};

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(parse_config(""), Ok(SensorConfig::default()));
    }

    #[test]
    fn test_partial_tables() {
        let config = parse_config(
            r#"
            [ccs811]
            bus = 1
            address = 0x5B

            [ccs811.limits]
            max_etvoc_ppb = 1200

            [max30102.limits]
            max_temperature_c = 85.0
            temperature_offset_c = -0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.ccs811.bus, 1);
        assert_eq!(config.ccs811.address, 0x5B);
        assert_eq!(
            config.ccs811.limits,
            GasLimits {
                min_etvoc_ppb: 0,
                max_etvoc_ppb: 1200
            }
        );
        assert_eq!(config.max30102.address, 0x57);
        assert_eq!(
            config.max30102.limits,
            ClimateLimits {
                max_temperature_c: 85.0,
                temperature_offset_c: -0.5,
                ..ClimateLimits::default()
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[max30102]\naddress = 200\n"),
            Err(ConfigError::InvalidAddress(200))
        );
        assert_eq!(
            parse_config("[ccs811]\naddress = \"five\"\n"),
            Err(ConfigError::Syntax)
        );
        assert_eq!(
            parse_config("[max30102.limits]\nmin_humidity_percent = 90.0\nmax_humidity_percent = 10.0\n"),
            Err(ConfigError::InvertedRange)
        );
    }
}
