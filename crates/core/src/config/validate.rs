use super::{types::Config, ConfigError};
use crate::converter::Bitrate;

/// Validate configuration
/// Currently validates:
/// - Bitrate is not 0 kbps
/// - VBR quality tokens are only used for MP3 in variable mode
/// - VBR thresholds are strictly ascending
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let encoding = &config.encoding;

    if encoding.bitrate == Bitrate::Kbps(0) {
        return Err(ConfigError::ValidationError(
            "encoding.bitrate cannot be 0".to_string(),
        ));
    }

    if !encoding.vbr_thresholds.is_ascending() {
        return Err(ConfigError::ValidationError(
            "encoding.vbr_thresholds must be strictly ascending".to_string(),
        ));
    }

    // Catches quality-token misuse and any other unresolvable combination.
    encoding.target()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EncodingConfig, OutputConfig};
    use crate::converter::{OutputFormat, ToolsConfig, VbrThresholds};

    fn config_with(encoding: EncodingConfig) -> Config {
        Config {
            output: OutputConfig::default(),
            encoding,
            tools: ToolsConfig::default(),
        }
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_zero_bitrate_fails() {
        let config = config_with(EncodingConfig {
            bitrate: Bitrate::Kbps(0),
            ..EncodingConfig::default()
        });
        let result = validate_config(&config);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validate_quality_token_with_fixed_bitrate_fails() {
        let config = config_with(EncodingConfig {
            bitrate: Bitrate::VariableQuality(2),
            use_fixed_bitrate: true,
            ..EncodingConfig::default()
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_quality_token_with_aac_fails() {
        let config = config_with(EncodingConfig {
            format: OutputFormat::Aac,
            bitrate: Bitrate::VariableQuality(0),
            ..EncodingConfig::default()
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unordered_thresholds_fail() {
        let config = config_with(EncodingConfig {
            vbr_thresholds: VbrThresholds([145.0, 200.0, 182.5, 210.0, 235.0]),
            ..EncodingConfig::default()
        });
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("vbr_thresholds"));
    }
}
