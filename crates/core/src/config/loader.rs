use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Load configuration from defaults, an optional TOML file and
/// `FLACTRAC_*` environment variables, in increasing priority.
///
/// Nested keys are separated by `__`, e.g. `FLACTRAC_ENCODING__BITRATE=V2`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed("FLACTRAC_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{Bitrate, OutputFormat};
    use crate::planner::LayoutPolicy;
    use figment::Jail;
    use std::path::PathBuf;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[output]
export_dir = "/srv/export"
layout = "flatten"

[encoding]
format = "aac"
bitrate = 192
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.output.export_dir, PathBuf::from("/srv/export"));
        assert_eq!(config.output.layout, LayoutPolicy::Flatten);
        assert_eq!(config.encoding.format, OutputFormat::Aac);
        assert_eq!(config.encoding.bitrate, Bitrate::Kbps(192));
    }

    #[test]
    fn test_load_config_from_str_empty_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_str_quality_token() {
        let config = load_config_from_str("[encoding]\nbitrate = \"V2\"\n").unwrap();
        assert_eq!(config.encoding.bitrate, Bitrate::VariableQuality(2));
    }

    #[test]
    fn test_load_config_from_str_unknown_format() {
        let result = load_config_from_str("[encoding]\nformat = \"ogg\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/flactrac.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = load_config(None).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "flactrac.toml",
                r#"
[encoding]
bitrate = 256
use_fixed_bitrate = true

[tools]
lame = "/opt/lame/bin/lame"
"#,
            )?;

            let config = load_config(Some(Path::new("flactrac.toml"))).unwrap();
            assert_eq!(config.encoding.bitrate, Bitrate::Kbps(256));
            assert!(config.encoding.use_fixed_bitrate);
            assert_eq!(config.tools.lame, PathBuf::from("/opt/lame/bin/lame"));
            assert_eq!(config.tools.flac, PathBuf::from("flac"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("flactrac.toml", "[encoding]\nformat = \"mp3\"\n")?;
            jail.set_env("FLACTRAC_ENCODING__FORMAT", "aac");
            jail.set_env("FLACTRAC_OUTPUT__EXPORT_DIR", "/mnt/usb");

            let config = load_config(Some(Path::new("flactrac.toml"))).unwrap();
            assert_eq!(config.encoding.format, OutputFormat::Aac);
            assert_eq!(config.output.export_dir, PathBuf::from("/mnt/usb"));
            Ok(())
        });
    }

    #[test]
    fn test_env_quality_token() {
        Jail::expect_with(|jail| {
            jail.set_env("FLACTRAC_ENCODING__BITRATE", "V4");

            let config = load_config(None).unwrap();
            assert_eq!(config.encoding.bitrate, Bitrate::VariableQuality(4));
            Ok(())
        });
    }
}
