use crate::config::{default_concurrency, RecompressConfig};
use crate::utils::error::{RecompressError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub paths: PathsConfig,
    pub output: Option<OutputConfig>,
    pub performance: Option<PerformanceConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub target_height: Option<u32>,
    pub quality: Option<u8>,
    pub extension: Option<String>,
    pub speed: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| RecompressError::ConfigFileError {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ASSET_ROOT})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RecompressError::ConfigError {
            message: format!("Invalid env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    /// Fills anything the file leaves out with the built-in defaults.
    pub fn into_config(self) -> RecompressConfig {
        let defaults = RecompressConfig::default();
        let monitoring = self.monitoring_enabled();
        let output = self.output.unwrap_or(OutputConfig {
            target_height: None,
            quality: None,
            extension: None,
            speed: None,
        });

        RecompressConfig {
            input_dir: self.paths.input_dir.unwrap_or(defaults.input_dir),
            output_dir: self.paths.output_dir.unwrap_or(defaults.output_dir),
            target_height: output.target_height.unwrap_or(defaults.target_height),
            quality: output.quality.unwrap_or(defaults.quality),
            output_extension: output.extension.unwrap_or(defaults.output_extension),
            speed: output.speed.unwrap_or(defaults.speed),
            concurrency: self
                .performance
                .and_then(|p| p.concurrency)
                .unwrap_or_else(default_concurrency),
            monitoring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[paths]
input_dir = "assets/images_/races"
output_dir = "assets/images/races"

[output]
target_height = 144
quality = 60
extension = "webp"
speed = 4

[performance]
concurrency = 3

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.monitoring_enabled());

        let resolved = config.into_config();
        assert_eq!(resolved.input_dir, PathBuf::from("assets/images_/races"));
        assert_eq!(resolved.output_dir, PathBuf::from("assets/images/races"));
        assert_eq!(resolved.target_height, 144);
        assert_eq!(resolved.quality, 60);
        assert_eq!(resolved.output_extension, "webp");
        assert_eq!(resolved.speed, 4);
        assert_eq!(resolved.concurrency, 3);
        assert!(resolved.monitoring);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config = TomlConfig::from_toml_str("[paths]\n").unwrap();
        assert!(!config.monitoring_enabled());

        let resolved = config.into_config();
        let defaults = RecompressConfig::default();
        assert_eq!(resolved.input_dir, defaults.input_dir);
        assert_eq!(resolved.target_height, 225);
        assert_eq!(resolved.quality, 80);
        assert_eq!(resolved.output_extension, "avif");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RECOMPRESS_TEST_ASSET_ROOT", "/srv/assets");

        let toml_content = r#"
[paths]
input_dir = "${RECOMPRESS_TEST_ASSET_ROOT}/images_"
output_dir = "${RECOMPRESS_TEST_UNSET_VAR}/images"
"#;

        let resolved = TomlConfig::from_toml_str(toml_content).unwrap().into_config();
        assert_eq!(resolved.input_dir, PathBuf::from("/srv/assets/images_"));
        assert_eq!(
            resolved.output_dir,
            PathBuf::from("${RECOMPRESS_TEST_UNSET_VAR}/images")
        );

        std::env::remove_var("RECOMPRESS_TEST_ASSET_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[paths]
input_dir = "a"
output_dir = "b"

[output]
quality = 150
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.into_config().validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = TomlConfig::from_toml_str("[paths\ninput_dir = ").unwrap_err();
        assert!(matches!(err, RecompressError::TomlParseError(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[paths]\ninput_dir = \"in\"\noutput_dir = \"out\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.paths.input_dir, Some(PathBuf::from("in")));
    }

    #[test]
    fn test_missing_file_is_a_config_file_error() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RecompressError::ConfigFileError { .. }));
    }
}
