use serde::Deserialize;

/// Options for reading module files.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DeserializationConfig {
    /// Read module files whose metadata version is not compatible.
    pub skip_metadata_version_check: bool,
    /// Include parts compiled into an explicitly named JVM package.
    pub is_jvm_package_name_supported: bool,
}

impl Default for DeserializationConfig {
    fn default() -> Self {
        Self {
            skip_metadata_version_check: false,
            is_jvm_package_name_supported: true,
        }
    }
}

impl DeserializationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skip_metadata_version_check(mut self, value: bool) -> Self {
        self.skip_metadata_version_check = value;
        self
    }

    pub fn jvm_package_name_supported(mut self, value: bool) -> Self {
        self.is_jvm_package_name_supported = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::DeserializationConfig;

    #[test]
    fn defaults() {
        let config = DeserializationConfig::default();

        assert!(!config.skip_metadata_version_check);
        assert!(config.is_jvm_package_name_supported);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: DeserializationConfig =
            serde_json::from_str(r#"{"skip-metadata-version-check": true}"#).unwrap();

        assert_eq!(
            config,
            DeserializationConfig::new().skip_metadata_version_check(true)
        );
    }
}
