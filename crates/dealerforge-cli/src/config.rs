use std::path::Path;

use serde::{Deserialize, Serialize};

use dealerforge_core::Catalog;
use dealerforge_generate::GenerateOptions;

use crate::CliError;

/// Contents of a `--config` TOML file. Both tables are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DealerforgeConfig {
    pub generate: GenerateOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
}

impl DealerforgeConfig {
    /// Catalog from the file, or the built-in Ford catalog.
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone().unwrap_or_default()
    }
}

pub fn load_config(path: Option<&Path>) -> Result<DealerforgeConfig, CliError> {
    let Some(path) = path else {
        return Ok(DealerforgeConfig::default());
    };
    let content = std::fs::read_to_string(path)?;
    let config: DealerforgeConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Built-in catalog wrapped as a config file, ready to edit.
pub fn default_config_toml() -> Result<String, CliError> {
    let config = DealerforgeConfig {
        generate: GenerateOptions::default(),
        catalog: Some(Catalog::ford_trucks()),
    };
    Ok(toml::to_string_pretty(&config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: DealerforgeConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(config.generate, GenerateOptions::default());
        assert_eq!(config.catalog(), Catalog::ford_trucks());
    }

    #[test]
    fn partial_generate_table_keeps_other_defaults() {
        let config: DealerforgeConfig =
            toml::from_str("[generate]\nrecords = 12\nseed = 9\nwrite_db = false\n")
                .expect("parse config");
        assert_eq!(config.generate.records, 12);
        assert_eq!(config.generate.seed, Some(9));
        assert!(!config.generate.write_db);
        assert!(config.generate.write_csv);
        assert_eq!(config.generate.csv_name, "ford_trucks_data.csv");
    }

    #[test]
    fn dumped_config_parses_back() {
        let encoded = default_config_toml().expect("encode config");
        let config: DealerforgeConfig = toml::from_str(&encoded).expect("parse config");
        assert_eq!(config.catalog(), Catalog::ford_trucks());
    }
}
