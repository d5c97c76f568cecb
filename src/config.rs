use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;

const DEFAULT_INPUT_DIR: &str = "documents/word-collection";
const DEFAULT_OUTPUT_FILE: &str = "documents/import_words.sql";
const DEFAULT_BATCH_SIZE: usize = 500;
const DEFAULT_TABLE: &str = "WordCollection";
const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub batch_size: usize,
    pub table: String,
    pub language: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    input_dir: Option<PathBuf>,
    output_file: Option<PathBuf>,
    batch_size: Option<usize>,
    table: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub input_dir: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub table: Option<String>,
    pub language: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<PathBuf>, overrides: ConfigOverrides) -> Result<Self> {
        let file_config = load_file_config(config_path.as_ref())?;
        Self::resolve(file_config, overrides, |key| env::var(key).ok())
    }

    fn resolve<F>(file_config: FileConfig, overrides: ConfigOverrides, env_var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input_dir = overrides
            .input_dir
            .or(file_config.input_dir)
            .or_else(|| env_var("WORD_IMPORT_INPUT_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

        let output_file = overrides
            .output_file
            .or(file_config.output_file)
            .or_else(|| env_var("WORD_IMPORT_OUTPUT_FILE").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

        let batch_size = match overrides.batch_size.or(file_config.batch_size) {
            Some(size) => size,
            None => match env_var("WORD_IMPORT_BATCH_SIZE") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("invalid WORD_IMPORT_BATCH_SIZE value {raw:?}"))?,
                None => DEFAULT_BATCH_SIZE,
            },
        };

        let table = overrides
            .table
            .or(file_config.table)
            .or_else(|| env_var("WORD_IMPORT_TABLE"))
            .unwrap_or_else(|| DEFAULT_TABLE.to_string())
            .trim()
            .to_string();

        let language = overrides
            .language
            .or(file_config.language)
            .or_else(|| env_var("WORD_IMPORT_LANGUAGE"))
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
            .trim()
            .to_string();

        if batch_size == 0 {
            anyhow::bail!("batch size must be at least 1");
        }
        if !is_sql_identifier(&table) {
            anyhow::bail!("table name {table:?} is not a valid SQL identifier");
        }
        if language.is_empty() {
            anyhow::bail!("language tag cannot be empty");
        }

        Ok(Self {
            input_dir,
            output_file,
            batch_size,
            table,
            language,
        })
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn load_file_config(path: Option<&PathBuf>) -> Result<FileConfig> {
    if let Some(path) = path {
        if path.exists() {
            return read_config_from_path(path);
        }
        anyhow::bail!("config path {:?} does not exist", path);
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            tracing::debug!("Using config file {}", default_path.display());
            return read_config_from_path(&default_path);
        }
    }

    Ok(FileConfig::default())
}

fn read_config_from_path(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "new-words", "word-import")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use tempfile::tempdir;

    fn resolve_with_env(
        file_config: FileConfig,
        overrides: ConfigOverrides,
        vars: &[(&str, &str)],
    ) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::resolve(file_config, overrides, |key| vars.get(key).cloned())
    }

    #[test]
    fn falls_back_to_defaults() {
        let config =
            resolve_with_env(FileConfig::default(), ConfigOverrides::default(), &[]).unwrap();

        assert_eq!(config.input_dir, PathBuf::from("documents/word-collection"));
        assert_eq!(config.output_file, PathBuf::from("documents/import_words.sql"));
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.table, "WordCollection");
        assert_eq!(config.language, "english");
    }

    #[test]
    fn overrides_beat_file_and_env() {
        let file_config = FileConfig {
            batch_size: Some(100),
            table: Some("FromFile".to_string()),
            ..FileConfig::default()
        };
        let overrides = ConfigOverrides {
            batch_size: Some(10),
            ..ConfigOverrides::default()
        };

        let config = resolve_with_env(
            file_config,
            overrides,
            &[("WORD_IMPORT_BATCH_SIZE", "7"), ("WORD_IMPORT_TABLE", "FromEnv")],
        )
        .unwrap();

        assert_eq!(config.batch_size, 10);
        assert_eq!(config.table, "FromFile");
    }

    #[test]
    fn env_fills_gaps() {
        let config = resolve_with_env(
            FileConfig::default(),
            ConfigOverrides::default(),
            &[
                ("WORD_IMPORT_INPUT_DIR", "/tmp/words"),
                ("WORD_IMPORT_BATCH_SIZE", " 250 "),
                ("WORD_IMPORT_LANGUAGE", "british"),
            ],
        )
        .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("/tmp/words"));
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.language, "british");
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_batch = ConfigOverrides {
            batch_size: Some(0),
            ..ConfigOverrides::default()
        };
        assert!(resolve_with_env(FileConfig::default(), zero_batch, &[]).is_err());

        let bad_table = ConfigOverrides {
            table: Some("Word Collection; DROP".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(resolve_with_env(FileConfig::default(), bad_table, &[]).is_err());

        let blank_language = ConfigOverrides {
            language: Some("   ".to_string()),
            ..ConfigOverrides::default()
        };
        assert!(resolve_with_env(FileConfig::default(), blank_language, &[]).is_err());

        assert!(
            resolve_with_env(
                FileConfig::default(),
                ConfigOverrides::default(),
                &[("WORD_IMPORT_BATCH_SIZE", "lots")],
            )
            .is_err()
        );
    }

    #[test]
    fn identifier_rules() {
        assert!(is_sql_identifier("WordCollection"));
        assert!(is_sql_identifier("_words_2"));
        assert!(!is_sql_identifier("2words"));
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("word-list"));
    }

    #[test]
    fn reads_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "input_dir = \"lists\"\nbatch_size = 50\ntable = \"Words\"\n",
        )
        .unwrap();

        let file_config = read_config_from_path(&path).unwrap();
        let config = resolve_with_env(file_config, ConfigOverrides::default(), &[]).unwrap();

        assert_eq!(config.input_dir, PathBuf::from("lists"));
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.table, "Words");
    }

    #[test]
    fn rejects_unknown_keys_and_missing_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "batch = 5\n").unwrap();
        assert!(read_config_from_path(&path).is_err());

        let missing = dir.path().join("missing.toml");
        assert!(load_file_config(Some(&missing)).is_err());
    }
}
