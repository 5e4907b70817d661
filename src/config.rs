// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::db::DEFAULT_LANGUAGE_CODE;
use crate::error::Fallible;
use crate::error::fail;

/// The config file read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "zaban.toml";

const DEFAULT_DATABASE: &str = "./zaban.db";

const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Settings, resolved from (lowest precedence first) built-in defaults, the
/// config file, environment variables, and command-line flags.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// Path to the SQLite database.
    pub database: String,
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Language used when a request does not name one and none is active.
    pub default_language: String,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database: Option<String>,
    bind: Option<String>,
    default_language: Option<String>,
}

/// Values given on the command line.
#[derive(Default)]
pub struct Overrides {
    pub database: Option<String>,
    pub bind: Option<String>,
}

impl Config {
    /// Load the configuration. An explicitly named config file must exist;
    /// the default one is optional.
    pub fn load(path: Option<&Path>, overrides: Overrides) -> Fallible<Self> {
        let file = match path {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("config file {} does not exist.", path.display()));
                }
                Some(parse_file(path)?)
            }
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Some(parse_file(path)?)
                } else {
                    None
                }
            }
        };
        Ok(Self::resolve(
            file.unwrap_or_default(),
            |key| std::env::var(key).ok(),
            overrides,
        ))
    }

    fn resolve(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
        overrides: Overrides,
    ) -> Self {
        let database = overrides
            .database
            .or_else(|| env("ZABAN_DB"))
            .or(file.database)
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        let bind = overrides
            .bind
            .or_else(|| env("ZABAN_BIND"))
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let default_language = file
            .default_language
            .unwrap_or_else(|| DEFAULT_LANGUAGE_CODE.to_string());
        Self {
            database,
            bind,
            default_language,
        }
    }
}

fn parse_file(path: &Path) -> Fallible<ConfigFile> {
    log::debug!("Reading config from {}", path.display());
    let content = read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(ConfigFile::default(), no_env, Overrides::default());
        assert_eq!(
            config,
            Config {
                database: "./zaban.db".to_string(),
                bind: "127.0.0.1:8000".to_string(),
                default_language: "ar".to_string(),
            }
        );
    }

    #[test]
    fn test_precedence() {
        let file = ConfigFile {
            database: Some("file.db".to_string()),
            bind: Some("0.0.0.0:9000".to_string()),
            default_language: Some("fa".to_string()),
        };
        let env = |key: &str| match key {
            "ZABAN_DB" => Some("env.db".to_string()),
            _ => None,
        };
        let overrides = Overrides {
            database: None,
            bind: Some("127.0.0.1:1234".to_string()),
        };
        let config = Config::resolve(file, env, overrides);
        assert_eq!(config.database, "env.db");
        assert_eq!(config.bind, "127.0.0.1:1234");
        assert_eq!(config.default_language, "fa");
    }

    #[test]
    fn test_load_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("zaban.toml");
        write(
            &path,
            "database = \"cards.db\"\ndefault_language = \"fa\"\n",
        )?;
        let overrides = Overrides {
            database: Some("flag.db".to_string()),
            bind: None,
        };
        let config = Config::load(Some(&path), overrides)?;
        assert_eq!(config.database, "flag.db");
        assert_eq!(config.default_language, "fa");
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("./derpherp.toml")), Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_unknown_key() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("zaban.toml");
        write(&path, "colour = \"blue\"\n")?;
        assert!(Config::load(Some(&path), Overrides::default()).is_err());
        Ok(())
    }
}
