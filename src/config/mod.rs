//! Connection configuration loaded from `connections.toml` through the
//! permission-checked reader.

mod parser;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::policy::validate_file_permissions;
use crate::utils::errors::{ConfigError, Result};
use crate::utils::filesystem::FileOperations;
use crate::utils::permissions::{NativeInspector, PermissionInspector};

pub use parser::{parse as parse_connections, Connections};

pub const ENV_PREFIX: &str = "SECURECONF";
pub const CONNECTIONS_FILE_NAME: &str = "connections.toml";
pub const DEFAULT_CONNECTION_NAME: &str = "default";
const DEFAULT_HOME_DIR: &str = ".secureconf";

const AUTHENTICATOR_KEY: &str = "authenticator";
const OAUTH_AUTHENTICATOR: &str = "oauth";
const TOKEN_KEY: &str = "token";
const TOKEN_FILE_PATH_KEY: &str = "token_file_path";

#[derive(Debug, Deserialize)]
struct EnvSettings {
    home: Option<PathBuf>,
    default_connection_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    pub home_dir: PathBuf,
    pub default_connection: String,
}

impl LoaderSettings {
    pub fn new(home_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_dir: home_dir.into(),
            default_connection: DEFAULT_CONNECTION_NAME.to_string(),
        }
    }

    /// Reads `SECURECONF_HOME` and `SECURECONF_DEFAULT_CONNECTION_NAME`,
    /// falling back to `~/.secureconf` and `default`.
    pub fn from_env() -> Result<Self> {
        Self::resolve(::config::Environment::with_prefix(ENV_PREFIX), user_home_dir())
    }

    /// Like [`from_env`](Self::from_env) but over an explicit variable map.
    pub fn from_vars(
        vars: ::config::Map<String, String>,
        user_home: Option<PathBuf>,
    ) -> Result<Self> {
        Self::resolve(
            ::config::Environment::with_prefix(ENV_PREFIX).source(Some(vars)),
            user_home,
        )
    }

    fn resolve(environment: ::config::Environment, user_home: Option<PathBuf>) -> Result<Self> {
        let env: EnvSettings = ::config::Config::builder()
            .add_source(environment)
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let home_dir = match env.home.filter(|home| !home.as_os_str().is_empty()) {
            Some(home) => home,
            None => user_home
                .map(|home| home.join(DEFAULT_HOME_DIR))
                .ok_or_else(|| {
                    ConfigError::MissingEnvironment(format!("{}_HOME or HOME", ENV_PREFIX))
                })?,
        };

        Ok(Self {
            home_dir,
            default_connection: env
                .default_connection_name
                .unwrap_or_else(|| DEFAULT_CONNECTION_NAME.to_string()),
        })
    }

    pub fn connections_path(&self) -> PathBuf {
        self.home_dir.join(CONNECTIONS_FILE_NAME)
    }
}

fn user_home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    name: String,
    parameters: BTreeMap<String, String>,
}

impl ConnectionSettings {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// `key=value;` pairs in key order. Values are emitted as written.
    pub fn to_connection_string(&self) -> String {
        self.parameters
            .iter()
            .map(|(key, value)| format!("{}={};", key, value))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ConnectionLoader<I = NativeInspector> {
    settings: LoaderSettings,
    file_operations: FileOperations<I>,
}

impl ConnectionLoader {
    pub fn new(settings: LoaderSettings) -> Self {
        Self::with_file_operations(settings, FileOperations::new())
    }
}

impl<I: PermissionInspector> ConnectionLoader<I> {
    pub fn with_file_operations(settings: LoaderSettings, file_operations: FileOperations<I>) -> Self {
        Self {
            settings,
            file_operations,
        }
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn load_connections(&self) -> Result<Connections> {
        let path = self.settings.connections_path();
        let content = self
            .file_operations
            .read_all_text(&path, &validate_file_permissions)?;
        parser::parse(&content)
    }

    /// Returns the named connection, or the configured default when `name`
    /// is `None`.
    pub fn connection(&self, name: Option<&str>) -> Result<ConnectionSettings> {
        let name = name.unwrap_or(self.settings.default_connection.as_str());
        let mut connections = self.load_connections()?;

        let mut parameters = connections
            .remove(name)
            .ok_or_else(|| ConfigError::ConnectionNotFound(name.to_string()))?;
        self.resolve_oauth_token(&mut parameters)?;

        tracing::debug!(
            connection = name,
            parameters = parameters.len(),
            "Resolved connection settings"
        );

        Ok(ConnectionSettings {
            name: name.to_string(),
            parameters,
        })
    }

    pub fn connection_string(&self, name: Option<&str>) -> Result<String> {
        Ok(self.connection(name)?.to_connection_string())
    }

    fn resolve_oauth_token(&self, parameters: &mut BTreeMap<String, String>) -> Result<()> {
        let is_oauth = parameters
            .get(AUTHENTICATOR_KEY)
            .is_some_and(|authenticator| authenticator.eq_ignore_ascii_case(OAUTH_AUTHENTICATOR));
        if !is_oauth || parameters.contains_key(TOKEN_KEY) {
            return Ok(());
        }

        let token_path = parameters
            .remove(TOKEN_FILE_PATH_KEY)
            .ok_or_else(|| ConfigError::MissingField(TOKEN_KEY.to_string()))?;
        let token = self
            .file_operations
            .read_all_text(&token_path, &validate_file_permissions)?;

        parameters.insert(TOKEN_KEY.to_string(), token.trim_end().to_string());
        Ok(())
    }
}
