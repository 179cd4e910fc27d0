use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::utils::errors::{ConfigError, Result};

/// Connection name to its `key -> value` parameters, both in key order.
pub type Connections = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Parses TOML where every top-level table is a connection holding scalar
/// parameters.
pub fn parse(content: &str) -> Result<Connections> {
    let tables: BTreeMap<String, BTreeMap<String, Scalar>> = ::config::Config::builder()
        .add_source(::config::File::from_str(content, ::config::FileFormat::Toml))
        .build()
        .and_then(|config| config.try_deserialize())
        .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

    Ok(tables
        .into_iter()
        .map(|(name, table)| {
            let parameters = table
                .into_iter()
                .map(|(key, value)| (key, value.to_string()))
                .collect();
            (name, parameters)
        })
        .collect())
}
