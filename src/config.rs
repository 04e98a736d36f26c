// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `KEY_RECORDS_FILE` | JSON array of `{userId, publicKey}` to seed the key store | none |
//! | `JWT_ALGORITHMS` | Comma-separated accepted token algorithms | `RS256,ES256,EdDSA` |
//! | `JWT_LEEWAY_SECS` | Clock skew tolerance for `exp`/`nbf` | `0` |
//! | `TLS_CERT_PATH` | PEM certificate chain; HTTPS when set with `TLS_KEY_PATH` | none |
//! | `TLS_KEY_PATH` | PEM private key | none |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

use crate::auth::token::DEFAULT_ALGORITHMS;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const KEY_RECORDS_FILE_ENV: &str = "KEY_RECORDS_FILE";
pub const JWT_ALGORITHMS_ENV: &str = "JWT_ALGORITHMS";
pub const JWT_LEEWAY_ENV: &str = "JWT_LEEWAY_SECS";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} and {1} must be set together")]
    Incomplete(&'static str, &'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// TLS certificate and key locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub key_records_file: Option<PathBuf>,
    pub algorithms: Vec<Algorithm>,
    pub leeway_secs: u64,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| "0.0.0.0".to_string());
        let host = IpAddr::from_str(host.trim()).map_err(|_| ConfigError::Invalid {
            key: HOST_ENV,
            value: host.clone(),
        })?;

        let port = match var(PORT_ENV) {
            Some(port) => port.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: PORT_ENV,
                value: port,
            })?,
            None => 8080,
        };

        let algorithms = match var(JWT_ALGORITHMS_ENV) {
            Some(list) => parse_algorithms(&list)?,
            None => DEFAULT_ALGORITHMS.to_vec(),
        };

        let leeway_secs = match var(JWT_LEEWAY_ENV) {
            Some(leeway) => leeway.trim().parse().map_err(|_| ConfigError::Invalid {
                key: JWT_LEEWAY_ENV,
                value: leeway,
            })?,
            None => 0,
        };

        let tls = match (var(TLS_CERT_PATH_ENV), var(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::Incomplete(TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV)),
        };

        let log_format = match var(LOG_FORMAT_ENV).as_deref().map(str::trim) {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: LOG_FORMAT_ENV,
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            key_records_file: var(KEY_RECORDS_FILE_ENV).map(PathBuf::from),
            algorithms,
            leeway_secs,
            tls,
            log_format,
        })
    }
}

/// Parse a comma-separated algorithm list. HMAC algorithms are refused.
fn parse_algorithms(list: &str) -> Result<Vec<Algorithm>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: JWT_ALGORITHMS_ENV,
        value: list.to_string(),
    };

    let algorithms = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Algorithm::from_str(s).map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let hmac = algorithms
        .iter()
        .any(|alg| matches!(alg, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512));
    if algorithms.is_empty() || hmac {
        return Err(invalid());
    }
    Ok(algorithms)
}
