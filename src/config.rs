//! Configuration, read from the environment
//!
//! A `.env` file is picked up as well, see `main`

use std::net::SocketAddr;

use anyhow::Context;
use anyhow::Result;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;

use crate::identity::DEFAULT_IDENTITY_HEADER;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";

/// Origins allowed to make cross-origin requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Any origin, `*`
    Any,

    /// Only these origins
    List(Vec<HeaderValue>),
}

impl AllowedOrigins {
    /// Parse `*` or a comma separated list of origins
    fn parse(value: &str) -> Result<Self> {
        if value.trim() == "*" {
            return Ok(Self::Any);
        }

        let origins = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin).with_context(|| format!("Invalid origin: {origin}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::List(origins))
    }

    /// CORS layer allowing these origins, with any method and header
    pub fn cors_layer(&self) -> CorsLayer {
        let allow_origin = match self {
            Self::Any => AllowOrigin::any(),
            Self::List(origins) => AllowOrigin::list(origins.iter().cloned()),
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Service configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Address to listen on
    pub address: SocketAddr,

    /// Header trusted to identify the owner of a request
    pub identity_header: HeaderName,

    /// Origins allowed for CORS
    pub allowed_origins: AllowedOrigins,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            identity_header: HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
            allowed_origins: AllowedOrigins::Any,
        }
    }
}

impl Config {
    /// Read the configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` if any of the set values is invalid
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration with a custom variable lookup
    fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let mut address = var_or("ADDRESS", DEFAULT_ADDRESS)
            .parse::<SocketAddr>()
            .context("Invalid ADDRESS")?;

        // optional override of just the port
        if let Some(port) = lookup("PORT").filter(|port| !port.is_empty()) {
            address.set_port(port.parse::<u16>().context("Invalid PORT")?);
        }

        let identity_header = HeaderName::try_from(var_or("IDENTITY_HEADER", DEFAULT_IDENTITY_HEADER))
            .context("Invalid IDENTITY_HEADER")?;

        let allowed_origins = AllowedOrigins::parse(&var_or("CORS_ALLOWED_ORIGINS", "*"))
            .context("Invalid CORS_ALLOWED_ORIGINS")?;

        Ok(Self {
            address,
            identity_header,
            allowed_origins,
        })
    }
}
