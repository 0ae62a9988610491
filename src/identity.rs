//! Identity provider
//!
//! Decides which owner a request acts on behalf of. There is no verification of any kind, the
//! header is trusted as is. Swapping in a provider that checks credentials does not touch the
//! storage.

use std::ops::Deref;
use std::sync::Arc;

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::HeaderName;
use axum::http::request::Parts;

use crate::api::Error;

/// Owner used when a request does not identify itself
///
/// All such requests share the same notes
pub const ANONYMOUS: &str = "anonymous";

/// Header read by default to identify the owner
pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Resolves the owner of a request
pub trait IdentityProvider: Send + Sync + 'static {
    /// Owner ID to use for a request with these headers
    ///
    /// Always succeeds
    fn resolve(&self, headers: &HeaderMap) -> String;
}

/// Identity provider as shared with the request handlers
pub type SharedIdentityProvider = Arc<dyn IdentityProvider>;

/// Pick the owner ID from an optional header value
pub fn resolve_owner(header_value: Option<&str>) -> String {
    match header_value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => ANONYMOUS.to_string(),
    }
}

/// Trusts whatever a single request header says
#[derive(Clone, Debug)]
pub struct HeaderIdentity {
    /// The header holding the owner ID
    header_name: HeaderName,
}

impl HeaderIdentity {
    pub fn new(header_name: HeaderName) -> Self {
        Self { header_name }
    }
}

impl Default for HeaderIdentity {
    fn default() -> Self {
        Self::new(HeaderName::from_static(DEFAULT_IDENTITY_HEADER))
    }
}

impl IdentityProvider for HeaderIdentity {
    fn resolve(&self, headers: &HeaderMap) -> String {
        let value = headers
            .get(&self.header_name)
            .map(|value| decode_latin1(value.as_bytes()));

        resolve_owner(value.as_deref())
    }
}

/// Decode header bytes as ISO-8859-1
///
/// Every byte maps to exactly one character, so distinct header values stay distinct owners
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Owner of the current request
#[derive(Clone, Debug)]
pub struct Owner {
    /// The resolved owner ID
    id: String,
}

impl Deref for Owner {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.id
    }
}

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(provider) = parts
            .extract::<Extension<SharedIdentityProvider>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get identity provider"))?;

        Ok(Owner {
            id: provider.resolve(&parts.headers),
        })
    }
}
