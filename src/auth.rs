//! Authentication module for the FixedFloat API
//!
//! Every request carries two headers: the API key in clear, and an HMAC-SHA256 of the
//! canonical payload keyed by the secret key, hex-encoded. The signature covers only the
//! payload bytes; method, path and query placement do not take part.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-KEY";
/// Header carrying the hex HMAC-SHA256 signature
pub const API_SIGN_HEADER: &str = "X-API-SIGN";

/// Default environment variable holding the API key
pub const API_KEY_ENV: &str = "FIXEDFLOAT_API_KEY";
/// Default environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "FIXEDFLOAT_SECRET_KEY";

/// API key / secret key pair
///
/// Both values are fixed for the lifetime of the credentials. Keys are issued at
/// <https://fixedfloat.com/apikey>.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Create credentials from an API key and secret key
    ///
    /// Fails with [`Error::InvalidCall`] if either value is empty.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() || secret_key.is_empty() {
            return Err(Error::invalid_call(
                "Please provide both an API key and a secret key",
            ));
        }

        Ok(Self {
            api_key,
            secret_key,
        })
    }

    /// Load credentials from `FIXEDFLOAT_API_KEY` and `FIXEDFLOAT_SECRET_KEY`
    pub fn from_env() -> Result<Self> {
        Self::from_env_vars(API_KEY_ENV, SECRET_KEY_ENV)
    }

    /// Load credentials from custom environment variable names
    pub fn from_env_vars(api_key_var: &str, secret_key_var: &str) -> Result<Self> {
        let read = |name: &str| {
            std::env::var(name)
                .map_err(|e| Error::invalid_call(format!("Cannot read {}: {}", name, e)))
        };
        Self::new(read(api_key_var)?, read(secret_key_var)?)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign an encoded payload, returning the lowercase hex digest
    ///
    /// An empty payload is signed as zero bytes.
    pub fn sign(&self, payload: &str) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| Error::invalid_call(format!("Invalid secret key: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
