#![deny(unsafe_code)]

//! API credential handling.
//!
//! The upstream bearer credential is held in an [`ApiKey`] that is cleared
//! from memory on drop and redacted in `Debug` output. The value is only
//! ever loaded from the environment, never from the config file and never
//! hardcoded.

use std::fmt;

use zeroize::Zeroize;

/// The upstream API bearer credential, zeroized on drop.
#[derive(Clone)]
pub struct ApiKey {
    inner: String,
}

impl ApiKey {
    /// Wrap a credential value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Get the credential as a string slice.
    ///
    /// Use sparingly — the only intended call site is the Authorization
    /// header of the outbound request.
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Credential length (without exposing the value).
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the credential is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey")
            .field("inner", &"[REDACTED]")
            .field("len", &self.inner.len())
            .finish()
    }
}

impl Drop for ApiKey {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}
