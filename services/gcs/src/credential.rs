use sigbridge_core::hash::base64_decode;
use sigbridge_core::time::{now, DateTime};
use sigbridge_core::utils::Redact;
use sigbridge_core::{Error, Result, SigningCredential};
use std::fmt::{Debug, Formatter};

/// Credential is a GCS HMAC interoperability key pair.
///
/// These are the keys the XML interop API accepts from S3-protocol clients:
/// an access id naming the key and a shared secret the signature is derived
/// from. Immutable once loaded; the signer only reads it.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access id of the HMAC key.
    pub access_key_id: String,
    /// Shared secret of the HMAC key.
    pub secret_access_key: String,
    /// Expiration time for this credential, if any.
    pub expires_at: Option<DateTime>,
}

impl Credential {
    /// Create a credential from an access id and secret.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            expires_at: None,
        }
    }

    /// Set the expiration time.
    pub fn with_expires_at(mut self, expires_at: DateTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return false;
        }

        // Take 120s as buffer to avoid edge cases.
        if let Some(valid) = self
            .expires_at
            .map(|v| v > now() + chrono::TimeDelta::try_minutes(2).expect("in bounds"))
        {
            return valid;
        }

        true
    }
}

/// CredentialFile is the on-disk JSON form of an HMAC key pair.
#[derive(Clone, serde::Deserialize)]
pub struct CredentialFile {
    /// Access id of the HMAC key.
    pub access_key_id: String,
    /// Shared secret of the HMAC key.
    pub secret_access_key: String,
}

impl Debug for CredentialFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialFile")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .finish()
    }
}

impl CredentialFile {
    /// Parse a credential file from raw bytes.
    pub fn from_slice(v: &[u8]) -> Result<Self> {
        serde_json::from_slice(v)
            .map_err(|e| Error::credential_load("failed to parse credential file").with_source(e))
    }

    /// Parse a credential file from base64-encoded content.
    pub fn from_base64(content: &str) -> Result<Self> {
        let decoded = base64_decode(content.trim())?;
        Self::from_slice(&decoded)
    }
}

impl From<CredentialFile> for Credential {
    fn from(v: CredentialFile) -> Self {
        Credential::new(&v.access_key_id, &v.secret_access_key)
    }
}
