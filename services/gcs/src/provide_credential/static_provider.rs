use crate::credential::{Credential, CredentialFile};
use async_trait::async_trait;
use sigbridge_core::time::DateTime;
use sigbridge_core::{Context, ProvideCredential, Result};

/// StaticCredentialProvider provides an HMAC key pair known at construction
/// time.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider from an access id and secret.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            credential: Credential::new(access_key_id, secret_access_key),
        }
    }

    /// Create a provider from a base64-encoded HMAC key file.
    ///
    /// This is the convenient form for CI environments that carry the key
    /// blob in a single environment variable.
    pub fn from_base64(content: &str) -> Result<Self> {
        let file = CredentialFile::from_base64(content)?;
        Ok(Self {
            credential: file.into(),
        })
    }

    /// Set the expiration time of the provided credential.
    pub fn with_expires_at(mut self, expires_at: DateTime) -> Self {
        self.credential.expires_at = Some(expires_at);
        self
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
