use crate::{Config, Credential};
use async_trait::async_trait;
use sigbridge_core::{Context, ProvideCredential, Result};
use std::sync::Arc;

/// ConfigCredentialProvider loads the HMAC key pair from a [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a provider backed by the given config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        match (&self.config.access_key_id, &self.config.secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(ak, sk))),
            _ => Ok(None),
        }
    }
}
