use async_trait::async_trait;
use sigbridge_core::{Context, ProvideCredential, ProvideCredentialChain, Result};
use std::sync::Arc;

use crate::provide_credential::{
    ConfigCredentialProvider, EnvCredentialProvider, FileCredentialProvider,
};
use crate::{Config, Credential};

/// DefaultCredentialProvider tries the usual credential sources in order.
///
/// Resolution order:
///
/// 1. Environment variables
/// 2. Explicit configuration
/// 3. HMAC key file
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(Arc::new(Config::default()))
    }
}

impl DefaultCredentialProvider {
    /// Create a new DefaultCredentialProvider.
    pub fn new(config: Arc<Config>) -> Self {
        let mut file_provider = FileCredentialProvider::new();
        if let Some(path) = &config.credential_file {
            file_provider = file_provider.with_path(path);
        }

        let chain = ProvideCredentialChain::new()
            .push(EnvCredentialProvider::new())
            .push(ConfigCredentialProvider::new(config))
            .push(file_provider);

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Add a credential provider to the front of the default chain so it is
    /// tried before all other sources.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = Credential> + 'static,
    ) -> Self {
        self.chain = self.chain.push_front(provider);
        self
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
