use crate::constants::{GS_ACCESS_KEY_ID, GS_SECRET_ACCESS_KEY};
use crate::Credential;
use async_trait::async_trait;
use sigbridge_core::{Context, ProvideCredential, Result};

/// EnvCredentialProvider loads the HMAC key pair from environment variables.
///
/// It looks for:
/// - `GS_ACCESS_KEY_ID`: the HMAC key's access id
/// - `GS_SECRET_ACCESS_KEY`: the HMAC key's secret
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let access_key_id = ctx.env_var(GS_ACCESS_KEY_ID);
        let secret_access_key = ctx.env_var(GS_SECRET_ACCESS_KEY);

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential::new(&ak, &sk))),
            _ => Ok(None),
        }
    }
}
