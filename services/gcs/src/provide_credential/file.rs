use crate::constants::GOOGLE_APPLICATION_CREDENTIALS;
use crate::credential::{Credential, CredentialFile};
use async_trait::async_trait;
use log::debug;
use sigbridge_core::{Context, Error, ProvideCredential, Result};

/// FileCredentialProvider loads the HMAC key pair from a JSON file on disk.
///
/// The path comes from the constructor or, when unset, from the
/// `GOOGLE_APPLICATION_CREDENTIALS` environment variable. A missing path
/// means this source has nothing to offer; an unreadable or unparsable file
/// is a load failure.
#[derive(Debug, Default, Clone)]
pub struct FileCredentialProvider {
    path: Option<String>,
}

impl FileCredentialProvider {
    /// Create a provider that resolves its path from the environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit file path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

#[async_trait]
impl ProvideCredential for FileCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let Some(path) = self
            .path
            .clone()
            .or_else(|| ctx.env_var(GOOGLE_APPLICATION_CREDENTIALS))
        else {
            return Ok(None);
        };

        let path = ctx.expand_home_dir(&path).ok_or_else(|| {
            Error::credential_load(format!("cannot expand home dir in credential path {path}"))
        })?;

        debug!("loading credential from file {path}");
        let content = ctx.file_read(&path).await.map_err(|e| {
            Error::credential_load(format!("failed to read credential file {path}")).with_source(e)
        })?;

        let file = CredentialFile::from_slice(&content)?;
        Ok(Some(file.into()))
    }
}
