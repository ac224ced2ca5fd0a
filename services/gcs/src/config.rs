use std::fmt::{Debug, Formatter};

use crate::constants::*;
use sigbridge_core::{utils::Redact, Context};

/// Config carries all the configuration for GCS signing.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`GS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`GS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// Path of the HMAC key file, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`GOOGLE_APPLICATION_CREDENTIALS`]
    pub credential_file: Option<String>,
    /// Project id attached to every request, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`GOOGLE_CLOUD_PROJECT`]
    pub project_id: Option<String>,
}

impl Config {
    /// Create a new Config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key_id.
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_access_key.
    pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set the HMAC key file path.
    pub fn with_credential_file(mut self, credential_file: impl Into<String>) -> Self {
        self.credential_file = Some(credential_file.into());
        self
    }

    /// Set project_id.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Load unset fields from the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(GS_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(GS_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(GOOGLE_APPLICATION_CREDENTIALS) {
            self.credential_file.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(GOOGLE_CLOUD_PROJECT) {
            self.project_id.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id.as_ref().map(Redact::from))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(Redact::from),
            )
            .field("credential_file", &self.credential_file)
            .field("project_id", &self.project_id)
            .finish()
    }
}
