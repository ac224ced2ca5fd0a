//! Google Cloud Storage XML-interop signer.
//!
//! This crate signs S3-protocol requests for the GCS XML interop endpoint
//! using HMAC interoperability keys (GOOG4-HMAC-SHA256), and carries the
//! fixed `x-goog-project-id` header the endpoint needs for account-level
//! calls.
//!
//! ```no_run
//! use sigbridge_core::{Context, OsEnv, Signer};
//! use sigbridge_gcs::{ProjectIdDecorator, RequestSigner, StaticCredentialProvider};
//!
//! # fn main() -> sigbridge_core::Result<()> {
//! let ctx = Context::new().with_env(OsEnv);
//! let signer = Signer::new(
//!     ctx,
//!     StaticCredentialProvider::new("access_id", "secret"),
//!     RequestSigner::new("storage"),
//! )
//! .with_decorator(ProjectIdDecorator::new("example-project-123")?);
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::{Credential, CredentialFile};

mod sign_request;
pub use sign_request::RequestSigner;

mod decorate;
pub use decorate::ProjectIdDecorator;

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, EnvCredentialProvider,
    FileCredentialProvider, StaticCredentialProvider,
};
