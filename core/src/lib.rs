//! Core components for signing API requests.
//!
//! This crate provides the provider-independent pieces of sigbridge:
//!
//! - **Context**: a container holding the file reading and environment access
//!   implementations credential providers may need
//! - **Traits**: abstract interfaces for credential loading
//!   ([`ProvideCredential`]), request signing ([`SignRequest`]) and request
//!   decoration ([`DecorateRequest`])
//! - **Signer**: the orchestrator that wires decoration, credential loading
//!   and signing together
//!
//! A service crate supplies the credential type, one or more credential
//! providers and a [`SignRequest`] implementation; the signer holds direct
//! references to the chosen implementations, so there is no global signer
//! registry to configure.
//!
//! ## Example
//!
//! ```no_run
//! use sigbridge_core::{
//!     Context, DecorateRequest, ProvideCredential, Result, SignRequest, Signer,
//!     SigningCredential,
//! };
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty() && !self.secret.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyProvider;
//!
//! #[async_trait]
//! impl ProvideCredential for MyProvider {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key: "my-access-key".to_string(),
//!             secret: "my-secret-key".to_string(),
//!         }))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MySigner;
//!
//! #[async_trait]
//! impl SignRequest for MySigner {
//!     type Credential = MyCredential;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         _req: &mut http::request::Parts,
//!         _credential: Option<&Self::Credential>,
//!         _expires_in: Option<Duration>,
//!     ) -> Result<()> {
//!         // Attach authentication headers here.
//!         todo!()
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let ctx = Context::new();
//! let signer = Signer::new(ctx, MyProvider, MySigner);
//!
//! let mut parts = http::Request::builder()
//!     .method("GET")
//!     .uri("https://example.com")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! signer.sign(&mut parts, None).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{Context, Env, FileRead, NoopEnv, NoopFileRead, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{
    DecorateRequest, ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential,
};
mod request;
pub use request::SigningRequest;
mod signer;
pub use signer::Signer;
