use crate::{Context, Result};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// SigningCredential is implemented by the signing material a service signer
/// consumes.
///
/// A credential is immutable once loaded. The signer only reads it during
/// signing; replacing an invalid credential happens through a separate
/// refresh path owned by [`crate::Signer`].
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check whether this credential can still be used for signing.
    ///
    /// Implementations should report `false` ahead of the actual expiry so
    /// that in-flight requests do not carry a signature that expires before
    /// the service evaluates it.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential yields a credential on demand.
///
/// Services may load credentials from different sources: literal values,
/// environment variables, files on disk. Returning `Ok(None)` means this
/// source has nothing to offer and the next source (if any) should be tried.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load a credential from this source.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// ProvideCredentialChain tries a list of providers in order and returns the
/// first credential found.
pub struct ProvideCredentialChain<K: Send + Sync + Unpin + 'static> {
    providers: Vec<Arc<dyn ProvideCredential<Credential = K>>>,
}

impl<K: Send + Sync + Unpin + 'static> Debug for ProvideCredentialChain<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvideCredentialChain")
            .field("providers", &self.providers)
            .finish()
    }
}

impl<K: Send + Sync + Unpin + 'static> Default for ProvideCredentialChain<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Send + Sync + Unpin + 'static> ProvideCredentialChain<K> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider to the end of the chain.
    pub fn push(mut self, provider: impl ProvideCredential<Credential = K> + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Insert a provider at the front of the chain so it is tried first.
    pub fn push_front(
        mut self,
        provider: impl ProvideCredential<Credential = K> + 'static,
    ) -> Self {
        self.providers.insert(0, Arc::new(provider));
        self
    }
}

#[async_trait::async_trait]
impl<K: Send + Sync + Unpin + 'static> ProvideCredential for ProvideCredentialChain<K> {
    type Credential = K;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        for provider in &self.providers {
            if let Some(credential) = provider.provide_credential(ctx).await? {
                return Ok(Some(credential));
            }
        }

        Ok(None)
    }
}

/// SignRequest computes and attaches the authentication headers (or query
/// parameters) for one outgoing request.
///
/// Implementations are pure computation over the provided inputs: no network
/// I/O, no retries. The request is mutated in place and must be transmitted
/// only if signing succeeded.
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential consumed by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request with the given credential.
    ///
    /// `expires_in` selects query-string signing with the given validity
    /// window; `None` selects header signing. Services that support only one
    /// of the two must return an error for the other.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()>;
}

/// DecorateRequest is a composable request decoration step.
///
/// Decorators run before signing, so any header they attach is covered by the
/// signature. Keeping decoration as its own trait (rather than an inline
/// callback on the transport) lets each step be unit tested in isolation.
pub trait DecorateRequest: Debug + Send + Sync + 'static {
    /// Mutate the request, typically by inserting fixed headers.
    fn decorate(&self, req: &mut http::request::Parts) -> Result<()>;
}
