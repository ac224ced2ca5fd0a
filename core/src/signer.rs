use crate::{Context, DecorateRequest, ProvideCredential, SignRequest, SigningCredential};
use crate::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Signer orchestrates request decoration, credential loading and signing.
///
/// It holds direct references to the chosen provider and signer
/// implementations; nothing is looked up by name at signing time.
///
/// The loaded credential is cached and shared between clones. Signing reads
/// the cache; only when the cached credential is missing or no longer valid
/// does the signer take the exclusive refresh path through the provider.
#[derive(Clone, Debug)]
pub struct Signer<K: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = K>>,
    signer: Arc<dyn SignRequest<Credential = K>>,
    decorators: Vec<Arc<dyn DecorateRequest>>,
    credential: Arc<Mutex<Option<K>>>,
}

impl<K: SigningCredential> Signer<K> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = K>,
        signer: impl SignRequest<Credential = K>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            signer: Arc::new(signer),
            decorators: Vec::new(),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Register a request decorator.
    ///
    /// Decorators run in registration order before signing, so the headers
    /// they attach are covered by the signature.
    pub fn with_decorator(mut self, decorator: impl DecorateRequest) -> Self {
        self.decorators.push(Arc::new(decorator));
        self
    }

    /// Sign the request.
    ///
    /// Invoked exactly once per outgoing request, strictly before
    /// transmission. On failure no usable request remains, so the caller
    /// cannot transmit a half-signed request.
    pub async fn sign(
        &self,
        req: &mut http::request::Parts,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        for decorator in &self.decorators {
            if let Err(err) = decorator.decorate(req) {
                // Earlier decorators may already have attached headers.
                // Strip them all so a partially decorated, unsigned request
                // cannot be transmitted.
                req.headers = http::HeaderMap::new();
                return Err(err);
            }
        }

        let credential = self.credential.lock().expect("lock poisoned").clone();
        let credential = if credential.is_valid() {
            credential
        } else {
            let loaded = self.provider.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.signer
            .sign_request(&self.ctx, req, credential.as_ref(), expires_in)
            .await
    }
}
