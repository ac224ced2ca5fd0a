use crate::constants::X_GOOG_PROJECT_ID;
use http::HeaderValue;
use sigbridge_core::{DecorateRequest, Error, Result};

/// ProjectIdDecorator attaches `x-goog-project-id` to every request.
///
/// The XML interop API needs the project id to resolve account-level calls
/// such as listing buckets. The value is fixed at construction time and
/// validated there, so a request can never go out with an undefined or
/// unencodable project header. Registered on the signer, the header is added
/// before signing and therefore covered by the signature.
#[derive(Debug, Clone)]
pub struct ProjectIdDecorator {
    value: HeaderValue,
}

impl ProjectIdDecorator {
    /// Create a decorator for the given project id.
    pub fn new(project_id: &str) -> Result<Self> {
        if project_id.is_empty() {
            return Err(Error::malformed_request("project id must not be empty"));
        }

        let value = HeaderValue::from_str(project_id).map_err(|e| {
            Error::malformed_request(format!("project id {project_id} is not a valid header value"))
                .with_source(e)
        })?;

        Ok(Self { value })
    }
}

impl DecorateRequest for ProjectIdDecorator {
    fn decorate(&self, req: &mut http::request::Parts) -> Result<()> {
        req.headers.insert(X_GOOG_PROJECT_ID, self.value.clone());
        Ok(())
    }
}
