use crate::constants::{
    GOOG_QUERY_ENCODE_SET, GOOG_URI_ENCODE_SET, UNSIGNED_PAYLOAD, X_GOOG_CONTENT_SHA_256,
    X_GOOG_DATE,
};
use crate::Credential;
use async_trait::async_trait;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use percent_encoding::utf8_percent_encode;
use sigbridge_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use sigbridge_core::time::{format_date, format_iso8601, now, DateTime};
use sigbridge_core::{Context, Error, Result, SignRequest, SigningRequest};
use std::borrow::Cow;
use std::time::Duration;

/// RequestSigner implements the GCS XML-interop signing scheme
/// (GOOG4-HMAC-SHA256).
///
/// - [Signing process](https://cloud.google.com/storage/docs/authentication/signatures)
///
/// The scheme mirrors the V4 signing family: a canonical request is hashed
/// into a string to sign, the signature is an HMAC-SHA256 under a key derived
/// from the secret and the credential scope, and the result is carried either
/// in the `Authorization` header or in `X-Goog-*` query parameters.
#[derive(Debug)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for the given service, e.g. `storage`.
    ///
    /// The region defaults to `auto`, which is what the interop endpoint
    /// expects unless a bucket is pinned to a location.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.into(),
            region: "auto".to_string(),

            time: None,
        }
    }

    /// Set the region used in the credential scope.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.into();
        self
    }

    /// Pin the signing time instead of reading the clock per request.
    ///
    /// The timestamp is embedded in the signed material, so a pinned time
    /// makes signing fully deterministic. Production callers should leave
    /// this unset; a stale timestamp is rejected by the service.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
        expires_in: Option<Duration>,
    ) -> Result<()> {
        let signing_time = self.time.unwrap_or_else(now);

        // Anonymous access: nothing to sign with.
        let Some(cred) = credential else {
            return Ok(());
        };

        // Expiry is part of the signing contract. Checked before the request
        // is touched, so a rejected request keeps all its headers.
        if let Some(expires_at) = cred.expires_at {
            if expires_at <= signing_time {
                return Err(Error::credential_expired(format!(
                    "credential expired at {expires_at}"
                )));
            }
        }

        let mut signed_req = SigningRequest::build(req)?;

        canonicalize_header(&mut signed_req, expires_in, signing_time)?;
        canonicalize_query(
            &mut signed_req,
            cred,
            expires_in,
            signing_time,
            &self.service,
            &self.region,
        );

        let creq = canonical_request_string(&signed_req)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20230101/<region>/<service>/goog4_request"
        let scope = format!(
            "{}/{}/{}/goog4_request",
            format_date(signing_time),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // GOOG4-HMAC-SHA256
        // 20230101T000000Z
        // 20230101/<region>/<service>/goog4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            f.push_str("GOOG4-HMAC-SHA256");
            f.push('\n');
            f.push_str(&format_iso8601(signing_time));
            f.push('\n');
            f.push_str(&scope);
            f.push('\n');
            f.push_str(&encoded_req);
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &cred.secret_access_key,
            signing_time,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        if expires_in.is_some() {
            signed_req
                .query
                .push(("X-Goog-Signature".into(), signature));
        } else {
            let mut authorization = HeaderValue::from_str(&format!(
                "GOOG4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
                cred.access_key_id,
                scope,
                signed_req.header_name_to_vec_sorted().join(";"),
                signature
            ))?;
            authorization.set_sensitive(true);

            signed_req
                .headers
                .insert(header::AUTHORIZATION, authorization);
        }

        signed_req.apply(req)
    }
}

fn canonical_request_string(req: &SigningRequest) -> Result<String> {
    // Resolve the payload digest before anything else. A digest that cannot
    // be read means the content cannot be covered by the signature, which is
    // a different failure than a generally malformed header.
    let payload = match req.headers.get(X_GOOG_CONTENT_SHA_256) {
        None => UNSIGNED_PAYLOAD,
        Some(v) => v.to_str().map_err(|e| {
            Error::unsupported_content_encoding("content digest header is not readable")
                .with_source(e)
        })?,
    };

    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    f.push_str(req.method.as_str());
    f.push('\n');

    // Insert encoded path
    let path = req.path_percent_decoded();
    f.push_str(&Cow::from(utf8_percent_encode(&path, &GOOG_URI_ENCODE_SET)));
    f.push('\n');

    // Insert query
    f.push_str(
        &req.query
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&"),
    );
    f.push('\n');

    // Insert signed headers
    let signed_headers = req.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        let value = req.headers[*name].to_str().map_err(|e| {
            Error::malformed_request(format!("header {name} is not valid utf-8")).with_source(e)
        })?;
        f.push_str(name);
        f.push(':');
        f.push_str(value);
        f.push('\n');
    }
    f.push('\n');
    f.push_str(&signed_headers.join(";"));
    f.push('\n');

    // Insert payload digest
    f.push_str(payload);

    debug!("canonical request string: {f}");
    Ok(f)
}

fn canonicalize_header(
    req: &mut SigningRequest,
    expires_in: Option<Duration>,
    signing_time: DateTime,
) -> Result<()> {
    for (_, value) in req.headers.iter_mut() {
        SigningRequest::header_value_normalize(value)
    }

    // Insert HOST header if not present.
    if req.headers.get(header::HOST).is_none() {
        req.headers
            .insert(header::HOST, req.authority.as_str().parse()?);
    }

    if expires_in.is_none() {
        // Insert DATE header if not present.
        if req.headers.get(X_GOOG_DATE).is_none() {
            req.headers.insert(
                X_GOOG_DATE,
                HeaderValue::try_from(format_iso8601(signing_time))?,
            );
        }

        // Insert content digest header if not present. Callers that hash
        // their body set the digest themselves; everyone else signs the
        // unsigned-payload sentinel.
        if req.headers.get(X_GOOG_CONTENT_SHA_256).is_none() {
            req.headers.insert(
                X_GOOG_CONTENT_SHA_256,
                HeaderValue::from_static(UNSIGNED_PAYLOAD),
            );
        }
    }

    Ok(())
}

fn canonicalize_query(
    req: &mut SigningRequest,
    cred: &Credential,
    expires_in: Option<Duration>,
    signing_time: DateTime,
    service: &str,
    region: &str,
) {
    if let Some(expire) = expires_in {
        req.query
            .push(("X-Goog-Algorithm".into(), "GOOG4-HMAC-SHA256".into()));
        req.query.push((
            "X-Goog-Credential".into(),
            format!(
                "{}/{}/{}/{}/goog4_request",
                cred.access_key_id,
                format_date(signing_time),
                region,
                service
            ),
        ));
        req.query
            .push(("X-Goog-Date".into(), format_iso8601(signing_time)));
        req.query
            .push(("X-Goog-Expires".into(), expire.as_secs().to_string()));
        req.query.push((
            "X-Goog-SignedHeaders".into(),
            req.header_name_to_vec_sorted().join(";"),
        ));
    }

    if req.query.is_empty() {
        return;
    }

    // Sort by param name, then encode.
    req.query.sort();

    req.query = req
        .query
        .iter()
        .map(|(k, v)| {
            (
                utf8_percent_encode(k, &GOOG_QUERY_ENCODE_SET).to_string(),
                utf8_percent_encode(v, &GOOG_QUERY_ENCODE_SET).to_string(),
            )
        })
        .collect();
}

fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("GOOG4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "goog4_request".as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, Request};
    use pretty_assertions::assert_eq;
    use sigbridge_core::time::parse_rfc3339;

    const ACCESS_KEY_ID: &str = "GOOG1ATESTKEYID";
    const SECRET_ACCESS_KEY: &str = "testsecretkey";

    fn reference_time() -> DateTime {
        parse_rfc3339("2023-01-01T00:00:00Z").unwrap()
    }

    fn reference_credential() -> Credential {
        Credential::new(ACCESS_KEY_ID, SECRET_ACCESS_KEY)
    }

    fn get_parts() -> Parts {
        Request::builder()
            .method(Method::GET)
            .uri("https://storage.googleapis.com/mybucket/file.txt")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    async fn sign(parts: &mut Parts, cred: &Credential) -> Result<()> {
        let signer = RequestSigner::new("storage").with_time(reference_time());
        signer
            .sign_request(&Context::new(), parts, Some(cred), None)
            .await
    }

    #[tokio::test]
    async fn test_header_signing_matches_reference() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut parts = get_parts();
        sign(&mut parts, &reference_credential()).await.unwrap();

        assert_eq!(parts.headers[X_GOOG_DATE], "20230101T000000Z");
        assert_eq!(parts.headers[X_GOOG_CONTENT_SHA_256], UNSIGNED_PAYLOAD);
        // Reference vector for GET /mybucket/file.txt, unsigned payload,
        // signed at 2023-01-01T00:00:00Z.
        assert_eq!(
            parts.headers[header::AUTHORIZATION],
            "GOOG4-HMAC-SHA256 Credential=GOOG1ATESTKEYID/20230101/auto/storage/goog4_request, \
             SignedHeaders=host;x-goog-content-sha256;x-goog-date, \
             Signature=b95bb2b1f700120f157089a123c78fc97dc98e24fbf80e87ede5e2a60f668764"
        );
    }

    #[tokio::test]
    async fn test_signing_is_deterministic() {
        let mut first = get_parts();
        let mut second = get_parts();
        let cred = reference_credential();

        sign(&mut first, &cred).await.unwrap();
        sign(&mut second, &cred).await.unwrap();

        assert_eq!(
            first.headers[header::AUTHORIZATION],
            second.headers[header::AUTHORIZATION]
        );
    }

    #[tokio::test]
    async fn test_explicit_empty_body_digest() {
        let mut parts = get_parts();
        parts.headers.insert(
            X_GOOG_CONTENT_SHA_256,
            // sha256 of the empty input
            HeaderValue::from_static(
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
        );

        sign(&mut parts, &reference_credential()).await.unwrap();

        let authorization = parts.headers[header::AUTHORIZATION].to_str().unwrap();
        assert!(authorization.ends_with(
            "Signature=bb772ab18586915547f0232856555910413ea49f1e53cd9e38db50c2e303fc21"
        ));
    }

    #[tokio::test]
    async fn test_body_digest_is_signed() {
        let body = "Lorem ipsum";
        let mut parts = Request::builder()
            .method(Method::PUT)
            .uri("https://storage.googleapis.com/mybucket/file.txt")
            .header(header::CONTENT_LENGTH, body.len())
            .header(X_GOOG_CONTENT_SHA_256, hex_sha256(body.as_bytes()))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        sign(&mut parts, &reference_credential()).await.unwrap();

        assert_eq!(
            parts.headers[header::AUTHORIZATION],
            "GOOG4-HMAC-SHA256 Credential=GOOG1ATESTKEYID/20230101/auto/storage/goog4_request, \
             SignedHeaders=content-length;host;x-goog-content-sha256;x-goog-date, \
             Signature=0caf3d8559be5158f582829aa2bb4f89c92fa5263eac91e08b1a1b7d637318c6"
        );
    }

    #[tokio::test]
    async fn test_tampering_changes_signature() {
        let cred = reference_credential();

        let mut original = get_parts();
        sign(&mut original, &cred).await.unwrap();

        // Same request with a different path.
        let mut tampered = Request::builder()
            .method(Method::GET)
            .uri("https://storage.googleapis.com/mybucket/file2.txt")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        sign(&mut tampered, &cred).await.unwrap();

        assert_ne!(
            original.headers[header::AUTHORIZATION],
            tampered.headers[header::AUTHORIZATION]
        );

        // Same request with an extra signed header.
        let mut with_header = get_parts();
        with_header
            .headers
            .insert("x-goog-meta-color", HeaderValue::from_static("blue"));
        sign(&mut with_header, &cred).await.unwrap();

        assert_ne!(
            original.headers[header::AUTHORIZATION],
            with_header.headers[header::AUTHORIZATION]
        );
    }

    #[tokio::test]
    async fn test_expired_credential_attaches_nothing() {
        let cred = reference_credential()
            .with_expires_at(parse_rfc3339("2022-12-31T23:59:59Z").unwrap());

        let mut parts = get_parts();
        let err = sign(&mut parts, &cred).await.unwrap_err();

        assert_eq!(err.kind(), sigbridge_core::ErrorKind::CredentialExpired);
        // The request was not touched.
        assert!(parts.headers.is_empty());
        assert_eq!(
            parts.uri.to_string(),
            "https://storage.googleapis.com/mybucket/file.txt"
        );
    }

    #[tokio::test]
    async fn test_request_without_authority_is_rejected() {
        let mut parts = Request::builder()
            .method(Method::GET)
            .uri("/mybucket/file.txt")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let err = sign(&mut parts, &reference_credential()).await.unwrap_err();
        assert_eq!(err.kind(), sigbridge_core::ErrorKind::MalformedRequest);
    }

    #[tokio::test]
    async fn test_unreadable_digest_is_rejected() {
        let mut parts = get_parts();
        parts.headers.insert(
            X_GOOG_CONTENT_SHA_256,
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );

        let err = sign(&mut parts, &reference_credential()).await.unwrap_err();
        assert_eq!(
            err.kind(),
            sigbridge_core::ErrorKind::UnsupportedContentEncoding
        );
    }

    #[tokio::test]
    async fn test_unreadable_header_is_malformed() {
        // An unreadable header other than the digest is a malformed request,
        // not a content encoding problem.
        let mut parts = get_parts();
        parts.headers.insert(
            "x-goog-meta-note",
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );

        let err = sign(&mut parts, &reference_credential()).await.unwrap_err();
        assert_eq!(err.kind(), sigbridge_core::ErrorKind::MalformedRequest);
    }

    #[tokio::test]
    async fn test_anonymous_request_passes_through() {
        let signer = RequestSigner::new("storage").with_time(reference_time());
        let mut parts = get_parts();
        signer
            .sign_request(&Context::new(), &mut parts, None, None)
            .await
            .unwrap();

        assert!(parts.headers.get(header::AUTHORIZATION).is_none());
    }
}
