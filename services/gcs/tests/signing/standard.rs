use http::{header, Method, Request, StatusCode};
use log::{debug, warn};
use pretty_assertions::assert_eq;
use sigbridge_core::time::parse_rfc3339;
use sigbridge_core::{Context, OsEnv, Result, Signer};
use sigbridge_gcs::{Credential, ProjectIdDecorator, RequestSigner, StaticCredentialProvider};
use std::env;

fn reference_signer() -> Signer<Credential> {
    let time = parse_rfc3339("2023-01-01T00:00:00Z").unwrap();
    Signer::new(
        Context::new(),
        StaticCredentialProvider::new("GOOG1ATESTKEYID", "testsecretkey"),
        RequestSigner::new("storage").with_time(time),
    )
    .with_decorator(ProjectIdDecorator::new("example-project-123").unwrap())
}

fn get_parts(path: &str) -> http::request::Parts {
    Request::builder()
        .method(Method::GET)
        .uri(format!("https://storage.googleapis.com{path}"))
        .body(())
        .unwrap()
        .into_parts()
        .0
}

#[tokio::test]
async fn test_pipeline_signs_decorated_request() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let signer = reference_signer();
    let mut parts = get_parts("/mybucket/file.txt");
    signer.sign(&mut parts, None).await?;

    // The decorated header carries the configured literal value and is part
    // of the signed header list.
    assert_eq!(parts.headers["x-goog-project-id"], "example-project-123");
    assert_eq!(
        parts.headers[header::AUTHORIZATION],
        "GOOG4-HMAC-SHA256 Credential=GOOG1ATESTKEYID/20230101/auto/storage/goog4_request, \
         SignedHeaders=host;x-goog-content-sha256;x-goog-date;x-goog-project-id, \
         Signature=5376121aae6cc43a9f63e3880adecf22b864a22db57d15b403f2789f7ba4df13"
    );

    Ok(())
}

#[tokio::test]
async fn test_expired_credential_fails_through_pipeline() {
    let time = parse_rfc3339("2023-01-01T00:00:00Z").unwrap();
    let expired = parse_rfc3339("2022-12-31T00:00:00Z").unwrap();

    let signer = Signer::new(
        Context::new(),
        StaticCredentialProvider::new("GOOG1ATESTKEYID", "testsecretkey")
            .with_expires_at(expired),
        RequestSigner::new("storage").with_time(time),
    );

    let mut parts = get_parts("/mybucket/file.txt");
    let err = signer.sign(&mut parts, None).await.unwrap_err();
    assert_eq!(err.kind(), sigbridge_core::ErrorKind::CredentialExpired);
    assert!(parts.headers.get(header::AUTHORIZATION).is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_signing_is_independent() -> Result<()> {
    let signer = reference_signer();

    let mut handles = Vec::new();
    for i in 0..16 {
        let signer = signer.clone();
        handles.push(tokio::spawn(async move {
            let path = format!("/mybucket/object-{i}");

            let mut first = get_parts(&path);
            signer.sign(&mut first, None).await.unwrap();
            let mut second = get_parts(&path);
            signer.sign(&mut second, None).await.unwrap();

            // Deterministic per request, regardless of what the other tasks
            // are signing.
            assert_eq!(
                first.headers[header::AUTHORIZATION],
                second.headers[header::AUTHORIZATION]
            );
            first.headers[header::AUTHORIZATION]
                .to_str()
                .unwrap()
                .to_string()
        }));
    }

    let mut signatures = Vec::new();
    for handle in handles {
        signatures.push(handle.await.expect("signing task must not panic"));
    }

    signatures.sort();
    signatures.dedup();
    assert_eq!(signatures.len(), 16, "every request gets its own signature");

    Ok(())
}

async fn init_live_signer() -> Option<Signer<Credential>> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("SIGBRIDGE_GCS_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let credential =
        env::var("SIGBRIDGE_GCS_CREDENTIAL").expect("env SIGBRIDGE_GCS_CREDENTIAL must be set");
    let project_id =
        env::var("SIGBRIDGE_GCS_PROJECT_ID").expect("env SIGBRIDGE_GCS_PROJECT_ID must be set");

    let provider = StaticCredentialProvider::from_base64(&credential)
        .expect("credential must be a valid base64 key file");

    let ctx = Context::new().with_env(OsEnv);
    Some(
        Signer::new(ctx, provider, RequestSigner::new("storage"))
            .with_decorator(ProjectIdDecorator::new(&project_id).unwrap()),
    )
}

#[tokio::test]
async fn test_get_object_live() -> Result<()> {
    let Some(signer) = init_live_signer().await else {
        warn!("SIGBRIDGE_GCS_TEST is not set, skipped");
        return Ok(());
    };

    let url = env::var("SIGBRIDGE_GCS_URL").expect("env SIGBRIDGE_GCS_URL must be set");

    let req = Request::builder()
        .method(Method::GET)
        .uri(format!("{url}/not_exist_file"))
        .body("")
        .expect("request must be valid");

    let (mut parts, body) = req.into_parts();
    signer.sign(&mut parts, None).await?;
    let req = Request::from_parts(parts, body);

    debug!("signed request: {req:?}");

    let client = reqwest::Client::new();
    let resp = client
        .execute(req.try_into().expect("request must convert"))
        .await
        .expect("request must succeed");

    debug!("got response: {resp:?}");
    assert_eq!(StatusCode::NOT_FOUND, resp.status());
    Ok(())
}
