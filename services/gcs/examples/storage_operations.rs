//! Drive the GCS XML interop API with a signed S3-style client.
//!
//! Set `GS_ACCESS_KEY_ID`, `GS_SECRET_ACCESS_KEY` and `GOOGLE_CLOUD_PROJECT`
//! before running, and replace the bucket name below with one you own.

use sigbridge_core::{Context, OsEnv, Result, Signer};
use sigbridge_gcs::{
    Config, Credential, DefaultCredentialProvider, ProjectIdDecorator, RequestSigner,
};
use sigbridge_file_read_tokio::TokioFileRead;
use std::sync::Arc;

const BUCKET: &str = "my-bucket";

async fn send(
    client: &reqwest::Client,
    signer: &Signer<Credential>,
    req: http::Request<reqwest::Body>,
) -> Result<reqwest::Response> {
    let (mut parts, body) = req.into_parts();
    signer.sign(&mut parts, None).await?;

    let req = http::Request::from_parts(parts, body)
        .try_into()
        .expect("signed request must convert");
    Ok(client.execute(req).await.expect("request must succeed"))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let config = Arc::new(Config::default().from_env(&ctx));

    let project_id = config
        .project_id
        .clone()
        .expect("project id must be configured");

    let signer = Signer::new(
        ctx,
        DefaultCredentialProvider::new(config),
        RequestSigner::new("storage"),
    )
    .with_decorator(ProjectIdDecorator::new(&project_id)?);

    let client = reqwest::Client::new();

    // List buckets of the project.
    let req = http::Request::get("https://storage.googleapis.com/")
        .body(reqwest::Body::from(""))
        .expect("request must be valid");
    let resp = send(&client, &signer, req).await?;
    println!("list buckets: {}", resp.status());
    println!("{}", resp.text().await.expect("body must be readable"));

    // Upload an object.
    let url = format!("https://storage.googleapis.com/{BUCKET}/file.txt");
    let req = http::Request::put(&url)
        .header(http::header::CONTENT_TYPE, "text/plain")
        .body(reqwest::Body::from("Lorem ipsum"))
        .expect("request must be valid");
    let resp = send(&client, &signer, req).await?;
    println!("upload object: {}", resp.status());

    // Read it back.
    let req = http::Request::get(&url)
        .body(reqwest::Body::from(""))
        .expect("request must be valid");
    let resp = send(&client, &signer, req).await?;
    println!("download object: {}", resp.status());
    println!("{}", resp.text().await.expect("body must be readable"));

    Ok(())
}
