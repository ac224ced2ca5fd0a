use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Headers used by the GCS XML-interop signing scheme.
pub const X_GOOG_DATE: &str = "x-goog-date";
pub const X_GOOG_CONTENT_SHA_256: &str = "x-goog-content-sha256";
pub const X_GOOG_PROJECT_ID: &str = "x-goog-project-id";

// Sentinel digest for payloads that are not covered by the signature.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

// Env values used by the credential providers.
pub const GS_ACCESS_KEY_ID: &str = "GS_ACCESS_KEY_ID";
pub const GS_SECRET_ACCESS_KEY: &str = "GS_SECRET_ACCESS_KEY";
pub const GOOGLE_APPLICATION_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const GOOGLE_CLOUD_PROJECT: &str = "GOOGLE_CLOUD_PROJECT";

/// AsciiSet for [Google UriEncode](https://cloud.google.com/storage/docs/authentication/canonical-requests)
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
pub static GOOG_URI_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// AsciiSet for Google UriEncode, but used in query strings where `/` is
/// encoded as well.
pub static GOOG_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
