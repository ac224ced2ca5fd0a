//! Tokio-based file reading for sigbridge.
//!
//! This crate provides [`TokioFileRead`], an async file reader implementing
//! the `FileRead` trait from `sigbridge_core` on top of Tokio's file system
//! operations. Wire it into a `Context` when a credential provider needs to
//! load signing material from disk:
//!
//! ```no_run
//! use sigbridge_core::{Context, OsEnv};
//! use sigbridge_file_read_tokio::TokioFileRead;
//!
//! let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
//! ```

use async_trait::async_trait;
use sigbridge_core::{Error, FileRead, Result};

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }
}
