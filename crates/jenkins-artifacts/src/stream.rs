//! Streaming access to downloaded artifact bytes

use bytes::Bytes;
use futures::{
    Stream,
    TryStreamExt,
};
use reqwest::{
    Response,
    StatusCode,
};
use tokio::io::{
    AsyncWrite,
    AsyncWriteExt,
};

use crate::{
    JenkinsError,
    JenkinsResult,
};

/// Body of an artifact download.
///
/// The HTTP response stays open until this value is read to the end or
/// dropped, so large artifacts are never held in memory at once.
#[derive(Debug)]
pub struct ArtifactStream {
    url: String,
    response: Response,
}

impl ArtifactStream {
    pub(crate) fn new(url: String, response: Response) -> Self {
        Self { url, response }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Size announced by the server, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Reads the next chunk, `None` once the body is exhausted.
    pub async fn chunk(&mut self) -> JenkinsResult<Option<Bytes>> {
        Ok(self.response.chunk().await?)
    }

    pub fn into_stream(self) -> impl Stream<Item = JenkinsResult<Bytes>> {
        self.response.bytes_stream().map_err(JenkinsError::from)
    }

    /// Writes the whole body into `writer` and returns the number of bytes
    /// copied.
    pub async fn copy_to<W>(mut self, writer: &mut W) -> JenkinsResult<u64>
    where
        W: AsyncWrite + Unpin,
    {
        let mut written = 0u64;
        while let Some(chunk) = self.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;

        tracing::debug!("Copied {} bytes from {}", written, self.url);
        Ok(written)
    }
}
