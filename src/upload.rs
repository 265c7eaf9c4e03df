//! File uploads: byte-range planning and sequential multipart dispatch.
//!
//! Large video sources are split into contiguous byte ranges and sent as one
//! multipart request per range, each tagged with a `Content-Range: bytes
//! start-end/total` header so the server can reassemble by offset. Small
//! files (and every upload when chunking is disabled) go out as a single
//! request with no range header. Dispatch is strictly sequential: the server
//! ingests ranges in order, so there is nothing to gain and correctness to
//! lose from parallel chunks.

use std::path::Path;

use reqwest::Method;
use reqwest::header::CONTENT_RANGE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::client::Client;
use crate::error::Error;

/// Default upload chunk size: 128 MiB, matching the server's preferred
/// ingest window.
pub const DEFAULT_CHUNK_SIZE: u64 = 128 * 1024 * 1024;

/// One contiguous byte range of a file, sent as a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chunk {
    /// Offset of the first byte in this chunk.
    pub(crate) start: u64,
    /// Number of bytes in this chunk.
    pub(crate) len: u64,
    /// Size of the whole file.
    pub(crate) total: u64,
    /// Whether this chunk is one of several. Only partial chunks carry a
    /// `Content-Range` header; a single-shot upload omits it so the server
    /// treats the request as the complete file.
    pub(crate) partial: bool,
}

impl Chunk {
    /// Renders `bytes start-end/total`, or `None` for a single-shot upload.
    pub(crate) fn content_range(&self) -> Option<String> {
        self.partial
            .then(|| format!("bytes {}-{}/{}", self.start, self.start + self.len - 1, self.total))
    }
}

/// Splits `total` bytes into upload chunks.
///
/// Chunking applies only when the file is strictly larger than `chunk_size`
/// and `chunk_size` is non-zero; otherwise the whole file is one non-partial
/// chunk (an empty file still yields exactly one, so every upload issues at
/// least one request). Chunks are contiguous, non-overlapping, and cover
/// `[0, total)` exactly; the last one may be short.
pub(crate) fn plan_chunks(total: u64, chunk_size: u64) -> Vec<Chunk> {
    if chunk_size == 0 || total <= chunk_size {
        return vec![Chunk {
            start: 0,
            len: total,
            total,
            partial: false,
        }];
    }

    let mut chunks = Vec::with_capacity(total.div_ceil(chunk_size) as usize);
    let mut start = 0;
    while start < total {
        let len = chunk_size.min(total - start);
        chunks.push(Chunk {
            start,
            len,
            total,
            partial: true,
        });
        start += len;
    }
    chunks
}

fn multipart_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Client {
    /// Uploads a file to `path`, splitting it into ranged requests when it
    /// exceeds the configured chunk size.
    ///
    /// The file handle stays open for the whole upload and is closed on
    /// every exit path. Each chunk response is decoded into `T` and the last
    /// one is returned: the server re-sends the evolving resource state with
    /// every range it ingests. The first failing chunk aborts the upload;
    /// there is no resume, so re-invoking restarts from byte 0.
    pub(crate) async fn upload_chunked<T: DeserializeOwned>(
        &self,
        path: &str,
        file_path: &Path,
    ) -> Result<T, Error> {
        let mut file = File::open(file_path).await?;
        let total = file.metadata().await?.len();
        let chunks = plan_chunks(total, self.chunk_size());
        let file_name = multipart_file_name(file_path);
        tracing::debug!(total, chunks = chunks.len(), "starting upload");

        let mut result = None;
        for chunk in &chunks {
            let mut buf = vec![0u8; chunk.len as usize];
            file.read_exact(&mut buf).await?;

            let part = Part::bytes(buf).file_name(file_name.clone());
            let form = Form::new().part("file", part);
            let mut request = self.request(Method::POST, path).await?.multipart(form);
            if let Some(range) = chunk.content_range() {
                tracing::trace!(range, "sending chunk");
                request = request.header(CONTENT_RANGE, range);
            }

            result = Some(self.execute(request).await?);
        }

        Ok(result.expect("plan_chunks yields at least one chunk"))
    }

    /// Uploads a file to `path` as one multipart request, with optional
    /// extra form fields alongside the `file` part.
    pub(crate) async fn upload_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        file_path: &Path,
        extra_fields: &[(&str, String)],
    ) -> Result<T, Error> {
        let bytes = tokio::fs::read(file_path).await?;
        let part = Part::bytes(bytes).file_name(multipart_file_name(file_path));

        let mut form = Form::new().part("file", part);
        for (key, value) in extra_fields {
            form = form.text(key.to_string(), value.clone());
        }

        let request = self.request(Method::POST, path).await?.multipart(form);
        self.execute(request).await
    }
}
