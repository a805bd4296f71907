use crate::{CaptureStream, CoreResult};

use async_trait::async_trait;

/// Container/codec pair every segment is recorded in.
pub const WEBM_VP8_OPUS: &str = "video/webm;codecs=vp8,opus";

/// Encoder construction options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Requested container/codec pair.
    pub mime_type: String,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            mime_type: WEBM_VP8_OPUS.to_string(),
        }
    }
}

/// Finished, encoded media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlob {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Container/codec of `bytes`.
    pub mime_type: String,
}

impl MediaBlob {
    /// Size of the encoded media in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when the encoder produced nothing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Platform stream-to-file encoder for one recording attempt.
#[async_trait]
pub trait MediaEncoder: Send {
    /// Start encoding the stream the encoder was created for.
    async fn start(&mut self) -> CoreResult<()>;

    /// Suspend encoding; media arriving while paused is dropped.
    async fn pause(&mut self) -> CoreResult<()>;

    /// Continue encoding after a pause.
    async fn resume(&mut self) -> CoreResult<()>;

    /// Finalize and hand back the encoded media.
    async fn stop(&mut self) -> CoreResult<MediaBlob>;
}

/// Creates encoders bound to a capture stream.
pub trait EncoderFactory: Send + Sync {
    /// Whether `mime_type` can be produced.
    fn is_type_supported(&self, mime_type: &str) -> bool;

    /// Build an encoder reading from `stream`.
    fn create(
        &self,
        stream: &CaptureStream,
        options: &EncoderOptions,
    ) -> CoreResult<Box<dyn MediaEncoder>>;
}
