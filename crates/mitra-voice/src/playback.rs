//! Audio playback over a `rodio::Sink`.
//!
//! The sink is the stop switch: `stop()` clears the queue and falls silent
//! immediately, which is what gives the speech coordinator its
//! cancel-before-start guarantee. The owning `OutputStream` is not `Send`, so
//! the sink is created on the thread that keeps the stream alive and shared
//! out as `Arc<Sink>`.

use crate::error::{VoiceError, VoiceResult};
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

/// Manages playback of synthesized audio.
pub struct PlaybackSink {
    _stream: OutputStream,
    _stream_handle: OutputStreamHandle,
    sink: Arc<Sink>,
}

impl PlaybackSink {
    /// Create a new sink on the default output device.
    pub fn new() -> VoiceResult<Self> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| VoiceError::Playback(e.to_string()))?;
        let sink = Sink::try_new(&stream_handle)
            .map_err(|e| VoiceError::Playback(e.to_string()))?;
        info!("playback sink ready");
        Ok(Self {
            _stream: stream,
            _stream_handle: stream_handle,
            sink: Arc::new(sink),
        })
    }

    /// Shared handle for cross-thread stop/empty checks.
    pub fn sink(&self) -> Arc<Sink> {
        Arc::clone(&self.sink)
    }

    /// Decode and queue audio bytes (WAV/MP3). No-op for empty input.
    pub fn play_bytes(&self, bytes: &[u8]) -> VoiceResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        let cursor = Cursor::new(bytes.to_vec());
        let source = rodio::Decoder::new(cursor)
            .map_err(|e| VoiceError::Playback(format!("decode failed: {}", e)))?;
        self.sink.append(source.convert_samples::<f32>());
        Ok(())
    }

    /// Stop playback immediately and clear the queue.
    pub fn stop(&self) {
        self.sink.stop();
    }

    /// Whether the sink currently has queued samples (playing or pending).
    pub fn is_playing(&self) -> bool {
        !self.sink.empty()
    }

    /// Block until all currently queued audio has finished (for tests).
    pub fn sleep_until_end(&self) {
        self.sink.sleep_until_end();
    }
}
