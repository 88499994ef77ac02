//! Speech engine: the [`SpeechSynth`] capability over TTS + rodio.
//!
//! Synthesis is an HTTP round trip, so `speak` never runs it on the caller's
//! thread: jobs are queued to a dedicated playback thread that owns the audio
//! stream and the blocking HTTP client. `cancel` bumps a generation counter
//! (dropping queued and in-synthesis jobs) and stops the sink, so cancellation
//! is immediate even mid-synthesis.

use crate::error::{VoiceError, VoiceResult};
use crate::playback::PlaybackSink;
use crate::synth::{HttpTts, PlaceholderTts, TtsBackend};
use mitra_core::{MitraError, MitraResult, SpeechSynth, Utterance};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use tracing::{info, warn};

struct SpeechJob {
    utterance: Utterance,
    generation: u64,
}

/// [`SpeechSynth`] backed by a TTS backend and a rodio sink.
pub struct RodioSpeech {
    jobs: mpsc::Sender<SpeechJob>,
    sink: Arc<rodio::Sink>,
    generation: Arc<AtomicU64>,
}

impl RodioSpeech {
    /// Spawn the playback thread and hand back the engine. Fails when no
    /// output device is available.
    pub fn new(tts: Box<dyn TtsBackend>) -> VoiceResult<Self> {
        let (jobs, job_rx) = mpsc::channel::<SpeechJob>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let generation = Arc::new(AtomicU64::new(0));
        let thread_generation = Arc::clone(&generation);

        std::thread::Builder::new()
            .name("mitra-voice-playback".to_string())
            .spawn(move || {
                // OutputStream is not Send; it lives and dies with this thread.
                let playback = match PlaybackSink::new() {
                    Ok(p) => p,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(playback.sink()));

                while let Ok(job) = job_rx.recv() {
                    if job.generation != thread_generation.load(Ordering::SeqCst) {
                        continue;
                    }
                    let bytes = match tts.synthesize(&job.utterance) {
                        Ok(b) => b,
                        Err(e) => {
                            warn!("TTS synthesis failed: {}", e);
                            continue;
                        }
                    };
                    // Cancelled while the API round trip was in flight.
                    if job.generation != thread_generation.load(Ordering::SeqCst) {
                        continue;
                    }
                    if let Err(e) = playback.play_bytes(&bytes) {
                        warn!("playback failed: {}", e);
                    }
                }
            })
            .map_err(|e| VoiceError::Playback(e.to_string()))?;

        let sink = ready_rx
            .recv()
            .map_err(|e| VoiceError::Playback(e.to_string()))??;
        Ok(Self {
            jobs,
            sink,
            generation,
        })
    }
}

impl SpeechSynth for RodioSpeech {
    fn speak(&self, utterance: &Utterance) -> MitraResult<()> {
        let generation = self.generation.load(Ordering::SeqCst);
        self.jobs
            .send(SpeechJob {
                utterance: utterance.clone(),
                generation,
            })
            .map_err(|e| MitraError::Speech(e.to_string()))
    }

    fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.sink.stop();
    }
}

/// Probe for the best available speech engine.
///
/// Returns `None` when no output device exists; the coordinator then degrades
/// to visual-only chat. With a device but no `TTS_API_KEY`, the placeholder
/// backend keeps the pipeline wired while staying silent.
pub fn create_best_engine() -> Option<Box<dyn SpeechSynth>> {
    let tts: Box<dyn TtsBackend> = match HttpTts::from_env() {
        Ok(t) => {
            info!("TTS: HTTP backend active");
            Box::new(t)
        }
        Err(_) => {
            info!("TTS: placeholder (set TTS_API_KEY for spoken replies)");
            Box::new(PlaceholderTts)
        }
    };
    match RodioSpeech::new(tts) {
        Ok(engine) => Some(Box::new(engine)),
        Err(e) => {
            info!("speech unavailable, continuing without audio: {}", e);
            None
        }
    }
}
