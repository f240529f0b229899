//! Sound effects
//!
//! Every cue is a short synthesized sine tone, so no sound assets ship with
//! the game. Playback needs the `audio` feature; without it the manager only
//! logs the cues it receives.

use crate::events::Sfx;
use std::time::Duration;

/// A synthesized tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency: f32,
    pub duration: Duration,
    pub amplitude: f32,
}

impl Sfx {
    /// The tone played for this cue
    pub fn tone(&self) -> Tone {
        let (millis, frequency, amplitude) = match self {
            Sfx::Clear => (100, 880.0, 0.5),    // A5
            Sfx::Drop => (50, 110.0, 0.5),      // A2
            Sfx::GameOver => (1000, 55.0, 0.7), // A1
            Sfx::Move => (50, 220.0, 0.5),      // A3
            Sfx::Rotate => (100, 440.0, 0.5),   // A4
        };
        Tone {
            frequency,
            duration: Duration::from_millis(millis),
            amplitude,
        }
    }
}

#[cfg(feature = "audio")]
mod backend {
    use super::Tone;
    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    pub struct Output {
        _stream: OutputStream,
        stream_handle: OutputStreamHandle,
    }

    impl Output {
        pub fn open() -> Option<Self> {
            match OutputStream::try_default() {
                Ok((stream, stream_handle)) => Some(Self {
                    _stream: stream,
                    stream_handle,
                }),
                Err(e) => {
                    tracing::warn!("No audio output device: {}", e);
                    None
                }
            }
        }

        pub fn play(&self, tone: Tone, volume: f32) {
            let Ok(sink) = Sink::try_new(&self.stream_handle) else {
                return;
            };
            let source = SineWave::new(tone.frequency)
                .take_duration(tone.duration)
                .amplify(tone.amplitude);
            sink.set_volume(volume);
            sink.append(source);
            sink.detach(); // Let it play and clean up automatically
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use super::Tone;

    #[allow(dead_code)]
    pub struct Output;

    impl Output {
        pub fn open() -> Option<Self> {
            tracing::info!("Built without the audio feature, sound is disabled");
            None
        }

        pub fn play(&self, _tone: Tone, _volume: f32) {}
    }
}

/// Audio manager handles all sound playback
pub struct AudioManager {
    output: Option<backend::Output>,
    sfx_volume: f32,
    enabled: bool,
}

impl AudioManager {
    /// Create an audio manager; a missing device means silent play
    pub fn new(enabled: bool, sfx_volume: f32) -> Self {
        let output = if enabled { backend::Output::open() } else { None };
        Self {
            output,
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
            enabled,
        }
    }

    /// Whether sound actually reaches a device
    pub fn is_active(&self) -> bool {
        self.enabled && self.output.is_some() && self.sfx_volume > 0.0
    }

    /// Play a sound effect
    pub fn play_sfx(&mut self, sfx: Sfx) {
        tracing::trace!("sfx {:?}", sfx);
        if !self.is_active() {
            return;
        }
        if let Some(output) = &self.output {
            output.play(sfx.tone(), self.sfx_volume);
        }
    }
}
