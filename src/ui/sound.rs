/// Sound engine: plays the bundled audio assets via rodio.
///
/// Two cues exist, each backed by a file `<assets_dir>/<name>.<extension>`
/// resolved against the same directories as `config.toml`. Playback is
/// fire-and-forget (non-blocking) via rodio's Sink; background music runs
/// asynchronously for as long as the output stream lives.
///
/// Failures never reach the game: callers go through `play_or_warn`,
/// which logs and carries on.
///
/// Compile with `--no-default-features` or without "sound" feature
/// to disable audio entirely (the stub SoundEngine does nothing).

use std::fmt;
use std::path::PathBuf;

use tracing::warn;

use crate::config::AudioConfig;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Jump,
    Background,
}

impl Cue {
    /// Asset name, without extension.
    pub fn name(self) -> &'static str {
        match self {
            Cue::Jump => "jump",
            Cue::Background => "background",
        }
    }
}

#[derive(Debug)]
pub enum AudioError {
    ResourceNotFound(PathBuf),
    Device(String),
    Decode(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::ResourceNotFound(path) => {
                write!(f, "audio asset not found: {}", path.display())
            }
            AudioError::Device(msg) => write!(f, "audio device error: {msg}"),
            AudioError::Decode(msg) => write!(f, "audio decode error: {msg}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Anything that can play a cue.
pub trait Audio {
    fn play(&self, cue: Cue) -> Result<(), AudioError>;
}

/// Plays nothing. Used when audio is disabled or no device is available.
pub struct Silent;

impl Audio for Silent {
    fn play(&self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Play a cue, logging (never propagating) any failure.
pub fn play_or_warn(audio: &dyn Audio, cue: Cue) {
    if let Err(e) = audio.play(cue) {
        warn!(cue = cue.name(), "could not play sound: {e}");
    }
}

/// Locate `<assets_dir>/<name>.<extension>` in the search directories.
/// An absolute `assets_dir` is used as-is.
pub fn resolve_asset(config: &AudioConfig, search_dirs: &[PathBuf], cue: Cue) -> Result<PathBuf, AudioError> {
    let file = format!("{}.{}", cue.name(), config.extension);
    if config.assets_dir.is_absolute() {
        let path = config.assets_dir.join(&file);
        return if path.is_file() { Ok(path) } else { Err(AudioError::ResourceNotFound(path)) };
    }
    search_dirs
        .iter()
        .map(|d| d.join(&config.assets_dir).join(&file))
        .find(|p| p.is_file())
        .ok_or_else(|| AudioError::ResourceNotFound(config.assets_dir.join(&file)))
}

#[cfg(feature = "sound")]
mod inner {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::{resolve_asset, Audio, AudioError, Cue};
    use crate::config::AudioConfig;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        config: AudioConfig,
        search_dirs: Vec<PathBuf>,
    }

    impl SoundEngine {
        /// Open the default output device. `None` if there is none.
        pub fn new(config: &AudioConfig, search_dirs: &[PathBuf]) -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            Some(SoundEngine {
                _stream: stream,
                handle,
                config: config.clone(),
                search_dirs: search_dirs.to_vec(),
            })
        }

        fn volume(&self, cue: Cue) -> f32 {
            match cue {
                Cue::Jump => self.config.jump_volume,
                Cue::Background => self.config.music_volume,
            }
        }
    }

    impl Audio for SoundEngine {
        fn play(&self, cue: Cue) -> Result<(), AudioError> {
            let path = resolve_asset(&self.config, &self.search_dirs, cue)?;
            let file = File::open(&path).map_err(|_| AudioError::ResourceNotFound(path.clone()))?;
            let source = Decoder::new(BufReader::new(file))
                .map_err(|e| AudioError::Decode(format!("{}: {e}", path.display())))?;
            let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;
            sink.set_volume(self.volume(cue));
            sink.append(source);
            sink.detach(); // fire-and-forget
            Ok(())
        }
    }
}

// ════════════════════════════════════════════════════════════
//  Public API: compiles to no-ops when sound feature is off
// ════════════════════════════════════════════════════════════

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new(_config: &AudioConfig, _search_dirs: &[PathBuf]) -> Option<Self> { Some(SoundEngine) }
}

#[cfg(not(feature = "sound"))]
impl Audio for SoundEngine {
    fn play(&self, _cue: Cue) -> Result<(), AudioError> { Ok(()) }
}
