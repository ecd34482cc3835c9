//! Play/pause intent for a webtoon's audio clip.
//!
//! Decoding and streaming belong to an [`AudioBackend`]; this module only tracks whether the
//! user wants the clip playing and makes sure the backend is opened once, on first play.

use anyhow::{Context, Result};
use tracing::info;
use url::Url;

/// External audio transport.
pub trait AudioBackend {
    fn open(&mut self, url: &Url) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
}

/// Backend that only records intent in the log.
#[derive(Debug, Default)]
pub struct TracingBackend {
    current: Option<Url>,
}

impl AudioBackend for TracingBackend {
    fn open(&mut self, url: &Url) -> Result<()> {
        info!(%url, "audio opened");
        self.current = Some(url.clone());
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        info!(url = ?self.current.as_ref().map(Url::as_str), "audio play");
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        info!(url = ?self.current.as_ref().map(Url::as_str), "audio pause");
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// Per-item audio toggle.
#[derive(Debug)]
pub struct AudioControl<B: AudioBackend> {
    audio_url: String,
    backend: B,
    opened: bool,
    playing: bool,
}

impl<B: AudioBackend> AudioControl<B> {
    pub fn new(audio_url: impl Into<String>, backend: B) -> Self {
        Self { audio_url: audio_url.into(), backend, opened: false, playing: false }
    }

    pub fn is_playing(&self) -> bool { self.playing }

    pub fn audio_url(&self) -> &str { &self.audio_url }

    pub fn backend(&self) -> &B { &self.backend }

    /// Pause when playing, otherwise (open on first use and) play. State only flips once the
    /// backend call succeeded.
    pub fn toggle(&mut self) -> Result<PlaybackState> {
        if self.playing {
            self.backend.pause()?;
            self.playing = false;
            return Ok(PlaybackState::Paused);
        }
        if !self.opened {
            let url = Url::parse(&self.audio_url)
                .with_context(|| format!("invalid audio URL: {}", self.audio_url))?;
            self.backend.open(&url)?;
            self.opened = true;
        }
        self.backend.play()?;
        self.playing = true;
        Ok(PlaybackState::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl AudioBackend for Recorder {
        fn open(&mut self, url: &Url) -> Result<()> {
            self.calls.push(format!("open {url}"));
            Ok(())
        }
        fn play(&mut self) -> Result<()> {
            self.calls.push("play".into());
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            self.calls.push("pause".into());
            Ok(())
        }
    }

    #[test]
    fn alternates_and_opens_once() {
        let url = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";
        let mut ctl = AudioControl::new(url, Recorder::default());
        assert!(!ctl.is_playing());
        assert_eq!(ctl.toggle().unwrap(), PlaybackState::Playing);
        assert_eq!(ctl.toggle().unwrap(), PlaybackState::Paused);
        assert_eq!(ctl.toggle().unwrap(), PlaybackState::Playing);
        assert!(ctl.is_playing());
        assert_eq!(ctl.backend().calls, [format!("open {url}"), "play".into(), "pause".into(), "play".into()]);
    }

    #[test]
    fn bad_url_leaves_state_untouched() {
        let mut ctl = AudioControl::new("not a url", Recorder::default());
        assert!(ctl.toggle().is_err());
        assert!(!ctl.is_playing());
        assert!(ctl.backend().calls.is_empty());
    }

    struct Broken;

    impl AudioBackend for Broken {
        fn open(&mut self, _url: &Url) -> Result<()> { Ok(()) }
        fn play(&mut self) -> Result<()> { Err(anyhow::anyhow!("no output device")) }
        fn pause(&mut self) -> Result<()> { Ok(()) }
    }

    #[test]
    fn failed_play_stays_paused() {
        let mut ctl = AudioControl::new("https://example.com/a.mp3", Broken);
        assert!(ctl.toggle().is_err());
        assert!(!ctl.is_playing());
    }
}
