use log::debug;
#[cfg(feature = "speech")]
use log::warn;
#[cfg(feature = "speech")]
use std::thread;
#[cfg(feature = "speech")]
use std::time::Duration;

/// Reference speech rate in words per minute; maps onto the engine's
/// "normal" rate.
#[cfg(feature = "speech")]
const NORMAL_WPM: f32 = 200.0;

/// Abstract speech capability. Implementations block until the utterance
/// has finished playing and treat every engine failure as best effort.
pub trait Speaker {
    fn speak(&mut self, text: &str, voice_hint: &str, rate_wpm: u32);
}

/// Stand-in used when the `speech` feature is off or no engine could be
/// brought up.
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, text: &str, _voice_hint: &str, _rate_wpm: u32) {
        debug!("[Speech] No engine, dropping utterance {:?}", text);
    }
}

#[cfg(feature = "speech")]
pub struct TtsSpeaker {
    tts: tts::Tts,
}

#[cfg(feature = "speech")]
impl TtsSpeaker {
    /// Brings up the platform engine; `None` (with a warning) when the
    /// platform has none available.
    pub fn new() -> Option<TtsSpeaker> {
        match tts::Tts::default() {
            Ok(tts) => Some(TtsSpeaker { tts }),
            Err(err) => {
                warn!("[Speech] Could not initialize speech engine: {}", err);
                None
            }
        }
    }

    fn try_speak(&mut self, text: &str, voice_hint: &str, rate_wpm: u32) -> Result<(), tts::Error> {
        let features = self.tts.supported_features();

        if features.rate {
            let rate = (self.tts.normal_rate() * rate_wpm as f32 / NORMAL_WPM)
                .clamp(self.tts.min_rate(), self.tts.max_rate());
            self.tts.set_rate(rate)?;
        }

        if features.voice {
            // Unmatched hints keep whatever voice is current.
            let voices = self.tts.voices()?;
            if let Some(voice) = voices
                .iter()
                .find(|v| v.language().as_str().starts_with(voice_hint))
            {
                self.tts.set_voice(voice)?;
            } else {
                debug!("[Speech] No voice for hint {:?}", voice_hint);
            }
        }

        // Say then wait: the quiz treats playback as synchronous.
        self.tts.speak(text, true)?;
        if features.is_speaking {
            while self.tts.is_speaking()? {
                thread::sleep(Duration::from_millis(50));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "speech")]
impl Speaker for TtsSpeaker {
    fn speak(&mut self, text: &str, voice_hint: &str, rate_wpm: u32) {
        if let Err(err) = self.try_speak(text, voice_hint, rate_wpm) {
            warn!("[Speech] Playback failed: {}", err);
        }
    }
}

/// The best speaker the build and platform allow.
pub fn default_speaker() -> Box<dyn Speaker> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "speech")] {
            match TtsSpeaker::new() {
                Some(speaker) => Box::new(speaker),
                None => Box::new(NullSpeaker),
            }
        } else {
            Box::new(NullSpeaker)
        }
    }
}
