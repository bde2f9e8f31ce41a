//! Audio system using Web Audio API
//!
//! Sound effects are synthesized from oscillators, so no asset files are
//! needed. Native builds get a silent manager with the same surface.

#[cfg(not(target_arch = "wasm32"))]
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallHit,
    /// Ball left the court
    Score,
}

impl SoundEffect {
    /// Sound for a simulation notification
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::PaddleHit { .. } => SoundEffect::PaddleHit,
            GameEvent::WallHit => SoundEffect::WallHit,
            GameEvent::Score { .. } => SoundEffect::Score,
        }
    }
}

/// Play the sound for each event of a frame, in order
pub fn play_events(audio: &AudioManager, events: &[GameEvent]) {
    for event in events {
        audio.play(SoundEffect::for_event(event));
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundEffect;
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        /// Page currently hidden and muting on blur
        blurred: bool,
        mute_on_blur: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Fails outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
                blurred: false,
                mute_on_blur: settings.mute_on_blur,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Page visibility changed
        pub fn set_focused(&mut self, focused: bool) {
            self.blurred = self.mute_on_blur && !focused;
        }

        fn effective_volume(&self) -> f32 {
            if self.blurred { 0.0 } else { self.volume }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let played = match effect {
                SoundEffect::PaddleHit => play_paddle_hit(ctx, vol),
                SoundEffect::WallHit => play_wall_hit(ctx, vol),
                SoundEffect::Score => play_score(ctx, vol),
            };
            if played.is_none() {
                log::warn!("Could not play {:?}", effect);
            }
        }
    }

    /// Oscillator routed through a gain node to the speakers
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short square blip with a fast decay
    fn blip(
        ctx: &AudioContext,
        freq: f32,
        peak: f32,
        start: f64,
        length: f64,
    ) -> Option<()> {
        let (osc, gain) = create_osc(ctx, freq, OscillatorType::Square)?;
        let t = ctx.current_time() + start;

        gain.gain().set_value_at_time(peak, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(t + length + 0.02).ok()?;
        Some(())
    }

    /// Paddle hit - mid blip
    fn play_paddle_hit(ctx: &AudioContext, vol: f32) -> Option<()> {
        blip(ctx, 460.0, vol * 0.4, 0.0, 0.06)
    }

    /// Wall hit - low blip
    fn play_wall_hit(ctx: &AudioContext, vol: f32) -> Option<()> {
        blip(ctx, 226.0, vol * 0.3, 0.0, 0.05)
    }

    /// Point scored - falling two-note buzz
    fn play_score(ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [490.0, 245.0].iter().enumerate() {
            blip(ctx, *freq, vol * 0.35, i as f64 * 0.12, 0.2)?;
        }
        Some(())
    }
}

// =============================================================================
// Native stubs
// =============================================================================

/// Silent audio manager for native builds
#[cfg(not(target_arch = "wasm32"))]
pub struct AudioManager {
    volume: f32,
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        Self {
            volume: settings.effective_volume(),
        }
    }

    pub fn resume(&self) {}

    pub fn set_focused(&mut self, _focused: bool) {}

    pub fn play(&self, effect: SoundEffect) {
        if self.volume > 0.0 {
            log::trace!("sfx {:?}", effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Side;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PaddleHit { side: Side::Left }),
            SoundEffect::PaddleHit
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::WallHit), SoundEffect::WallHit);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Score {
                scorer: Side::Right
            }),
            SoundEffect::Score
        );
    }

    #[test]
    fn test_play_events_without_output() {
        let mut settings = Settings::default();
        settings.muted = true;
        let audio = AudioManager::new(&settings);
        play_events(&audio, &[GameEvent::WallHit, GameEvent::Score { scorer: Side::Left }]);
    }
}
