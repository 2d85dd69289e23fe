//! Sound effects
//!
//! Game events map to a handful of effects. On the web they are generated
//! procedurally with the Web Audio API - no external files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Meteor destroyed
    Explosion,
    /// Player hit
    GameOver,
    /// Level timer ran out
    LevelUp,
}

impl SoundEffect {
    /// Sound to play for an event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::LaserFired => Some(SoundEffect::Laser),
            GameEvent::MeteorDestroyed { .. } => Some(SoundEffect::Explosion),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::LevelComplete { .. } => Some(SoundEffect::LevelUp),
            GameEvent::PauseToggled { .. } => None,
        }
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
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
            }
        }

        /// Pick up changed volume/mute settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Laser => self.play_laser(ctx, vol),
                SoundEffect::Explosion => self.play_explosion(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Laser - fast descending zap
        fn play_laser(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(300.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.14).ok();
        }

        /// Meteor destroyed - crunch over a bass thump
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(900.0, t + 0.02).ok();
                osc.frequency().set_value_at_time(90.0, t + 0.04).ok();
                osc.frequency().set_value_at_time(600.0, t + 0.06).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.3)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.32).ok();
            }

            if let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(35.0, t + 0.25)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.28).ok();
            }
        }

        /// Game over - three falling tones
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [392.0, 311.0, 196.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.25;
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) {
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.4, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.4)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.45).ok();
                }
            }
        }

        /// Level complete - rising arpeggio
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].into_iter().enumerate() {
                let start = t + i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain().set_value_at_time(vol * 0.3, start).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, start + 0.3)
                        .ok();
                    osc.start_with_when(start).ok();
                    osc.stop_with_when(start + 0.32).ok();
                }
            }
        }
    }
}
