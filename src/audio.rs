//! Sound effects
//!
//! Stubs only: a short procedurally generated blip per effect on the web
//! (Web Audio API), silent on native.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Food eaten
    Eat,
    /// Pause toggled
    Pause,
    /// Snake died
    GameOver,
    /// New high score
    HighScore,
}

impl SoundEffect {
    /// Which sound (if any) accompanies a game event
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Ate { .. } => Some(SoundEffect::Eat),
            GameEvent::Paused | GameEvent::Resumed => Some(SoundEffect::Pause),
            GameEvent::Died(_) => Some(SoundEffect::GameOver),
            GameEvent::NewHighScore { .. } => Some(SoundEffect::HighScore),
            GameEvent::SpeedChanged { .. }
            | GameEvent::ReturnedToMenu
            | GameEvent::BoardFilled => None,
        }
    }

    /// Note sequence: (frequency Hz, start offset s, length s)
    fn notes(self) -> &'static [(f32, f64, f64)] {
        match self {
            SoundEffect::Start => &[(440.0, 0.0, 0.1), (660.0, 0.08, 0.12)],
            SoundEffect::Eat => &[(880.0, 0.0, 0.08)],
            SoundEffect::Pause => &[(300.0, 0.0, 0.06)],
            SoundEffect::GameOver => &[
                (400.0, 0.0, 0.3),
                (350.0, 0.2, 0.3),
                (300.0, 0.4, 0.3),
                (200.0, 0.6, 0.4),
            ],
            SoundEffect::HighScore => &[
                (500.0, 0.0, 0.25),
                (600.0, 0.08, 0.25),
                (700.0, 0.16, 0.25),
                (800.0, 0.24, 0.25),
                (1000.0, 0.32, 0.3),
            ],
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            // May fail outside a secure context
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            ctx
        };
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Apply volume settings
    pub fn configure(&mut self, settings: &crate::Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the sounds for a batch of game events
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, effect: SoundEffect) {
        use web_sys::{AudioContextState, OscillatorType};

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let wave = match effect {
            SoundEffect::HighScore | SoundEffect::Start => OscillatorType::Triangle,
            SoundEffect::Eat => OscillatorType::Square,
            SoundEffect::Pause | SoundEffect::GameOver => OscillatorType::Sine,
        };
        let now = ctx.current_time();
        for &(freq, offset, length) in effect.notes() {
            let Some((osc, gain)) = Self::create_osc(ctx, freq, wave) else {
                continue;
            };
            let t = now + offset;
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + length)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + length + 0.05).ok();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, effect: SoundEffect) {
        if self.effective_volume() > 0.0 {
            log::trace!("sound {:?} ({} notes)", effect, effect.notes().len());
        }
    }

    /// Create an oscillator routed through a gain node
    #[cfg(target_arch = "wasm32")]
    fn create_osc(
        ctx: &web_sys::AudioContext,
        freq: f32,
        osc_type: web_sys::OscillatorType,
    ) -> Option<(web_sys::OscillatorNode, web_sys::GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}
