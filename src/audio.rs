//! Chiptune music collaborator
//!
//! A 4-bar square-wave melody over an 808-style sine bass, sequenced on
//! the simulation clock through the shared tick scheduler. Tempo follows
//! the game speed sublinearly; the whole loop shifts a semitone up and
//! down every few repetitions to keep it from wearing thin. Synthesis
//! uses Web Audio oscillators on wasm and is silent elsewhere.

use crate::consts::TICK_HZ;
use crate::sim::Scheduler;

// Melody notes (C major), Hz
const C5: f32 = 523.25;
const E5: f32 = 659.25;
const G5: f32 = 783.99;
const A5: f32 = 880.00;
const C6: f32 = 1046.50;
// 808 bass notes
const C2: f32 = 65.41;
const E2: f32 = 82.41;
const G2: f32 = 98.00;
const A2: f32 = 110.00;
const C3: f32 = 130.81;

/// One sequencer step: (bass Hz, melody Hz, base duration ms).
/// A frequency of 0.0 is a rest.
pub type MelodyStep = (f32, f32, u32);

/// The looped song: four bars of alternating note/rest steps
pub const MELODY: [MelodyStep; 32] = [
    // Bar 1
    (C2, C5, 90), (0.0, 0.0, 60), (G2, G5, 90), (0.0, 0.0, 60),
    (C2, C5, 90), (0.0, 0.0, 60), (G2, G5, 90), (0.0, 0.0, 60),
    // Bar 2
    (E2, E5, 90), (0.0, 0.0, 60), (A2, A5, 90), (0.0, 0.0, 60),
    (E2, E5, 90), (0.0, 0.0, 60), (A2, A5, 90), (0.0, 0.0, 60),
    // Bar 3
    (G2, G5, 90), (0.0, 0.0, 60), (C3, C6, 90), (0.0, 0.0, 60),
    (G2, G5, 90), (0.0, 0.0, 60), (C3, C6, 90), (0.0, 0.0, 60),
    // Bar 4
    (E2, E5, 90), (0.0, 0.0, 60), (G2, G5, 90), (0.0, 0.0, 60),
    (C2, C5, 90), (0.0, 0.0, 60), (E2, E5, 90), (0.0, 0.0, 60),
];

/// Full melody loops between pitch-shift steps (4 loops = 16 bars)
const LOOPS_PER_PITCH_SHIFT: u32 = 4;

/// A step with the pitch shift already applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteStep {
    pub bass: f32,
    pub melody: f32,
    pub base_dur_ms: u32,
}

/// Pure sequencer state: melody position plus the pitch-shift cycle
/// normal -> up a semitone -> normal -> down a semitone
#[derive(Debug, Clone, Default)]
pub struct MusicState {
    index: usize,
    full_loops: u32,
    shift_state: u8,
    multiplier: f32,
}

impl MusicState {
    pub fn new() -> Self {
        Self {
            index: 0,
            full_loops: 0,
            shift_state: 0,
            multiplier: 1.0,
        }
    }

    /// Current pitch multiplier (for display/debugging)
    pub fn multiplier(&self) -> f32 {
        self.multiplier
    }

    /// Produce the next step and advance. The multiplier only changes on
    /// loop boundaries, so a shift never lands mid-bar.
    pub fn advance(&mut self) -> NoteStep {
        let (bass, melody, base_dur_ms) = MELODY[self.index];
        let step = NoteStep {
            bass: bass * self.multiplier,
            melody: melody * self.multiplier,
            base_dur_ms,
        };

        self.index = (self.index + 1) % MELODY.len();
        if self.index == 0 {
            self.full_loops += 1;
            if self.full_loops >= LOOPS_PER_PITCH_SHIFT {
                self.full_loops = 0;
                self.shift_state = (self.shift_state + 1) % 4;
                let semitone = 2f32.powf(1.0 / 12.0);
                self.multiplier = match self.shift_state {
                    1 => semitone,
                    3 => 1.0 / semitone,
                    _ => 1.0,
                };
            }
        }
        step
    }
}

/// Step duration at the given tempo, floored at 40 ms
pub fn step_duration_ms(base_dur_ms: u32, tempo: f32) -> u32 {
    ((base_dur_ms as f32 / tempo.max(f32::EPSILON)).round() as u32).max(40)
}

/// Convert a millisecond duration to simulation ticks, at least one
pub fn ms_to_ticks(ms: u32) -> u64 {
    ((ms as u64 * TICK_HZ as u64).div_ceil(1000)).max(1)
}

/// Tick-paced music player. `advance` is called once per simulation tick
/// with the current tempo; notes are scheduled on the shared clock.
pub struct ChiptunePlayer {
    music: MusicState,
    schedule: Scheduler<()>,
    playing: bool,
    muted: bool,
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
}

impl Default for ChiptunePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChiptunePlayer {
    pub fn new() -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = {
            let ctx = web_sys::AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("failed to create AudioContext - music disabled");
            }
            ctx
        };
        Self {
            music: MusicState::new(),
            schedule: Scheduler::new(),
            playing: false,
            muted: false,
            #[cfg(target_arch = "wasm32")]
            ctx,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Start the loop from the top; the first note fires on the next tick
    pub fn start(&mut self, now_tick: u64) {
        self.music = MusicState::new();
        self.schedule.clear();
        self.schedule.schedule(now_tick, ());
        self.playing = true;
        self.resume_context();
        log::info!("music started");
    }

    pub fn stop(&mut self) {
        self.playing = false;
        self.schedule.clear();
        log::info!("music stopped");
    }

    /// Pump the sequencer. Due notes play immediately and schedule their
    /// successor `duration / tempo` ticks out.
    pub fn advance(&mut self, now_tick: u64, tempo: f32) {
        if !self.playing {
            return;
        }
        for _ in self.schedule.fire(now_tick) {
            let step = self.music.advance();
            let dur_ms = step_duration_ms(step.base_dur_ms, tempo);
            if !self.muted {
                self.play_step(&step, dur_ms);
            }
            self.schedule.schedule(now_tick + ms_to_ticks(dur_ms), ());
        }
    }

    /// Resume the audio context (browsers require a user gesture first)
    pub fn resume_context(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn play_step(&self, step: &NoteStep, dur_ms: u32) {
        if step.bass > 0.0 {
            self.play_tone(step.bass, dur_ms);
        }
        if step.melody > 0.0 {
            self.play_tone(step.melody, dur_ms);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_step(&self, _step: &NoteStep, _dur_ms: u32) {}

    /// Square-wave melody voice; low notes get an 808-style sine with a
    /// pitch drop and long decay instead
    #[cfg(target_arch = "wasm32")]
    fn play_tone(&self, freq: f32, dur_ms: u32) {
        use web_sys::OscillatorType;

        let Some(ctx) = &self.ctx else { return };
        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let t = ctx.current_time();
        let dur = dur_ms as f64 / 1000.0;
        if freq <= 150.0 {
            osc.set_type(OscillatorType::Sine);
            // Start an octave up and drop to the bass note
            osc.frequency().set_value_at_time(freq * 2.0, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(freq, t + 0.04)
                .ok();
            gain.gain().set_value_at_time(0.18, t).ok();
            // Longer decay than the note itself, 808 style
            gain.gain()
                .linear_ramp_to_value_at_time(0.0, t + dur * 1.4)
                .ok();
        } else {
            osc.set_type(OscillatorType::Square);
            osc.frequency().set_value(freq);
            gain.gain().set_value_at_time(0.08, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(0.0, t + dur + 0.04)
                .ok();
        }

        osc.start().ok();
        osc.stop_with_when(t + dur + 0.05).ok();
    }
}
