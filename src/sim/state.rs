//! Run state and simulation events
//!
//! All mutable run state lives in one `RunState` aggregate passed into
//! each component's update; there are no process-wide singletons.

use rand::Rng;

use super::biome::Backdrop;
use super::obstacles::{self, Obstacle};
use super::plane::PlaneEvent;
use super::player::Player;
use super::schedule::Scheduler;
use crate::consts::*;

/// Current phase of the run state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting for the start signal
    Menu,
    /// Active run
    Running,
    /// Collision ended the run
    GameOver,
}

/// Events emitted by the frame loop for external collaborators
/// (audio, UI, persistence). The simulation never consumes these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RunStarted,
    RunEnded { score: u64 },
    PlaneSpawned,
    ScoreMilestone { score: u64 },
}

/// Tasks the simulation schedules against its own clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimTask {
    HideHelpBubble,
}

/// The complete run state
#[derive(Debug, Clone)]
pub struct RunState {
    pub phase: RunPhase,
    /// Simulation tick counter, monotonic across runs
    pub time_ticks: u64,
    pub player: Player,
    /// Insertion order = spawn order; the rightmost obstacle is newest
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// World scroll speed, floor-clamped and non-decreasing within a run
    pub speed: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Safe obstacle separation, recomputed every tick from the physics
    pub min_gap: i32,
    pub gap_counter: f32,
    pub jump_buffer: u32,
    /// Pacing scalar for the audio collaborator, `sqrt(speed / 4)`
    pub music_tempo: f32,
    pub plane: PlaneEvent,
    pub backdrop: Backdrop,
    /// Phrase shown over the rider while a plane passes
    pub help_bubble: Option<&'static str>,
    pub schedule: Scheduler<SimTask>,
}

impl RunState {
    pub fn new(rng: &mut impl Rng) -> Self {
        let speed = START_SPEED;
        Self {
            phase: RunPhase::Menu,
            time_ticks: 0,
            player: Player::spawn(),
            obstacles: Vec::new(),
            score: 0,
            speed,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            min_gap: obstacles::min_gap(speed, GRAVITY, JUMP_IMPULSE),
            gap_counter: 0.0,
            jump_buffer: 0,
            music_tempo: 1.0,
            plane: PlaneEvent::new(),
            backdrop: Backdrop::new(rng),
            help_bubble: None,
            schedule: Scheduler::new(),
        }
    }

    /// Reset everything for a fresh run and enter the Running phase
    pub fn reset_run(&mut self, rng: &mut impl Rng) {
        self.player = Player::spawn();
        self.obstacles.clear();
        self.score = 0;
        self.speed = START_SPEED;
        self.min_gap = obstacles::min_gap(self.speed, self.gravity, self.jump_impulse);
        // Start with a full gap budget so the first obstacle is not
        // artificially delayed
        self.gap_counter = self.min_gap as f32;
        self.jump_buffer = 0;
        self.music_tempo = 1.0;
        self.plane = PlaneEvent::new();
        self.backdrop = Backdrop::new(rng);
        self.help_bubble = None;
        self.schedule.clear();
        self.phase = RunPhase::Running;
        log::info!("run started");
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }
}
