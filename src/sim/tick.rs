//! Fixed timestep frame update
//!
//! Advances the whole simulation one tick in a fixed order: plane event,
//! audio pacing, player physics, obstacle scroll, collision, spawn
//! policy, scoring, backdrop. Emits a small closed set of events for the
//! external collaborators; the simulation itself never reads them back.

use rand::Rng;

use super::obstacles;
use super::plane::HELP_PHRASES;
use super::player;
use super::state::{GameEvent, RunPhase, RunState, SimTask};
use crate::consts::*;

/// Input signals for a single tick. The core is agnostic to the
/// originating device.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump pressed this tick
    pub jump: bool,
    /// Start/restart requested this tick
    pub start: bool,
}

/// Advance the game by one tick
pub fn tick(state: &mut RunState, input: &TickInput, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.start && state.phase != RunPhase::Running {
        // The start tick only arms the run; simulation begins next tick
        state.reset_run(rng);
        events.push(GameEvent::RunStarted);
        return events;
    }
    if !state.is_running() {
        return events;
    }

    state.time_ticks += 1;

    for task in state.schedule.fire(state.time_ticks) {
        match task {
            SimTask::HideHelpBubble => state.help_bubble = None,
        }
    }

    // Plane event trigger/advance
    if state.plane.advance(state.score, rng) {
        let phrase = HELP_PHRASES[rng.random_range(0..HELP_PHRASES.len())];
        state.help_bubble = Some(phrase);
        state
            .schedule
            .schedule(state.time_ticks + HELP_BUBBLE_TICKS, SimTask::HideHelpBubble);
        events.push(GameEvent::PlaneSpawned);
    }

    // Music tempo tracks speed sublinearly (2x tempo at 4x speed)
    state.music_tempo = (state.speed / 4.0).sqrt();

    // Player physics
    if input.jump {
        player::request_jump(&mut state.player, state.jump_impulse, &mut state.jump_buffer);
    }
    player::advance(
        &mut state.player,
        state.gravity,
        state.jump_impulse,
        GROUND_LEVEL,
        &mut state.jump_buffer,
    );
    if state.jump_buffer > 0 {
        state.jump_buffer -= 1;
    }

    // Scroll obstacles and drop the ones fully past the left edge
    for ob in state.obstacles.iter_mut() {
        ob.pos.x -= state.speed;
    }
    state.obstacles.retain(|ob| ob.right() > 0.0);

    // Collision ends the run; the rest of the tick is skipped
    let player_rect = state.player.rect();
    if state.obstacles.iter().any(|ob| player_rect.overlaps(&ob.rect())) {
        state.phase = RunPhase::GameOver;
        events.push(GameEvent::RunEnded { score: state.score });
        log::info!("run ended at score {}", state.score);
        return events;
    }

    // Spawn policy with the gap recomputed for the current speed
    state.min_gap = obstacles::min_gap(state.speed, state.gravity, state.jump_impulse);
    obstacles::run_spawn_policy(
        &mut state.obstacles,
        &mut state.gap_counter,
        state.min_gap,
        state.speed,
        rng,
    );

    // Scoring and difficulty ramp
    state.score += 1;
    if state.score % SPEED_MILESTONE == 0 {
        state.speed += SPEED_STEP;
        events.push(GameEvent::ScoreMilestone { score: state.score });
    }
    state.speed = state.speed.max(START_SPEED);

    state.backdrop.advance(state.speed, rng);

    events
}
