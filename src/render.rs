//! Renderer boundary
//!
//! The simulation never draws. Once per tick, after the update, the
//! driver captures a borrowed snapshot of everything drawable and hands
//! it to whatever `RenderSink` is plugged in. Nothing the sink does flows
//! back into the simulation.

use glam::Vec2;

use crate::sim::{Backdrop, Obstacle, PlaneKind, Player, RunPhase, RunState};

/// Borrowed view of one frame's drawable state
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub phase: RunPhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub backdrop: &'a Backdrop,
    /// Active flyover, if any: archetype plus current position
    pub plane: Option<(&'static PlaneKind, Vec2)>,
    pub help_bubble: Option<&'static str>,
    pub score: u64,
    pub speed: f32,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a RunState) -> Self {
        Self {
            phase: state.phase,
            player: &state.player,
            obstacles: &state.obstacles,
            backdrop: &state.backdrop,
            plane: state
                .plane
                .active
                .then(|| (state.plane.kind_info(), state.plane.pos)),
            help_bubble: state.help_bubble,
            score: state.score,
            speed: state.speed,
        }
    }
}

/// Sink the driver presents each frame to. The canvas renderer implements
/// this on the web; headless runs use `NullSink`.
pub trait RenderSink {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_capture_reflects_state() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = RunState::new(&mut rng);
        state.score = 42;
        let frame = Frame::capture(&state);
        assert_eq!(frame.score, 42);
        assert_eq!(frame.phase, RunPhase::Menu);
        assert!(frame.plane.is_none());
        assert!(frame.obstacles.is_empty());
    }

    #[test]
    fn test_capture_exposes_active_plane() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut state = RunState::new(&mut rng);
        state.plane.active = true;
        state.plane.pos = Vec2::new(100.0, 80.0);
        let frame = Frame::capture(&state);
        let (kind, pos) = frame.plane.expect("plane should be visible");
        assert_eq!(kind.name, "prop");
        assert_eq!(pos, Vec2::new(100.0, 80.0));
    }
}
