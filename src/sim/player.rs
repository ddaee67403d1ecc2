//! Player physics state machine
//!
//! Plain Euler integration at one step per tick, a ground clamp, and the
//! jump buffer: a jump pressed up to `JUMP_BUFFER_TIME` ticks before
//! landing fires on touchdown instead of being dropped.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::*;

/// The player character. `pos.y` is the bottom edge, matching the ground
/// line and obstacle bases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, GROUND_LEVEL),
            size: Vec2::new(PLAYER_SIZE, PLAYER_SIZE),
            vel_y: 0.0,
            on_ground: true,
        }
    }

    /// Collision box (top-left anchored)
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y - self.size.y, self.size.x, self.size.y)
    }
}

/// Advance one physics tick. Returns true if the player touched down this
/// tick (whether or not a buffered jump immediately re-launched them).
pub fn advance(
    player: &mut Player,
    gravity: f32,
    jump_impulse: f32,
    ground_level: f32,
    jump_buffer: &mut u32,
) -> bool {
    player.vel_y += gravity;
    player.pos.y += player.vel_y;

    if player.pos.y >= ground_level {
        player.pos.y = ground_level;
        player.vel_y = 0.0;
        let was_airborne = !player.on_ground;
        if was_airborne && *jump_buffer > 0 {
            // Buffered jump fires on touchdown
            player.vel_y = jump_impulse;
            *jump_buffer = 0;
            player.on_ground = false;
        } else {
            player.on_ground = true;
        }
        was_airborne
    } else {
        player.on_ground = false;
        false
    }
}

/// Handle a discrete jump input: launch if grounded, otherwise arm the
/// buffer. A fresh press overwrites any smaller pending buffer, it never
/// accumulates.
pub fn request_jump(player: &mut Player, jump_impulse: f32, jump_buffer: &mut u32) {
    if player.on_ground {
        player.vel_y = jump_impulse;
        player.on_ground = false;
    } else {
        *jump_buffer = JUMP_BUFFER_TIME;
    }
}
