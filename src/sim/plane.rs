//! Plane flyover events
//!
//! A rare scripted, non-interactive flyover triggered at score milestones.
//! Archetypes cycle in a fixed order; at most one plane is airborne at a
//! time. The stranded rider shouts a help phrase while the plane passes.

use glam::Vec2;
use rand::Rng;

use crate::color::Rgb;
use crate::consts::*;

/// A plane archetype: fixed silhouette, altitude and cruise speed
#[derive(Debug, Clone, Copy)]
pub struct PlaneKind {
    pub name: &'static str,
    pub base_speed: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub altitude: f32,
}

/// The fixed flyover rotation
pub const PLANE_KINDS: [PlaneKind; 4] = [
    PlaneKind {
        name: "prop",
        base_speed: 3.0,
        width: 60.0,
        height: 18.0,
        color: Rgb::new(0xb2, 0x22, 0x22),
        altitude: 80.0,
    },
    PlaneKind {
        name: "smalljet",
        base_speed: 6.0,
        width: 48.0,
        height: 16.0,
        color: Rgb::new(0x1e, 0x90, 0xff),
        altitude: 70.0,
    },
    PlaneKind {
        name: "airliner",
        base_speed: 9.0,
        width: 80.0,
        height: 24.0,
        color: Rgb::new(0xe0, 0xe0, 0xe0),
        altitude: 60.0,
    },
    PlaneKind {
        name: "fighter",
        base_speed: 15.0,
        width: 36.0,
        height: 12.0,
        color: Rgb::new(0x44, 0x44, 0x44),
        altitude: 50.0,
    },
];

/// Shouted while a plane is overhead
pub const HELP_PHRASES: [&str; 8] = [
    "Help down here!",
    "I need help!",
    "Zombies ahead!",
    "Hold on!!",
    "Watch out!",
    "Look out!",
    "Help!",
    "Please!",
];

/// Flyover state machine: idle -> active -> idle
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneEvent {
    pub active: bool,
    /// Archetype of the active (or most recent) plane
    pub kind: usize,
    pub pos: Vec2,
    pub speed: f32,
    /// Score that triggers the next flyover
    pub next_score: u64,
    /// Planes spawned so far this run; also drives the archetype cycle
    pub count: u32,
}

impl Default for PlaneEvent {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaneEvent {
    pub fn new() -> Self {
        Self {
            active: false,
            kind: 0,
            pos: Vec2::ZERO,
            speed: 0.0,
            next_score: FIRST_PLANE_SCORE,
            count: 0,
        }
    }

    /// Archetype descriptor of the active plane
    pub fn kind_info(&self) -> &'static PlaneKind {
        &PLANE_KINDS[self.kind % PLANE_KINDS.len()]
    }

    /// Per-tick trigger check and movement. Returns true on the tick a
    /// plane spawns. Triggering is only evaluated while idle.
    pub fn advance(&mut self, score: u64, rng: &mut impl Rng) -> bool {
        let spawned = if !self.active && score >= self.next_score {
            self.kind = self.count as usize % PLANE_KINDS.len();
            let k = self.kind_info();
            self.active = true;
            self.pos = Vec2::new(k.width * 1.2, k.altitude);
            self.speed = (k.base_speed * 0.6).max(2.0);
            self.count += 1;
            self.next_score += rng.random_range(200..=400);
            log::info!("plane spawned: {} at score {}", k.name, score);
            true
        } else {
            false
        };

        if self.active {
            self.pos.x += self.speed;
            let k = self.kind_info();
            if self.pos.x > GAME_WIDTH - k.width * 0.5 {
                self.active = false;
            }
        }
        spawned
    }
}
