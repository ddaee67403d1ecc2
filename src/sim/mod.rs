//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh, fixed in-tick ordering
//! - All randomness flows through an injected `rand::Rng` source
//! - No rendering or platform dependencies

pub mod biome;
pub mod obstacles;
pub mod plane;
pub mod player;
pub mod rect;
pub mod schedule;
pub mod state;
pub mod tick;

pub use biome::{Backdrop, Biome, Element, ElementKind, Layer, BIOMES};
pub use obstacles::{min_gap, Obstacle};
pub use plane::{PlaneEvent, PlaneKind, HELP_PHRASES, PLANE_KINDS};
pub use player::Player;
pub use rect::Rect;
pub use schedule::Scheduler;
pub use state::{GameEvent, RunPhase, RunState, SimTask};
pub use tick::{tick, TickInput};
