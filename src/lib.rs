//! Gallop - a retro endless-runner game
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step simulation (player physics, obstacle
//!   spawning, biome generation, plane events)
//! - `color`: RGB helpers for biome cross-fades
//! - `render`: Frame snapshot handed to the renderer sink once per tick
//! - `audio`: Chiptune music collaborator paced by the simulation clock
//! - `highscores`: Local leaderboard
//! - `settings`: Player preferences

pub mod audio;
pub mod color;
pub mod highscores;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation tick rate (one tick per display refresh at 60 Hz)
    pub const TICK_HZ: u32 = 60;
    /// Fixed timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICK_HZ as f32;
    /// Maximum catch-up ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical playfield dimensions (pixels)
    pub const GAME_WIDTH: f32 = 900.0;
    pub const GAME_HEIGHT: f32 = 600.0;
    /// Y coordinate of the ground line (player and obstacle bases sit here)
    pub const GROUND_LEVEL: f32 = GAME_HEIGHT - 24.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 40.0;
    pub const PLAYER_SIZE: f32 = 24.0;

    /// Physics (pixels/tick and pixels/tick^2)
    pub const GRAVITY: f32 = 1.1;
    pub const JUMP_IMPULSE: f32 = -15.0;
    /// World scroll speed at run start; also the floor the speed clamp
    /// never lets it drop below
    pub const START_SPEED: f32 = 4.0;
    /// Speed bump applied at every score milestone
    pub const SPEED_STEP: f32 = 0.5;
    /// Score interval between speed bumps
    pub const SPEED_MILESTONE: u64 = 150;

    /// Jump inputs issued this many ticks before landing still register
    /// (about 100ms at 60 fps)
    pub const JUMP_BUFFER_TIME: u32 = 6;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 24;
    pub const OBSTACLE_MAX_HEIGHT: u32 = 47;

    /// Background wrap range relative to the playfield width
    pub const WRAP_FACTOR: f32 = 2.5;
    /// Stride between element generation attempts along the virtual x-axis
    pub const ELEMENT_STRIDE: f32 = 260.0;
    /// Per-tick opacity ramp for newly generated background elements
    pub const FADE_IN_STEP: f32 = 0.05;
    /// Biome transition progress per tick per unit of speed
    pub const TRANSITION_RATE: f32 = 0.0002;

    /// Score threshold for the first plane flyover
    pub const FIRST_PLANE_SCORE: u64 = 200;
    /// How long the help bubble stays up after a plane spawns (3 seconds)
    pub const HELP_BUBBLE_TICKS: u64 = 3 * TICK_HZ as u64;
}
