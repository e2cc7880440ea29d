//! Star Strike - a vertical-scrolling arcade space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: wgpu sprite/shape pipeline and immediate-mode draw list
//! - `platform`: Native window, input and frame pacing
//! - `assets`: Image and font loading
//! - `journal`: Flat-file game log
//! - `settings`: User preferences

pub mod assets;
pub mod journal;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use journal::GameLog;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (matches the 60 FPS frame target)
    pub const SIM_HZ: u64 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Target frame time in milliseconds
    pub const FRAME_TARGET_MS: u64 = 1000 / SIM_HZ;

    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Background tiles
    pub const BG_WIDTH: f32 = 128.0;
    pub const BG_HEIGHT: f32 = 256.0;
    /// Background scroll speed (pixels/s)
    pub const SCROLL_SPEED: f32 = PLAYER_SPEED;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 48.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_MAX_ROLL: f32 = 90.0; // degrees
    pub const PLAYER_ROLL_SPEED: f32 = 180.0; // degrees/s
    pub const PLAYER_MAX_HP: u32 = 1000;
    /// Distance from the bottom edge at spawn
    pub const PLAYER_BOTTOM_MARGIN: f32 = 50.0;

    /// Afterburner
    pub const AFTERBURNER_MAX: f32 = 100.0;
    pub const AFTERBURNER_DEPLETION_RATE: f32 = 30.0; // units/s
    pub const AFTERBURNER_RECHARGE_RATE: f32 = 10.0; // units/s
    pub const AFTERBURNER_SPEED_MULTIPLIER: f32 = 1.5;

    /// Pool capacities
    pub const MAX_ENEMIES: usize = 10;
    pub const MAX_PROJECTILES: usize = 120;
    pub const MAX_PLANETS: usize = 24;
    pub const MAX_POWERUPS: usize = 10;
    pub const MAX_PARTICLES: usize = 100;
    pub const MAX_AFTERBURNER_PARTICLES: usize = 50;

    /// Enemies
    pub const ENEMY_SIZE: f32 = 48.0;
    /// Enemy spawns when a roll in 0..=ENEMY_SPAWN_RANGE lands below ENEMY_SPAWN_HITS
    pub const ENEMY_SPAWN_RANGE: u32 = 200;
    pub const ENEMY_SPAWN_HITS: u32 = 2;

    /// Weapons
    pub const WEAPON_SWITCH_COOLDOWN_MS: u64 = 150;
    /// Fire-rate power-up cooldown multiplier
    pub const FIRE_RATE_BOOST: f32 = 0.5;
    /// Projectile hitbox edge length
    pub const PROJECTILE_HITBOX: f32 = 4.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 32.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.005;
    pub const POWERUP_DURATION_MS: u64 = 10_000;
    pub const POWERUP_FALL_SPEED: f32 = 100.0;
    pub const SHIELD_HP_BONUS: u32 = 50;
    pub const SPEED_BOOST: f32 = 0.5;

    /// Planets
    pub const PLANET_SPAWN_CHANCE: f64 = 0.005;
    pub const PLANET_BASE_SIZE: f32 = 96.0;
    pub const MIN_PLANET_SPEED: f32 = 50.0;
    pub const MAX_PLANET_SPEED: f32 = 200.0;
    /// Damage per tick = radius * game_speed * PLANET_DAMAGE_FACTOR
    pub const PLANET_DAMAGE_FACTOR: f32 = 0.1;

    /// Particles
    pub const PARTICLE_LIFETIME: u32 = 60; // ticks
    pub const EXPLOSION_PARTICLES: usize = 40;
    pub const AFTERBURNER_PARTICLE_LIFETIME: u32 = 30; // ticks
    pub const AFTERBURNER_PARTICLES_PER_TICK: usize = 2;
}

/// Convert degrees to a unit heading where 0° points up the screen
#[inline]
pub fn heading(angle_deg: f32) -> glam::Vec2 {
    let rad = angle_deg.to_radians();
    glam::Vec2::new(rad.sin(), -rad.cos())
}
