//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemies;
pub mod particles;
pub mod planets;
pub mod player;
pub mod pool;
pub mod powerups;
pub mod projectiles;
pub mod state;
pub mod tick;
pub mod weapons;

pub use collision::Rect;
pub use planets::PLANET_TEXTURE_COUNT;
pub use pool::Slot;
pub use state::{
    DamageSource, Enemy, GameEvent, GamePhase, GameState, Owner, POWERUP_KINDS, Particle, Planet,
    Player, PowerUp, PowerUpKind, Projectile,
};
pub use tick::{TickInput, tick};
pub use weapons::{WEAPON_COUNT, WEAPON_TYPES, Weapon, WeaponKind, WeaponSpec};
