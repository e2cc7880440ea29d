//! Game state and core simulation types
//!
//! Every entity lives in a fixed-size array and is recycled through its
//! `active` flag. Particles use `lifetime > 0` instead.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::pool::Slot;
use super::weapons::{WEAPON_COUNT, Weapon, WeaponKind};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Game is paused
    Paused,
    /// Player destroyed, waiting for restart
    GameOver,
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Owner {
    #[default]
    Player,
    Enemy,
}

/// What hurt the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    EnemyFire,
    EnemyRam,
    Planet,
}

/// Notable things that happened during a tick (drained by the app layer)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemyDestroyed { score: u32 },
    PlayerHit { source: DamageSource, damage: u32 },
    /// First tick of contact with a planet
    PlanetImpact { damage: u32 },
    PowerUpCollected(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    WeaponSwitched(WeaponKind),
    GameOver { score: u32 },
}

/// The player's ship
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal input direction (-1, 0, 1)
    pub velocity_x: f32,
    /// Bank angle in degrees (negative = left)
    pub roll_angle: f32,
    pub last_shot_ms: u64,
    pub last_weapon_switch_ms: u64,
    /// Afterburner charge (0..=AFTERBURNER_MAX)
    pub afterburner: f32,
    pub afterburner_active: bool,
    pub hit_points: u32,
    pub max_hp: u32,
    pub weapons: [Weapon; WEAPON_COUNT],
    pub current_weapon: WeaponKind,
    pub score: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                (SCREEN_WIDTH - PLAYER_WIDTH) / 2.0,
                SCREEN_HEIGHT - PLAYER_HEIGHT - PLAYER_BOTTOM_MARGIN,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            velocity_x: 0.0,
            roll_angle: 0.0,
            last_shot_ms: 0,
            last_weapon_switch_ms: 0,
            afterburner: AFTERBURNER_MAX,
            afterburner_active: false,
            hit_points: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            weapons: WeaponKind::ALL.map(Weapon::full),
            current_weapon: WeaponKind::Laser,
            score: 0,
        }
    }
}

impl Player {
    pub fn weapon(&self, kind: WeaponKind) -> &Weapon {
        &self.weapons[kind.index()]
    }

    pub fn weapon_mut(&mut self, kind: WeaponKind) -> &mut Weapon {
        &mut self.weapons[kind.index()]
    }

    /// Subtract hit points, clamped at zero. Returns damage actually applied.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let applied = damage.min(self.hit_points);
        self.hit_points -= applied;
        applied
    }

    pub fn heal(&mut self, amount: u32) {
        self.hit_points = self.hit_points.saturating_add(amount).min(self.max_hp);
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }
}

/// An enemy fighter
#[derive(Debug, Clone, Copy, Default)]
pub struct Enemy {
    pub rect: Rect,
    /// Pixels per second
    pub velocity: Vec2,
    pub hit_points: u32,
    pub max_hp: u32,
    pub defense: u32,
    /// Damage dealt when ramming the player
    pub damage: u32,
    pub weapon: WeaponKind,
    pub last_shot_ms: u64,
    pub active: bool,
}

/// A bullet in flight
#[derive(Debug, Clone, Copy, Default)]
pub struct Projectile {
    /// Center position
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Heading in degrees (0 = up, 180 = down)
    pub angle: f32,
    pub damage: u32,
    pub weapon: WeaponKind,
    pub owner: Owner,
    pub active: bool,
}

impl Projectile {
    /// Collision box (small square around the center)
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, PROJECTILE_HITBOX, PROJECTILE_HITBOX)
    }

    /// On-screen sprite rectangle (2x the weapon's sprite size)
    pub fn draw_rect(&self) -> Rect {
        let spec = self.weapon.spec();
        Rect::centered(self.pos, spec.width * 2.0, spec.height * 2.0)
    }
}

/// A drifting planet hazard
#[derive(Debug, Clone, Copy, Default)]
pub struct Planet {
    pub rect: Rect,
    pub scale: f32,
    /// Pixels per second
    pub speed: f32,
    /// Index into the planet texture list
    pub texture: usize,
    /// Player was overlapping last tick
    pub in_contact: bool,
    pub active: bool,
}

impl Planet {
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    pub fn radius(&self) -> f32 {
        self.rect.w / 2.0
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PowerUpKind {
    #[default]
    Speed,
    FireRate,
    Shield,
    Ammo,
}

/// Number of power-up kinds
pub const POWERUP_KINDS: usize = 4;

impl PowerUpKind {
    pub const ALL: [PowerUpKind; POWERUP_KINDS] = [
        PowerUpKind::Speed,
        PowerUpKind::FireRate,
        PowerUpKind::Shield,
        PowerUpKind::Ammo,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tint applied to the diamond sprite
    pub fn color(self) -> [u8; 4] {
        match self {
            PowerUpKind::Speed => [0, 255, 255, 255],
            PowerUpKind::FireRate => [255, 0, 255, 255],
            PowerUpKind::Shield => [0, 255, 0, 255],
            PowerUpKind::Ammo => [255, 255, 0, 255],
        }
    }
}

/// A falling power-up pickup
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
    /// Pixels per second
    pub velocity_y: f32,
    pub active: bool,
}

/// A visual-only particle
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Remaining ticks (0 = free slot)
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub color: [u8; 4],
}

impl Particle {
    /// Alpha fades linearly with remaining lifetime
    pub fn alpha(&self) -> u8 {
        if self.max_lifetime == 0 {
            return 0;
        }
        (255 * self.lifetime.min(self.max_lifetime) / self.max_lifetime) as u8
    }
}

impl Slot for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Planet {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for PowerUp {
    fn is_active(&self) -> bool {
        self.active
    }
}

impl Slot for Particle {
    fn is_active(&self) -> bool {
        self.lifetime > 0
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Background scroll offset (0..BG_HEIGHT)
    pub scroll_y: f32,
    /// Whole background tiles scrolled so far
    pub scroll_rows: u64,
    /// Scroll/hazard speed multiplier (afterburner raises it)
    pub game_speed: f32,
    pub player: Player,
    pub enemies: [Enemy; MAX_ENEMIES],
    pub projectiles: [Projectile; MAX_PROJECTILES],
    pub planets: [Planet; MAX_PLANETS],
    pub powerups: [PowerUp; MAX_POWERUPS],
    /// Expiry time per power-up kind (ms)
    pub powerup_end_ms: [u64; POWERUP_KINDS],
    /// Explosion debris
    pub particles: [Particle; MAX_PARTICLES],
    pub afterburner_particles: [Particle; MAX_AFTERBURNER_PARTICLES],
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            scroll_y: 0.0,
            scroll_rows: 0,
            game_speed: 1.0,
            player: Player::default(),
            enemies: [Enemy::default(); MAX_ENEMIES],
            projectiles: [Projectile::default(); MAX_PROJECTILES],
            planets: [Planet::default(); MAX_PLANETS],
            powerups: [PowerUp::default(); MAX_POWERUPS],
            powerup_end_ms: [0; POWERUP_KINDS],
            particles: [Particle::default(); MAX_PARTICLES],
            afterburner_particles: [Particle::default(); MAX_AFTERBURNER_PARTICLES],
            events: Vec::new(),
        }
    }

    /// Start a fresh run, deriving the new seed from the current RNG
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        log::info!("Restarting run with seed {}", seed);
        *self = Self::new(seed);
    }

    /// Simulation clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * 1000 / SIM_HZ
    }

    /// True while the given power-up is in effect
    pub fn effect_active(&self, kind: PowerUpKind) -> bool {
        self.now_ms() < self.powerup_end_ms[kind.index()]
    }

    /// Milliseconds left on a power-up (0 if expired)
    pub fn effect_remaining_ms(&self, kind: PowerUpKind) -> u64 {
        self.powerup_end_ms[kind.index()].saturating_sub(self.now_ms())
    }

    /// Roll against a probability
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.random_bool(p.clamp(0.0, 1.0))
    }
}
