//! Weapon table, firing and switching
//!
//! Cooldowns are compared against the simulation clock in milliseconds.

use super::pool::free_slot;
use super::state::{GameEvent, GameState, Owner, PowerUpKind, Projectile};
use crate::consts::*;
use crate::heading;

/// Player/enemy weapon kinds, in switch order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum WeaponKind {
    #[default]
    Laser,
    PlasmaGun,
    Railgun,
    RapidFire,
    Missile,
}

/// Static properties of a weapon kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub name: &'static str,
    pub max_ammo: u32,
    pub damage: u32,
    /// Pixels per tick at 60 Hz
    pub bullet_speed: f32,
    pub cooldown_ms: u64,
    /// Sprite size (drawn at 2x)
    pub width: f32,
    pub height: f32,
}

/// Number of weapon kinds
pub const WEAPON_COUNT: usize = 5;

pub const WEAPON_TYPES: [WeaponSpec; WEAPON_COUNT] = [
    WeaponSpec {
        name: "Laser",
        max_ammo: 100,
        damage: 10,
        bullet_speed: 6.0,
        cooldown_ms: 250,
        width: 2.0,
        height: 12.0,
    },
    WeaponSpec {
        name: "Plasma Gun",
        max_ammo: 40,
        damage: 20,
        bullet_speed: 5.0,
        cooldown_ms: 500,
        width: 4.0,
        height: 8.0,
    },
    WeaponSpec {
        name: "Railgun",
        max_ammo: 250,
        damage: 25,
        bullet_speed: 4.0,
        cooldown_ms: 400,
        width: 16.0,
        height: 16.0,
    },
    WeaponSpec {
        name: "Rapid Fire",
        max_ammo: 500,
        damage: 2,
        bullet_speed: 2.5,
        cooldown_ms: 150,
        width: 2.0,
        height: 2.0,
    },
    WeaponSpec {
        name: "Missile",
        max_ammo: 20,
        damage: 50,
        bullet_speed: 15.0,
        cooldown_ms: 2000,
        width: 16.0,
        height: 16.0,
    },
];

impl WeaponKind {
    pub const ALL: [WeaponKind; WEAPON_COUNT] = [
        WeaponKind::Laser,
        WeaponKind::PlasmaGun,
        WeaponKind::Railgun,
        WeaponKind::RapidFire,
        WeaponKind::Missile,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn spec(self) -> &'static WeaponSpec {
        &WEAPON_TYPES[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Step through the weapon list with wraparound
    pub fn cycle(self, direction: i32) -> Self {
        let n = WEAPON_COUNT as i32;
        let next = (self.index() as i32 + direction).rem_euclid(n);
        Self::ALL[next as usize]
    }

    /// Projectile speed in pixels per second
    pub fn projectile_speed(self) -> f32 {
        self.spec().bullet_speed * SIM_HZ as f32
    }
}

/// A weapon carried by the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub ammo: u32,
}

impl Weapon {
    pub fn full(kind: WeaponKind) -> Self {
        Self {
            kind,
            ammo: kind.spec().max_ammo,
        }
    }

    pub fn refill(&mut self) {
        self.ammo = self.kind.spec().max_ammo;
    }
}

/// Who is pulling the trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shooter {
    Player,
    /// Enemy slot index
    Enemy(usize),
}

/// Switch the player's weapon, respecting the switch cooldown
///
/// Returns true if the weapon changed.
pub fn change_weapon(state: &mut GameState, direction: i32) -> bool {
    if direction == 0 {
        return false;
    }

    let now = state.now_ms();
    let player = &mut state.player;
    if now.saturating_sub(player.last_weapon_switch_ms) < WEAPON_SWITCH_COOLDOWN_MS {
        return false;
    }

    player.current_weapon = player.current_weapon.cycle(direction);
    player.last_weapon_switch_ms = now;
    state
        .events
        .push(GameEvent::WeaponSwitched(state.player.current_weapon));
    true
}

/// Fire a projectile from the given shooter if its cooldown (and ammo) allow
///
/// Returns true if a projectile was spawned.
pub fn shoot_projectile(state: &mut GameState, shooter: Shooter) -> bool {
    let now = state.now_ms();

    let (kind, last_shot_ms, origin, angle, owner, multiplier) = match shooter {
        Shooter::Player => {
            let player = &state.player;
            if player.weapon(player.current_weapon).ammo < 1 {
                return false;
            }
            let multiplier = if state.effect_active(PowerUpKind::FireRate) {
                FIRE_RATE_BOOST
            } else {
                1.0
            };
            let origin = glam::Vec2::new(player.rect.center().x, player.rect.y);
            (
                player.current_weapon,
                player.last_shot_ms,
                origin,
                player.roll_angle,
                Owner::Player,
                multiplier,
            )
        }
        Shooter::Enemy(index) => {
            let Some(enemy) = state.enemies.get(index).filter(|e| e.active) else {
                log::warn!("shoot_projectile: no active enemy in slot {}", index);
                return false;
            };
            let origin = glam::Vec2::new(enemy.rect.center().x, enemy.rect.bottom());
            (
                enemy.weapon,
                enemy.last_shot_ms,
                origin,
                180.0,
                Owner::Enemy,
                1.0,
            )
        }
    };

    let spec = kind.spec();
    let cooldown = spec.cooldown_ms as f32 * multiplier;
    if (now.saturating_sub(last_shot_ms) as f32) < cooldown {
        return false;
    }

    let Some(slot) = free_slot(&mut state.projectiles) else {
        return false;
    };
    *slot = Projectile {
        pos: origin,
        vel: heading(angle) * kind.projectile_speed(),
        angle,
        damage: spec.damage,
        weapon: kind,
        owner,
        active: true,
    };

    match shooter {
        Shooter::Player => {
            let player = &mut state.player;
            player.last_shot_ms = now;
            let weapon = player.weapon_mut(player.current_weapon);
            weapon.ammo = weapon.ammo.saturating_sub(1);
        }
        Shooter::Enemy(index) => {
            state.enemies[index].last_shot_ms = now;
        }
    }
    true
}
