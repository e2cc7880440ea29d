//! Falling power-ups and timed effects

use rand::Rng;

use super::collision::Rect;
use super::pool::free_slot;
use super::state::{GameEvent, GameState, POWERUP_KINDS, PowerUp, PowerUpKind};
use crate::consts::*;

/// Move, collect, spawn and expire power-ups
pub fn update(state: &mut GameState, dt: f32) {
    advance(state, dt);

    if state.chance(POWERUP_SPAWN_CHANCE) {
        spawn_powerup(state);
    }

    expire_effects(state);
}

/// Move power-ups and apply any the player touches
pub fn advance(state: &mut GameState, dt: f32) {
    for i in 0..MAX_POWERUPS {
        let powerup = &mut state.powerups[i];
        if !powerup.active {
            continue;
        }

        powerup.rect.y += powerup.velocity_y * dt;
        if powerup.rect.y > SCREEN_HEIGHT {
            powerup.active = false;
            continue;
        }

        if powerup.rect.overlaps(&state.player.rect) {
            powerup.active = false;
            let kind = powerup.kind;
            apply_powerup(state, kind);
        }
    }
}

/// Drop a random power-up from the top edge. Returns false if the pool is full.
pub fn spawn_powerup(state: &mut GameState) -> bool {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..POWERUP_KINDS)];
    let x = state.rng.random_range(0.0..SCREEN_WIDTH - POWERUP_SIZE);

    let Some(slot) = free_slot(&mut state.powerups) else {
        return false;
    };
    *slot = PowerUp {
        kind,
        rect: Rect::new(x, -POWERUP_SIZE, POWERUP_SIZE, POWERUP_SIZE),
        velocity_y: POWERUP_FALL_SPEED,
        active: true,
    };
    true
}

/// Start (or extend) an effect and apply its instant part
pub fn apply_powerup(state: &mut GameState, kind: PowerUpKind) {
    state.powerup_end_ms[kind.index()] = state.now_ms() + POWERUP_DURATION_MS;

    match kind {
        PowerUpKind::Speed | PowerUpKind::FireRate => {}
        PowerUpKind::Shield => state.player.heal(SHIELD_HP_BONUS),
        PowerUpKind::Ammo => {
            for weapon in state.player.weapons.iter_mut() {
                weapon.refill();
            }
        }
    }

    state.events.push(GameEvent::PowerUpCollected(kind));
}

/// Clear effects whose time has run out
fn expire_effects(state: &mut GameState) {
    let now = state.now_ms();
    for kind in PowerUpKind::ALL {
        let end = &mut state.powerup_end_ms[kind.index()];
        if *end != 0 && now >= *end {
            *end = 0;
            state.events.push(GameEvent::PowerUpExpired(kind));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::weapons::WeaponKind;

    fn powerup_on_player(state: &mut GameState, kind: PowerUpKind) {
        let center = state.player.rect.center();
        state.powerups[0] = PowerUp {
            kind,
            rect: Rect::centered(center, POWERUP_SIZE, POWERUP_SIZE),
            velocity_y: 0.0,
            active: true,
        };
    }

    #[test]
    fn test_spawn_and_fall() {
        let mut state = GameState::new(4);
        assert!(spawn_powerup(&mut state));
        assert!(state.powerups[0].active);
        assert_eq!(state.powerups[0].rect.y, -POWERUP_SIZE);
        assert!(state.powerups[0].rect.right() <= SCREEN_WIDTH);

        advance(&mut state, 1.0);
        assert_eq!(state.powerups[0].rect.y, POWERUP_FALL_SPEED - POWERUP_SIZE);
    }

    #[test]
    fn test_missed_powerup_deactivates() {
        let mut state = GameState::new(4);
        state.powerups[0] = PowerUp {
            kind: PowerUpKind::Ammo,
            rect: Rect::new(0.0, SCREEN_HEIGHT, POWERUP_SIZE, POWERUP_SIZE),
            velocity_y: POWERUP_FALL_SPEED,
            active: true,
        };
        advance(&mut state, SIM_DT);
        assert!(!state.powerups[0].active);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_shield_heals_and_clamps() {
        let mut state = GameState::new(4);
        state.player.hit_points = PLAYER_MAX_HP - 20;
        powerup_on_player(&mut state, PowerUpKind::Shield);

        advance(&mut state, SIM_DT);
        assert!(!state.powerups[0].active);
        assert_eq!(state.player.hit_points, PLAYER_MAX_HP);
        assert!(state.effect_active(PowerUpKind::Shield));
        assert!(state.events.contains(&GameEvent::PowerUpCollected(PowerUpKind::Shield)));
    }

    #[test]
    fn test_ammo_refills_every_weapon() {
        let mut state = GameState::new(4);
        for weapon in state.player.weapons.iter_mut() {
            weapon.ammo = 0;
        }
        powerup_on_player(&mut state, PowerUpKind::Ammo);
        advance(&mut state, SIM_DT);
        for kind in WeaponKind::ALL {
            assert_eq!(state.player.weapon(kind).ammo, kind.spec().max_ammo);
        }
    }

    #[test]
    fn test_effect_expires_after_duration() {
        let mut state = GameState::new(4);
        state.time_ticks = 60;
        apply_powerup(&mut state, PowerUpKind::Speed);
        assert_eq!(state.effect_remaining_ms(PowerUpKind::Speed), POWERUP_DURATION_MS);

        state.time_ticks += 10 * SIM_HZ - 1;
        expire_effects(&mut state);
        assert!(state.effect_active(PowerUpKind::Speed));

        state.time_ticks += 1;
        state.events.clear();
        expire_effects(&mut state);
        assert!(!state.effect_active(PowerUpKind::Speed));
        assert_eq!(state.powerup_end_ms[PowerUpKind::Speed.index()], 0);
        assert_eq!(state.events, vec![GameEvent::PowerUpExpired(PowerUpKind::Speed)]);

        // Expiry is reported once
        state.events.clear();
        expire_effects(&mut state);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_recollecting_extends_effect() {
        let mut state = GameState::new(4);
        apply_powerup(&mut state, PowerUpKind::FireRate);
        state.time_ticks += 5 * SIM_HZ;
        apply_powerup(&mut state, PowerUpKind::FireRate);
        assert_eq!(state.effect_remaining_ms(PowerUpKind::FireRate), POWERUP_DURATION_MS);
    }
}
