//! Planet hazards drifting down the screen

use rand::Rng;

use super::collision::{Rect, circles_overlap};
use super::pool::free_slot;
use super::state::{DamageSource, GameEvent, GameState, Planet};
use crate::consts::*;

/// Number of planet textures shipped with the game
pub const PLANET_TEXTURE_COUNT: usize = 25;

/// Maybe spawn a planet, then move all active ones
pub fn update(state: &mut GameState, dt: f32) {
    if state.chance(PLANET_SPAWN_CHANCE) {
        spawn_planet(state);
    }
    advance(state, dt);
}

/// Move planets and retire the ones below the screen
pub fn advance(state: &mut GameState, dt: f32) {
    for planet in state.planets.iter_mut().filter(|p| p.active) {
        planet.rect.y += planet.speed * dt;
        if planet.rect.y > SCREEN_HEIGHT {
            planet.active = false;
            planet.in_contact = false;
        }
    }
}

/// Smaller planets move faster (parallax)
pub fn speed_for_scale(scale: f32) -> f32 {
    let speed_factor = (1.0 - (scale - 0.25) / 0.5).clamp(0.0, 1.0);
    MIN_PLANET_SPEED + speed_factor * (MAX_PLANET_SPEED - MIN_PLANET_SPEED)
}

/// Place a planet above the top edge. Returns false if the pool is full.
pub fn spawn_planet(state: &mut GameState) -> bool {
    let rng = &mut state.rng;
    let scale = rng.random_range(25..75) as f32 / 100.0;
    let size = PLANET_BASE_SIZE * scale;
    let x = rng.random_range(0.0..SCREEN_WIDTH - size);
    let texture = rng.random_range(0..PLANET_TEXTURE_COUNT);

    let Some(slot) = free_slot(&mut state.planets) else {
        return false;
    };
    *slot = Planet {
        rect: Rect::new(x, -size, size, size),
        scale,
        speed: speed_for_scale(scale),
        texture,
        in_contact: false,
        active: true,
    };
    true
}

/// Damage the player for every planet it overlaps this tick
pub fn check_collision(state: &mut GameState) {
    let player_center = state.player.rect.center();
    let player_radius = state.player.rect.w / 2.0;

    for i in 0..MAX_PLANETS {
        let planet = state.planets[i];
        if !planet.active {
            continue;
        }

        let touching = circles_overlap(player_center, player_radius, planet.center(), planet.radius());
        if !touching {
            state.planets[i].in_contact = false;
            continue;
        }

        let damage = (planet.radius() * state.game_speed * PLANET_DAMAGE_FACTOR) as u32;
        let applied = state.player.take_damage(damage);
        if !planet.in_contact {
            state.events.push(GameEvent::PlanetImpact { damage: applied });
        }
        state.events.push(GameEvent::PlayerHit {
            source: DamageSource::Planet,
            damage: applied,
        });
        state.planets[i].in_contact = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet_on_player(state: &mut GameState, slot: usize, size: f32) {
        let center = state.player.rect.center();
        state.planets[slot] = Planet {
            rect: Rect::centered(center, size, size),
            scale: size / PLANET_BASE_SIZE,
            speed: 0.0,
            texture: 0,
            in_contact: false,
            active: true,
        };
    }

    #[test]
    fn test_speed_for_scale() {
        assert_eq!(speed_for_scale(0.25), MAX_PLANET_SPEED);
        assert_eq!(speed_for_scale(0.75), MIN_PLANET_SPEED);
        assert!((speed_for_scale(0.5) - 125.0).abs() < 1e-3);
    }

    #[test]
    fn test_spawn_above_screen() {
        let mut state = GameState::new(9);
        assert!(spawn_planet(&mut state));
        let p = state.planets.iter().find(|p| p.active).unwrap();
        assert!(p.scale >= 0.25 && p.scale < 0.75);
        assert_eq!(p.rect.y, -p.rect.h);
        assert!(p.rect.right() <= SCREEN_WIDTH);
        assert!(p.texture < PLANET_TEXTURE_COUNT);
    }

    #[test]
    fn test_deactivates_below_screen_once() {
        let mut state = GameState::new(9);
        state.planets[0] = Planet {
            rect: Rect::new(10.0, SCREEN_HEIGHT - 1.0, 40.0, 40.0),
            speed: 120.0,
            active: true,
            ..Default::default()
        };
        advance(&mut state, SIM_DT);
        assert!(!state.planets[0].active);
        let y = state.planets[0].rect.y;

        // Inactive planets are no longer moved
        advance(&mut state, SIM_DT);
        assert_eq!(state.planets[0].rect.y, y);
    }

    #[test]
    fn test_collision_damage_and_single_impact_event() {
        let mut state = GameState::new(9);
        planet_on_player(&mut state, 0, 48.0); // radius 24 -> 2 per tick

        check_collision(&mut state);
        assert_eq!(state.player.hit_points, PLAYER_MAX_HP - 2);
        assert!(state.events.contains(&GameEvent::PlanetImpact { damage: 2 }));

        state.events.clear();
        check_collision(&mut state);
        assert_eq!(state.player.hit_points, PLAYER_MAX_HP - 4);
        assert!(!state.events.iter().any(|e| matches!(e, GameEvent::PlanetImpact { .. })));
    }

    #[test]
    fn test_afterburner_speed_raises_damage() {
        let mut state = GameState::new(9);
        planet_on_player(&mut state, 0, 48.0);
        state.game_speed = AFTERBURNER_SPEED_MULTIPLIER;
        check_collision(&mut state);
        // 24 * 1.5 * 0.1 = 3.6 -> 3
        assert_eq!(state.player.hit_points, PLAYER_MAX_HP - 3);
    }

    #[test]
    fn test_inactive_planet_is_harmless() {
        let mut state = GameState::new(9);
        planet_on_player(&mut state, 0, 80.0);
        state.planets[0].active = false;
        check_collision(&mut state);
        assert_eq!(state.player.hit_points, PLAYER_MAX_HP);
        assert!(state.events.is_empty());
    }
}
