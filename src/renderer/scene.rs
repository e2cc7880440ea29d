//! Game state to draw list
//!
//! Builds one frame in painter's order. Only reads the simulation, so every
//! frame can be checked in tests without a GPU.

use glam::Vec2;

use super::draw_list::{DrawList, tex};
use super::shapes::lerp_color;
use super::text::GlyphAtlas;
use super::vertex::{colors, rgba8};
use crate::consts::*;
use crate::sim::pool::active;
use crate::sim::{GamePhase, GameState, Particle, PowerUpKind, Rect, WeaponKind};

const BAR_WIDTH: f32 = 100.0;
const BAR_HEIGHT: f32 = 10.0;
const HEALTH_BAR_Y: f32 = 565.0;
const AFTERBURNER_BAR_Y: f32 = 580.0;
const HEALTH_LOW: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const HEALTH_HIGH: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const AFTERBURNER_LOW: [f32; 4] = [0.0, 0.2, 0.6, 1.0];
const AFTERBURNER_HIGH: [f32; 4] = [0.3, 0.7, 1.0, 1.0];
const SCORE_POS: Vec2 = Vec2::new(640.0, 20.0);

const SLOT_SIZE: f32 = 32.0;
const SLOT_GAP: f32 = 4.0;
const PANEL_MARGIN: f32 = 10.0;
/// Room under each slot for its ammo count
const AMMO_TEXT_HEIGHT: f32 = 14.0;

const PARTICLE_SIZE: f32 = 2.0;
const SHIELD_GAP: f32 = 6.0;
const SHIELD_WIDTH: f32 = 3.0;

/// Frame-level HUD toggles that live outside the simulation
#[derive(Debug, Clone, Copy, Default)]
pub struct HudOptions {
    pub show_fps: bool,
    pub fps: f32,
}

/// Build the draw list for one frame
pub fn build_scene(state: &GameState, atlas: &GlyphAtlas, options: &HudOptions) -> DrawList {
    let mut list = DrawList::new();

    draw_background(&mut list, state);

    if state.phase != GamePhase::GameOver {
        let player = &state.player;
        list.sprite_rotated(
            tex::PLAYER,
            player.rect.center(),
            Vec2::new(player.rect.w, player.rect.h),
            player.roll_angle,
            colors::WHITE,
        );
    }

    for planet in active(&state.planets) {
        list.sprite(tex::planet(planet.texture), planet.rect, colors::WHITE);
    }

    draw_particles(&mut list, &state.afterburner_particles);
    draw_afterburner_meter(&mut list, state);

    for enemy in active(&state.enemies) {
        list.sprite(tex::ENEMY, enemy.rect, colors::WHITE);
    }

    draw_text(
        &mut list,
        atlas,
        &format!("Score: {}", state.player.score),
        SCORE_POS,
        colors::HUD_TEXT,
    );
    draw_health_bar(&mut list, state);

    for projectile in active(&state.projectiles) {
        let draw = projectile.draw_rect();
        list.sprite_rotated(
            tex::weapon(projectile.weapon),
            draw.center(),
            Vec2::new(draw.w, draw.h),
            projectile.angle,
            colors::WHITE,
        );
    }

    draw_weapon_panel(&mut list, state, atlas);
    draw_particles(&mut list, &state.particles);

    for powerup in active(&state.powerups) {
        list.sprite(tex::POWERUP, powerup.rect, rgba8(powerup.kind.color()));
    }

    draw_shield(&mut list, state);
    draw_overlay(&mut list, state, atlas);

    if options.show_fps {
        draw_text(
            &mut list,
            atlas,
            &format!("FPS: {:.0}", options.fps),
            Vec2::new(10.0, 10.0),
            colors::HUD_TEXT,
        );
    }

    list
}

/// Background tile choice for a tile column and scrolled row
///
/// Rows are counted in world space, so a tile keeps its texture while it
/// scrolls down the screen.
pub fn background_tile(col: u64, world_row: u64) -> usize {
    let mut h = col.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ world_row.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 31;
    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h ^= h >> 29;
    (h & 1) as usize
}

fn draw_background(list: &mut DrawList, state: &GameState) {
    let cols = (SCREEN_WIDTH / BG_WIDTH).ceil() as u64;
    let rows = (SCREEN_HEIGHT / BG_HEIGHT).ceil() as u64 + 1;

    for row in 0..rows {
        // Row 0 starts above the top edge and slides in as scroll_y grows
        let y = state.scroll_y + (row as f32 - 1.0) * BG_HEIGHT;
        let world_row = row.wrapping_sub(state.scroll_rows);
        for col in 0..cols {
            let texture = tex::BACKGROUND[background_tile(col, world_row)];
            let rect = Rect::new(col as f32 * BG_WIDTH, y, BG_WIDTH, BG_HEIGHT);
            list.sprite(texture, rect, colors::WHITE);
        }
    }
}

fn draw_particles(list: &mut DrawList, particles: &[Particle]) {
    for p in active(particles) {
        let rect = Rect::centered(p.pos, PARTICLE_SIZE, PARTICLE_SIZE);
        list.fill_rect(rect, rgba8(p.color));
    }
}

/// Bar centered horizontally at `y`, filled left to right by `fraction`
///
/// The fill shades from `start` at the left edge toward `end`, which it only
/// reaches when the bar is full.
fn draw_bar(list: &mut DrawList, y: f32, fraction: f32, start: [f32; 4], end: [f32; 4]) {
    let x = (SCREEN_WIDTH - BAR_WIDTH) / 2.0;
    let top = y - BAR_HEIGHT / 2.0;
    list.fill_rect(Rect::new(x, top, BAR_WIDTH, BAR_HEIGHT), colors::BAR_BACKGROUND);

    let fraction = fraction.clamp(0.0, 1.0);
    let fill = BAR_WIDTH * fraction;
    if fill > 0.0 {
        list.gradient_rect(
            Rect::new(x, top, fill, BAR_HEIGHT),
            start,
            lerp_color(start, end, fraction),
        );
    }
}

fn draw_health_bar(list: &mut DrawList, state: &GameState) {
    let player = &state.player;
    let fraction = if player.max_hp == 0 {
        0.0
    } else {
        player.hit_points as f32 / player.max_hp as f32
    };
    draw_bar(list, HEALTH_BAR_Y, fraction, HEALTH_LOW, HEALTH_HIGH);
}

fn draw_afterburner_meter(list: &mut DrawList, state: &GameState) {
    let fraction = state.player.afterburner / AFTERBURNER_MAX;
    draw_bar(list, AFTERBURNER_BAR_Y, fraction, AFTERBURNER_LOW, AFTERBURNER_HIGH);
}

/// Rectangle of weapon slot `index` in the bottom-right panel
pub fn weapon_slot_rect(index: usize) -> Rect {
    let count = WeaponKind::ALL.len() as f32;
    let panel_width = count * SLOT_SIZE + (count - 1.0) * SLOT_GAP;
    let x = SCREEN_WIDTH - PANEL_MARGIN - panel_width + index as f32 * (SLOT_SIZE + SLOT_GAP);
    let y = SCREEN_HEIGHT - PANEL_MARGIN - AMMO_TEXT_HEIGHT - SLOT_SIZE;
    Rect::new(x, y, SLOT_SIZE, SLOT_SIZE)
}

fn draw_weapon_panel(list: &mut DrawList, state: &GameState, atlas: &GlyphAtlas) {
    let player = &state.player;

    for kind in WeaponKind::ALL {
        let slot = weapon_slot_rect(kind.index());
        list.fill_rect(slot, colors::SLOT_BACKGROUND);

        // Icon at sprite scale, shrunk to fit the slot
        let spec = kind.spec();
        let icon = Vec2::new(spec.width * 2.0, spec.height * 2.0);
        let fit = ((SLOT_SIZE - 8.0) / icon.x.max(icon.y)).min(1.0);
        list.sprite(
            tex::weapon(kind),
            Rect::centered(slot.center(), icon.x * fit, icon.y * fit),
            colors::WHITE,
        );

        let selected = kind == player.current_weapon;
        let border = if selected {
            colors::SLOT_SELECTED
        } else {
            colors::SLOT_BORDER
        };
        list.outline_rect(slot, if selected { 2.0 } else { 1.0 }, border);

        let ammo = player.weapon(kind).ammo.to_string();
        let x = slot.center().x - atlas.measure(&ammo) / 2.0;
        draw_text(list, atlas, &ammo, Vec2::new(x, slot.bottom() + 2.0), colors::HUD_TEXT);
    }

    let name = player.current_weapon.name();
    let first = weapon_slot_rect(0);
    let y = first.y - atlas.line_height() - 2.0;
    draw_text(list, atlas, name, Vec2::new(first.x, y), colors::HUD_TEXT);
}

fn draw_shield(list: &mut DrawList, state: &GameState) {
    if state.phase == GamePhase::GameOver || !state.effect_active(PowerUpKind::Shield) {
        return;
    }
    let remaining = state.effect_remaining_ms(PowerUpKind::Shield) as f32;
    let alpha = remaining / POWERUP_DURATION_MS as f32;
    let mut color = colors::SHIELD;
    color[3] = alpha.clamp(0.0, 1.0);

    let rect = state.player.rect;
    let inner = rect.w.max(rect.h) / 2.0 + SHIELD_GAP;
    list.ring(rect.center(), inner, inner + SHIELD_WIDTH, color);
}

fn draw_overlay(list: &mut DrawList, state: &GameState, atlas: &GlyphAtlas) {
    let lines: Vec<String> = match state.phase {
        GamePhase::Playing => return,
        GamePhase::Paused => vec!["PAUSED".to_string(), "Press P to resume".to_string()],
        GamePhase::GameOver => vec![
            "GAME OVER".to_string(),
            format!("Final score: {}", state.player.score),
            "Press R or Enter to restart".to_string(),
        ],
    };

    list.overlay(SCREEN_WIDTH, SCREEN_HEIGHT);
    let line_height = atlas.line_height() + 4.0;
    let top = (SCREEN_HEIGHT - line_height * lines.len() as f32) / 2.0;
    for (i, line) in lines.iter().enumerate() {
        let x = (SCREEN_WIDTH - atlas.measure(line)) / 2.0;
        let y = top + i as f32 * line_height;
        draw_text(list, atlas, line, Vec2::new(x, y), colors::HUD_TEXT);
    }
}

fn draw_text(list: &mut DrawList, atlas: &GlyphAtlas, text: &str, pos: Vec2, color: [f32; 4]) {
    list.push(tex::FONT, &atlas.layout(text, pos, color));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Enemy, Planet, PowerUp, Projectile};

    fn scene(state: &GameState) -> DrawList {
        build_scene(state, &GlyphAtlas::empty(), &HudOptions::default())
    }

    fn background_vertices(list: &DrawList) -> usize {
        tex::BACKGROUND.iter().map(|t| list.vertices_with(*t)).sum()
    }

    #[test]
    fn test_fresh_state_draws_no_entities() {
        let state = GameState::new(1);
        let list = scene(&state);
        assert_eq!(list.vertices_with(tex::ENEMY), 0);
        assert_eq!(list.vertices_with(tex::POWERUP), 0);
        for i in 0..crate::sim::PLANET_TEXTURE_COUNT {
            assert_eq!(list.vertices_with(tex::planet(i)), 0);
        }
        assert_eq!(list.vertices_with(tex::PLAYER), 6);
    }

    #[test]
    fn test_inactive_entities_are_skipped() {
        let mut state = GameState::new(1);
        state.enemies[0] = Enemy {
            rect: Rect::new(10.0, 10.0, 48.0, 48.0),
            active: true,
            ..Default::default()
        };
        state.enemies[1] = Enemy {
            rect: Rect::new(100.0, 10.0, 48.0, 48.0),
            active: false,
            ..Default::default()
        };
        state.planets[3] = Planet {
            rect: Rect::new(0.0, 0.0, 40.0, 40.0),
            texture: 7,
            active: false,
            ..Default::default()
        };
        state.powerups[0] = PowerUp {
            kind: PowerUpKind::Ammo,
            rect: Rect::new(0.0, 0.0, 32.0, 32.0),
            active: true,
            ..Default::default()
        };

        let list = scene(&state);
        assert_eq!(list.vertices_with(tex::ENEMY), 6);
        assert_eq!(list.vertices_with(tex::planet(7)), 0);
        assert_eq!(list.vertices_with(tex::POWERUP), 6);
    }

    #[test]
    fn test_projectiles_use_weapon_texture() {
        let mut state = GameState::new(1);
        state.projectiles[5] = Projectile {
            pos: Vec2::new(100.0, 100.0),
            weapon: WeaponKind::Missile,
            active: true,
            ..Default::default()
        };
        let baseline = scene(&GameState::new(1)).vertices_with(tex::weapon(WeaponKind::Missile));
        let list = scene(&state);
        assert_eq!(list.vertices_with(tex::weapon(WeaponKind::Missile)), baseline + 6);
    }

    #[test]
    fn test_weapon_panel_shows_every_weapon() {
        let list = scene(&GameState::new(1));
        for kind in WeaponKind::ALL {
            assert_eq!(list.vertices_with(tex::weapon(kind)), 6);
        }
        // Slots fit on screen and do not overlap
        let last = weapon_slot_rect(WeaponKind::ALL.len() - 1);
        assert!(last.right() <= SCREEN_WIDTH);
        assert!(weapon_slot_rect(0).right() < weapon_slot_rect(1).x);
    }

    #[test]
    fn test_background_covers_screen() {
        let mut state = GameState::new(1);
        state.scroll_y = 100.0;
        let list = scene(&state);
        let tiles = background_vertices(&list) / 6;
        assert_eq!(tiles, 7 * 4);

        let min_y = list.vertices[..tiles * 6]
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MAX, f32::min);
        assert!(min_y <= 0.0);
    }

    #[test]
    fn test_background_tile_follows_scroll() {
        // The tile at screen row r with k wraps is the same tile as row r+1 after k+1 wraps
        for col in 0..7 {
            for row in 0..4u64 {
                let k = 5u64;
                assert_eq!(
                    background_tile(col, row.wrapping_sub(k)),
                    background_tile(col, (row + 1).wrapping_sub(k + 1))
                );
            }
        }
        let variety: std::collections::HashSet<usize> =
            (0..64).map(|row| background_tile(0, row)).collect();
        assert_eq!(variety.len(), 2);
    }

    #[test]
    fn test_game_over_hides_player_and_shield() {
        let mut state = GameState::new(1);
        state.powerup_end_ms[PowerUpKind::Shield.index()] = 5000;
        let playing = scene(&state);

        state.phase = GamePhase::GameOver;
        let over = scene(&state);
        assert_eq!(over.vertices_with(tex::PLAYER), 0);
        // Shield ring gone, dim overlay added
        let ring_vertices = 48 * 6;
        assert_eq!(
            over.vertices_with(tex::WHITE),
            playing.vertices_with(tex::WHITE) - ring_vertices + 6
        );
    }

    #[test]
    fn test_shield_ring_fades() {
        let mut state = GameState::new(1);
        let without = scene(&state).vertices_with(tex::WHITE);

        state.powerup_end_ms[PowerUpKind::Shield.index()] = POWERUP_DURATION_MS / 2;
        let list = scene(&state);
        assert_eq!(list.vertices_with(tex::WHITE), without + 48 * 6);

        let ring_alpha = list
            .vertices
            .iter()
            .filter(|v| v.color[0] == 0.0 && v.color[1] == 1.0 && v.color[2] == 1.0)
            .map(|v| v.color[3])
            .next();
        assert_eq!(ring_alpha, Some(0.5));
    }

    fn has_vertex(list: &DrawList, x: f32, y: f32, color: [f32; 4]) -> bool {
        list.vertices.iter().any(|v| {
            v.position == [x, y] && v.color.iter().zip(color).all(|(a, b)| (a - b).abs() < 1e-5)
        })
    }

    #[test]
    fn test_health_bar_is_a_gradient() {
        let mut state = GameState::new(1);
        state.player.hit_points = state.player.max_hp / 2;
        let list = scene(&state);

        let left = (SCREEN_WIDTH - BAR_WIDTH) / 2.0;
        let top = HEALTH_BAR_Y - BAR_HEIGHT / 2.0;
        assert!(has_vertex(&list, left, top, HEALTH_LOW));
        // Half full: the right edge stops halfway from red to green
        assert!(has_vertex(&list, left + BAR_WIDTH / 2.0, top, [0.5, 0.5, 0.0, 1.0]));
        assert!(!has_vertex(&list, left + BAR_WIDTH / 2.0, top, HEALTH_HIGH));
    }

    #[test]
    fn test_full_afterburner_meter_reaches_end_color() {
        let list = scene(&GameState::new(1));
        let left = (SCREEN_WIDTH - BAR_WIDTH) / 2.0;
        let top = AFTERBURNER_BAR_Y - BAR_HEIGHT / 2.0;
        assert!(has_vertex(&list, left, top, AFTERBURNER_LOW));
        assert!(has_vertex(&list, left + BAR_WIDTH, top, AFTERBURNER_HIGH));
    }

    #[test]
    fn test_particles_drawn_only_while_alive() {
        let mut state = GameState::new(1);
        let base = scene(&state).vertices_with(tex::WHITE);
        state.particles[0] = Particle {
            pos: Vec2::new(50.0, 50.0),
            lifetime: 10,
            max_lifetime: 60,
            color: [255, 120, 0, 42],
            ..Default::default()
        };
        state.particles[1] = Particle {
            lifetime: 0,
            ..state.particles[0]
        };
        assert_eq!(scene(&state).vertices_with(tex::WHITE), base + 6);
    }
}
