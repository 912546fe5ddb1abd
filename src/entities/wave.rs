use rand::Rng;

use super::enemy::{Enemy, EnemyKind};
use crate::assets::Sprites;
use crate::config::consts::{WAVE_DRIFT, WAVE_FLOAT_STEP};
use crate::game::FrameContext;
use crate::renderer::Surface;

/// A rigid grid of enemies sharing one origin and one drift velocity
#[derive(Debug, Clone)]
pub struct Wave {
    /// Top-left corner of the grid
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal drift per frame; the sign flips at either playfield edge
    pub speed_x: f32,
    pub enemy_size: f32,
    pub columns: u32,
    pub rows: u32,
    playfield_width: f32,
    enemies: Vec<Enemy>,
    next_wave_triggered: bool,
}

impl Wave {
    /// Creates a wave centred horizontally just above the playfield,
    /// drifting left or right with equal chance
    pub fn new(
        columns: u32,
        rows: u32,
        enemy_size: f32,
        playfield_width: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let speed_x = if rng.random_bool(0.5) {
            WAVE_DRIFT
        } else {
            -WAVE_DRIFT
        };
        Self::with_drift(columns, rows, enemy_size, playfield_width, speed_x)
    }

    pub fn with_drift(
        columns: u32,
        rows: u32,
        enemy_size: f32,
        playfield_width: f32,
        speed_x: f32,
    ) -> Self {
        let width = columns as f32 * enemy_size;
        let height = rows as f32 * enemy_size;
        let mut wave = Self {
            x: playfield_width * 0.5 - width * 0.5,
            y: -height,
            width,
            height,
            speed_x,
            enemy_size,
            columns,
            rows,
            playfield_width,
            enemies: Vec::with_capacity((columns * rows) as usize),
            next_wave_triggered: false,
        };
        wave.create();
        wave
    }

    /// Lays out one enemy per grid cell, row by row
    fn create(&mut self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                self.enemies.push(Enemy::new(
                    EnemyKind::Grunt,
                    self.enemy_size,
                    column as f32 * self.enemy_size,
                    row as f32 * self.enemy_size,
                ));
            }
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn next_wave_triggered(&self) -> bool {
        self.next_wave_triggered
    }

    /// Records that this wave has spawned its successor
    pub fn trigger_next_wave(&mut self) {
        self.next_wave_triggered = true;
    }

    /// Moves the formation one frame: float in from above, drift, and on
    /// touching either side drop one row and reverse
    pub fn advance(&mut self) {
        if self.y < 0.0 {
            self.y += WAVE_FLOAT_STEP;
        }

        self.x += self.speed_x;

        if self.x < 0.0 || self.x > self.playfield_width - self.width {
            self.y += self.enemy_size;
            self.speed_x = -self.speed_x;
        }
    }

    /// One full frame: move, update and draw every enemy, then drop the
    /// ones marked for deletion
    pub fn render(
        &mut self,
        ctx: &mut FrameContext<'_>,
        surface: &mut impl Surface,
        sprites: &Sprites,
    ) {
        self.advance();

        for enemy in &mut self.enemies {
            enemy.update(self.x, self.y, ctx);
            enemy.draw(surface, sprites);
        }

        self.enemies.retain(|enemy| !enemy.is_marked_for_deletion());
    }

    /// Draws the enemies where they are without advancing anything
    pub fn draw(&self, surface: &mut impl Surface, sprites: &Sprites) {
        for enemy in &self.enemies {
            enemy.draw(surface, sprites);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BuiltinAssets, SpriteId};
    use crate::entities::{Player, ProjectilePool};
    use crate::game::GameState;
    use crate::renderer::{NullSurface, RecordingSurface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_wave_new_layout() {
        let wave = Wave::with_drift(3, 3, 60.0, 800.0, 2.0);
        assert_eq!(wave.width, 180.0);
        assert_eq!(wave.height, 180.0);
        assert_eq!(wave.x, 310.0);
        assert_eq!(wave.y, -180.0);
        assert_eq!(wave.enemies().len(), 9);
        assert!(!wave.next_wave_triggered());
    }

    #[test]
    fn test_enemies_laid_out_row_major() {
        let wave = Wave::with_drift(4, 2, 60.0, 800.0, 2.0);
        let offsets: Vec<(f32, f32)> = wave
            .enemies()
            .iter()
            .map(|e| (e.offset_x, e.offset_y))
            .collect();
        assert_eq!(offsets[0], (0.0, 0.0));
        assert_eq!(offsets[1], (60.0, 0.0));
        assert_eq!(offsets[3], (180.0, 0.0));
        assert_eq!(offsets[4], (0.0, 60.0));
        assert_eq!(offsets[7], (180.0, 60.0));
    }

    #[test]
    fn test_random_drift_is_either_direction() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..64 {
            let wave = Wave::new(3, 3, 60.0, 800.0, &mut rng);
            assert_eq!(wave.speed_x.abs(), WAVE_DRIFT);
            seen_left |= wave.speed_x < 0.0;
            seen_right |= wave.speed_x > 0.0;
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    fn test_wave_floats_in_from_above() {
        let mut wave = Wave::with_drift(3, 3, 60.0, 800.0, 2.0);
        wave.advance();
        assert_eq!(wave.y, -176.0);
        assert_eq!(wave.x, 312.0);

        for _ in 0..44 {
            wave.advance();
        }
        assert_eq!(wave.y, 0.0);

        // Fully on screen: no more floating
        wave.advance();
        assert_eq!(wave.y, 0.0);
    }

    #[test]
    fn test_wave_drops_and_reverses_at_right_edge() {
        let mut wave = Wave::with_drift(3, 3, 60.0, 800.0, 2.0);
        wave.y = 0.0;
        wave.x = 619.0;
        wave.advance();
        assert_eq!(wave.x, 621.0);
        assert_eq!(wave.y, 60.0);
        assert_eq!(wave.speed_x, -2.0);

        wave.advance();
        assert_eq!(wave.x, 619.0);
        assert_eq!(wave.y, 60.0);
    }

    #[test]
    fn test_wave_drops_and_reverses_at_left_edge() {
        let mut wave = Wave::with_drift(3, 3, 60.0, 800.0, -2.0);
        wave.y = 0.0;
        wave.x = 1.0;
        wave.advance();
        assert_eq!(wave.x, -1.0);
        assert_eq!(wave.y, 60.0);
        assert_eq!(wave.speed_x, 2.0);
    }

    #[test]
    fn test_render_prunes_marked_enemies_in_order() {
        let mut projectiles = ProjectilePool::new(10);
        let mut player = Player::new(800.0, 600.0, 3);
        let mut score = 0;
        let mut state = GameState::Playing;
        let sprites = Sprites::resolve(&BuiltinAssets);

        let mut wave = Wave::with_drift(3, 1, 60.0, 800.0, 2.0);
        wave.y = 100.0;
        wave.x = 100.0;
        wave.enemies_mut()[1].lives = 0;

        let mut surface = RecordingSurface::new();
        let mut ctx = FrameContext {
            projectiles: &mut projectiles,
            player: &mut player,
            score: &mut score,
            state: &mut state,
            playfield_height: 600.0,
        };
        wave.render(&mut ctx, &mut surface, &sprites);

        let offsets: Vec<f32> = wave.enemies().iter().map(|e| e.offset_x).collect();
        assert_eq!(offsets, vec![0.0, 120.0]);
        // The dying enemy is still drawn on its last frame
        assert_eq!(surface.images(SpriteId::Enemy1), 3);
        assert_eq!(score, 1);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_wave_stays_near_playfield(
                columns in 3u32..8,
                rows in 3u32..6,
                drift_right in prop::bool::ANY,
                frames in 0usize..600
            ) {
                let speed = if drift_right { WAVE_DRIFT } else { -WAVE_DRIFT };
                let mut wave = Wave::with_drift(columns, rows, 60.0, 800.0, speed);
                let mut last_y = wave.y;
                for _ in 0..frames {
                    wave.advance();
                    // Never overshoots an edge by more than one step
                    prop_assert!(wave.x >= -WAVE_DRIFT);
                    prop_assert!(wave.x <= 800.0 - wave.width + WAVE_DRIFT);
                    // Only ever moves down
                    prop_assert!(wave.y >= last_y);
                    last_y = wave.y;
                }
                prop_assert_eq!(wave.enemies().len(), (columns * rows) as usize);
            }

            #[test]
            fn test_headless_render_keeps_enemy_count(frames in 0usize..30) {
                let mut projectiles = ProjectilePool::new(10);
                let mut player = Player::new(800.0, 600.0, 3);
                let mut score = 0;
                let mut state = GameState::Playing;
                let sprites = Sprites::resolve(&BuiltinAssets);
                let mut wave = Wave::with_drift(3, 3, 60.0, 800.0, 2.0);
                for _ in 0..frames {
                    let mut ctx = FrameContext {
                        projectiles: &mut projectiles,
                        player: &mut player,
                        score: &mut score,
                        state: &mut state,
                        playfield_height: 600.0,
                    };
                    wave.render(&mut ctx, &mut NullSurface, &sprites);
                }
                prop_assert_eq!(wave.enemies().len(), 9);
            }
        }
    }
}
