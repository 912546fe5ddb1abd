use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::{AssetProvider, Sprites};
use crate::config::GameConfig;
use crate::entities::{Player, ProjectilePool, Wave};
use crate::input::{Key, KeyHistory};
use crate::renderer::{Font, Surface, TextAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        *self == GameState::GameOver
    }

    pub fn end(&mut self) {
        *self = GameState::GameOver;
    }
}

/// A cleared wave hands over to exactly one successor, and never once the game is over
fn should_spawn_successor(wave: &Wave, state: GameState) -> bool {
    wave.is_empty() && !wave.next_wave_triggered() && !state.is_over()
}

/// The parts of a [`Game`] an enemy may touch while it updates
pub struct FrameContext<'a> {
    pub projectiles: &'a mut ProjectilePool,
    pub player: &'a mut Player,
    pub score: &'a mut i64,
    pub state: &'a mut GameState,
    pub playfield_height: f32,
}

/// One play session: owns every entity and drives the per-frame update
pub struct Game {
    config: GameConfig,
    keys: KeyHistory,
    player: Player,
    projectiles: ProjectilePool,
    /// In spawn order
    waves: Vec<Wave>,
    columns: u32,
    rows: u32,
    enemy_size: f32,
    score: i64,
    wave_count: u32,
    state: GameState,
    sprites: Sprites,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig, assets: &impl AssetProvider) -> Self {
        Self::with_rng(config, assets, StdRng::from_os_rng())
    }

    /// Deterministic wave drift and grid growth
    pub fn with_seed(config: GameConfig, assets: &impl AssetProvider, seed: u64) -> Self {
        Self::with_rng(config, assets, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, assets: &impl AssetProvider, rng: StdRng) -> Self {
        let mut game = Self {
            keys: KeyHistory::new(),
            player: Player::new(
                config.playfield_width,
                config.playfield_height,
                config.player_lives,
            ),
            projectiles: ProjectilePool::new(config.projectile_pool_size),
            waves: Vec::new(),
            columns: config.initial_columns,
            rows: config.initial_rows,
            enemy_size: config.enemy_size,
            score: 0,
            wave_count: 1,
            state: GameState::Playing,
            sprites: Sprites::resolve(assets),
            rng,
            config,
        };
        let wave = game.spawn_wave();
        game.waves.push(wave);
        game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.config.playfield_width
    }

    pub fn height(&self) -> f32 {
        self.config.playfield_height
    }

    pub fn keys(&self) -> &KeyHistory {
        &self.keys
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn projectiles(&self) -> &ProjectilePool {
        &self.projectiles
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn waves_mut(&mut self) -> &mut [Wave] {
        &mut self.waves
    }

    /// Current grid size as (columns, rows)
    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub fn enemy_size(&self) -> f32 {
        self.enemy_size
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn wave_count(&self) -> u32 {
        self.wave_count
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// A key went down. Movement keys are read from the history on the next
    /// frame; fire and restart act immediately.
    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);

        let bindings = self.config.bindings;
        if key == bindings.fire && !self.is_over() {
            self.player.shoot(&mut self.projectiles);
        }
        if key == bindings.restart && self.is_over() {
            self.restart();
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
    }

    /// Fires a bolt as if the fire key was pressed. Returns false when no bolt was free.
    pub fn shoot(&mut self) -> bool {
        !self.is_over() && self.player.shoot(&mut self.projectiles)
    }

    /// Advances the game by one frame and draws it. While the game is over
    /// nothing moves, but the scene and overlay are still drawn.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        match self.state {
            GameState::Playing => self.update_and_draw(surface),
            GameState::GameOver => self.draw(surface),
        }
        self.draw_status_text(surface);
    }

    fn update_and_draw(&mut self, surface: &mut impl Surface) {
        self.player.draw(surface, &self.sprites.player);
        self.player.update(&self.keys, &self.config.bindings);

        self.projectiles.update_and_draw(surface);

        let mut successors = 0;
        {
            let mut ctx = FrameContext {
                projectiles: &mut self.projectiles,
                player: &mut self.player,
                score: &mut self.score,
                state: &mut self.state,
                playfield_height: self.config.playfield_height,
            };
            for wave in &mut self.waves {
                wave.render(&mut ctx, surface, &self.sprites);
                if should_spawn_successor(wave, *ctx.state) {
                    wave.trigger_next_wave();
                    successors += 1;
                }
            }
        }

        for _ in 0..successors {
            self.new_wave();
        }

        // Cleared waves that already handed over do no further work
        self.waves
            .retain(|wave| !(wave.is_empty() && wave.next_wave_triggered()));

        if self.is_over() {
            log::info!(
                "Game over: score {}, wave {}, lives {}",
                self.score,
                self.wave_count,
                self.player.lives
            );
        }
    }

    fn draw(&self, surface: &mut impl Surface) {
        self.player.draw(surface, &self.sprites.player);
        self.projectiles.draw(surface);
        for wave in &self.waves {
            wave.draw(surface, &self.sprites);
        }
    }

    fn draw_status_text(&self, surface: &mut impl Surface) {
        surface.save();
        surface.set_font(Font::STATUS);
        surface.fill_text(&format!("Score: {}", self.score), 40.0, 40.0);
        surface.fill_text(&format!("Wave: {}", self.wave_count), 40.0, 80.0);

        for i in 0..self.player.lives {
            surface.fill_rect(40.0 + 30.0 * i as f32, 100.0, 20.0, 20.0);
        }

        if self.is_over() {
            let center_x = self.width() * 0.5;
            let center_y = self.height() * 0.5;
            surface.set_text_align(TextAlign::Center);
            surface.set_font(Font::HEADLINE);
            surface.fill_text("GAME OVER", center_x, center_y);
            surface.set_font(Font::HINT);
            surface.fill_text("Press R to Restart", center_x, center_y + 50.0);
        }
        surface.restore();
    }

    /// Grows the grid by one column or one row, equally likely, and spawns a wave
    fn new_wave(&mut self) {
        if self.rng.random_bool(0.5) {
            self.columns += 1;
        } else {
            self.rows += 1;
        }
        let wave = self.spawn_wave();
        self.waves.push(wave);
        self.wave_count += 1;
        log::info!(
            "Wave {} spawned: {}x{} grid",
            self.wave_count,
            self.columns,
            self.rows
        );
    }

    fn spawn_wave(&mut self) -> Wave {
        Wave::new(
            self.columns,
            self.rows,
            self.enemy_size,
            self.config.playfield_width,
            &mut self.rng,
        )
    }

    /// Back to the first wave with a fresh player. Bolts still in flight
    /// are freed so the new session starts with a full pool.
    pub fn restart(&mut self) {
        self.player.restart();
        self.columns = self.config.initial_columns;
        self.rows = self.config.initial_rows;
        self.enemy_size = self.config.enemy_size;

        self.waves.clear();
        let wave = self.spawn_wave();
        self.waves.push(wave);
        self.wave_count = 1;

        self.projectiles.reset_all();
        self.score = 0;
        self.state = GameState::Playing;
        log::info!("Game restarted");
    }
}
