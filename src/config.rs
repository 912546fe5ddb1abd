use crate::input::Key;

/// Default tuning values for a session
pub mod consts {
    /// Playfield dimensions in playfield pixels
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_LIVES: u32 = 3;

    /// Player bolts
    pub const PROJECTILE_WIDTH: f32 = 5.0;
    pub const PROJECTILE_HEIGHT: f32 = 20.0;
    pub const PROJECTILE_SPEED: f32 = 20.0;
    pub const PROJECTILE_POOL_SIZE: usize = 10;

    /// Enemy grid of the first wave
    pub const INITIAL_COLUMNS: u32 = 3;
    pub const INITIAL_ROWS: u32 = 3;
    pub const ENEMY_SIZE: f32 = 60.0;

    /// Horizontal drift of a wave, per frame
    pub const WAVE_DRIFT: f32 = 2.0;
    /// Downward float of a wave that has not fully entered the playfield, per frame
    pub const WAVE_FLOAT_STEP: f32 = 4.0;
}

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub left: Key,
    pub right: Key,
    pub fire: Key,
    pub restart: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: Key::Char('a'),
            right: Key::Char('d'),
            fire: Key::Char('1'),
            restart: Key::Char('r'),
        }
    }
}

/// Everything a [`crate::Game`] needs to know up front
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Number of bolts pre-allocated into the pool
    pub projectile_pool_size: usize,
    pub initial_columns: u32,
    pub initial_rows: u32,
    pub enemy_size: f32,
    pub player_lives: u32,
    pub bindings: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: consts::PLAYFIELD_WIDTH,
            playfield_height: consts::PLAYFIELD_HEIGHT,
            projectile_pool_size: consts::PROJECTILE_POOL_SIZE,
            initial_columns: consts::INITIAL_COLUMNS,
            initial_rows: consts::INITIAL_ROWS,
            enemy_size: consts::ENEMY_SIZE,
            player_lives: consts::PLAYER_LIVES,
            bindings: KeyBindings::default(),
        }
    }
}
