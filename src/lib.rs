// Library exports for testing
pub use app::App;
pub use assets::{AssetProvider, BuiltinAssets, DirectoryAssets, Sprite, SpriteId, Sprites};
pub use collision::{Bounded, Rect, check_collision};
pub use config::{GameConfig, KeyBindings};
pub use entities::{Enemy, EnemyKind, Player, Projectile, ProjectilePool, Wave};
pub use game::{FrameContext, Game, GameState};
pub use input::{InputEvent, InputManager, Key, KeyHistory};
pub use renderer::{
    DrawCall, Font, NullSurface, RecordingSurface, Surface, TerminalSurface, TextAlign, TextState,
};

pub mod app;
pub mod assets;
pub mod collision;
pub mod config;
pub mod entities;
pub mod game;
pub mod input;
pub mod renderer;
