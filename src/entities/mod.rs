mod enemy;
mod player;
mod projectile;
mod wave;

// Re-export all public types
pub use enemy::{Enemy, EnemyKind};
pub use player::Player;
pub use projectile::{Projectile, ProjectilePool};
pub use wave::Wave;
