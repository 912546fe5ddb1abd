use super::projectile::ProjectilePool;
use crate::assets::Sprite;
use crate::collision::{Bounded, Rect};
use crate::config::KeyBindings;
use crate::config::consts::{PLAYER_HEIGHT, PLAYER_SPEED, PLAYER_WIDTH};
use crate::input::{Key, KeyHistory};
use crate::renderer::Surface;

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    /// Horizontal movement per frame
    pub speed: f32,
    max_lives: u32,
    playfield_width: f32,
    playfield_height: f32,
}

impl Player {
    /// Creates a player centred at the bottom of the playfield
    pub fn new(playfield_width: f32, playfield_height: f32, lives: u32) -> Self {
        let mut player = Self {
            x: 0.0,
            y: 0.0,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            lives,
            speed: PLAYER_SPEED,
            max_lives: lives,
            playfield_width,
            playfield_height,
        };
        player.restart();
        player
    }

    /// Applies movement from the held keys. Each direction is its binding or
    /// its arrow key. When both directions are held the one pressed most
    /// recently wins.
    pub fn update(&mut self, keys: &KeyHistory, bindings: &KeyBindings) {
        let left = keys.latest(&[bindings.left, Key::Left]);
        let right = keys.latest(&[bindings.right, Key::Right]);
        if left > right {
            self.x -= self.speed;
        }
        if right > left {
            self.x += self.speed;
        }
        self.clamp_to_playfield();
    }

    /// Keeps the ship's centre on the playfield; the sprite may overhang by half its width
    fn clamp_to_playfield(&mut self) {
        let min_x = -self.width * 0.5;
        let max_x = self.playfield_width - self.width * 0.5;
        self.x = self.x.clamp(min_x, max_x);
    }

    /// Fires one bolt from the nose of the ship.
    /// Returns false when the pool has no free bolt.
    pub fn shoot(&self, pool: &mut ProjectilePool) -> bool {
        match pool.acquire() {
            Some(projectile) => {
                projectile.start(self.center_x(), self.y);
                true
            }
            None => {
                log::debug!("Projectile pool exhausted, shot dropped");
                false
            }
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    /// Takes one life. Returns the lives left.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Back to the starting position with full lives
    pub fn restart(&mut self) {
        self.x = (self.playfield_width - self.width) * 0.5;
        self.y = self.playfield_height - self.height;
        self.lives = self.max_lives;
    }

    pub fn draw(&self, surface: &mut impl Surface, sprite: &Sprite) {
        surface.draw_image(sprite, self.x, self.y, self.width, self.height);
    }
}

impl Bounded for Player {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(800.0, 600.0, 3)
    }

    #[test]
    fn test_player_new() {
        let player = player();
        assert_eq!(player.x, 350.0);
        assert_eq!(player.y, 500.0);
        assert_eq!(player.lives, 3);
        assert_eq!(player.speed, 5.0);
    }

    #[test]
    fn test_player_moves_left_and_right() {
        let bindings = KeyBindings::default();
        let mut keys = KeyHistory::new();
        let mut player = player();

        keys.press(bindings.left);
        player.update(&keys, &bindings);
        assert_eq!(player.x, 345.0);

        keys.release(bindings.left);
        keys.press(bindings.right);
        player.update(&keys, &bindings);
        player.update(&keys, &bindings);
        assert_eq!(player.x, 355.0);
    }

    #[test]
    fn test_no_keys_no_movement() {
        let bindings = KeyBindings::default();
        let mut player = player();
        player.update(&KeyHistory::new(), &bindings);
        assert_eq!(player.x, 350.0);
    }

    #[test]
    fn test_most_recent_direction_wins() {
        let bindings = KeyBindings::default();
        let mut keys = KeyHistory::new();
        let mut player = player();

        keys.press(bindings.right);
        keys.press(bindings.left);
        player.update(&keys, &bindings);
        assert_eq!(player.x, 345.0);

        keys.release(bindings.right);
        keys.press(bindings.right);
        player.update(&keys, &bindings);
        assert_eq!(player.x, 350.0);
    }

    #[test]
    fn test_arrow_and_letter_held_together() {
        let bindings = KeyBindings::default();
        let mut keys = KeyHistory::new();
        let mut player = player();

        keys.press(bindings.left);
        keys.press(Key::Left);
        keys.release(bindings.left);
        // Arrow still held
        player.update(&keys, &bindings);
        assert_eq!(player.x, 345.0);

        keys.press(Key::Right);
        player.update(&keys, &bindings);
        assert_eq!(player.x, 350.0);
    }

    #[test]
    fn test_unrelated_keys_are_ignored() {
        let bindings = KeyBindings::default();
        let mut keys = KeyHistory::new();
        let mut player = player();
        keys.press(Key::Char('x'));
        keys.press(bindings.fire);
        player.update(&keys, &bindings);
        assert_eq!(player.x, 350.0);
    }

    #[test]
    fn test_player_clamped_with_half_overhang() {
        let bindings = KeyBindings::default();
        let mut keys = KeyHistory::new();
        let mut player = player();

        keys.press(bindings.left);
        for _ in 0..200 {
            player.update(&keys, &bindings);
        }
        assert_eq!(player.x, -50.0);

        keys.release(bindings.left);
        keys.press(bindings.right);
        for _ in 0..300 {
            player.update(&keys, &bindings);
        }
        assert_eq!(player.x, 750.0);
    }

    #[test]
    fn test_shoot_starts_bolt_at_nose() {
        let mut pool = ProjectilePool::new(10);
        let player = player();
        assert!(player.shoot(&mut pool));

        let bolt = pool.iter().find(|p| !p.is_free()).unwrap();
        assert_eq!(bolt.x + bolt.width * 0.5, player.center_x());
        assert_eq!(bolt.y, player.y);
    }

    #[test]
    fn test_shoot_with_exhausted_pool() {
        let mut pool = ProjectilePool::new(1);
        let player = player();
        assert!(player.shoot(&mut pool));
        assert!(!player.shoot(&mut pool));
        assert_eq!(pool.capacity(), 1);
    }

    #[test]
    fn test_lose_life_and_restart() {
        let mut player = player();
        player.x = 10.0;
        assert_eq!(player.lose_life(), 2);
        assert_eq!(player.lose_life(), 1);
        assert_eq!(player.lose_life(), 0);
        assert_eq!(player.lose_life(), 0);
        assert!(!player.is_alive());

        player.restart();
        assert_eq!(player.lives, 3);
        assert_eq!(player.x, 350.0);
        assert!(player.is_alive());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds_x(
                moves in prop::collection::vec(prop::bool::ANY, 0..400)
            ) {
                let bindings = KeyBindings::default();
                let mut keys = KeyHistory::new();
                let mut player = player();
                for move_right in moves {
                    keys.clear();
                    keys.press(if move_right { bindings.right } else { bindings.left });
                    player.update(&keys, &bindings);
                    prop_assert!(player.x >= -player.width * 0.5);
                    prop_assert!(player.x <= 800.0 - player.width * 0.5);
                }
            }
        }
    }
}
