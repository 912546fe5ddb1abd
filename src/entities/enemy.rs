use crate::assets::{SpriteId, Sprites};
use crate::collision::{Bounded, Rect, check_collision};
use crate::game::FrameContext;
use crate::renderer::Surface;

/// Kinds of enemy. New kinds are new variants, each with its own lives and sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Grunt,
}

impl EnemyKind {
    /// Hits needed to destroy the enemy, also its score reward
    pub fn lives(&self) -> i32 {
        match self {
            EnemyKind::Grunt => 1,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self {
            EnemyKind::Grunt => SpriteId::Enemy1,
        }
    }
}

/// One cell of a wave's grid
#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Fixed offset from the wave origin
    pub offset_x: f32,
    pub offset_y: f32,
    pub lives: i32,
    pub max_lives: i32,
    pub kind: EnemyKind,
    marked_for_deletion: bool,
}

impl Enemy {
    pub fn new(kind: EnemyKind, size: f32, offset_x: f32, offset_y: f32) -> Self {
        let lives = kind.lives();
        Self {
            x: 0.0,
            y: 0.0,
            size,
            offset_x,
            offset_y,
            lives,
            max_lives: lives,
            kind,
            marked_for_deletion: false,
        }
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    pub fn mark_for_deletion(&mut self) {
        self.marked_for_deletion = true;
    }

    pub fn hit(&mut self, damage: i32) {
        self.lives -= damage;
    }

    /// Follows the wave origin, then resolves bolt hits, the lower boundary
    /// and contact with the player, in that order. Several of these can
    /// apply in the same frame.
    pub fn update(&mut self, formation_x: f32, formation_y: f32, ctx: &mut FrameContext<'_>) {
        self.x = formation_x + self.offset_x;
        self.y = formation_y + self.offset_y;

        // Every overlapping bolt lands, not just the first
        let bounds = self.bounds();
        for projectile in ctx.projectiles.busy_mut() {
            if check_collision(&*projectile, &bounds) {
                self.hit(1);
                projectile.reset();
            }
        }

        if self.lives < 1 {
            self.mark_for_deletion();
            if !ctx.state.is_over() {
                *ctx.score += i64::from(self.max_lives);
            }
        }

        if self.y + self.size >= ctx.playfield_height {
            self.mark_for_deletion();
            ctx.state.end();
        }

        if check_collision(&*self, &*ctx.player) {
            self.mark_for_deletion();
            if !ctx.state.is_over() {
                *ctx.score -= 1;
            }
            if ctx.player.lose_life() < 1 {
                ctx.state.end();
            }
        }
    }

    pub fn draw(&self, surface: &mut impl Surface, sprites: &Sprites) {
        surface.draw_image(
            sprites.get(self.kind.sprite()),
            self.x,
            self.y,
            self.size,
            self.size,
        );
    }
}

impl Bounded for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.size, self.size)
    }
}
