use crate::collision::{Bounded, Rect};
use crate::config::consts::{PROJECTILE_HEIGHT, PROJECTILE_SPEED, PROJECTILE_WIDTH};
use crate::renderer::Surface;

/// A player bolt. Lives in a [`ProjectilePool`] and is reused, never dropped.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Upward movement per frame
    pub speed: f32,
    free: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new()
    }
}

impl Projectile {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
            free: true,
        }
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    /// Marks the bolt busy, horizontally centred on `center_x` with its top at `top_y`
    pub fn start(&mut self, center_x: f32, top_y: f32) {
        self.x = center_x - self.width * 0.5;
        self.y = top_y;
        self.free = false;
    }

    /// Returns the bolt to the pool
    pub fn reset(&mut self) {
        self.free = true;
    }

    pub fn update(&mut self) {
        if self.free {
            return;
        }
        self.y -= self.speed;
        // Bottom edge above the top boundary
        if self.y < -self.height {
            self.reset();
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        if !self.free {
            surface.fill_rect(self.x, self.y, self.width, self.height);
        }
    }
}

impl Bounded for Projectile {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Fixed set of pre-allocated bolts. Never grows or shrinks after construction.
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    projectiles: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            projectiles: (0..capacity).map(|_| Projectile::new()).collect(),
        }
    }

    /// First free bolt, or `None` when every bolt is in flight
    pub fn acquire(&mut self) -> Option<&mut Projectile> {
        self.projectiles.iter_mut().find(|p| p.is_free())
    }

    pub fn capacity(&self) -> usize {
        self.projectiles.len()
    }

    pub fn free_count(&self) -> usize {
        self.projectiles.iter().filter(|p| p.is_free()).count()
    }

    pub fn busy_count(&self) -> usize {
        self.capacity() - self.free_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Bolts currently in flight
    pub fn busy_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut().filter(|p| !p.is_free())
    }

    /// Advances and draws every bolt
    pub fn update_and_draw(&mut self, surface: &mut impl Surface) {
        for projectile in &mut self.projectiles {
            projectile.update();
            projectile.draw(surface);
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for projectile in &self.projectiles {
            projectile.draw(surface);
        }
    }

    /// Frees every bolt
    pub fn reset_all(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.reset();
        }
    }
}
