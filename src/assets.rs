use color_eyre::eyre::WrapErr;
use image::RgbaImage;
use std::path::PathBuf;
use std::sync::Arc;

/// Named sprites the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    Enemy1,
}

impl SpriteId {
    pub fn file_name(&self) -> &'static str {
        match self {
            SpriteId::Player => "player.png",
            SpriteId::Enemy1 => "enemy1.png",
        }
    }
}

/// A drawable image. Sprites without pixel data are drawn by the surface
/// with its own fallback glyph for the id.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub id: SpriteId,
    pixels: Option<Arc<RgbaImage>>,
}

impl Sprite {
    pub fn builtin(id: SpriteId) -> Self {
        Self { id, pixels: None }
    }

    pub fn from_image(id: SpriteId, image: RgbaImage) -> Self {
        Self {
            id,
            pixels: Some(Arc::new(image)),
        }
    }

    pub fn has_pixels(&self) -> bool {
        self.pixels.is_some()
    }

    /// Samples the pixel at normalised coordinates (`u`, `v` in 0..1).
    /// Returns `None` for builtin sprites and fully transparent pixels.
    pub fn sample(&self, u: f32, v: f32) -> Option<[u8; 3]> {
        let pixels = self.pixels.as_ref()?;
        if pixels.width() == 0 || pixels.height() == 0 {
            return None;
        }
        let px = ((u.clamp(0.0, 1.0) * pixels.width() as f32) as u32).min(pixels.width() - 1);
        let py = ((v.clamp(0.0, 1.0) * pixels.height() as f32) as u32).min(pixels.height() - 1);
        let [r, g, b, a] = pixels.get_pixel(px, py).0;
        (a > 0).then_some([r, g, b])
    }
}

/// Resolves sprite ids to drawable sprites
pub trait AssetProvider {
    fn resolve(&self, id: SpriteId) -> Sprite;
}

/// Every sprite the game needs, resolved once up front
#[derive(Debug, Clone)]
pub struct Sprites {
    pub player: Sprite,
    pub enemy1: Sprite,
}

impl Sprites {
    pub fn resolve(assets: &impl AssetProvider) -> Self {
        Self {
            player: assets.resolve(SpriteId::Player),
            enemy1: assets.resolve(SpriteId::Enemy1),
        }
    }

    pub fn get(&self, id: SpriteId) -> &Sprite {
        match id {
            SpriteId::Player => &self.player,
            SpriteId::Enemy1 => &self.enemy1,
        }
    }
}

/// Glyph-only sprites, no files involved
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn resolve(&self, id: SpriteId) -> Sprite {
        Sprite::builtin(id)
    }
}

/// Loads `<root>/<id file name>` PNGs, falling back to builtin sprites
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn load(&self, id: SpriteId) -> color_eyre::Result<Sprite> {
        let path = self.root.join(id.file_name());
        let image = image::open(&path)
            .wrap_err_with(|| format!("failed to load sprite {}", path.display()))?
            .to_rgba8();
        log::debug!(
            "Loaded sprite {:?} ({}x{}) from {}",
            id,
            image.width(),
            image.height(),
            path.display()
        );
        Ok(Sprite::from_image(id, image))
    }
}

impl AssetProvider for DirectoryAssets {
    fn resolve(&self, id: SpriteId) -> Sprite {
        self.load(id).unwrap_or_else(|err| {
            log::warn!("{err:#}; using builtin sprite for {id:?}");
            Sprite::builtin(id)
        })
    }
}
