//! Asset manifest and loading
//!
//! All sprites and the HUD font are read from an asset root directory at
//! startup. Any failure aborts startup with the offending path.

use std::path::{Path, PathBuf};

use crate::renderer::draw_list::tex;
use crate::renderer::{GlyphAtlas, ImageData};
use crate::sim::{PLANET_TEXTURE_COUNT, WEAPON_COUNT, WeaponKind};

/// HUD font size in pixels
pub const FONT_SIZE: f32 = 14.0;
/// Edge length of the generated power-up diamond
pub const DIAMOND_SIZE: u32 = 32;

/// Planet image names in texture-index order
pub const PLANET_FILES: [&str; PLANET_TEXTURE_COUNT] = [
    "planet_1",
    "planet_2",
    "planet_3",
    "planet_4",
    "planet_5",
    "planet_6",
    "planet_7",
    "planet_8",
    "planet_9",
    "planet_10",
    "planet_11",
    "planet_12",
    "planet_13",
    "planet_14",
    "planet_15",
    "planet_16",
    "planet_17",
    "planet_18",
    "nebula_1",
    "Black_hole",
    "Ice",
    "Lava",
    "Terran",
    "starburst",
    "supernova",
];

/// Asset loading failures
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to parse font {path}: {message}")]
    Font { path: PathBuf, message: String },
}

/// Locations of every asset under a root directory
#[derive(Debug, Clone)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn img(&self, relative: &str) -> PathBuf {
        self.root.join("img").join(relative)
    }

    pub fn font(&self) -> PathBuf {
        self.root.join("fonts").join("SpaceFrigateItalic.ttf")
    }

    pub fn backgrounds(&self) -> [PathBuf; 2] {
        [self.img("space_bg1.png"), self.img("space_bg2.png")]
    }

    pub fn player(&self) -> PathBuf {
        self.img("Player/ship_1.png")
    }

    pub fn enemy(&self) -> PathBuf {
        self.img("Enemies/enemy-green-01.png")
    }

    /// Sprite for a weapon's projectile (also its panel icon)
    pub fn weapon(&self, kind: WeaponKind) -> PathBuf {
        self.img(&format!("Projectiles/{}.png", kind.name()))
    }

    pub fn planets(&self) -> Vec<PathBuf> {
        PLANET_FILES
            .iter()
            .map(|name| self.img(&format!("Planets/{}.png", name)))
            .collect()
    }
}

/// Everything the renderer needs, decoded and ready to upload
#[derive(Debug)]
pub struct Assets {
    pub atlas: GlyphAtlas,
    pub backgrounds: [ImageData; 2],
    pub player: ImageData,
    pub enemy: ImageData,
    pub powerup: ImageData,
    pub weapons: [ImageData; WEAPON_COUNT],
    pub planets: Vec<ImageData>,
}

impl Assets {
    /// Load and decode every asset under `paths`
    pub fn load(paths: &AssetPaths) -> Result<Self, AssetError> {
        log::info!("Loading assets from {}", paths.root().display());

        let font = load_font(&paths.font())?;
        let atlas = GlyphAtlas::from_font(&font, FONT_SIZE);

        let [bg1, bg2] = paths.backgrounds();
        let backgrounds = [load_image(&bg1)?, load_image(&bg2)?];
        let player = load_image(&paths.player())?;
        let enemy = load_image(&paths.enemy())?;

        let mut weapons: [ImageData; WEAPON_COUNT] = std::array::from_fn(|_| ImageData::white());
        for kind in WeaponKind::ALL {
            weapons[kind.index()] = load_image(&paths.weapon(kind))?;
        }

        let planets = paths
            .planets()
            .iter()
            .map(|path| load_image(path))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Loaded {} sprites", 4 + WEAPON_COUNT + planets.len());

        Ok(Self {
            atlas,
            backgrounds,
            player,
            enemy,
            powerup: diamond(DIAMOND_SIZE),
            weapons,
            planets,
        })
    }

    /// Images in renderer texture-slot order, with labels
    pub fn slot_images(&self) -> Vec<(String, ImageData)> {
        let mut slots: Vec<(String, ImageData)> = Vec::with_capacity(tex::COUNT);
        slots.push(("white".into(), ImageData::white()));
        slots.push((
            "glyph_atlas".into(),
            ImageData {
                width: self.atlas.width,
                height: self.atlas.height,
                pixels: self.atlas.pixels.clone(),
            },
        ));
        slots.push(("background_1".into(), self.backgrounds[0].clone()));
        slots.push(("background_2".into(), self.backgrounds[1].clone()));
        slots.push(("player".into(), self.player.clone()));
        slots.push(("enemy".into(), self.enemy.clone()));
        slots.push(("powerup".into(), self.powerup.clone()));
        for (kind, image) in WeaponKind::ALL.iter().zip(&self.weapons) {
            slots.push((format!("weapon_{}", kind.name()), image.clone()));
        }
        for (name, image) in PLANET_FILES.iter().zip(&self.planets) {
            slots.push((format!("planet_{}", name), image.clone()));
        }
        slots
    }
}

/// Decode a PNG into RGBA8
pub fn load_image(path: &Path) -> Result<ImageData, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = decoded.to_rgba8();
    Ok(ImageData {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

pub fn load_font(path: &Path) -> Result<fontdue::Font, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(|message| {
        AssetError::Font {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    })
}

/// White diamond on a transparent square, tinted per power-up at draw time
pub fn diamond(size: u32) -> ImageData {
    let half = size as f32 / 2.0;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 + 0.5 - half).abs();
            let dy = (y as f32 + 0.5 - half).abs();
            // One pixel of soft edge
            let alpha = (half - (dx + dy)).clamp(0.0, 1.0);
            pixels.extend_from_slice(&[255, 255, 255, (alpha * 255.0) as u8]);
        }
    }
    ImageData {
        width: size,
        height: size,
        pixels,
    }
}
