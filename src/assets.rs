//! Symbolic texture and sound handles
//!
//! The simulation never touches loaded resources. It names them with
//! [`TextureId`] and [`SoundId`]; the presentation layer resolves those
//! through an [`Assets`] table filled by an [`AssetLoader`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::sim::paddle::PaddleSize;

/// Texture handles used by the game screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    RedBlock,
    GreenBlock,
    BlueBlock,
    TanBlock,
    PurpleBlock,
    YellowBlock,
    BlackBlock,
    /// Counter block at a hit level (0-5)
    CounterBlock(u8),
    Hyperspace,
    Speed,
    LotsAmmo,
    Roamer,
    Bomb,
    Death,
    ExtraBall,
    MachineGun,
    WallOff,
    Clock,
    MultiBall,
    Sticky,
    Reverse,
    PadShrink,
    PadExpand,
    /// Ball cycle frame (1-4)
    Ball(u8),
    /// Ball birth frame (1-8)
    BallBirth(u8),
    Paddle(PaddleSize),
    /// Launch gauge frame (1-11)
    Guide(u8),
}

impl TextureId {
    /// Path relative to the resource root
    pub fn relative_path(self) -> String {
        let (dir, name) = match self {
            TextureId::RedBlock => ("blocks", "redblk".to_string()),
            TextureId::GreenBlock => ("blocks", "grnblk".to_string()),
            TextureId::BlueBlock => ("blocks", "blueblk".to_string()),
            TextureId::TanBlock => ("blocks", "tanblk".to_string()),
            TextureId::PurpleBlock => ("blocks", "purpblk".to_string()),
            TextureId::YellowBlock => ("blocks", "yellblk".to_string()),
            TextureId::BlackBlock => ("blocks", "blakblk".to_string()),
            TextureId::CounterBlock(0) => ("blocks", "cntblk".to_string()),
            TextureId::CounterBlock(n) => ("blocks", format!("cntblk{n}")),
            TextureId::Hyperspace => ("blocks", "hypspc".to_string()),
            TextureId::Speed => ("blocks", "speed".to_string()),
            TextureId::LotsAmmo => ("blocks", "lotsammo".to_string()),
            TextureId::Roamer => ("blocks", "roamer".to_string()),
            TextureId::Bomb => ("blocks", "bombblk".to_string()),
            TextureId::Death => ("blocks", "death1".to_string()),
            TextureId::ExtraBall => ("blocks", "xtrabal".to_string()),
            TextureId::MachineGun => ("blocks", "machgun".to_string()),
            TextureId::WallOff => ("blocks", "walloff".to_string()),
            TextureId::Clock => ("blocks", "clock".to_string()),
            TextureId::MultiBall => ("blocks", "multibal".to_string()),
            TextureId::Sticky => ("blocks", "stkyblk".to_string()),
            TextureId::Reverse => ("blocks", "reverse".to_string()),
            TextureId::PadShrink => ("blocks", "padshrk".to_string()),
            TextureId::PadExpand => ("blocks", "padexpn".to_string()),
            TextureId::Ball(n) => ("balls", format!("ball{n}")),
            TextureId::BallBirth(n) => ("balls", format!("bbirth{n}")),
            TextureId::Paddle(PaddleSize::Small) => ("paddle", "padsml".to_string()),
            TextureId::Paddle(PaddleSize::Medium) => ("paddle", "padmed".to_string()),
            TextureId::Paddle(PaddleSize::Huge) => ("paddle", "padhuge".to_string()),
            TextureId::Guide(n) => ("guides", format!("guide{n}")),
        };
        format!("textures/{dir}/{name}.png")
    }

    /// Every texture the game screen needs
    pub fn manifest() -> Vec<TextureId> {
        let mut ids = vec![
            TextureId::RedBlock,
            TextureId::GreenBlock,
            TextureId::BlueBlock,
            TextureId::TanBlock,
            TextureId::PurpleBlock,
            TextureId::YellowBlock,
            TextureId::BlackBlock,
            TextureId::Hyperspace,
            TextureId::Speed,
            TextureId::LotsAmmo,
            TextureId::Roamer,
            TextureId::Bomb,
            TextureId::Death,
            TextureId::ExtraBall,
            TextureId::MachineGun,
            TextureId::WallOff,
            TextureId::Clock,
            TextureId::MultiBall,
            TextureId::Sticky,
            TextureId::Reverse,
            TextureId::PadShrink,
            TextureId::PadExpand,
        ];
        ids.extend((0..=5).map(TextureId::CounterBlock));
        ids.extend((1..=4).map(TextureId::Ball));
        ids.extend((1..=8).map(TextureId::BallBirth));
        ids.extend(
            [PaddleSize::Small, PaddleSize::Medium, PaddleSize::Huge].map(TextureId::Paddle),
        );
        ids.extend((1..=11).map(TextureId::Guide));
        ids
    }
}

/// Sound cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundId {
    Applause,
    BallLost,
    BallShot,
    Boing,
    Bomb,
    GameOver,
    Paddle,
    Sticky,
    Touch,
    Warp,
    Wzzz,
    Wzzz2,
}

impl SoundId {
    pub const ALL: [SoundId; 12] = [
        SoundId::Applause,
        SoundId::BallLost,
        SoundId::BallShot,
        SoundId::Boing,
        SoundId::Bomb,
        SoundId::GameOver,
        SoundId::Paddle,
        SoundId::Sticky,
        SoundId::Touch,
        SoundId::Warp,
        SoundId::Wzzz,
        SoundId::Wzzz2,
    ];

    pub fn relative_path(self) -> &'static str {
        match self {
            SoundId::Applause => "sounds/applause.mp3",
            SoundId::BallLost => "sounds/ballLost.mp3",
            SoundId::BallShot => "sounds/ballShot.mp3",
            SoundId::Boing => "sounds/boing.mp3",
            SoundId::Bomb => "sounds/bomb.mp3",
            SoundId::GameOver => "sounds/game_over.mp3",
            SoundId::Paddle => "sounds/paddle.mp3",
            SoundId::Sticky => "sounds/sticky.mp3",
            SoundId::Touch => "sounds/touch.mp3",
            SoundId::Warp => "sounds/warp.mp3",
            SoundId::Wzzz => "sounds/wzzz.mp3",
            SoundId::Wzzz2 => "sounds/wzzz2.mp3",
        }
    }
}

/// Backend that turns resource files into handles
pub trait AssetLoader {
    type Texture;
    type Sound;

    fn load_texture(&mut self, path: &Path) -> anyhow::Result<Self::Texture>;
    fn load_sound(&mut self, path: &Path) -> anyhow::Result<Self::Sound>;
}

/// Loader that only checks files exist and hands back their paths
///
/// Used by headless runs to validate a resource tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathLoader;

impl PathLoader {
    fn check(path: &Path) -> anyhow::Result<PathBuf> {
        if !path.is_file() {
            anyhow::bail!("No such file");
        }
        Ok(path.to_path_buf())
    }
}

impl AssetLoader for PathLoader {
    type Texture = PathBuf;
    type Sound = PathBuf;

    fn load_texture(&mut self, path: &Path) -> anyhow::Result<PathBuf> {
        Self::check(path)
    }

    fn load_sound(&mut self, path: &Path) -> anyhow::Result<PathBuf> {
        Self::check(path)
    }
}

/// Loaded resource table
pub struct Assets<T, S> {
    textures: HashMap<TextureId, T>,
    sounds: HashMap<SoundId, S>,
}

impl<T, S> Assets<T, S> {
    /// Load the whole manifest from `root`
    ///
    /// Every entry is attempted. Failures are logged and skipped; the
    /// returned flag is false if anything was missing.
    pub fn load<L>(loader: &mut L, root: impl AsRef<Path>) -> (Self, bool)
    where
        L: AssetLoader<Texture = T, Sound = S>,
    {
        let root = root.as_ref();
        let mut assets = Self {
            textures: HashMap::new(),
            sounds: HashMap::new(),
        };
        let mut complete = true;

        for id in TextureId::manifest() {
            match load_one(root, &id.relative_path(), |p| loader.load_texture(p)) {
                Ok(texture) => {
                    assets.textures.insert(id, texture);
                }
                Err(e) => {
                    log::error!("{e:#}");
                    complete = false;
                }
            }
        }

        for id in SoundId::ALL {
            match load_one(root, id.relative_path(), |p| loader.load_sound(p)) {
                Ok(sound) => {
                    assets.sounds.insert(id, sound);
                }
                Err(e) => {
                    log::error!("{e:#}");
                    complete = false;
                }
            }
        }

        log::info!(
            "Loaded {} textures and {} sounds from {}",
            assets.textures.len(),
            assets.sounds.len(),
            root.display()
        );

        (assets, complete)
    }

    pub fn texture(&self, id: TextureId) -> Option<&T> {
        self.textures.get(&id)
    }

    pub fn sound(&self, id: SoundId) -> Option<&S> {
        self.sounds.get(&id)
    }
}

fn load_one<H>(
    root: &Path,
    relative: &str,
    load: impl FnOnce(&Path) -> anyhow::Result<H>,
) -> anyhow::Result<H> {
    let path: PathBuf = root.join(relative);
    load(&path).with_context(|| format!("Failed to load resource {}", path.display()))
}
