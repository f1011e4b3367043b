//! Headless part rendering demo
//!
//! Registers a couple of tails and a player compatibility hook, then renders
//! a few frames for an ordinary player and an alternate player
//! implementation (wearing an extra outfit tail), logging every graphics call.
//!
//! Usage: `tails_viewer [config.toml|config.ron]`

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use tails_render::foundation::logging;
use tails_render::prelude::*;
use thiserror::Error;

const FRAMES: u32 = 4;

#[derive(Debug, Error)]
enum ViewerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Part(#[from] PartError),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

struct DemoCharacter {
    id: CharacterId,
    kind: CharacterKind,
    pose: Pose,
}

impl Character for DemoCharacter {
    fn id(&self) -> CharacterId {
        self.id
    }

    fn kind(&self) -> CharacterKind {
        self.kind.clone()
    }

    fn pose(&self) -> Pose {
        self.pose
    }

    fn mount_anchor(&self, mount: MountPoint) -> Vec3 {
        match mount {
            MountPoint::Head => Vec3::new(0.0, 1.5, 0.0),
            MountPoint::Back | MountPoint::Chest => Vec3::new(0.0, 1.1, 0.0),
            MountPoint::Waist => Vec3::new(0.0, 0.75, 0.0),
            _ => Vec3::zeros(),
        }
    }
}

/// Graphics backend that logs each call on top of a CPU matrix stack
struct LoggingGraphics {
    stack: MatrixStack,
}

impl GraphicsState for LoggingGraphics {
    fn push_state(&mut self) {
        self.stack.push_state();
        log::debug!("push (depth {})", self.stack.depth());
    }

    fn pop_state(&mut self) {
        self.stack.pop_state();
        log::debug!("pop (depth {})", self.stack.depth());
    }

    fn translate(&mut self, offset: Vec3) {
        log::debug!("translate ({:.2}, {:.2}, {:.2})", offset.x, offset.y, offset.z);
        self.stack.translate(offset);
    }

    fn scale(&mut self, factors: Vec3) {
        log::debug!("scale ({:.2}, {:.2}, {:.2})", factors.x, factors.y, factors.z);
        self.stack.scale(factors);
    }

    fn transform(&mut self, matrix: &Mat4) {
        log::debug!(
            "transform (origin {:.2}, {:.2}, {:.2})",
            matrix[(0, 3)],
            matrix[(1, 3)],
            matrix[(2, 3)]
        );
        self.stack.transform(matrix);
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        log::debug!("bind {:?}", texture);
        self.stack.bind_texture(texture);
    }
}

/// Stand-in for a real tail mesh
struct TailModel {
    segments: u32,
}

impl PartModel for TailModel {
    fn render(
        &self,
        _gfx: &mut dyn GraphicsState,
        character: &dyn Character,
        subtype: u32,
        partial_tick: f32,
    ) -> Result<(), DrawError> {
        log::info!(
            "draw {} segments, subtype {} for {} ({:?}, t={:.2})",
            self.segments,
            subtype,
            character.id(),
            character.pose(),
            partial_tick
        );
        Ok(())
    }
}

/// Generates a vertical gradient mask per slot
struct GradientSource {
    config: CompositorConfig,
}

impl TextureSource for GradientSource {
    fn layer(&self, _part: &Part, _subid: u32, slot: &str) -> Result<RgbaImage, TextureError> {
        let (width, height) = (self.config.width, self.config.height);
        // Later slots cover less of the part (tip, stripes, ...)
        let coverage = match slot {
            "base" | "scales" => height,
            "tip" => height / 4,
            _ => height / 2,
        };
        Ok(RgbaImage::from_fn(width, height, |_, y| {
            if y >= height - coverage {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        }))
    }
}

/// Lowers parts slightly for every player-like character
struct PlayerCompatHook;

impl PreRenderHook for PlayerCompatHook {
    fn on_pre_render(
        &self,
        gfx: &mut dyn GraphicsState,
        character: &dyn Character,
        part: &Part,
        _info: &PartInfo,
        _position: Vec3,
        _partial_tick: f32,
    ) -> Result<(), HookError> {
        log::debug!("player hook for '{}' on {}", part.name(), character.id());
        gfx.translate(Vec3::new(0.0, -0.05, 0.0));
        Ok(())
    }
}

fn load_config() -> Result<TailsConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => TailsConfig::load_from_file(&path)?,
        None => TailsConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn register_parts(parts: &mut PartRegistry) -> Result<(PartId, PartId), PartError> {
    let mut fox = Part::new(
        "fox",
        1,
        Arc::new(TailModel { segments: 6 }),
        Some("Kihira"),
        ["base", "tip"],
    );
    fox.set_all_authors("Kihira")?
        .set_author("Chloe", 1, 1)?;

    let mut dragon = Part::new(
        "dragon",
        1,
        Arc::new(TailModel { segments: 12 }),
        Some("Kihira"),
        ["base", "stripes"],
    )
    .with_subtype_textures(1, ["scales"])?
    .with_placement(PosePlacement {
        standing: Placement::new(Vec3::new(0.0, 0.7, 0.15), 1.0),
        crouching: Placement::new(Vec3::new(0.0, 0.6, 0.45), 1.0),
    });
    dragon.set_subtype_author("Kihira", 0)?;

    Ok((parts.register(fox)?, parts.register(dragon)?))
}

fn run() -> Result<(), ViewerError> {
    let config = load_config()?;
    logging::init_with_level(&config.log_level);

    let mut parts = PartRegistry::new();
    let (fox, dragon) = register_parts(&mut parts)?;

    let mut hooks = RenderHookRegistry::new();
    hooks.register(CharacterKind::Player, Arc::new(PlayerCompatHook))?;

    let source = GradientSource { config: config.compositor.clone() };
    let mut renderer = PartRenderer::new(
        Arc::new(parts),
        Arc::new(hooks),
        TextureCache::new(LayerCompositor::new(source, config.compositor.clone())),
    );

    let mut gfx = LoggingGraphics { stack: MatrixStack::new() };
    let mut textures = TexturePool::new();

    let mut steve = DemoCharacter {
        id: CharacterId(1),
        kind: CharacterKind::Player,
        pose: Pose::Standing,
    };
    let astronaut = DemoCharacter {
        id: CharacterId(2),
        kind: CharacterKind::PlayerVariant("space_suit".to_string()),
        pose: Pose::Standing,
    };

    let mut steve_parts = CharacterCosmetics::new(steve.id);
    steve_parts.equip(PartInfo::new(fox, 0).with_tints([0xD0601F, 0xFFFFFF]))?;
    let mut astronaut_parts = CharacterCosmetics::new(astronaut.id);
    astronaut_parts.equip(PartInfo::new(dragon, 1).with_tints([0x2E8B57]))?;

    let mut spare_tail = OutfitPart::new(fox, MountPoint::Waist).with_tints([0x8B4513, 0xF5DEB3]);
    spare_tail.mount_offset = [0.2, 0.0, 0.1];
    spare_tail.rotation = [0.0, 25.0, 0.0];

    for frame in 0..FRAMES {
        log::info!("frame {}", frame);
        steve.pose = if frame % 2 == 1 { Pose::Crouching } else { Pose::Standing };
        if frame == 2 {
            if let Some(info) = steve_parts.get_mut(fox) {
                info.set_tint(1, 0x202020);
            }
        }

        let partial_tick = frame as f32 / FRAMES as f32;
        renderer.render_character(&mut gfx, &mut textures, &steve, &mut steve_parts, Vec3::zeros(), partial_tick);
        renderer.render_character(
            &mut gfx,
            &mut textures,
            &astronaut,
            &mut astronaut_parts,
            Vec3::new(4.0, 0.0, 0.0),
            partial_tick,
        );

        if frame == 3 {
            spare_tail.tints[0] = 0x000000;
        }
        renderer.render_outfit(
            &mut gfx,
            &mut textures,
            &astronaut,
            &mut spare_tail,
            Vec3::new(4.0, 0.0, 0.0),
            partial_tick,
        )?;
    }

    let stats = renderer.cache_stats();
    log::info!(
        "cache: {} compiles, {} releases, {} failures; {} textures live",
        stats.compiles,
        stats.releases,
        stats.failures,
        textures.live_count()
    );

    renderer.unload_character(steve_parts, &mut textures);
    renderer.unload_character(astronaut_parts, &mut textures);
    renderer.release_outfit(&mut spare_tail, &mut textures);
    log::info!("after unload: {} textures live", textures.live_count());
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("tails_viewer: {err}");
        std::process::exit(1);
    }
}
