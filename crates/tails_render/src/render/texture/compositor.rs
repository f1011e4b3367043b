//! Tint-and-blend texture compositing

use image::{Rgba, RgbaImage};

use super::{TextureCompiler, TextureError, TextureSource};
use crate::character::CharacterId;
use crate::config::CompositorConfig;
use crate::parts::{Part, PartInfo};

/// Composites every texture slot of a subtype into one image
///
/// Starting from a transparent canvas, each slot layer is multiplied by the
/// slot's tint and alpha-blended over the result in slot order. Slots
/// without a tint use the configured default.
pub struct LayerCompositor<S> {
    source: S,
    config: CompositorConfig,
}

impl<S: TextureSource> LayerCompositor<S> {
    /// Create a compositor reading layers from `source`
    pub fn new(source: S, config: CompositorConfig) -> Self {
        Self { source, config }
    }

    /// Canvas configuration
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }
}

impl<S: TextureSource> TextureCompiler for LayerCompositor<S> {
    fn compile(&self, character: CharacterId, part: &Part, info: &PartInfo) -> Result<RgbaImage, TextureError> {
        let subid = info.subid();
        let slots = part.texture_names(subid)?;
        let expected = (self.config.width, self.config.height);
        let mut canvas = RgbaImage::new(expected.0, expected.1);

        for (index, slot) in slots.iter().enumerate() {
            let layer = self.source.layer(part, subid, slot)?;
            if layer.dimensions() != expected {
                return Err(TextureError::SizeMismatch {
                    slot: slot.clone(),
                    expected,
                    actual: layer.dimensions(),
                });
            }

            let tint = info.tint(index).unwrap_or(self.config.default_tint);
            for (dst, src) in canvas.pixels_mut().zip(layer.pixels()) {
                blend_over(dst, apply_tint(*src, tint));
            }
        }

        log::debug!(
            "Composited '{}' subtype {} for {} ({} layers)",
            part.name(),
            subid,
            character,
            slots.len()
        );
        Ok(canvas)
    }
}

/// Multiply a pixel's color channels by a `0xRRGGBB` tint
fn apply_tint(pixel: Rgba<u8>, tint: u32) -> Rgba<u8> {
    let channel = |value: u8, shift: u32| {
        let factor = (tint >> shift) & 0xFF;
        ((u32::from(value) * factor + 127) / 255) as u8
    };
    Rgba([
        channel(pixel[0], 16),
        channel(pixel[1], 8),
        channel(pixel[2], 0),
        pixel[3],
    ])
}

/// Source-over alpha blend of `src` onto `dst`
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let src_a = f32::from(src[3]) / 255.0;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    for c in 0..3 {
        let s = f32::from(src[c]) / 255.0;
        let d = f32::from(dst[c]) / 255.0;
        let out = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        dst[c] = (out * 255.0).round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::PartId;
    use crate::testing::{NullModel, SolidSource};
    use std::sync::Arc;

    fn config() -> CompositorConfig {
        CompositorConfig {
            width: 2,
            height: 2,
            default_tint: 0x00FF_FFFF,
        }
    }

    fn two_layer_part() -> Part {
        Part::new("fox", 0, Arc::new(NullModel), None, ["base", "tip"])
    }

    #[test]
    fn test_tint_multiplies_channels() {
        assert_eq!(apply_tint(Rgba([255, 255, 255, 200]), 0xFF8000), Rgba([255, 128, 0, 200]));
        assert_eq!(apply_tint(Rgba([100, 50, 10, 255]), 0xFFFFFF), Rgba([100, 50, 10, 255]));
    }

    #[test]
    fn test_blend_over() {
        let mut dst = Rgba([0, 0, 255, 255]);
        blend_over(&mut dst, Rgba([255, 0, 0, 255]));
        assert_eq!(dst, Rgba([255, 0, 0, 255]));

        let mut dst = Rgba([0, 0, 255, 255]);
        blend_over(&mut dst, Rgba([255, 0, 0, 0]));
        assert_eq!(dst, Rgba([0, 0, 255, 255]));

        let mut dst = Rgba([0, 0, 0, 0]);
        blend_over(&mut dst, Rgba([255, 255, 255, 128]));
        assert_eq!(dst, Rgba([255, 255, 255, 128]));
    }

    #[test]
    fn test_layers_tinted_and_stacked_in_slot_order() {
        let source = SolidSource::new(2, 2)
            .with_layer("base", Rgba([255, 255, 255, 255]))
            .with_layer("tip", Rgba([255, 255, 255, 0]));
        let compositor = LayerCompositor::new(source, config());
        let info = PartInfo::new(PartId(0), 0).with_tints([0x00FF00, 0xFF0000]);

        let image = compositor.compile(CharacterId(1), &two_layer_part(), &info).unwrap();
        // Transparent tip leaves the green base visible
        assert!(image.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_default_tint_for_missing_slot() {
        let source = SolidSource::new(2, 2)
            .with_layer("base", Rgba([10, 20, 30, 255]))
            .with_layer("tip", Rgba([200, 200, 200, 255]));
        let compositor = LayerCompositor::new(source, config());
        let info = PartInfo::new(PartId(0), 0).with_tints([0xFFFFFF]);

        let image = compositor.compile(CharacterId(1), &two_layer_part(), &info).unwrap();
        assert_eq!(*image.get_pixel(1, 1), Rgba([200, 200, 200, 255]));
    }

    #[test]
    fn test_missing_layer_fails() {
        let source = SolidSource::new(2, 2).with_layer("base", Rgba([0, 0, 0, 255]));
        let compositor = LayerCompositor::new(source, config());
        let info = PartInfo::new(PartId(0), 0);

        let result = compositor.compile(CharacterId(1), &two_layer_part(), &info);
        assert!(matches!(result, Err(TextureError::MissingLayer { ref slot, .. }) if slot == "tip"));
    }

    #[test]
    fn test_size_mismatch_fails() {
        let source = SolidSource::new(4, 4)
            .with_layer("base", Rgba([0, 0, 0, 255]))
            .with_layer("tip", Rgba([0, 0, 0, 255]));
        let compositor = LayerCompositor::new(source, config());
        let info = PartInfo::new(PartId(0), 0);

        let result = compositor.compile(CharacterId(1), &two_layer_part(), &info);
        assert_eq!(
            result.unwrap_err(),
            TextureError::SizeMismatch {
                slot: "base".to_string(),
                expected: (2, 2),
                actual: (4, 4),
            }
        );
    }

    #[test]
    fn test_bad_subtype_fails() {
        let source = SolidSource::new(2, 2);
        let compositor = LayerCompositor::new(source, config());
        let info = PartInfo::new(PartId(0), 3);

        let result = compositor.compile(CharacterId(1), &two_layer_part(), &info);
        assert!(matches!(result, Err(TextureError::Part(_))));
    }
}
