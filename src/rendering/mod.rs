//! Rendering: display-list compositions, text layout and rasterization

pub mod font;
pub mod layout;
pub mod paint;
pub mod raster;

use sha2::{Digest, Sha256};

pub use paint::{Fill, PaintCommand};

/// Logical edge length of every design, in pixels
pub const CANVAS_SIZE: u32 = 1080;

/// Element id the live preview is mounted under
pub const CANVAS_ID: &str = "template-canvas";

/// An RGBA colour with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque colour from a `0xRRGGBB` literal.
    pub const fn hex(v: u32) -> Self {
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Multiply the alpha channel by `opacity` (clamped to 0..=1).
    pub fn with_opacity(self, opacity: f32) -> Self {
        let o = opacity.clamp(0.0, 1.0);
        Self {
            a: (self.a as f32 * o).round() as u8,
            ..self
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Linear interpolation between two colours, `t` in 0..=1.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Axis-aligned rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `width` x `height` box centred on (`cx`, `cy`).
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Shrink by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            (self.width - amount * 2.0).max(0.0),
            (self.height - amount * 2.0).max(0.0),
        )
    }
}

/// A rendered design: a fixed-size display list plus the scale it is shown at.
///
/// Templates always produce compositions at 1:1 logical scale. The live
/// preview may be mounted at a smaller `scale`; export forces it back to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Stable element id
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Display scale (1.0 = true size)
    pub scale: f32,
    pub commands: Vec<PaintCommand>,
}

impl Composition {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            scale: 1.0,
            commands: Vec::new(),
        }
    }

    /// A square canvas of `CANVAS_SIZE` with the canonical preview id.
    pub fn canvas() -> Self {
        Self::new(CANVAS_ID, CANVAS_SIZE, CANVAS_SIZE)
    }

    pub fn push(&mut self, cmd: PaintCommand) {
        self.commands.push(cmd);
    }

    pub fn extend(&mut self, cmds: impl IntoIterator<Item = PaintCommand>) {
        self.commands.extend(cmds);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Same composition displayed at `scale`.
    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            scale,
            ..self.clone()
        }
    }

    /// Distinct image references in paint order.
    pub fn image_sources(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for cmd in &self.commands {
            if let PaintCommand::Image { src, .. } = cmd {
                if !out.iter().any(|s| s == src) {
                    out.push(src.clone());
                }
            }
        }
        out
    }

    /// All text content, one block per line, for text snapshots and tests.
    pub fn text_content(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                PaintCommand::Text { block, .. } => Some(block.lines.join("\n")),
                _ => None,
            })
            .collect()
    }
}

/// A rasterized, PNG-encoded design
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// Hex SHA-256 of the encoded bytes; used to compare renders against goldens.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_opacity_and_lerp() {
        let c = Color::hex(0x2563eb).with_opacity(0.5);
        assert_eq!((c.r, c.g, c.b, c.a), (0x25, 0x63, 0xeb, 128));
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert_eq!(mid.r, 128);
        assert!(mid.is_opaque());
    }

    #[test]
    fn image_sources_are_deduplicated() {
        let mut comp = Composition::canvas();
        for _ in 0..2 {
            comp.push(PaintCommand::Image {
                src: "/default-logo.png".into(),
                rect: Rect::new(0.0, 0.0, 10.0, 10.0),
                opacity: 1.0,
            });
        }
        assert_eq!(comp.image_sources(), vec!["/default-logo.png".to_string()]);
    }
}
