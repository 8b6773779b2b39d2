/// Rasterizer: turns a `Composition` display list into pixels and PNG bytes

use std::collections::HashMap;
use std::sync::Arc;

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

use super::font::{self, GLYPH_CELLS};
use super::layout::{Align, TextBlock};
use super::paint::{Fill, PaintCommand, Pattern};
use super::{Color, Composition, Rect, Screenshot};
use crate::{Error, Result};

/// Decoded images keyed by their reference string
#[derive(Debug, Clone, Default)]
pub struct Resources {
    images: HashMap<String, Arc<RgbaImage>>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, src: impl Into<String>, img: Arc<RgbaImage>) {
        self.images.insert(src.into(), img);
    }

    pub fn get(&self, src: &str) -> Option<&Arc<RgbaImage>> {
        self.images.get(src)
    }

    pub fn contains(&self, src: &str) -> bool {
        self.images.contains_key(src)
    }

    /// Drop every image whose reference is not in `keep`.
    pub fn retain_sources(&mut self, keep: &[String]) {
        self.images.retain(|src, _| keep.iter().any(|k| k == src));
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// A pixel surface painted at a fixed logical-to-device scale
pub struct Canvas {
    pixels: RgbaImage,
    scale: f32,
}

impl Canvas {
    pub fn new(width: u32, height: u32, scale: f32, background: Color) -> Self {
        let bg = Rgba([background.r, background.g, background.b, background.a]);
        Self {
            pixels: RgbaImage::from_pixel(width, height, bg),
            scale,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    // Device pixel range whose centres fall inside [start, end) logical px.
    fn span(&self, start: f32, end: f32, limit: u32) -> std::ops::Range<u32> {
        let lo = (start * self.scale - 0.5).ceil().max(0.0) as u32;
        let hi = (end * self.scale - 0.5).ceil().max(0.0) as u32;
        lo.min(limit)..hi.min(limit)
    }

    fn logical(&self, p: u32) -> f32 {
        (p as f32 + 0.5) / self.scale
    }

    fn blend(&mut self, x: u32, y: u32, c: Color) {
        if c.a == 0 {
            return;
        }
        let dst = self.pixels.get_pixel_mut(x, y);
        if c.a == 255 {
            *dst = Rgba([c.r, c.g, c.b, 255]);
            return;
        }
        let sa = c.a as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let oa = sa + da * (1.0 - sa);
        if oa <= 0.0 {
            return;
        }
        let mix = |s: u8, d: u8| ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa).round() as u8;
        *dst = Rgba([
            mix(c.r, dst[0]),
            mix(c.g, dst[1]),
            mix(c.b, dst[2]),
            (oa * 255.0).round() as u8,
        ]);
    }

    pub fn fill_rect(&mut self, rect: &Rect, radius: f32, fill: &Fill) {
        self.fill_rect_in(rect, radius, fill, rect);
    }

    // `area` is the box gradients are evaluated against.
    fn fill_rect_in(&mut self, rect: &Rect, radius: f32, fill: &Fill, area: &Rect) {
        let (w, h) = self.pixels.dimensions();
        let r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        for py in self.span(rect.y, rect.bottom(), h) {
            let ly = self.logical(py);
            for px in self.span(rect.x, rect.right(), w) {
                let lx = self.logical(px);
                if r > 0.0 && !inside_rounded(rect, r, lx, ly) {
                    continue;
                }
                let c = fill.color_at(area, lx, ly);
                self.blend(px, py, c);
            }
        }
    }

    pub fn fill_ellipse(&mut self, rect: &Rect, color: Color, softness: f32) {
        let (w, h) = self.pixels.dimensions();
        let (rx, ry) = (rect.width / 2.0, rect.height / 2.0);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let softness = softness.clamp(0.0, 1.0);
        let solid = 1.0 - softness;
        for py in self.span(rect.y, rect.bottom(), h) {
            let dy = (self.logical(py) - rect.center_y()) / ry;
            for px in self.span(rect.x, rect.right(), w) {
                let dx = (self.logical(px) - rect.center_x()) / rx;
                let d = (dx * dx + dy * dy).sqrt();
                if d > 1.0 {
                    continue;
                }
                let k = if d <= solid || softness == 0.0 {
                    1.0
                } else {
                    let t = (1.0 - d) / softness;
                    t * t * (3.0 - 2.0 * t)
                };
                self.blend(px, py, color.with_opacity(k));
            }
        }
    }

    pub fn stroke(&mut self, rect: &Rect, radius: f32, width: f32, color: Color) {
        let (w, h) = self.pixels.dimensions();
        let outer_r = radius.min(rect.width / 2.0).min(rect.height / 2.0).max(0.0);
        let inner = rect.inset(width);
        let inner_r = (outer_r - width).max(0.0);
        for py in self.span(rect.y, rect.bottom(), h) {
            let ly = self.logical(py);
            for px in self.span(rect.x, rect.right(), w) {
                let lx = self.logical(px);
                if outer_r > 0.0 && !inside_rounded(rect, outer_r, lx, ly) {
                    continue;
                }
                let in_inner = lx >= inner.x
                    && lx < inner.right()
                    && ly >= inner.y
                    && ly < inner.bottom()
                    && (inner_r == 0.0 || inside_rounded(&inner, inner_r, lx, ly));
                if !in_inner {
                    self.blend(px, py, color);
                }
            }
        }
    }

    pub fn pattern(&mut self, rect: &Rect, spacing: f32, pattern: Pattern, color: Color) {
        if spacing <= 0.0 {
            return;
        }
        let (w, h) = self.pixels.dimensions();
        for py in self.span(rect.y, rect.bottom(), h) {
            let cy = (self.logical(py) - rect.y).rem_euclid(spacing);
            for px in self.span(rect.x, rect.right(), w) {
                let cx = (self.logical(px) - rect.x).rem_euclid(spacing);
                let hit = match pattern {
                    Pattern::Dots { radius } => {
                        let (dx, dy) = (cx - spacing / 2.0, cy - spacing / 2.0);
                        dx * dx + dy * dy <= radius * radius
                    }
                    Pattern::Lines { width } => cx < width || cy < width,
                };
                if hit {
                    self.blend(px, py, color);
                }
            }
        }
    }

    pub fn text(&mut self, x: f32, y: f32, width: f32, block: &TextBlock) {
        let style = &block.style;
        let cell = style.size / GLYPH_CELLS as f32;
        let adv = font::advance(style.size, style.tracking);
        let area = Rect::new(x, y, width, block.height().max(style.size));
        for (i, line) in block.lines.iter().enumerate() {
            let line_w = font::measure(line, style.size, style.tracking);
            let start = match style.align {
                Align::Left => x,
                Align::Center => x + (width - line_w) / 2.0,
                Align::Right => x + width - line_w,
            };
            let top = y + i as f32 * style.line_pitch();
            for (j, ch) in line.chars().enumerate() {
                let gx = start + j as f32 * adv;
                let rows = font::glyph(ch);
                for (r, bits) in rows.iter().enumerate() {
                    if *bits == 0 {
                        continue;
                    }
                    let shear = if style.italic {
                        (GLYPH_CELLS - 1 - r) as f32 * cell * 0.25
                    } else {
                        0.0
                    };
                    for c in 0..GLYPH_CELLS {
                        if bits & (1 << c) == 0 {
                            continue;
                        }
                        let extra = if style.bold { cell * 0.5 } else { 0.0 };
                        let dot = Rect::new(
                            gx + c as f32 * cell + shear,
                            top + r as f32 * cell,
                            cell + extra,
                            cell,
                        );
                        self.fill_rect_in(&dot, 0.0, &style.fill, &area);
                    }
                }
            }
        }
    }

    pub fn image(&mut self, img: &RgbaImage, rect: &Rect, opacity: f32) {
        let (iw, ih) = img.dimensions();
        if iw == 0 || ih == 0 || opacity <= 0.0 {
            return;
        }
        let (bw, bh) = (rect.width * self.scale, rect.height * self.scale);
        let ratio = (bw / iw as f32).min(bh / ih as f32);
        let tw = ((iw as f32 * ratio).round() as u32).max(1);
        let th = ((ih as f32 * ratio).round() as u32).max(1);
        let fitted = if (tw, th) == (iw, ih) {
            img.clone()
        } else {
            imageops::resize(img, tw, th, FilterType::Triangle)
        };
        let ox = (rect.x * self.scale + (bw - tw as f32) / 2.0).round() as i64;
        let oy = (rect.y * self.scale + (bh - th as f32) / 2.0).round() as i64;
        let (w, h) = self.pixels.dimensions();
        for (sx, sy, p) in fitted.enumerate_pixels() {
            let (dx, dy) = (ox + sx as i64, oy + sy as i64);
            if dx < 0 || dy < 0 || dx >= w as i64 || dy >= h as i64 {
                continue;
            }
            let c = Color::rgba(p[0], p[1], p[2], p[3]).with_opacity(opacity);
            self.blend(dx as u32, dy as u32, c);
        }
    }

    pub fn paint(&mut self, cmd: &PaintCommand, resources: &Resources) {
        match cmd {
            PaintCommand::Rect { rect, radius, fill } => self.fill_rect(rect, *radius, fill),
            PaintCommand::Ellipse {
                rect,
                color,
                softness,
            } => self.fill_ellipse(rect, *color, *softness),
            PaintCommand::Stroke {
                rect,
                radius,
                width,
                color,
            } => self.stroke(rect, *radius, *width, *color),
            PaintCommand::Pattern {
                rect,
                spacing,
                pattern,
                color,
            } => self.pattern(rect, *spacing, *pattern, *color),
            PaintCommand::Text { x, y, width, block } => self.text(*x, *y, *width, block),
            PaintCommand::Image { src, rect, opacity } => match resources.get(src) {
                Some(img) => self.image(img, rect, *opacity),
                None => log::debug!("image {} not loaded; leaving slot empty", abbreviate(src)),
            },
        }
    }
}

fn inside_rounded(rect: &Rect, r: f32, lx: f32, ly: f32) -> bool {
    // max/min rather than clamp: the bounds can cross by an ulp when r is half the side
    let cx = lx.max(rect.x + r).min(rect.right() - r);
    let cy = ly.max(rect.y + r).min(rect.bottom() - r);
    let (dx, dy) = (lx - cx, ly - cy);
    dx * dx + dy * dy <= r * r
}

/// Shorten long references (data URIs) for log lines.
pub(crate) fn abbreviate(src: &str) -> String {
    if src.len() <= 48 {
        src.to_string()
    } else {
        let cut = src
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= 40)
            .last()
            .unwrap_or(0);
        format!("{}...", &src[..cut])
    }
}

/// Paint `comp` onto a fresh surface of `comp.width * scale` square pixels.
///
/// The surface starts filled with `background`, so an opaque background
/// yields an opaque image regardless of the design's own transparency.
pub fn rasterize(comp: &Composition, scale: f32, background: Color, resources: &Resources) -> Result<RgbaImage> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(Error::RenderError(format!("invalid raster scale {}", scale)));
    }
    let width = (comp.width as f32 * scale).round() as u32;
    let height = (comp.height as f32 * scale).round() as u32;
    if width == 0 || height == 0 {
        return Err(Error::RenderError(format!("empty surface {}x{}", width, height)));
    }
    let mut canvas = Canvas::new(width, height, scale, background);
    for cmd in &comp.commands {
        canvas.paint(cmd, resources);
    }
    Ok(canvas.into_image())
}

/// Lossless PNG at the strongest compression setting.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilter::Adaptive);
    encoder.write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)?;
    Ok(out)
}

/// Rasterize and encode in one step.
pub fn render_screenshot(comp: &Composition, scale: f32, background: Color, resources: &Resources) -> Result<Screenshot> {
    let img = rasterize(comp, scale, background, resources)?;
    let png_data = encode_png(&img)?;
    Ok(Screenshot {
        width: img.width(),
        height: img.height(),
        png_data,
    })
}
