//! Building blocks shared by the templates: palette, icons, logo slots and a
//! vertical stacking helper.

use crate::quote::QuoteData;
use crate::rendering::layout::{TextBlock, TextStyle};
use crate::rendering::paint::{Fill, PaintCommand};
use crate::rendering::{Color, Composition, Rect, CANVAS_SIZE};

pub const SIZE: f32 = CANVAS_SIZE as f32;

/// Smallest size quote text may shrink to when fitting its box
pub const MIN_QUOTE_SIZE: f32 = 28.0;

pub mod palette {
    use crate::rendering::Color;

    pub const SLATE_50: Color = Color::hex(0xf8fafc);
    pub const SLATE_100: Color = Color::hex(0xf1f5f9);
    pub const SLATE_200: Color = Color::hex(0xe2e8f0);
    pub const SLATE_400: Color = Color::hex(0x94a3b8);
    pub const SLATE_500: Color = Color::hex(0x64748b);
    pub const SLATE_600: Color = Color::hex(0x475569);
    pub const SLATE_800: Color = Color::hex(0x1e293b);
    pub const SLATE_900: Color = Color::hex(0x0f172a);
    pub const BLUE_400: Color = Color::hex(0x60a5fa);
    pub const BLUE_600: Color = Color::hex(0x2563eb);
    pub const YELLOW_300: Color = Color::hex(0xfde047);
    pub const YELLOW_400: Color = Color::hex(0xfacc15);
    pub const AMBER_50: Color = Color::hex(0xfffbeb);
    pub const AMBER_200: Color = Color::hex(0xfde68a);
    pub const AMBER_400: Color = Color::hex(0xfbbf24);
    pub const AMBER_500: Color = Color::hex(0xf59e0b);
    pub const AMBER_600: Color = Color::hex(0xd97706);
    pub const AMBER_800: Color = Color::hex(0x92400e);
    pub const RED_50: Color = Color::hex(0xfef2f2);
    pub const RED_600: Color = Color::hex(0xdc2626);
    pub const RED_800: Color = Color::hex(0x991b1b);
    pub const INDIGO_100: Color = Color::hex(0xe0e7ff);
    pub const INDIGO_400: Color = Color::hex(0x818cf8);
    pub const INDIGO_600: Color = Color::hex(0x4f46e5);
    pub const PURPLE_100: Color = Color::hex(0xf3e8ff);
    pub const PURPLE_400: Color = Color::hex(0xc084fc);
    pub const PURPLE_500: Color = Color::hex(0xa855f7);
    pub const PINK_300: Color = Color::hex(0xf9a8d4);
    pub const PINK_400: Color = Color::hex(0xf472b6);
    pub const PINK_500: Color = Color::hex(0xec4899);
    pub const CYAN_300: Color = Color::hex(0x67e8f9);
    pub const CYAN_400: Color = Color::hex(0x22d3ee);
    pub const CYAN_500: Color = Color::hex(0x06b6d4);
}

/// Small pixel-art icons, 8x8, bit 0 = leftmost column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Closing quotation mark; draw `flipped` for the opening one
    Quote,
    Heart,
    Refresh,
}

impl Icon {
    fn rows(self) -> [u8; 8] {
        match self {
            Icon::Quote => [0x00, 0x77, 0x77, 0x77, 0x44, 0x22, 0x00, 0x00],
            Icon::Heart => [0x66, 0xff, 0xff, 0xff, 0x7e, 0x3c, 0x18, 0x00],
            Icon::Refresh => [0xbc, 0xc2, 0xe1, 0x01, 0x80, 0x87, 0x43, 0x3d],
        }
    }

    /// Paint commands for the icon filling `rect`; `flipped` rotates it 180 degrees.
    pub fn draw(self, rect: Rect, color: Color, flipped: bool) -> Vec<PaintCommand> {
        let cw = rect.width / 8.0;
        let ch = rect.height / 8.0;
        let mut out = Vec::new();
        for (r, bits) in self.rows().iter().enumerate() {
            for c in 0..8 {
                if bits & (1 << c) == 0 {
                    continue;
                }
                let (col, row) = if flipped { (7 - c, 7 - r) } else { (c, r) };
                out.push(PaintCommand::Rect {
                    rect: Rect::new(rect.x + col as f32 * cw, rect.y + row as f32 * ch, cw, ch),
                    radius: 0.0,
                    fill: Fill::Solid(color),
                });
            }
        }
        out
    }
}

pub fn background(comp: &mut Composition, fill: impl Into<Fill>) {
    comp.push(PaintCommand::Rect {
        rect: comp.bounds(),
        radius: 0.0,
        fill: fill.into(),
    });
}

/// Faint full-bleed logo centred on the canvas; nothing when there is no logo.
pub fn watermark(comp: &mut Composition, data: &QuoteData, size: f32, opacity: f32) {
    if let Some(logo) = data.logo_url() {
        comp.push(PaintCommand::Image {
            src: logo.to_string(),
            rect: Rect::centered(SIZE / 2.0, SIZE / 2.0, size, size),
            opacity,
        });
    }
}

/// Blurred blob approximated by a soft-edged ellipse.
pub fn glow(comp: &mut Composition, rect: Rect, color: Color, softness: f32) {
    comp.push(PaintCommand::Ellipse {
        rect,
        color,
        softness,
    });
}

/// Drop shadow under a rounded card.
pub fn shadow(comp: &mut Composition, card: Rect, radius: f32, offset_y: f32, opacity: f32) {
    comp.push(PaintCommand::Rect {
        rect: Rect::new(card.x, card.y + offset_y, card.width, card.height),
        radius,
        fill: Fill::Solid(Color::BLACK.with_opacity(opacity)),
    });
}

/// What to show in a badge when no logo is set
#[derive(Debug, Clone, Copy)]
pub struct Fallback {
    pub icon: Icon,
    pub size: f32,
    pub color: Color,
}

/// Logo container at the origin: background, optional border, logo inset by
/// `padding`, or the fallback icon. Returns no commands when there is
/// neither a logo nor a fallback.
pub struct Badge {
    pub size: f32,
    pub radius: f32,
    pub fill: Fill,
    pub border: Option<Color>,
    pub padding: f32,
}

impl Badge {
    pub fn draw(&self, logo: Option<&str>, fallback: Option<Fallback>) -> Vec<PaintCommand> {
        if logo.is_none() && fallback.is_none() {
            return Vec::new();
        }
        let rect = Rect::new(0.0, 0.0, self.size, self.size);
        let mut out = vec![PaintCommand::Rect {
            rect,
            radius: self.radius,
            fill: self.fill.clone(),
        }];
        if let Some(border) = self.border {
            out.push(PaintCommand::Stroke {
                rect,
                radius: self.radius,
                width: 1.0,
                color: border,
            });
        }
        match (logo, fallback) {
            (Some(src), _) => out.push(PaintCommand::Image {
                src: src.to_string(),
                rect: rect.inset(self.padding),
                opacity: 1.0,
            }),
            (None, Some(fb)) => {
                let icon_rect = Rect::centered(self.size / 2.0, self.size / 2.0, fb.size, fb.size);
                out.extend(fb.icon.draw(icon_rect, fb.color, false));
            }
            (None, None) => {}
        }
        out
    }
}

/// Rounded label around a single line of text, at the origin.
pub fn pill(block: TextBlock, pad_x: f32, pad_y: f32, fill: Fill, border: Option<Color>) -> (f32, f32, Vec<PaintCommand>) {
    let w = block.width() + pad_x * 2.0;
    let h = block.height() + pad_y * 2.0;
    let rect = Rect::new(0.0, 0.0, w, h);
    let mut out = vec![PaintCommand::Rect {
        rect,
        radius: h / 2.0,
        fill,
    }];
    if let Some(border) = border {
        out.push(PaintCommand::Stroke {
            rect,
            radius: h / 2.0,
            width: 1.0,
            color: border,
        });
    }
    out.push(PaintCommand::Text {
        x: pad_x,
        y: pad_y,
        width: block.width(),
        block,
    });
    (w, h, out)
}

struct Entry {
    width: f32,
    height: f32,
    cmds: Vec<PaintCommand>,
    gap_after: f32,
}

/// Vertical stack of elements, each centred horizontally in the column.
pub struct Column {
    width: f32,
    entries: Vec<Entry>,
}

impl Column {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    /// Text spanning the full column width, aligned by its own style.
    pub fn text(&mut self, block: TextBlock, gap_after: f32) {
        if block.lines.is_empty() {
            return;
        }
        let height = block.height();
        self.entries.push(Entry {
            width: self.width,
            height,
            cmds: vec![PaintCommand::Text {
                x: 0.0,
                y: 0.0,
                width: self.width,
                block,
            }],
            gap_after,
        });
    }

    /// An element drawn at the origin with the given extent.
    pub fn element(&mut self, width: f32, height: f32, cmds: Vec<PaintCommand>, gap_after: f32) {
        if cmds.is_empty() {
            return;
        }
        self.entries.push(Entry {
            width,
            height,
            cmds,
            gap_after,
        });
    }

    /// Move every entry of `other` below this column's entries.
    pub fn append(&mut self, other: Column) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total height; the trailing gap is not counted.
    pub fn height(&self) -> f32 {
        let n = self.entries.len();
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| e.height + if i + 1 < n { e.gap_after } else { 0.0 })
            .sum()
    }

    /// Emit the stack with its top-left corner at (`x`, `y`).
    pub fn place(self, comp: &mut Composition, x: f32, y: f32) {
        let mut cursor = y;
        for e in self.entries {
            let dx = x + (self.width - e.width) / 2.0;
            comp.extend(e.cmds.into_iter().map(|c| c.translate(dx, cursor)));
            cursor += e.height + e.gap_after;
        }
    }

    /// Emit the stack vertically centred on `center_y`.
    pub fn place_centered(self, comp: &mut Composition, x: f32, center_y: f32) {
        let top = center_y - self.height() / 2.0;
        self.place(comp, x, top);
    }
}

/// Church name and handle stacked and centred across the canvas, ending at
/// `bottom`. Returns the height used (0 when there is no branding).
pub fn branding_footer(comp: &mut Composition, data: &QuoteData, bottom: f32, dark: bool) -> f32 {
    let (name_color, handle_color) = if dark {
        let c = Color::WHITE.with_opacity(0.7);
        (c, c.with_opacity(0.8))
    } else {
        (palette::SLATE_500, palette::SLATE_500.with_opacity(0.8))
    };
    let mut col = Column::new(SIZE - 160.0);
    if let Some(name) = data.church_name() {
        let style = TextStyle::new(20.0, name_color).bold().tracking(4.0).uppercase();
        col.text(TextBlock::new(name, style, SIZE - 160.0), 4.0);
    }
    if let Some(handle) = data.church_handle() {
        col.text(TextBlock::new(handle, TextStyle::new(18.0, handle_color), SIZE - 160.0), 0.0);
    }
    let height = col.height();
    col.place(comp, 80.0, bottom - height);
    height
}
