//! Gradient-heavy layouts: modern pulse, glass card, gradient burst, neon glow.

use super::common::{
    background, glow, palette::*, pill, watermark, Badge, Column, Fallback, Icon, MIN_QUOTE_SIZE, SIZE,
};
use crate::quote::QuoteData;
use crate::rendering::layout::{Align, TextBlock, TextStyle};
use crate::rendering::paint::{Fill, PaintCommand, Pattern};
use crate::rendering::{Color, Composition, Rect};

pub fn modern_pulse(data: &QuoteData) -> Composition {
    const CARD_W: f32 = 850.0;
    const PAD: f32 = 96.0;

    let mut comp = Composition::canvas();
    background(&mut comp, Fill::linear(135.0, &[Color::hex(0x6366f1), Color::hex(0xa855f7)]));
    watermark(&mut comp, data, 500.0, 0.05);
    glow(&mut comp, Rect::new(648.0, -216.0, 648.0, 648.0), Color::WHITE.with_opacity(0.1), 0.8);
    glow(&mut comp, Rect::new(-216.0, 648.0, 648.0, 648.0), INDIGO_400.with_opacity(0.2), 0.8);

    let inner_w = CARD_W - PAD * 2.0;
    let logo = data.logo_url();

    // header row: logo badge beside the church name
    let mut header: Vec<PaintCommand> = Vec::new();
    let mut header_h: f32 = 0.0;
    let mut name_x = 0.0;
    if logo.is_some() {
        let badge = Badge {
            size: 96.0,
            radius: 16.0,
            fill: Fill::linear(135.0, &[INDIGO_100, PURPLE_100]),
            border: None,
            padding: 12.0,
        };
        header.extend(badge.draw(logo, None));
        header_h = 96.0;
        name_x = 96.0 + 24.0;
    }
    if let Some(name) = data.church_name() {
        let style = TextStyle::new(24.0, INDIGO_600).bold().tracking(0.6).align(Align::Left);
        let block = TextBlock::fit(name, style, inner_w - name_x, 24.0 * 2.25, 14.0);
        let h = block.height();
        header_h = header_h.max(h);
        header.push(PaintCommand::Text {
            x: name_x,
            y: (header_h - h) / 2.0,
            width: inner_w - name_x,
            block,
        });
    }
    let header_gap = if header.is_empty() { 0.0 } else { 48.0 };

    let author = TextBlock::new(
        data.author().unwrap_or("ANONYMOUS"),
        TextStyle::new(20.0, INDIGO_600).bold().align(Align::Left),
        inner_w,
    );
    let handle = TextBlock::new(
        data.church_handle().unwrap_or("@yourchurch"),
        TextStyle::new(14.0, SLATE_400).align(Align::Left),
        inner_w,
    );
    let footer_h = 48.0 + 1.0 + 48.0 + author.height() + 8.0 + handle.height();

    let max_text_h = 1000.0 - PAD * 2.0 - header_h - header_gap - footer_h;
    let text = TextBlock::fit(
        data.text_or("KINDNESS IS A GIFT EVERYONE CAN AFFORD."),
        TextStyle::new(60.0, SLATE_900).bold().align(Align::Left),
        inner_w,
        max_text_h.max(MIN_QUOTE_SIZE),
        MIN_QUOTE_SIZE,
    );

    let content_h = header_h + header_gap + text.height() + footer_h;
    let card_h = (content_h + PAD * 2.0).max(600.0);
    let card = Rect::centered(SIZE / 2.0, SIZE / 2.0, CARD_W, card_h);
    comp.push(PaintCommand::Rect {
        rect: Rect::new(card.x, card.y + 25.0, card.width, card.height),
        radius: 50.0,
        fill: Color::BLACK.with_opacity(0.2).into(),
    });
    comp.push(PaintCommand::Rect {
        rect: card,
        radius: 50.0,
        fill: Color::WHITE.into(),
    });

    let (x, mut y) = (card.x + PAD, card.y + PAD);
    comp.extend(header.into_iter().map(|c| c.translate(x, y)));
    y += header_h + header_gap;
    let text_h = text.height();
    comp.push(PaintCommand::Text {
        x,
        y,
        width: inner_w,
        block: text,
    });
    y += text_h;

    // attribution is pinned to the bottom of the card (mt-auto)
    let mut fy = (y + 48.0).max(card.bottom() - PAD - (footer_h - 48.0));
    comp.push(PaintCommand::Rect {
        rect: Rect::new(x, fy, inner_w, 1.0),
        radius: 0.0,
        fill: Color::hex(0xf1f5f9).into(),
    });
    fy += 1.0 + 48.0;
    let author_h = author.height();
    comp.push(PaintCommand::Text {
        x,
        y: fy,
        width: inner_w,
        block: author,
    });
    fy += author_h + 8.0;
    comp.push(PaintCommand::Text {
        x,
        y: fy,
        width: inner_w,
        block: handle,
    });
    comp
}

pub fn glass_card(data: &QuoteData) -> Composition {
    let mut comp = Composition::canvas();
    background(&mut comp, Fill::linear(90.0, &[Color::hex(0x00b4db), Color::hex(0x0083b0)]));
    watermark(&mut comp, data, 600.0, 0.05);
    glow(&mut comp, Rect::new(162.0, 108.0, 256.0, 256.0), Color::WHITE.with_opacity(0.2), 0.6);
    glow(&mut comp, Rect::new(588.0, 480.0, 384.0, 384.0), BLUE_400.with_opacity(0.3), 0.7);

    let card = Rect::centered(SIZE / 2.0, SIZE / 2.0, 900.0, 700.0);
    comp.push(PaintCommand::Rect {
        rect: card,
        radius: 40.0,
        fill: Color::WHITE.with_opacity(0.1).into(),
    });
    comp.push(PaintCommand::Stroke {
        rect: card,
        radius: 40.0,
        width: 1.0,
        color: Color::WHITE.with_opacity(0.2),
    });
    let content = card.inset(80.0);

    let mut top = Column::new(content.width);
    let badge = Badge {
        size: 96.0,
        radius: 8.0,
        fill: Color::WHITE.with_opacity(0.2).into(),
        border: None,
        padding: 12.0,
    };
    let fallback = Fallback {
        icon: Icon::Refresh,
        size: 24.0,
        color: Color::WHITE,
    };
    top.element(96.0, 96.0, badge.draw(data.logo_url(), Some(fallback)), 24.0);
    if let Some(name) = data.church_name() {
        let style = TextStyle::new(16.0, Color::WHITE).bold().tracking(4.8).uppercase();
        top.text(TextBlock::new(name, style, content.width), 0.0);
    }
    let top_y = content.y + 24.0;
    let top_bottom = top_y + top.height();
    top.place(&mut comp, content.x, top_y);

    let mut bottom = Column::new(content.width);
    if let Some(author) = data.author() {
        let style = TextStyle::new(24.0, Color::WHITE.with_opacity(0.8));
        bottom.text(TextBlock::new(&format!("- {}", author), style, content.width), 24.0);
    }
    let handle_style = TextStyle::new(16.0, Color::WHITE.with_opacity(0.6)).tracking(1.6);
    bottom.text(
        TextBlock::new(data.church_handle().unwrap_or("@CHURCHLIFE"), handle_style, content.width),
        0.0,
    );
    let bottom_y = content.bottom() - 24.0 - bottom.height();
    bottom.place(&mut comp, content.x, bottom_y);

    let region_top = top_bottom + 32.0;
    let region_bottom = bottom_y - 32.0;
    let text_w = content.width - 64.0;
    let quoted = format!("\"{}\"", data.text_or("Your vision is our mission."));
    let block = TextBlock::fit(
        &quoted,
        TextStyle::new(48.0, Color::WHITE).bold(),
        text_w,
        (region_bottom - region_top).max(MIN_QUOTE_SIZE),
        MIN_QUOTE_SIZE,
    );
    let y = region_top + ((region_bottom - region_top) - block.height()).max(0.0) / 2.0;
    comp.push(PaintCommand::Text {
        x: content.x + 32.0,
        y,
        width: text_w,
        block,
    });
    comp
}

// Centered stack shared by the two full-bleed poster layouts.
struct Poster<'a> {
    badge: Badge,
    badge_glow: Option<Color>,
    name_style: TextStyle,
    quote_style: TextStyle,
    placeholder: &'a str,
    author_style: TextStyle,
    author_pill: (Fill, Color, f32, f32),
    handle_style: TextStyle,
}

impl Poster<'_> {
    fn compose(self, comp: &mut Composition, data: &QuoteData) {
        const WIDTH: f32 = 872.0;
        let mut head = Column::new(WIDTH);
        if let Some(logo) = data.logo_url() {
            let size = self.badge.size;
            let mut cmds = Vec::new();
            if let Some(color) = self.badge_glow {
                cmds.push(PaintCommand::Ellipse {
                    rect: Rect::centered(size / 2.0, size / 2.0, size + 80.0, size + 80.0),
                    color,
                    softness: 1.0,
                });
            }
            cmds.extend(self.badge.draw(Some(logo), None));
            head.element(size, size, cmds, 48.0);
        }
        if let Some(name) = data.church_name() {
            head.text(TextBlock::new(name, self.name_style, WIDTH), 64.0);
        }

        let mut tail = Column::new(WIDTH);
        if let Some(author) = data.author() {
            let (fill, border, pad_x, pad_y) = self.author_pill;
            let block = TextBlock::new(author, self.author_style, WIDTH - pad_x * 2.0);
            let (w, h, cmds) = pill(block, pad_x, pad_y, fill, Some(border));
            tail.element(w, h, cmds, 48.0);
        }
        if let Some(handle) = data.church_handle() {
            tail.text(TextBlock::new(handle, self.handle_style, WIDTH), 0.0);
        }

        let reserved = head.height() + tail.height() + if tail.is_empty() { 0.0 } else { 64.0 };
        let block = TextBlock::fit(
            data.text_or(self.placeholder),
            self.quote_style,
            WIDTH,
            (SIZE - 160.0 - reserved).max(MIN_QUOTE_SIZE),
            MIN_QUOTE_SIZE,
        );
        head.text(block, 64.0);
        head.append(tail);
        head.place_centered(comp, (SIZE - WIDTH) / 2.0, SIZE / 2.0);
    }
}

pub fn gradient_burst(data: &QuoteData) -> Composition {
    let mut comp = Composition::canvas();
    background(
        &mut comp,
        Fill::linear(
            135.0,
            &[
                Color::hex(0xff6b6b),
                Color::hex(0xee5a6f),
                Color::hex(0xc44569),
                Color::hex(0x4834df),
            ],
        ),
    );
    watermark(&mut comp, data, 600.0, 0.05);
    glow(&mut comp, Rect::new(-108.0, -108.0, 432.0, 432.0), YELLOW_300.with_opacity(0.3), 0.8);
    glow(&mut comp, Rect::new(648.0, 648.0, 540.0, 540.0), PINK_400.with_opacity(0.3), 0.8);
    glow(&mut comp, Rect::new(648.0, 324.0, 324.0, 324.0), PURPLE_400.with_opacity(0.2), 0.7);

    Poster {
        badge: Badge {
            size: 160.0,
            radius: 24.0,
            fill: Color::WHITE.with_opacity(0.2).into(),
            border: Some(Color::WHITE.with_opacity(0.3)),
            padding: 20.0,
        },
        badge_glow: None,
        name_style: TextStyle::new(20.0, Color::WHITE.with_opacity(0.9)).bold().tracking(6.0).uppercase(),
        quote_style: TextStyle::new(85.0, Color::WHITE).bold().line_height(1.05),
        placeholder: "FAITH MOVES MOUNTAINS",
        author_style: TextStyle::new(24.0, Color::WHITE).bold(),
        author_pill: (Color::WHITE.with_opacity(0.2).into(), Color::WHITE.with_opacity(0.3), 40.0, 20.0),
        handle_style: TextStyle::new(18.0, Color::WHITE.with_opacity(0.7)).bold().tracking(3.6),
    }
    .compose(&mut comp, data);
    comp
}

pub fn neon_glow(data: &QuoteData) -> Composition {
    let mut comp = Composition::canvas();
    background(&mut comp, Color::hex(0x0a0a0a));
    watermark(&mut comp, data, 700.0, 0.05);
    glow(&mut comp, Rect::new(108.0, 216.0, 256.0, 256.0), CYAN_500.with_opacity(0.2), 1.0);
    glow(&mut comp, Rect::new(652.0, 544.0, 320.0, 320.0), PINK_500.with_opacity(0.2), 1.0);
    glow(&mut comp, Rect::centered(SIZE / 2.0, SIZE / 2.0, 384.0, 384.0), PURPLE_500.with_opacity(0.1), 1.0);
    comp.push(PaintCommand::Pattern {
        rect: comp.bounds(),
        spacing: 40.0,
        pattern: Pattern::Lines { width: 0.5 },
        color: Color::hex(0x00ffff).with_opacity(0.05),
    });

    Poster {
        badge: Badge {
            size: 160.0,
            radius: 16.0,
            fill: Fill::linear(135.0, &[CYAN_500.with_opacity(0.2), PINK_500.with_opacity(0.2)]),
            border: Some(CYAN_400.with_opacity(0.3)),
            padding: 20.0,
        },
        badge_glow: Some(CYAN_500.with_opacity(0.3)),
        name_style: TextStyle::new(20.0, CYAN_400)
            .fill(Fill::linear(90.0, &[CYAN_400, PINK_400]))
            .bold()
            .tracking(6.0)
            .uppercase(),
        quote_style: TextStyle::new(80.0, CYAN_500)
            .fill(Fill::linear(135.0, &[CYAN_500, PINK_500, Color::hex(0x8b5cf6)]))
            .bold()
            .line_height(1.05),
        placeholder: "SHINE YOUR LIGHT",
        author_style: TextStyle::new(24.0, CYAN_300).bold(),
        author_pill: (CYAN_500.with_opacity(0.1).into(), CYAN_400.with_opacity(0.3), 32.0, 16.0),
        handle_style: TextStyle::new(18.0, PINK_300.with_opacity(0.6)).bold().tracking(3.6),
    }
    .compose(&mut comp, data);
    comp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_pulse_placeholders() {
        let text = modern_pulse(&QuoteData::default()).text_content().join("\n");
        assert!(text.contains("ANONYMOUS"));
        assert!(text.contains("@yourchurch"));
    }

    #[test]
    fn glass_card_falls_back_to_icon_badge() {
        let comp = glass_card(&QuoteData::default());
        assert!(!comp.commands.iter().any(|c| matches!(c, PaintCommand::Image { .. })));
        assert!(comp.text_content().iter().any(|t| t == "@CHURCHLIFE"));
    }

    #[test]
    fn poster_layouts_stay_on_canvas() {
        let data = QuoteData::new("x".repeat(100))
            .with_author("Someone Important")
            .with_church_name("Christ Chosen Zion City Ministry")
            .with_church_handle("@churchhandle")
            .with_logo("/default-logo.png");
        for comp in [gradient_burst(&data), neon_glow(&data)] {
            for cmd in &comp.commands {
                if let PaintCommand::Text { y, block, .. } = cmd {
                    assert!(*y >= 0.0, "text starts above canvas");
                    assert!(y + block.height() <= SIZE, "text runs off canvas");
                }
            }
        }
    }

    #[test]
    fn neon_text_uses_gradient_fill() {
        let comp = neon_glow(&QuoteData::new("Shine"));
        let gradient_text = comp.commands.iter().any(|c| match c {
            PaintCommand::Text { block, .. } => matches!(block.style.fill, Fill::Linear { .. }),
            _ => false,
        });
        assert!(gradient_text);
    }
}
