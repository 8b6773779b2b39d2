//! Card and editorial layouts: blue motivation, devotion, business, gold.

use super::common::{
    background, branding_footer, glow, palette::*, pill, shadow, watermark, Badge, Column, Fallback, Icon,
    MIN_QUOTE_SIZE, SIZE,
};
use crate::quote::QuoteData;
use crate::rendering::layout::{Align, TextBlock, TextStyle};
use crate::rendering::paint::{Fill, PaintCommand, Pattern};
use crate::rendering::{Color, Composition, Rect};

pub fn motivation_blue(data: &QuoteData) -> Composition {
    let mut comp = Composition::canvas();
    background(&mut comp, SLATE_100);
    watermark(&mut comp, data, 600.0, 0.05);
    comp.push(PaintCommand::Pattern {
        rect: comp.bounds(),
        spacing: 40.0,
        pattern: Pattern::Dots { radius: 2.0 },
        color: SLATE_900.with_opacity(0.1),
    });

    let card = Rect::centered(SIZE / 2.0, SIZE / 2.0, 800.0, 800.0);
    shadow(&mut comp, card, 60.0, 35.0, 0.15);
    comp.push(PaintCommand::Rect {
        rect: card,
        radius: 60.0,
        fill: BLUE_600.into(),
    });
    let content = card.inset(64.0);

    let logo = data.logo_url();
    if logo.is_some() {
        let badge = Badge {
            size: 128.0,
            radius: 16.0,
            fill: Color::WHITE.with_opacity(0.1).into(),
            border: Some(Color::WHITE.with_opacity(0.2)),
            padding: 16.0,
        };
        let x = card.center_x() - 64.0;
        comp.extend(badge.draw(logo, None).into_iter().map(|c| c.translate(x, content.y)));
    }

    let quote_color = YELLOW_400.with_opacity(0.8);
    comp.extend(Icon::Quote.draw(Rect::new(card.x + 48.0, card.y + 48.0, 96.0, 96.0), quote_color, true));
    comp.extend(Icon::Quote.draw(
        Rect::new(card.right() - 144.0, card.bottom() - 144.0, 96.0, 96.0),
        quote_color,
        false,
    ));

    let heading_y = content.y + if logo.is_some() { 140.0 } else { 0.0 };
    let heading = TextBlock::new(
        "Daily Motivation",
        TextStyle::new(24.0, Color::WHITE.with_opacity(0.8)).tracking(4.8).uppercase(),
        content.width,
    );
    let heading_bottom = heading_y + heading.height();
    comp.push(PaintCommand::Text {
        x: content.x,
        y: heading_y,
        width: content.width,
        block: heading,
    });

    // footer sits 48px above the card's bottom edge
    let footer_bottom = card.bottom() - 48.0;
    let footer_h = branding_footer(&mut comp, data, footer_bottom, true);

    let mut text_bottom = footer_bottom - footer_h - 32.0;
    if let Some(author) = data.author() {
        let block = TextBlock::new(
            &format!("- {}", author),
            TextStyle::new(20.0, Color::WHITE.with_opacity(0.9)),
            content.width,
        );
        let y = text_bottom - block.height();
        comp.push(PaintCommand::Text {
            x: content.x,
            y,
            width: content.width,
            block,
        });
        text_bottom = y - 32.0;
    }

    let region_top = heading_bottom + 32.0;
    let block = TextBlock::fit(
        data.text_or("Your Quote Here"),
        TextStyle::new(60.0, Color::WHITE).bold().line_height(1.25),
        content.width,
        (text_bottom - region_top).max(MIN_QUOTE_SIZE),
        MIN_QUOTE_SIZE,
    );
    let y = region_top + ((text_bottom - region_top) - block.height()).max(0.0) / 2.0;
    comp.push(PaintCommand::Text {
        x: content.x,
        y,
        width: content.width,
        block,
    });
    comp
}

pub fn devotion_classic(data: &QuoteData) -> Composition {
    let mut comp = Composition::canvas();
    background(&mut comp, Fill::linear(135.0, &[SLATE_50, SLATE_200]));
    watermark(&mut comp, data, 700.0, 0.03);

    let card = Rect::centered(SIZE / 2.0, SIZE / 2.0, 850.0, 850.0);
    shadow(&mut comp, card, 40.0, 20.0, 0.1);
    comp.push(PaintCommand::Rect {
        rect: card,
        radius: 40.0,
        fill: Color::WHITE.into(),
    });
    comp.push(PaintCommand::Rect {
        rect: Rect::new(card.x + 40.0, card.y, card.width - 80.0, 8.0),
        radius: 0.0,
        fill: Fill::linear(90.0, &[AMBER_200, YELLOW_400, AMBER_200]).with_opacity(0.5),
    });
    comp.extend(Icon::Quote.draw(
        Rect::new(card.x + 64.0, card.y + 64.0, 64.0, 64.0),
        AMBER_200.with_opacity(0.5),
        true,
    ));

    // header: logo (or heart) and church name
    let mut header = Column::new(card.width);
    let logo = data.logo_url();
    let (badge_size, padding) = if logo.is_some() { (128.0, 16.0) } else { (80.0, 0.0) };
    let badge = Badge {
        size: badge_size,
        radius: badge_size / 2.0,
        fill: AMBER_50.into(),
        border: None,
        padding,
    };
    let fallback = Fallback {
        icon: Icon::Heart,
        size: 40.0,
        color: AMBER_600,
    };
    header.element(badge_size, badge_size, badge.draw(logo, Some(fallback)), 16.0);
    if let Some(name) = data.church_name() {
        let style = TextStyle::new(14.0, AMBER_800).bold().tracking(1.4).uppercase();
        header.text(TextBlock::new(name, style, card.width - 160.0), 32.0);
    }
    let header_bottom = card.y + 48.0 + header.height() + if data.church_name().is_some() { 20.0 } else { 0.0 };
    header.place(&mut comp, card.x, card.y + 48.0);

    // bottom: reference pill, then handle
    let mut bottom = card.bottom() - 80.0;
    if let Some(handle) = data.church_handle() {
        let block = TextBlock::new(handle, TextStyle::new(14.0, SLATE_400).tracking(1.4), card.width - 160.0);
        bottom -= block.height();
        comp.push(PaintCommand::Text {
            x: card.x + 80.0,
            y: bottom,
            width: card.width - 160.0,
            block,
        });
        bottom -= 24.0;
    }
    let reference = TextBlock::new(
        data.author().unwrap_or("Psalm 23:3"),
        TextStyle::new(24.0, Color::WHITE).bold().tracking(0.6),
        card.width - 256.0,
    );
    let (pw, ph, cmds) = pill(reference, 48.0, 16.0, RED_800.into(), None);
    bottom -= ph;
    comp.extend(cmds.into_iter().map(|c| c.translate(card.center_x() - pw / 2.0, bottom)));

    let region_top = header_bottom + 16.0;
    let region_bottom = bottom - 32.0;
    let inner_w = card.width - 160.0;
    let quoted = format!("\"{}\"", data.text_or("He restores my soul."));
    let block = TextBlock::fit(
        &quoted,
        TextStyle::new(60.0, SLATE_800).italic().line_height(1.375),
        inner_w,
        (region_bottom - region_top).max(MIN_QUOTE_SIZE),
        MIN_QUOTE_SIZE,
    );
    let y = region_top + ((region_bottom - region_top) - block.height()).max(0.0) / 2.0;
    comp.push(PaintCommand::Text {
        x: card.x + 80.0,
        y,
        width: inner_w,
        block,
    });
    comp
}

pub fn business_pro(data: &QuoteData) -> Composition {
    const BAR_H: f32 = 128.0;
    const PAD_X: f32 = 96.0;

    let mut comp = Composition::canvas();
    background(&mut comp, Color::WHITE);
    watermark(&mut comp, data, 500.0, 0.05);
    // quarter disc in the top-right corner
    comp.push(PaintCommand::Ellipse {
        rect: Rect::centered(SIZE, 0.0, 800.0, 800.0),
        color: RED_50,
        softness: 0.0,
    });

    let body = Rect::new(PAD_X, 128.0, SIZE - PAD_X * 2.0, SIZE - BAR_H - 256.0);
    let author_h = if data.author().is_some() { 64.0 + 30.0 } else { 0.0 };
    let block = TextBlock::fit(
        data.text_or("Success is not final, failure is not fatal."),
        TextStyle::new(72.0, SLATE_900).bold().align(Align::Left).line_height(1.1),
        body.width,
        (body.height - 176.0 - author_h).max(MIN_QUOTE_SIZE),
        MIN_QUOTE_SIZE,
    );
    let total = 128.0 + 48.0 + block.height() + author_h;
    let mut y = body.y + ((body.height - total) / 2.0).max(0.0);
    comp.extend(Icon::Quote.draw(Rect::new(PAD_X, y, 128.0, 128.0), RED_600, false));
    y += 128.0 + 48.0;
    let text_h = block.height();
    comp.push(PaintCommand::Text {
        x: PAD_X,
        y,
        width: body.width,
        block,
    });
    y += text_h;
    if let Some(author) = data.author() {
        y += 64.0;
        comp.push(PaintCommand::Rect {
            rect: Rect::new(PAD_X, y + 13.0, 80.0, 4.0),
            radius: 0.0,
            fill: RED_600.into(),
        });
        let block = TextBlock::new(
            author,
            TextStyle::new(30.0, SLATE_600).italic().align(Align::Left),
            body.width - 96.0,
        );
        comp.push(PaintCommand::Text {
            x: PAD_X + 96.0,
            y,
            width: body.width - 96.0,
            block,
        });
    }

    // brand bar
    let bar = Rect::new(0.0, SIZE - BAR_H, SIZE, BAR_H);
    comp.push(PaintCommand::Rect {
        rect: bar,
        radius: 0.0,
        fill: RED_600.into(),
    });
    let handle = TextBlock::new(
        data.church_handle().unwrap_or("WWW.YOURWEBSITE.COM"),
        TextStyle::new(18.0, Color::WHITE.with_opacity(0.8)).tracking(1.8).align(Align::Right),
        SIZE / 2.0 - PAD_X,
    );
    let handle_w = handle.width();
    comp.push(PaintCommand::Text {
        x: SIZE / 2.0,
        y: bar.center_y() - handle.height() / 2.0,
        width: SIZE / 2.0 - PAD_X,
        block: handle,
    });

    let mut name_x = PAD_X;
    if let Some(logo) = data.logo_url() {
        let badge = Badge {
            size: 80.0,
            radius: 8.0,
            fill: Color::WHITE.with_opacity(0.2).into(),
            border: None,
            padding: 8.0,
        };
        comp.extend(badge.draw(Some(logo), None).into_iter().map(|c| c.translate(PAD_X, bar.center_y() - 40.0)));
        name_x += 80.0 + 24.0;
    }
    let name_w = (SIZE - PAD_X - handle_w - 32.0 - name_x).max(120.0);
    let name = TextBlock::fit(
        data.church_name().unwrap_or("YOUR MISSION"),
        TextStyle::new(24.0, Color::WHITE).bold().tracking(7.2).uppercase().align(Align::Left),
        name_w,
        24.0,
        12.0,
    );
    comp.push(PaintCommand::Text {
        x: name_x,
        y: bar.center_y() - name.height() / 2.0,
        width: name_w,
        block: name,
    });
    comp
}

pub fn premium_gold(data: &QuoteData) -> Composition {
    let mut comp = Composition::canvas();
    background(&mut comp, Color::hex(0x0c0c0c));
    watermark(&mut comp, data, 600.0, 0.05);
    glow(&mut comp, Rect::new(-108.0, -108.0, 540.0, 540.0), AMBER_400.with_opacity(0.06), 1.0);
    glow(&mut comp, Rect::new(648.0, 648.0, 540.0, 540.0), AMBER_600.with_opacity(0.06), 1.0);

    // corner brackets
    let line = AMBER_400.with_opacity(0.3);
    for (x, y, w, h) in [
        (80.0, 80.0, 160.0, 1.0),
        (80.0, 80.0, 1.0, 160.0),
        (SIZE - 240.0, SIZE - 81.0, 160.0, 1.0),
        (SIZE - 81.0, SIZE - 240.0, 1.0, 160.0),
    ] {
        comp.push(PaintCommand::Rect {
            rect: Rect::new(x, y, w, h),
            radius: 0.0,
            fill: line.into(),
        });
    }

    let width = 900.0;
    let mut col = Column::new(width);
    let logo = data.logo_url();
    let badge = Badge {
        size: 112.0,
        radius: 16.0,
        fill: AMBER_400.with_opacity(0.1).into(),
        border: Some(AMBER_400.with_opacity(0.2)),
        padding: 16.0,
    };
    col.element(112.0, 112.0, badge.draw(logo, None), 48.0);

    if let Some(name) = data.church_name() {
        let rule = || {
            vec![PaintCommand::Rect {
                rect: Rect::new(0.0, 0.0, 48.0, 1.0),
                radius: 0.0,
                fill: AMBER_400.into(),
            }]
        };
        col.element(48.0, 1.0, rule(), 16.0);
        let style = TextStyle::new(14.0, AMBER_400).bold().tracking(5.6).uppercase();
        col.text(TextBlock::new(name, style, width), 16.0);
        col.element(48.0, 1.0, rule(), 64.0);
    }

    let mut below = Column::new(width);
    if let Some(author) = data.author() {
        below.text(TextBlock::new(author, TextStyle::new(30.0, AMBER_500).italic(), width), 80.0);
    }
    if let Some(handle) = data.church_handle() {
        let style = TextStyle::new(18.0, Color::WHITE.with_opacity(0.4)).tracking(3.6).uppercase();
        below.text(TextBlock::new(handle, style, width), 0.0);
    }

    let reserved = col.height() + below.height() + 48.0 + 160.0;
    let block = TextBlock::fit(
        data.text_or("Grace is the only way forward."),
        TextStyle::new(80.0, Color::WHITE).bold().line_height(1.1),
        width,
        (SIZE - reserved - 64.0).max(MIN_QUOTE_SIZE),
        MIN_QUOTE_SIZE,
    );
    col.text(block, 48.0);
    col.append(below);
    col.place_centered(&mut comp, (SIZE - width) / 2.0, SIZE / 2.0);
    comp
}
