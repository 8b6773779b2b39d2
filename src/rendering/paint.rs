/// Paint command set produced by templates and consumed by the rasterizer

use super::layout::TextBlock;
use super::{Color, Rect};

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    /// CSS-style linear gradient: 0deg points up, 90deg points right.
    Linear {
        angle_deg: f32,
        stops: Vec<(f32, Color)>,
    },
}

impl Fill {
    /// Evenly spaced gradient stops.
    pub fn linear(angle_deg: f32, colors: &[Color]) -> Self {
        let n = colors.len().max(2) - 1;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| (i as f32 / n as f32, *c))
            .collect();
        Fill::Linear { angle_deg, stops }
    }

    /// Colour of this fill at point (`px`, `py`) for a shape spanning `area`.
    pub fn color_at(&self, area: &Rect, px: f32, py: f32) -> Color {
        match self {
            Fill::Solid(c) => *c,
            Fill::Linear { angle_deg, stops } => {
                let t = gradient_position(*angle_deg, area, px, py);
                sample_stops(stops, t)
            }
        }
    }

    /// Apply an extra opacity on top of the fill's own alpha.
    pub fn with_opacity(&self, opacity: f32) -> Self {
        match self {
            Fill::Solid(c) => Fill::Solid(c.with_opacity(opacity)),
            Fill::Linear { angle_deg, stops } => Fill::Linear {
                angle_deg: *angle_deg,
                stops: stops
                    .iter()
                    .map(|(p, c)| (*p, c.with_opacity(opacity)))
                    .collect(),
            },
        }
    }
}

impl From<Color> for Fill {
    fn from(c: Color) -> Self {
        Fill::Solid(c)
    }
}

// Position along the gradient line, 0 at the start edge and 1 at the end.
fn gradient_position(angle_deg: f32, area: &Rect, px: f32, py: f32) -> f32 {
    let rad = angle_deg.to_radians();
    let (dx, dy) = (rad.sin(), -rad.cos());
    let half_len = (area.width * dx.abs() + area.height * dy.abs()) / 2.0;
    if half_len <= f32::EPSILON {
        return 0.0;
    }
    let proj = (px - area.center_x()) * dx + (py - area.center_y()) * dy;
    ((proj / half_len) + 1.0) / 2.0
}

fn sample_stops(stops: &[(f32, Color)], t: f32) -> Color {
    match stops {
        [] => Color::TRANSPARENT,
        [only] => only.1,
        _ => {
            let t = t.clamp(0.0, 1.0);
            if t <= stops[0].0 {
                return stops[0].1;
            }
            for pair in stops.windows(2) {
                let (p0, c0) = pair[0];
                let (p1, c1) = pair[1];
                if t <= p1 {
                    let span = (p1 - p0).max(f32::EPSILON);
                    return c0.lerp(c1, (t - p0) / span);
                }
            }
            stops[stops.len() - 1].1
        }
    }
}

/// Repeating background pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    /// A dot of `radius` centred in every cell
    Dots { radius: f32 },
    /// Cell borders along the top and left edge
    Lines { width: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Filled rectangle, optionally with rounded corners
    Rect { rect: Rect, radius: f32, fill: Fill },
    /// Filled ellipse whose edge fades out over `softness` (0 = hard, 1 = fully soft).
    /// Stands in for blurred glow blobs.
    Ellipse {
        rect: Rect,
        color: Color,
        softness: f32,
    },
    /// Rectangle outline
    Stroke {
        rect: Rect,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// Tiled pattern clipped to `rect`
    Pattern {
        rect: Rect,
        spacing: f32,
        pattern: Pattern,
        color: Color,
    },
    /// Laid-out text; `x` and `width` define the alignment box, `y` the top of the first line.
    Text {
        x: f32,
        y: f32,
        width: f32,
        block: TextBlock,
    },
    /// Image reference fitted inside `rect` (object-contain)
    Image {
        src: String,
        rect: Rect,
        opacity: f32,
    },
}

impl PaintCommand {
    /// Same command shifted by (`dx`, `dy`) logical px.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        let shift = |r: Rect| Rect::new(r.x + dx, r.y + dy, r.width, r.height);
        match self {
            PaintCommand::Rect { rect, radius, fill } => PaintCommand::Rect {
                rect: shift(rect),
                radius,
                fill,
            },
            PaintCommand::Ellipse {
                rect,
                color,
                softness,
            } => PaintCommand::Ellipse {
                rect: shift(rect),
                color,
                softness,
            },
            PaintCommand::Stroke {
                rect,
                radius,
                width,
                color,
            } => PaintCommand::Stroke {
                rect: shift(rect),
                radius,
                width,
                color,
            },
            PaintCommand::Pattern {
                rect,
                spacing,
                pattern,
                color,
            } => PaintCommand::Pattern {
                rect: shift(rect),
                spacing,
                pattern,
                color,
            },
            PaintCommand::Text { x, y, width, block } => PaintCommand::Text {
                x: x + dx,
                y: y + dy,
                width,
                block,
            },
            PaintCommand::Image { src, rect, opacity } => PaintCommand::Image {
                src,
                rect: shift(rect),
                opacity,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_moves_geometry_only() {
        let cmd = PaintCommand::Image {
            src: "a".into(),
            rect: Rect::new(1.0, 2.0, 3.0, 4.0),
            opacity: 0.5,
        }
        .translate(10.0, 20.0);
        assert_eq!(
            cmd,
            PaintCommand::Image {
                src: "a".into(),
                rect: Rect::new(11.0, 22.0, 3.0, 4.0),
                opacity: 0.5,
            }
        );
    }

    #[test]
    fn gradient_to_right_runs_left_to_right() {
        let fill = Fill::linear(90.0, &[Color::BLACK, Color::WHITE]);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(fill.color_at(&area, 0.0, 50.0), Color::BLACK);
        assert_eq!(fill.color_at(&area, 100.0, 50.0), Color::WHITE);
        let mid = fill.color_at(&area, 50.0, 50.0);
        assert_eq!(mid.r, 128);
    }

    #[test]
    fn gradient_to_bottom_right_is_diagonal() {
        let fill = Fill::linear(135.0, &[Color::BLACK, Color::WHITE]);
        let area = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(fill.color_at(&area, 0.0, 0.0), Color::BLACK);
        assert_eq!(fill.color_at(&area, 100.0, 100.0), Color::WHITE);
    }

    #[test]
    fn paint_command_debug() {
        let cmd = PaintCommand::Rect {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            radius: 0.0,
            fill: Color::rgb(255, 0, 0).into(),
        };
        match cmd {
            PaintCommand::Rect { rect, .. } => assert_eq!(rect.width, 10.0),
            _ => panic!("unexpected"),
        }
    }
}
