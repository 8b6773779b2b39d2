/// Text layout: word wrapping and fit-to-box sizing over the bitmap face

use super::font;
use super::paint::Fill;
use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Glyph cell size in logical px
    pub size: f32,
    pub fill: Fill,
    pub align: Align,
    pub bold: bool,
    pub italic: bool,
    /// Extra space between glyphs in logical px
    pub tracking: f32,
    /// Line pitch as a multiple of `size`
    pub line_height: f32,
    pub uppercase: bool,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            fill: Fill::Solid(color),
            align: Align::Center,
            bold: false,
            italic: false,
            tracking: 0.0,
            line_height: 1.25,
            uppercase: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn tracking(mut self, tracking: f32) -> Self {
        self.tracking = tracking;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn fill(mut self, fill: impl Into<Fill>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn line_pitch(&self) -> f32 {
        self.size * self.line_height
    }

    /// How many glyphs fit on one line of `max_width`.
    pub fn chars_per_line(&self, max_width: f32) -> usize {
        let adv = font::advance(self.size, self.tracking);
        if adv <= 0.0 {
            return 1;
        }
        // n glyphs need n*adv - tracking
        (((max_width + self.tracking) / adv).floor() as usize).max(1)
    }
}

/// Text broken into lines for a given style
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub style: TextStyle,
}

impl TextBlock {
    /// Wrap `text` so no line exceeds `max_width`.
    pub fn new(text: &str, style: TextStyle, max_width: f32) -> Self {
        let text = if style.uppercase {
            text.to_uppercase()
        } else {
            text.to_string()
        };
        let lines = wrap(&text, style.chars_per_line(max_width));
        Self { lines, style }
    }

    /// Wrap `text` and shrink the style until the block fits `max_width` x `max_height`,
    /// never going below `min_size`.
    pub fn fit(text: &str, style: TextStyle, max_width: f32, max_height: f32, min_size: f32) -> Self {
        let mut style = style;
        loop {
            let block = Self::new(text, style.clone(), max_width);
            if block.height() <= max_height || style.size <= min_size {
                return block;
            }
            let next = (style.size - 4.0).max(min_size);
            style.tracking *= next / style.size;
            style.size = next;
        }
    }

    pub fn height(&self) -> f32 {
        let n = self.lines.len() as f32;
        if n == 0.0 {
            return 0.0;
        }
        // last line contributes its glyph height only
        (n - 1.0) * self.style.line_pitch() + self.style.size
    }

    pub fn width(&self) -> f32 {
        self.lines
            .iter()
            .map(|l| font::measure(l, self.style.size, self.style.tracking))
            .fold(0.0, f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }
}

/// Greedy word wrap on whitespace; words longer than a line are split.
pub fn wrap(text: &str, chars_per_line: usize) -> Vec<String> {
    let limit = chars_per_line.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut cur = String::new();
        let mut cur_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            // break words that cannot fit on any line
            while word.len() > limit {
                if cur_len > 0 {
                    lines.push(std::mem::take(&mut cur));
                    cur_len = 0;
                }
                let rest = word.split_off(limit);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            if cur_len > 0 && cur_len + 1 + word.len() > limit {
                lines.push(std::mem::take(&mut cur));
                cur_len = 0;
            }
            if cur_len > 0 {
                cur.push(' ');
                cur_len += 1;
            }
            cur_len += word.len();
            cur.extend(word);
        }
        if cur_len > 0 {
            lines.push(cur);
        }
    }
    lines
}
