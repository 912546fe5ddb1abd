use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::assets::{Sprite, SpriteId};

/// Horizontal anchoring of text drawn with [`Surface::fill_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Text size in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
}

impl Font {
    pub const STATUS: Font = Font { size: 30.0 };
    pub const HEADLINE: Font = Font { size: 100.0 };
    pub const HINT: Font = Font { size: 35.0 };
}

impl Default for Font {
    fn default() -> Self {
        Font::STATUS
    }
}

/// Current text settings of a surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextState {
    pub align: TextAlign,
    pub font: Font,
}

/// 2D drawing target in playfield coordinates. The game only ever writes to it.
pub trait Surface {
    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_font(&mut self, font: Font);
    /// Pushes the current text settings
    fn save(&mut self);
    /// Pops the text settings pushed by the matching [`Surface::save`]
    fn restore(&mut self);
}

/// Discards everything. Useful for headless simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn draw_image(&mut self, _sprite: &Sprite, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32) {}
    fn fill_text(&mut self, _text: &str, _x: f32, _y: f32) {}
    fn set_text_align(&mut self, _align: TextAlign) {}
    fn set_font(&mut self, _font: Font) {}
    fn save(&mut self) {}
    fn restore(&mut self) {}
}

/// A single call made against a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image {
        sprite: SpriteId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        state: TextState,
    },
}

/// Keeps every draw call in order, with the text state in effect for text
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    state: TextState,
    saved: Vec<TextState>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn images(&self, sprite: SpriteId) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Image { sprite: s, .. } if *s == sprite))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn state(&self) -> TextState {
        self.state
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::Image {
            sprite: sprite.id,
            x,
            y,
            width,
            height,
        });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            state: self.state,
        });
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}

/// Draws the playfield into a ratatui buffer, scaling playfield pixels to cells
pub struct TerminalSurface<'a> {
    buffer: &'a mut Buffer,
    area: Rect,
    scale_x: f32,
    scale_y: f32,
    state: TextState,
    saved: Vec<TextState>,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(
        buffer: &'a mut Buffer,
        area: Rect,
        playfield_width: f32,
        playfield_height: f32,
    ) -> Self {
        Self {
            buffer,
            area,
            scale_x: area.width as f32 / playfield_width.max(1.0),
            scale_y: area.height as f32 / playfield_height.max(1.0),
            state: TextState::default(),
            saved: Vec::new(),
        }
    }

    fn column(&self, x: f32) -> f32 {
        self.area.x as f32 + x * self.scale_x
    }

    fn row(&self, y: f32) -> f32 {
        self.area.y as f32 + y * self.scale_y
    }

    /// Cells covered by a playfield rectangle, clipped to the area.
    /// Anything with positive size covers at least one cell.
    fn cell_span(&self, x: f32, y: f32, width: f32, height: f32) -> (i32, i32, i32, i32) {
        let left = self.column(x).floor() as i32;
        let right = self.column(x + width).ceil() as i32;
        let top = self.row(y).floor() as i32;
        let bottom = self.row(y + height).ceil() as i32;
        (
            left.max(self.area.left() as i32),
            right.min(self.area.right() as i32),
            top.max(self.area.top() as i32),
            bottom.min(self.area.bottom() as i32),
        )
    }

    fn put(&mut self, cx: i32, cy: i32, symbol: char, style: Style) {
        if cx < 0 || cy < 0 {
            return;
        }
        if let Some(cell) = self.buffer.cell_mut((cx as u16, cy as u16)) {
            cell.set_char(symbol).set_style(style);
        }
    }

    fn builtin_art(id: SpriteId) -> (&'static [&'static str], Color) {
        match id {
            SpriteId::Player => (&[" /^\\ ", "<|||>", " ||| "], Color::Green),
            SpriteId::Enemy1 => (&["  \\|/  ", " {===} ", "  /_\\  "], Color::Red),
        }
    }
}

impl Surface for TerminalSurface<'_> {
    fn draw_image(&mut self, sprite: &Sprite, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (left, right, top, bottom) = self.cell_span(x, y, width, height);
        let origin_x = self.column(x);
        let origin_y = self.row(y);
        let span_x = width * self.scale_x;
        let span_y = height * self.scale_y;
        let (art, color) = Self::builtin_art(sprite.id);

        for cy in top..bottom {
            for cx in left..right {
                // Sample at the cell centre
                let u = (cx as f32 + 0.5 - origin_x) / span_x;
                let v = (cy as f32 + 0.5 - origin_y) / span_y;
                if sprite.has_pixels() {
                    if let Some([r, g, b]) = sprite.sample(u, v) {
                        self.put(cx, cy, ' ', Style::default().bg(Color::Rgb(r, g, b)));
                    }
                    continue;
                }
                let line = art[((v.clamp(0.0, 0.999) * art.len() as f32) as usize).min(art.len() - 1)];
                let glyphs: Vec<char> = line.chars().collect();
                let glyph = glyphs[((u.clamp(0.0, 0.999) * glyphs.len() as f32) as usize)
                    .min(glyphs.len() - 1)];
                if glyph != ' ' {
                    self.put(
                        cx,
                        cy,
                        glyph,
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    );
                }
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let (left, right, top, bottom) = self.cell_span(x, y, width, height);
        for cy in top..bottom {
            for cx in left..right {
                self.put(cx, cy, '█', Style::default().fg(Color::White));
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let width = text.chars().count() as i32;
        let anchor = self.column(x).floor() as i32;
        let start = match self.state.align {
            TextAlign::Left => anchor,
            TextAlign::Center => anchor - width / 2,
        };
        // Canvas text sits on its baseline, so draw on the row above it
        let cy = (self.row(y).floor() as i32 - 1).max(self.area.top() as i32);
        if cy >= self.area.bottom() as i32 {
            return;
        }
        let mut style = Style::default().fg(Color::White);
        if self.state.font.size >= Font::HEADLINE.size {
            style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
        } else if self.state.font.size > Font::STATUS.size {
            style = style.add_modifier(Modifier::BOLD);
        }
        for (i, glyph) in text.chars().enumerate() {
            let cx = start + i as i32;
            if cx >= self.area.left() as i32 && cx < self.area.right() as i32 {
                self.put(cx, cy, glyph, style);
            }
        }
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }
}
