//! The [`Screen`] buffer that models draw into, and the [`Frame`] diff that
//! drivers flush.
//!
//! Screen coordinates are `(x, y)` character positions, not maze cells.

use crate::style::Color;

// ---------------------------------------------------------------------------
// Glyph
// ---------------------------------------------------------------------------

/// A single coloured character.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    /// A blank glyph with background `bg`.
    #[inline]
    pub const fn blank(bg: Color) -> Self {
        Self {
            ch: ' ',
            fg: Color::DEFAULT,
            bg,
        }
    }

    /// Set the character (builder).
    #[inline]
    pub const fn with_char(mut self, ch: char) -> Self {
        self.ch = ch;
        self
    }

    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }
}

impl Default for Glyph {
    #[inline]
    fn default() -> Self {
        Self::blank(Color::DEFAULT)
    }
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// A fixed-size 2D buffer of [`Glyph`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    glyphs: Vec<Glyph>,
    width: i32,
    height: i32,
}

impl Screen {
    /// Create a screen filled with default glyphs.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            glyphs: vec![Glyph::default(); (width * height) as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Read the glyph at `(x, y)`. Returns `Glyph::default()` outside the
    /// screen.
    pub fn at(&self, x: i32, y: i32) -> Glyph {
        self.index(x, y)
            .map(|i| self.glyphs[i])
            .unwrap_or_default()
    }

    /// Set the glyph at `(x, y)`. No-op outside the screen.
    pub fn set(&mut self, x: i32, y: i32, glyph: Glyph) {
        if let Some(i) = self.index(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    /// Fill every position with `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.glyphs.fill(glyph);
    }

    /// Fill the `w`×`h` rectangle at `(x, y)` with `glyph`, clipped to the
    /// screen.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, glyph: Glyph) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.set(xx, yy, glyph);
            }
        }
    }

    /// Write `text` starting at `(x, y)` in colour `fg`, keeping the
    /// existing background of each position.
    pub fn print(&mut self, x: i32, y: i32, text: &str, fg: Color) {
        for (i, ch) in text.chars().enumerate() {
            let xx = x + i as i32;
            let bg = self.at(xx, y).bg;
            self.set(xx, y, Glyph { ch, fg, bg });
        }
    }

    /// Read back the characters of row `y` in `[x0, x1)`.
    pub fn text(&self, x0: i32, x1: i32, y: i32) -> String {
        (x0..x1).map(|x| self.at(x, y).ch).collect()
    }

    /// Copy `src` into `self`. Both screens must have the same size.
    pub fn copy_from(&mut self, src: &Screen) {
        if self.width == src.width && self.height == src.height {
            self.glyphs.copy_from_slice(&src.glyphs);
        }
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameGlyph / compute_frame
// ---------------------------------------------------------------------------

/// A single position that changed between two screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameGlyph {
    pub glyph: Glyph,
    pub x: i32,
    pub y: i32,
}

/// A set of glyph changes.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub glyphs: Vec<FrameGlyph>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized screens.
pub fn compute_frame(prev: &Screen, curr: &Screen) -> Frame {
    let mut glyphs = Vec::new();
    for y in 0..curr.height {
        for x in 0..curr.width {
            let cg = curr.at(x, y);
            if prev.at(x, y) != cg {
                glyphs.push(FrameGlyph { glyph: cg, x, y });
            }
        }
    }
    Frame {
        glyphs,
        width: curr.width,
        height: curr.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_at() {
        let mut s = Screen::new(4, 3);
        s.set(2, 1, Glyph::default().with_char('X'));
        assert_eq!(s.at(2, 1).ch, 'X');
        assert_eq!(s.at(10, 10), Glyph::default());
        s.set(-1, 0, Glyph::default().with_char('Y'));
        assert!(s.text(0, 4, 0).chars().all(|c| c == ' '));
    }

    #[test]
    fn print_keeps_background() {
        let mut s = Screen::new(6, 1);
        s.fill_rect(0, 0, 3, 1, Glyph::blank(Color::BLUE));
        s.print(1, 0, "12", Color::BLACK);
        assert_eq!(s.text(0, 6, 0), " 12   ");
        assert_eq!(s.at(1, 0).bg, Color::BLUE);
        assert_eq!(s.at(2, 0).bg, Color::BLUE);
        assert_eq!(s.at(3, 0).bg, Color::DEFAULT);
        assert_eq!(s.at(2, 0).fg, Color::BLACK);
    }

    #[test]
    fn compute_frame_diff() {
        let a = Screen::new(3, 2);
        let mut b = Screen::new(3, 2);
        b.set(1, 0, Glyph::default().with_char('A'));
        let frame = compute_frame(&a, &b);
        assert_eq!(frame.glyphs.len(), 1);
        assert_eq!((frame.glyphs[0].x, frame.glyphs[0].y), (1, 0));
        assert_eq!(frame.glyphs[0].glyph.ch, 'A');

        let mut c = Screen::new(3, 2);
        c.copy_from(&b);
        assert!(compute_frame(&b, &c).glyphs.is_empty());
    }
}
