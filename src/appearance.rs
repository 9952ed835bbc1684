//! Opaque appearance token attached to every drawn cell.
//!
//! Layout and drawing code only copies these values around; the terminal
//! surface is the single place that turns them into escape sequences.

use crossterm::style::{Attribute, Color, ContentStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Appearance {
    foreground: Option<Color>,
    background: Option<Color>,
    bold: bool,
}

impl Appearance {
    pub const fn new() -> Self {
        Self {
            foreground: None,
            background: None,
            bold: false,
        }
    }

    /// Foreground and background from RGB triples.
    pub const fn rgb(foreground: [u8; 3], background: [u8; 3]) -> Self {
        Self {
            foreground: Some(Color::Rgb {
                r: foreground[0],
                g: foreground[1],
                b: foreground[2],
            }),
            background: Some(Color::Rgb {
                r: background[0],
                g: background[1],
                b: background[2],
            }),
            bold: false,
        }
    }

    pub const fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub const fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub const fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn foreground(&self) -> Option<Color> {
        self.foreground
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub(crate) fn content_style(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.foreground;
        style.background_color = self.background;
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_sets_both_channels() {
        let appearance = Appearance::rgb([1, 2, 3], [4, 5, 6]);
        assert_eq!(appearance.foreground(), Some(Color::Rgb { r: 1, g: 2, b: 3 }));
        assert_eq!(appearance.background(), Some(Color::Rgb { r: 4, g: 5, b: 6 }));
        assert!(!appearance.is_bold());
    }

    #[test]
    fn content_style_carries_bold() {
        let style = Appearance::new().with_bold(true).content_style();
        assert!(style.attributes.has(Attribute::Bold));
        assert_eq!(style.foreground_color, None);
    }
}
