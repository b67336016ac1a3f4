//! Canvas trait
//!
//! Defines the interface the face paints through. Implementations may
//! rasterize, forward over a link, or just record what was asked.

use sunshine_core::face::Point;

use crate::icons::Icon;

/// A 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// Surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// How a line of text is painted
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextStyle {
    pub color: Color,
    /// Text size in pixels
    pub size: f32,
    /// Disabled in ambient mode on low-bit displays
    pub anti_alias: bool,
}

/// Canvas errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Communication error with the surface
    Communication,
    /// Surface not ready for drawing
    NotReady,
    /// Drawing buffer exhausted
    BufferOverflow,
}

/// Drawing surface for one frame
///
/// Coordinates are pixels from the top-left corner. Text is positioned by
/// its left baseline; icons by their top-left corner.
pub trait Canvas {
    /// Fill the whole surface with one color
    fn clear(&mut self, color: Color) -> Result<(), CanvasError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<(), CanvasError>;

    /// Draw a line of text
    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), CanvasError>;

    /// Draw an icon
    fn draw_icon(&mut self, icon: &Icon, at: Point, anti_alias: bool) -> Result<(), CanvasError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channels() {
        let c = Color::rgb(0x03, 0xA9, 0xF4);
        assert_eq!(c, Color(0x03A9F4));
        assert_eq!((c.red(), c.green(), c.blue()), (0x03, 0xA9, 0xF4));
    }
}
