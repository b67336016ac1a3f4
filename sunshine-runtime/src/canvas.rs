//! Logging canvas
//!
//! Paints nothing; each operation is traced and the frame is summarised in
//! one line when it is finished.

use std::fmt::Write;

use tracing::{info, trace};

use sunshine_core::face::Point;
use sunshine_display::{Canvas, CanvasError, Color, Icon, TextStyle};

/// Canvas that reports frames through the log
#[derive(Debug, Default)]
pub struct LogCanvas {
    frames: u32,
    line: String,
}

impl LogCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames finished so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Summary of the frame being painted
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// Log the frame summary and start a new frame
    pub fn finish_frame(&mut self) {
        self.frames += 1;
        info!("frame {}: {}", self.frames, self.current_line());
        self.line.clear();
    }

    fn append(&mut self, part: &str) {
        if !self.line.is_empty() {
            self.line.push_str(" | ");
        }
        self.line.push_str(part);
    }
}

impl Canvas for LogCanvas {
    fn clear(&mut self, color: Color) -> Result<(), CanvasError> {
        trace!("clear #{:06X}", color.0);
        let mut part = String::new();
        let _ = write!(part, "bg #{:06X}", color.0);
        self.append(&part);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<(), CanvasError> {
        trace!("fill_rect ({}, {}) {}x{} #{:06X}", x, y, width, height, color.0);
        let mut part = String::new();
        let _ = write!(part, "bg #{:06X}", color.0);
        self.append(&part);
        Ok(())
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) -> Result<(), CanvasError> {
        trace!(
            "text {:?} at ({:.1}, {:.1}) size {} aa={}",
            text,
            at.x,
            at.y,
            style.size,
            style.anti_alias
        );
        self.append(text);
        Ok(())
    }

    fn draw_icon(&mut self, icon: &Icon, at: Point, anti_alias: bool) -> Result<(), CanvasError> {
        trace!("icon {} at ({:.1}, {:.1}) aa={}", icon.name, at.x, at.y, anti_alias);
        self.append(icon.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_summary() {
        let mut canvas = LogCanvas::new();
        let style = TextStyle {
            color: Color::WHITE,
            size: 40.0,
            anti_alias: true,
        };
        canvas.clear(Color::BLACK).unwrap();
        canvas.draw_text("10:13", Point::new(1.0, 2.0), &style).unwrap();
        canvas
            .draw_icon(
                &Icon {
                    name: "ic_clear",
                    width: 48,
                    height: 48,
                },
                Point::default(),
                true,
            )
            .unwrap();
        assert_eq!(canvas.current_line(), "bg #000000 | 10:13 | ic_clear");

        canvas.finish_frame();
        assert_eq!(canvas.frames(), 1);
        assert_eq!(canvas.current_line(), "");
    }
}
