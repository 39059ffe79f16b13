//! Drawing surface
//!
//! The game only knows four primitives. A host backs them with a canvas, a
//! GPU pipeline or nothing at all; `CommandBuffer` records them so a host on
//! the other side of an FFI boundary can replay a frame.

pub mod scene;

use glam::Vec2;
use serde::Serialize;

use crate::sim::Rect;

pub use scene::{Draw, draw_frame, start_button};

/// Linear RGBA
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);

    /// `0xRRGGBB`, opaque
    pub const fn hex(rgb: u32) -> Self {
        Color([
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
            1.0,
        ])
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Color([r, g, b, alpha])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// Pixel height
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, align: TextAlign) -> Self {
        Self { size, color, align }
    }
}

/// Host-provided drawing backend
pub trait Renderer {
    /// Fill the whole viewport with a vertical two-stop gradient
    fn draw_gradient_background(&mut self, top: Color, bottom: Color, stop: f32);

    fn draw_box(&mut self, rect: &Rect, color: Color);

    fn draw_rounded_box(&mut self, rect: &Rect, radius: f32, color: Color);

    /// `pos` is the baseline anchor; its meaning on x follows `style.align`
    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// One recorded primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Gradient {
        top: Color,
        bottom: Color,
        stop: f32,
    },
    Box {
        rect: Rect,
        color: Color,
    },
    RoundedBox {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

/// Renderer that records a frame instead of drawing it
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Every text string in draw order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.commands)
    }
}

impl Renderer for CommandBuffer {
    fn draw_gradient_background(&mut self, top: Color, bottom: Color, stop: f32) {
        self.commands.push(DrawCommand::Gradient { top, bottom, stop });
    }

    fn draw_box(&mut self, rect: &Rect, color: Color) {
        self.commands.push(DrawCommand::Box { rect: *rect, color });
    }

    fn draw_rounded_box(&mut self, rect: &Rect, radius: f32, color: Color) {
        self.commands.push(DrawCommand::RoundedBox {
            rect: *rect,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        let c = Color::hex(0xff8000);
        assert_eq!(c.0[0], 1.0);
        assert!((c.0[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.0[2], 0.0);
        assert_eq!(c.with_alpha(0.5).0[3], 0.5);
    }

    #[test]
    fn test_command_buffer_json() {
        let mut buf = CommandBuffer::new();
        buf.draw_box(&Rect::new(1.0, 2.0, 3.0, 4.0), Color::BLACK);
        buf.draw_text("hi", Vec2::ZERO, TextStyle::new(20.0, Color::WHITE, TextAlign::Left));
        let json = buf.to_json().unwrap();
        assert!(json.contains(r#""op":"box""#));
        assert!(json.contains(r#""text":"hi""#));
        assert_eq!(buf.texts().collect::<Vec<_>>(), vec!["hi"]);
    }
}
