//! Drawing tool selection.

use sketchboard_shared::domain::{BrushWidth, Color};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Brush,
    /// Paints with the background color
    Eraser,
}

/// Current tool, color and width used for new strokes
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    tool: Tool,
    color: Color,
    width: BrushWidth,
    background: Color,
}

impl Brush {
    pub fn new(color: Color, width: BrushWidth, background: Color) -> Self {
        Self {
            tool: Tool::Brush,
            color,
            width,
            background,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_width(&mut self, width: BrushWidth) {
        self.width = width;
    }

    pub fn width(&self) -> BrushWidth {
        self.width
    }

    pub fn background(&self) -> &Color {
        &self.background
    }

    /// Color a new stroke is painted with
    pub fn stroke_color(&self) -> &Color {
        match self.tool {
            Tool::Brush => &self.color,
            Tool::Eraser => &self.background,
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(Color::black(), BrushWidth::default(), Color::white())
    }
}
