//! Drawing surface trait and an in-memory recording implementation

use glam::Vec2;

use super::Color;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
        }
    }
}

/// Font description, rendered as a CSS font shorthand
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub size_px: f32,
    pub bold: bool,
    pub family: &'static str,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size_px: 10.0,
            bold: false,
            family: "sans-serif",
        }
    }
}

impl Font {
    pub fn bold(size_px: f32, family: &'static str) -> Self {
        Self {
            size_px,
            bold: true,
            family,
        }
    }

    /// e.g. `bold 50px Arial`
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size_px, self.family)
        } else {
            format!("{}px {}", self.size_px, self.family)
        }
    }
}

/// The subset of a 2D canvas context the show draws with.
///
/// Coordinates are pixels, origin top-left, y down. State setters affect
/// subsequent fills until changed or until the matching `restore`.
pub trait Surface {
    /// Push the current drawing state
    fn save(&mut self);
    /// Pop the drawing state pushed by the last `save`
    fn restore(&mut self);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_fill_color(&mut self, color: Color);
    /// Glow around subsequent fills
    fn set_shadow(&mut self, blur: f32, color: Color);
    fn set_font(&mut self, font: &Font);
    fn set_text_align(&mut self, align: TextAlign);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32);
    fn fill_text(&mut self, text: &str, pos: Vec2);
}

/// Drawing state captured by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub alpha: f32,
    pub fill: Color,
    pub shadow_blur: f32,
    pub shadow_color: Color,
    pub font: Font,
    pub align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            fill: Color::BLACK,
            shadow_blur: 0.0,
            shadow_color: Color::BLACK.with_alpha(0.0),
            font: Font::default(),
            align: TextAlign::Start,
        }
    }
}

/// A fill issued against a [`RecordingSurface`], with the state in effect
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        state: DrawState,
    },
    Circle {
        center: Vec2,
        radius: f32,
        state: DrawState,
    },
    Text {
        text: String,
        pos: Vec2,
        state: DrawState,
    },
}

/// Surface that records fills instead of rasterizing them.
///
/// Used by tests and by the headless native runner.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: DrawState,
    stack: Vec<DrawState>,
    commands: Vec<DrawCommand>,
    /// `restore` calls with nothing saved
    pub unbalanced_restores: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current (unsaved) drawing state
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Number of `save` calls not yet restored
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    /// Forget recorded commands, keeping the drawing state
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (&Vec2, f32, &DrawState)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                state,
            } => Some((center, *radius, state)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, &Vec2, &DrawState)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, pos, state } => Some((text.as_str(), pos, state)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => self.unbalanced_restores += 1,
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_shadow(&mut self, blur: f32, color: Color) {
        self.state.shadow_blur = blur;
        self.state.shadow_color = color;
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = font.clone();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            state: self.state.clone(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            state: self.state.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            pos,
            state: self.state.clone(),
        });
    }
}
