//! Current drawing styles.
//!
//! A document holds exactly one current value per style category. Styles
//! are not stacked: setting a new one replaces the old for every later draw
//! call, and nothing restores it at the end of a page.

use crate::geometry::Color;

/// How lines are stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePattern {
    /// Continuous line
    #[default]
    Solid,
    /// Skip stroking entirely
    Null,
}

/// How closed shapes are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPattern {
    /// Uniform color
    #[default]
    Solid,
    /// Skip filling entirely
    Null,
}

/// Stroke settings. A width of zero is the thinnest line the device can
/// render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke pattern
    pub pattern: LinePattern,
    /// Stroke color
    pub color: Color,
    /// Line width in points
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::solid(Color::black(), 0.0)
    }
}

impl LineStyle {
    /// Solid line of the given color and width.
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            pattern: LinePattern::Solid,
            color,
            width,
        }
    }

    /// A line style that draws nothing.
    pub fn null() -> Self {
        Self {
            pattern: LinePattern::Null,
            ..Self::default()
        }
    }

    /// Whether strokes are painted.
    pub fn is_visible(&self) -> bool {
        self.pattern == LinePattern::Solid
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.color.is_finite() && self.width.is_finite()
    }
}

/// Fill settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FillStyle {
    /// Fill pattern
    pub pattern: FillPattern,
    /// Fill color
    pub color: Color,
}

impl FillStyle {
    /// Solid fill of the given color.
    pub fn solid(color: Color) -> Self {
        Self {
            pattern: FillPattern::Solid,
            color,
        }
    }

    /// A fill style that paints nothing.
    pub fn null() -> Self {
        Self {
            pattern: FillPattern::Null,
            color: Color::black(),
        }
    }

    /// Whether fills are painted.
    pub fn is_visible(&self) -> bool {
        self.pattern == FillPattern::Solid
    }
}

/// Text settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points
    pub height: f64,
    /// Text color
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0, Color::black())
    }
}

impl TextStyle {
    /// Text of the given size and color.
    pub fn new(height: f64, color: Color) -> Self {
        Self { height, color }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.height.is_finite() && self.color.is_finite()
    }
}

/// How a closed path is painted for a line/fill style combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PaintMode {
    FillStroke,
    Fill,
    Stroke,
}

pub(crate) fn paint_mode(line: &LineStyle, fill: &FillStyle) -> Option<PaintMode> {
    match (line.is_visible(), fill.is_visible()) {
        (true, true) => Some(PaintMode::FillStroke),
        (false, true) => Some(PaintMode::Fill),
        (true, false) => Some(PaintMode::Stroke),
        (false, false) => None,
    }
}
