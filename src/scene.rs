use serde::Serialize;

use crate::ir::Position;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: String,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: String,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: String,
        stroke_width: f32,
    },
    Text(TextRun),
}

/// A run of text anchored at its center. Multiple lines stack around `y`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub lines: Vec<String>,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub line_height: f32,
    /// Degrees, clockwise, about (x, y).
    pub rotation: Option<f32>,
    pub fill: String,
}

impl Primitive {
    pub fn circle(center: Position, r: f32, fill: &str) -> Self {
        Primitive::Circle {
            cx: center.x,
            cy: center.y,
            r,
            fill: fill.to_string(),
        }
    }

    pub fn line(from: Position, to: Position, stroke: &str, stroke_width: f32) -> Self {
        Primitive::Line {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            stroke: stroke.to_string(),
            stroke_width,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Rect { .. } => "rect",
            Primitive::Circle { .. } => "circle",
            Primitive::Line { .. } => "line",
            Primitive::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub primitives: Vec<Primitive>,
}

impl Canvas {
    pub fn new(width: f32, height: f32, background: &str) -> Self {
        let mut canvas = Self {
            width,
            height,
            background: background.to_string(),
            primitives: Vec::new(),
        };
        canvas.push(Primitive::Rect {
            x: 0.0,
            y: 0.0,
            width,
            height,
            fill: background.to_string(),
        });
        canvas
    }

    pub fn square(size: f32, background: &str) -> Self {
        Self::new(size, size, background)
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    pub fn lines(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(run) => Some(run),
            _ => None,
        })
    }
}
