//! Content stream drawing primitives for one page

use crate::encoding::{encode_win_ansi, Font};
use crate::error::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// RGB color with 0-1 components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
    pub const BLUE: Rgb = Rgb(0.16, 0.38, 0.67);
    pub const LIGHT_GREY: Rgb = Rgb(0.92, 0.92, 0.92);
    pub const GREY: Rgb = Rgb(0.82, 0.82, 0.82);
    pub const DARK_GREY: Rgb = Rgb(0.35, 0.35, 0.35);
    pub const RED: Rgb = Rgb(0.80, 0.20, 0.20);
    pub const ORANGE: Rgb = Rgb(0.93, 0.55, 0.13);
    pub const GREEN: Rgb = Rgb(0.22, 0.60, 0.30);
    pub const PURPLE: Rgb = Rgb(0.50, 0.30, 0.65);

    fn operands(&self) -> Vec<Object> {
        vec![real(self.0), real(self.1), real(self.2)]
    }
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

/// Accumulates the operations of a single page
#[derive(Debug, Default)]
pub struct Canvas {
    operations: Vec<Operation>,
}

impl Canvas {
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", color.operands()),
            Operation::new("re", vec![real(x), real(y), real(width), real(height)]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgb, width: f32) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new("RG", color.operands()),
            Operation::new("w", vec![real(width)]),
            Operation::new("m", vec![real(x1), real(y1)]),
            Operation::new("l", vec![real(x2), real(y2)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Draw `text` with its baseline at (`x`, `y`)
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("rg", color.operands()),
            Operation::new(
                "Tf",
                vec![Object::Name(font.resource().as_bytes().to_vec()), real(size)],
            ),
            Operation::new("Td", vec![real(x), real(y)]),
            Operation::new(
                "Tj",
                vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }

    /// Paint the named image XObject into the given box
    pub fn image(&mut self, name: &str, x: f32, y: f32, width: f32, height: f32) {
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![real(width), real(0.0), real(0.0), real(height), real(x), real(y)],
            ),
            Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
    }

    pub fn encode(self) -> Result<Vec<u8>, RenderError> {
        Content {
            operations: self.operations,
        }
        .encode()
        .map_err(|e| RenderError::Content(e.to_string()))
    }
}
