//! Grid tables drawn row by row

use crate::canvas::{Canvas, Rgb};
use crate::encoding::{fit_text, text_width, wrap_text, Font};

pub const ROW_HEIGHT: f32 = 16.0;
const CELL_PADDING: f32 = 4.0;
const HEADER_SIZE: f32 = 8.0;
const HEADER_LINE: f32 = 9.5;
const BODY_SIZE: f32 = 8.5;

/// Column widths plus where the table starts
#[derive(Debug, Clone)]
pub struct Grid {
    pub x: f32,
    pub widths: Vec<f32>,
}

impl Grid {
    pub fn new(x: f32, widths: Vec<f32>) -> Self {
        Self { x, widths }
    }

    pub fn width(&self) -> f32 {
        self.widths.iter().sum()
    }

    fn cells(&self) -> impl Iterator<Item = (f32, f32)> + '_ {
        self.widths.iter().scan(self.x, |x, &w| {
            let start = *x;
            *x += w;
            Some((start, w))
        })
    }

    /// Height of the header row once titles are wrapped to their columns
    pub fn header_height(&self, headers: &[&str]) -> f32 {
        let lines = headers
            .iter()
            .zip(&self.widths)
            .map(|(h, w)| wrap_text(h, w - 2.0 * CELL_PADDING, HEADER_SIZE, Font::Bold).len())
            .max()
            .unwrap_or(1)
            .max(1);
        lines as f32 * HEADER_LINE + 2.0 * CELL_PADDING
    }

    /// Filled header row with wrapped, centered bold titles. Returns its height.
    pub fn draw_header(&self, canvas: &mut Canvas, top: f32, headers: &[&str], fill: Rgb) -> f32 {
        let height = self.header_height(headers);
        canvas.fill_rect(self.x, top - height, self.width(), height, fill);

        for ((x, w), header) in self.cells().zip(headers) {
            let lines = wrap_text(header, w - 2.0 * CELL_PADDING, HEADER_SIZE, Font::Bold);
            let mut baseline = top - CELL_PADDING - HEADER_SIZE;
            for line in lines {
                let line = fit_text(&line, w - 2.0 * CELL_PADDING, HEADER_SIZE, Font::Bold);
                let line_x = x + (w - text_width(&line, HEADER_SIZE, Font::Bold)) / 2.0;
                canvas.text(line_x, baseline, Font::Bold, HEADER_SIZE, Rgb::WHITE, &line);
                baseline -= HEADER_LINE;
            }
        }
        height
    }

    /// One body row: first cell left-aligned, the rest centered. Returns its
    /// height.
    pub fn draw_row(
        &self,
        canvas: &mut Canvas,
        top: f32,
        cells: &[String],
        font: Font,
        fill: Option<Rgb>,
    ) -> f32 {
        let bottom = top - ROW_HEIGHT;
        if let Some(fill) = fill {
            canvas.fill_rect(self.x, bottom, self.width(), ROW_HEIGHT, fill);
        }

        let baseline = bottom + (ROW_HEIGHT - BODY_SIZE) / 2.0 + 1.0;
        for (index, ((x, w), cell)) in self.cells().zip(cells).enumerate() {
            let text = fit_text(cell, w - 2.0 * CELL_PADDING, BODY_SIZE, font);
            let text_x = if index == 0 {
                x + CELL_PADDING
            } else {
                x + (w - text_width(&text, BODY_SIZE, font)) / 2.0
            };
            canvas.text(text_x, baseline, font, BODY_SIZE, Rgb::BLACK, &text);
        }

        canvas.line(self.x, bottom, self.x + self.width(), bottom, Rgb::GREY, 0.5);
        ROW_HEIGHT
    }
}
