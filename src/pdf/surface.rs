//! Cursor-based drawing surface the invoice layout is written against
//!
//! Coordinates are millimetres from the top-left corner of the page. The
//! cursor moves right after every cell and back to the left margin on
//! `newline`, like a line printer.

use super::metrics;
use crate::core::error::RenderError;

/// Horizontal text alignment inside a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Cell frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    None,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    pub const fn gray(level: u8) -> Rgb {
        Rgb(level, level, level)
    }
}

/// Primitive operations a page layout needs
pub trait DrawingSurface {
    /// Start a new page and move the cursor to the top-left margin
    fn add_page(&mut self);

    fn set_font(&mut self, style: FontStyle, size: f32);

    /// Current font size in points
    fn font_size(&self) -> f32;

    fn set_text_color(&mut self, color: Rgb);

    fn set_fill_color(&mut self, color: Rgb);

    fn set_draw_color(&mut self, color: Rgb);

    /// Draw one cell at the cursor and advance the cursor by `width`
    ///
    /// A `width` of 0 extends the cell to the right margin.
    fn draw_cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        border: Border,
        align: Align,
        filled: bool,
    );

    /// Move to the left margin, `height` below the current line
    fn newline(&mut self, height: f32);

    /// Wrap `text` to `width` and draw it line by line starting at the cursor
    ///
    /// Leaves the cursor at the left margin below the last line.
    fn multiline_text(&mut self, width: f32, line_height: f32, text: &str);

    fn position(&self) -> (f32, f32);

    fn set_position(&mut self, x: f32, y: f32);

    /// Split `text` into the lines `multiline_text` would draw
    fn split_text(&self, text: &str, width: f32) -> Vec<String> {
        metrics::wrap(text, width - 2.0 * metrics::CELL_MARGIN, self.font_size())
    }

    /// Finish the document and return its bytes
    fn output(self) -> Result<Vec<u8>, RenderError>
    where
        Self: Sized;
}
