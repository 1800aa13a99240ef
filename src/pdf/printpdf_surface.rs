//! `DrawingSurface` backed by printpdf and the built-in Helvetica faces

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex,
    PdfLayerReference, PdfPageIndex, Rect,
};
use std::io::BufWriter;

use super::metrics::{self, CELL_MARGIN};
use super::surface::{Align, Border, DrawingSurface, FontStyle, Rgb};
use crate::core::error::RenderError;

/// A4 portrait, in mm
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

/// Page margin on every side, in mm
pub const MARGIN: f32 = 20.0;

/// Line width for cell borders, in points
const LINE_WIDTH: f32 = 0.28;

const LAYER: &str = "Layer 1";

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Single-document PDF surface
pub struct PdfSurface {
    doc: PdfDocumentReference,
    unused_first_page: Option<(PdfPageIndex, PdfLayerIndex)>,
    layer: Option<PdfLayerReference>,
    fonts: Fonts,
    style: FontStyle,
    size: f32,
    text_color: Rgb,
    fill_color: Rgb,
    draw_color: Rgb,
    x: f32,
    y: f32,
}

impl PdfSurface {
    /// Create an empty document; the first `add_page` reuses its initial page
    pub fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER);

        let font = |f: BuiltinFont| {
            doc.add_builtin_font(f)
                .map_err(|e| RenderError::Pdf(e.to_string()))
        };
        let fonts = Fonts {
            regular: font(BuiltinFont::Helvetica)?,
            bold: font(BuiltinFont::HelveticaBold)?,
            italic: font(BuiltinFont::HelveticaOblique)?,
        };

        Ok(Self {
            doc,
            unused_first_page: Some((page, layer)),
            layer: None,
            fonts,
            style: FontStyle::Regular,
            size: 10.0,
            text_color: Rgb::BLACK,
            fill_color: Rgb::WHITE,
            draw_color: Rgb::BLACK,
            x: MARGIN,
            y: MARGIN,
        })
    }

    fn font(&self) -> &IndirectFontRef {
        match self.style {
            FontStyle::Regular => &self.fonts.regular,
            FontStyle::Bold => &self.fonts.bold,
            FontStyle::Italic => &self.fonts.italic,
        }
    }

    /// Convert a top-based y coordinate to PDF user space
    fn flip(y: f32) -> Mm {
        Mm(PAGE_HEIGHT - y)
    }

    fn color(rgb: Rgb) -> Color {
        Color::Rgb(printpdf::Rgb::new(
            rgb.0 as f32 / 255.0,
            rgb.1 as f32 / 255.0,
            rgb.2 as f32 / 255.0,
            None,
        ))
    }

    fn paint_rect(&self, layer: &PdfLayerReference, w: f32, h: f32, border: Border, filled: bool) {
        let mode = match (border, filled) {
            (Border::All, true) => PaintMode::FillStroke,
            (Border::All, false) => PaintMode::Stroke,
            (Border::None, true) => PaintMode::Fill,
            (Border::None, false) => return,
        };

        layer.set_fill_color(Self::color(self.fill_color));
        layer.set_outline_color(Self::color(self.draw_color));
        layer.set_outline_thickness(LINE_WIDTH);
        layer.add_rect(
            Rect::new(
                Mm(self.x),
                Self::flip(self.y + h),
                Mm(self.x + w),
                Self::flip(self.y),
            )
            .with_mode(mode),
        );
    }
}

impl DrawingSurface for PdfSurface {
    fn add_page(&mut self) {
        let (page, layer) = match self.unused_first_page.take() {
            Some(first) => first,
            None => self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER),
        };
        self.layer = Some(self.doc.get_page(page).get_layer(layer));
        self.x = MARGIN;
        self.y = MARGIN;
    }

    fn set_font(&mut self, style: FontStyle, size: f32) {
        self.style = style;
        self.size = size;
    }

    fn font_size(&self) -> f32 {
        self.size
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill_color = color;
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    fn draw_cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        border: Border,
        align: Align,
        filled: bool,
    ) {
        let width = if width == 0.0 {
            PAGE_WIDTH - MARGIN - self.x
        } else {
            width
        };

        // Nothing is drawn before the first page
        if let Some(layer) = self.layer.clone() {
            self.paint_rect(&layer, width, height, border, filled);

            if !text.is_empty() {
                let text_width = metrics::text_width(text, self.size);
                let dx = match align {
                    Align::Left => CELL_MARGIN,
                    Align::Center => (width - text_width) / 2.0,
                    Align::Right => width - CELL_MARGIN - text_width,
                };
                let baseline = self.y + height / 2.0 + 0.3 * metrics::pt_to_mm(self.size);

                layer.set_fill_color(Self::color(self.text_color));
                layer.use_text(
                    text,
                    self.size,
                    Mm(self.x + dx),
                    Self::flip(baseline),
                    self.font(),
                );
            }
        }

        self.x += width;
    }

    fn newline(&mut self, height: f32) {
        self.x = MARGIN;
        self.y += height;
    }

    fn multiline_text(&mut self, width: f32, line_height: f32, text: &str) {
        let left = self.x;
        let width = if width == 0.0 {
            PAGE_WIDTH - MARGIN - left
        } else {
            width
        };

        for line in self.split_text(text, width) {
            self.x = left;
            self.draw_cell(width, line_height, &line, Border::None, Align::Left, false);
            self.y += line_height;
        }
        self.x = MARGIN;
    }

    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    fn output(self) -> Result<Vec<u8>, RenderError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}
