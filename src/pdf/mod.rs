//! Invoice PDF rendering
//!
//! The layout in [`layout`] is written against the [`DrawingSurface`] trait;
//! [`PdfSurface`] is the printpdf-backed implementation used in production.

pub mod layout;
pub mod metrics;
pub mod printpdf_surface;
pub mod surface;

pub use printpdf_surface::PdfSurface;
pub use surface::{Align, Border, DrawingSurface, FontStyle, Rgb};

use crate::core::error::RenderError;
use crate::core::model::{CompanyInfo, Invoice};

/// Render `invoice` as a single-page A4 PDF with `company` in the header
pub fn render_invoice(invoice: &Invoice, company: &CompanyInfo) -> Result<Vec<u8>, RenderError> {
    let mut surface = PdfSurface::new(&format!("Invoice {}", invoice.invoice_num))?;
    layout::draw_invoice(&mut surface, invoice, company);
    let bytes = surface.output()?;

    tracing::debug!(
        invoice = %invoice.invoice_num,
        bytes = bytes.len(),
        "rendered invoice PDF"
    );
    Ok(bytes)
}
