//! Fixed one-page invoice layout
//!
//! Sections are drawn top to bottom: header, invoice/client columns, items
//! table, totals, optional notes, footer. There is no pagination; an invoice
//! with more rows than fit on A4 runs off the bottom of the page.

use super::surface::{Align, Border, DrawingSurface, FontStyle, Rgb};
use crate::core::model::{CompanyInfo, Invoice, InvoiceItem};

const BRAND: Rgb = Rgb(102, 126, 234);
const HEADING: Rgb = Rgb(51, 51, 51);
const MUTED: Rgb = Rgb(102, 102, 102);
const FOOTER: Rgb = Rgb(128, 128, 128);
const RULE: Rgb = Rgb::gray(200);

/// Column widths of the items table, in mm
pub const COLUMNS: [(&str, f32, Align); 5] = [
    ("Description", 70.0, Align::Left),
    ("Qty", 15.0, Align::Center),
    ("Rate", 25.0, Align::Center),
    ("% Total", 20.0, Align::Center),
    ("Amount", 30.0, Align::Right),
];

const TOTAL_LABEL_WIDTH: f32 = 130.0;
const TOTAL_VALUE_WIDTH: f32 = 30.0;
const NOTES_WIDTH: f32 = 170.0;
const NOTES_PADDING: f32 = 3.0;
const NOTES_LINE: f32 = 5.0;

pub const THANK_YOU: &str = "Thank you for your business!";
pub const PAYMENT_TERMS: &str = "Payment is due within 30 days of invoice date.";

/// `$` followed by two decimals
pub fn money(value: f64) -> String {
    format!("${:.2}", value)
}

/// One decimal followed by `%`
pub fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Draw the whole invoice on a fresh page
pub fn draw_invoice<S: DrawingSurface>(surface: &mut S, invoice: &Invoice, company: &CompanyInfo) {
    surface.add_page();
    header(surface, company);
    details(surface, invoice);
    items_table(surface, &invoice.items);
    totals(surface, invoice);
    if !invoice.notes.is_empty() {
        notes(surface, &invoice.notes);
    }
    footer(surface);
}

fn header<S: DrawingSurface>(s: &mut S, company: &CompanyInfo) {
    s.set_font(FontStyle::Bold, 24.0);
    s.set_text_color(HEADING);
    s.draw_cell(0.0, 12.0, &company.name, Border::None, Align::Left, false);
    s.newline(15.0);

    s.set_font(FontStyle::Regular, 10.0);
    s.set_text_color(MUTED);
    if !company.address.is_empty() {
        s.draw_cell(0.0, 5.0, &company.address, Border::None, Align::Left, false);
        s.newline(4.0);
    }

    let contact: Vec<String> = [
        ("Phone", &company.phone),
        ("Email", &company.email),
        ("Web", &company.website),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{}: {}", label, value))
    .collect();
    if !contact.is_empty() {
        s.draw_cell(0.0, 5.0, &contact.join(" | "), Border::None, Align::Left, false);
    }
    s.newline(15.0);

    s.set_fill_color(BRAND);
    s.set_text_color(Rgb::WHITE);
    s.set_font(FontStyle::Bold, 20.0);
    s.draw_cell(0.0, 12.0, "INVOICE", Border::None, Align::Center, true);
    s.newline(12.0);
    s.newline(10.0);

    s.set_text_color(Rgb::BLACK);
}

fn details<S: DrawingSurface>(s: &mut S, invoice: &Invoice) {
    let client = &invoice.client;

    s.set_font(FontStyle::Bold, 11.0);
    s.draw_cell(95.0, 6.0, "Invoice Details", Border::None, Align::Left, false);
    s.draw_cell(95.0, 6.0, "Bill To", Border::None, Align::Left, false);
    s.newline(8.0);

    s.set_font(FontStyle::Regular, 10.0);
    s.draw_cell(25.0, 5.0, "Invoice #:", Border::None, Align::Left, false);
    s.set_font(FontStyle::Bold, 10.0);
    s.draw_cell(70.0, 5.0, &invoice.invoice_num, Border::None, Align::Left, false);
    s.set_font(FontStyle::Bold, 11.0);
    s.draw_cell(95.0, 5.0, &client.name, Border::None, Align::Left, false);
    s.newline(5.0);

    s.set_font(FontStyle::Regular, 10.0);
    s.draw_cell(25.0, 5.0, "Date:", Border::None, Align::Left, false);
    s.draw_cell(70.0, 5.0, &invoice.date, Border::None, Align::Left, false);
    s.draw_cell(95.0, 5.0, &client.email, Border::None, Align::Left, false);
    s.newline(5.0);

    s.draw_cell(25.0, 5.0, "Due Date:", Border::None, Align::Left, false);
    s.draw_cell(70.0, 5.0, &invoice.due_date, Border::None, Align::Left, false);
    s.draw_cell(95.0, 5.0, &client.address, Border::None, Align::Left, false);
    s.newline(5.0);

    s.draw_cell(95.0, 5.0, "", Border::None, Align::Left, false);
    s.draw_cell(95.0, 5.0, &client.phone, Border::None, Align::Left, false);
    s.newline(20.0);
}

fn items_table<S: DrawingSurface>(s: &mut S, items: &[InvoiceItem]) {
    s.set_fill_color(Rgb::gray(240));
    s.set_text_color(Rgb::BLACK);
    s.set_draw_color(RULE);
    s.set_font(FontStyle::Bold, 10.0);
    for (title, width, align) in COLUMNS {
        s.draw_cell(width, 8.0, title, Border::All, align, true);
    }
    s.newline(8.0);

    s.set_font(FontStyle::Regular, 9.0);
    for (row, item) in items.iter().enumerate() {
        s.set_fill_color(if row % 2 == 0 {
            Rgb::gray(250)
        } else {
            Rgb::WHITE
        });

        let cells = [
            item.description.clone(),
            item.quantity.to_string(),
            money(item.rate),
            percent(item.percentage),
            money(item.amount),
        ];
        for ((_, width, align), text) in COLUMNS.iter().zip(cells.iter()) {
            s.draw_cell(*width, 7.0, text, Border::All, *align, true);
        }
        s.newline(7.0);
    }
    s.newline(15.0);
}

fn totals<S: DrawingSurface>(s: &mut S, invoice: &Invoice) {
    s.set_draw_color(RULE);
    s.set_font(FontStyle::Regular, 10.0);

    for (label, value) in [("Subtotal:", invoice.subtotal), ("Tax:", invoice.tax)] {
        s.draw_cell(TOTAL_LABEL_WIDTH, 7.0, label, Border::All, Align::Right, false);
        s.draw_cell(TOTAL_VALUE_WIDTH, 7.0, &money(value), Border::All, Align::Right, false);
        s.newline(7.0);
    }

    s.set_fill_color(BRAND);
    s.set_text_color(Rgb::WHITE);
    s.set_font(FontStyle::Bold, 12.0);
    s.draw_cell(TOTAL_LABEL_WIDTH, 9.0, "TOTAL:", Border::All, Align::Right, true);
    s.draw_cell(TOTAL_VALUE_WIDTH, 9.0, &money(invoice.total), Border::All, Align::Right, true);
    s.newline(9.0);

    s.set_text_color(Rgb::BLACK);
}

fn notes<S: DrawingSurface>(s: &mut S, text: &str) {
    s.newline(11.0);
    s.set_font(FontStyle::Bold, 11.0);
    s.set_text_color(HEADING);
    s.draw_cell(40.0, 8.0, "Notes:", Border::None, Align::Left, false);
    s.newline(8.0);

    s.set_draw_color(Rgb::gray(220));
    s.set_fill_color(Rgb::gray(248));
    s.set_font(FontStyle::Regular, 10.0);
    s.set_text_color(Rgb::BLACK);

    let inner = NOTES_WIDTH - 2.0 * NOTES_PADDING;
    let lines = s.split_text(text, inner).len();
    let height = lines as f32 * NOTES_LINE + 2.0 * NOTES_PADDING;

    let (x, y) = s.position();
    s.draw_cell(NOTES_WIDTH, height, "", Border::All, Align::Left, true);
    s.set_position(x + NOTES_PADDING, y + NOTES_PADDING);
    s.multiline_text(inner, NOTES_LINE, text);
    s.set_position(x, y + height);
}

fn footer<S: DrawingSurface>(s: &mut S) {
    s.newline(20.0);
    s.set_font(FontStyle::Italic, 8.0);
    s.set_text_color(FOOTER);
    s.draw_cell(0.0, 5.0, THANK_YOU, Border::None, Align::Left, false);
    s.newline(3.0);
    s.draw_cell(0.0, 5.0, PAYMENT_TERMS, Border::None, Align::Left, false);
}
