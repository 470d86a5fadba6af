//! Invoice Renderer
//!
//! Pure function from `(Order, Shop)` to a PDF byte stream. Deterministic
//! layout: shop header, invoice metadata, ruled line-item table, grand
//! total. Inputs are never mutated; all drawing happens in memory so there
//! is no temp-file artifact to clean up.

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use thiserror::Error;

use crate::models::{Order, Shop};

/// Invoice rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

// A4 geometry, millimetres
const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN_LEFT: f64 = 18.0;
const MARGIN_RIGHT: f64 = 192.0;
const PAGE_BREAK_AT: f64 = 272.0;

// Table column x positions
const COL_ITEM: f64 = MARGIN_LEFT;
const COL_QTY: f64 = 100.0;
const COL_PRICE: f64 = 130.0;
const COL_TOTAL: f64 = 165.0;

const CURRENCY_PREFIX: &str = "Rs.";

/// Fixed-prefix currency formatting, always 2 decimal places
fn format_currency(amount: f64) -> String {
    format!("{CURRENCY_PREFIX} {amount:.2}")
}

/// PDF y-axis grows upward; the layout thinks in distance-from-top
fn y(from_top: f64) -> Mm {
    Mm(PAGE_HEIGHT - from_top)
}

/// Cursor over pages, breaking to a fresh page when the current one fills up
struct PageCursor {
    layer: PdfLayerReference,
    from_top: f64,
}

impl PageCursor {
    fn advance(&mut self, doc: &PdfDocumentReference, step: f64) {
        self.from_top += step;
        if self.from_top > PAGE_BREAK_AT {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = doc.get_page(page).get_layer(layer);
            self.from_top = 25.0;
        }
    }

    fn text(&self, text: &str, size: f64, x: f64, font: &IndirectFontRef) {
        self.layer.use_text(text, size, Mm(x), y(self.from_top), font);
    }

    fn rule(&self, x1: f64, x2: f64, offset: f64) {
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), y(self.from_top + offset)), false),
                (Point::new(Mm(x2), y(self.from_top + offset)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        };
        self.layer.set_outline_thickness(0.5);
        self.layer.add_shape(line);
    }
}

/// Render an invoice document for a committed order.
///
/// Must not mutate its inputs; any failure is a [`RenderError`] and the
/// caller rolls the surrounding transaction back.
pub fn render_invoice(order: &Order, shop: &Shop) -> Result<Vec<u8>, RenderError> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Invoice {}", order.id),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    let mut cursor = PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        from_top: 25.0,
    };

    // Shop header
    cursor.text(&shop.name, 20.0, 80.0, &bold);
    cursor.advance(&doc, 8.0);
    if let Some(address) = &shop.address {
        cursor.text(address, 10.0, 80.0, &font);
        cursor.advance(&doc, 6.0);
    }
    cursor.advance(&doc, 10.0);

    // Invoice metadata
    cursor.text("INVOICE", 16.0, MARGIN_LEFT, &bold);
    cursor.advance(&doc, 8.0);

    let date = chrono::DateTime::from_timestamp_millis(order.created_at)
        .map(|d| d.format("%d/%m/%Y, %H:%M:%S").to_string())
        .unwrap_or_default();
    cursor.text(&format!("Invoice #: {}", order.id), 11.0, MARGIN_LEFT, &font);
    cursor.text(&format!("Date: {date}"), 11.0, COL_PRICE, &font);
    cursor.advance(&doc, 6.0);
    cursor.text(
        &format!("Customer: {}", order.customer_name),
        11.0,
        MARGIN_LEFT,
        &font,
    );
    cursor.text(
        &format!("Billed by: {}", order.biller_name),
        11.0,
        COL_PRICE,
        &font,
    );
    cursor.advance(&doc, 14.0);

    // Table header
    cursor.text("Item", 10.0, COL_ITEM, &bold);
    cursor.text("Quantity", 10.0, COL_QTY, &bold);
    cursor.text("Unit Price", 10.0, COL_PRICE, &bold);
    cursor.text("Total", 10.0, COL_TOTAL, &bold);
    cursor.rule(MARGIN_LEFT, MARGIN_RIGHT, 2.0);
    cursor.advance(&doc, 8.0);

    // Line items
    for item in &order.items {
        cursor.text(&item.name, 10.0, COL_ITEM, &font);
        cursor.text(&item.quantity.to_string(), 10.0, COL_QTY, &font);
        cursor.text(&format_currency(item.price), 10.0, COL_PRICE, &font);
        cursor.text(
            &format_currency(item.price * item.quantity as f64),
            10.0,
            COL_TOTAL,
            &font,
        );
        cursor.advance(&doc, 7.0);
    }
    cursor.rule(MARGIN_LEFT, MARGIN_RIGHT, -3.0);
    cursor.advance(&doc, 8.0);

    // Grand total
    cursor.text(
        &format!("Grand Total: {}", format_currency(order.total)),
        14.0,
        COL_PRICE,
        &bold,
    );

    // Saving consumes the document; release layer handles first
    drop(cursor);

    let mut bytes = Vec::new();
    {
        let mut writer = std::io::BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;
    use crate::util::now_millis;

    fn shop() -> Shop {
        Shop {
            id: 1,
            name: "Corner Mart".into(),
            address: Some("12 MG Road".into()),
            created_at: now_millis(),
        }
    }

    fn order(lines: usize) -> Order {
        Order {
            id: 99,
            shop_id: 1,
            customer_name: "Walk-in Customer".into(),
            biller_name: "Asha".into(),
            total: 250.0,
            total_profit: 80.0,
            created_at: 1_750_000_000_000,
            items: (0..lines)
                .map(|i| OrderItem {
                    product_id: i as i64 + 1,
                    name: format!("Item {i}"),
                    quantity: 2,
                    price: 12.5,
                    cost: 8.0,
                })
                .collect(),
        }
    }

    #[test]
    fn renders_a_pdf() {
        let bytes = render_invoice(&order(3), &shop()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn long_orders_paginate() {
        // 80 lines cannot fit on one A4 page; rendering must still succeed
        let bytes = render_invoice(&order(80), &shop()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        // A second page makes the document strictly larger
        assert!(bytes.len() > render_invoice(&order(3), &shop()).unwrap().len());
    }

    #[test]
    fn currency_is_two_decimal_fixed_prefix() {
        assert_eq!(format_currency(0.0), "Rs. 0.00");
        assert_eq!(format_currency(12.5), "Rs. 12.50");
        assert_eq!(format_currency(1234.567), "Rs. 1234.57");
    }
}
