//! PDF rendering with lopdf
//!
//! Produces A4 pages with the standard Helvetica fonts. Those fonts only
//! cover Latin-1, so text is reduced to printable ASCII first.

use super::{ExportError, Table};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const FONT_SIZE: f32 = 10.0;
const TITLE_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 16.0;
/// Rough Helvetica advance width relative to the font size
const CHAR_WIDTH: f32 = 0.5;

/// Reduce text to what the standard fonts can show
fn sanitize(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            '€' => "EUR".chars().collect::<Vec<_>>(),
            c if c.is_ascii() && !c.is_ascii_control() => vec![c],
            c if c.is_whitespace() => vec![' '],
            _ => vec!['?'],
        })
        .collect()
}

/// Truncate to the number of characters that fit in `width` points
fn fit(text: &str, width: f32) -> String {
    let max = ((width / (FONT_SIZE * CHAR_WIDTH)) as usize).max(1);
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

/// Content operations of one page
struct PageBuilder {
    ops: Vec<Operation>,
}

impl PageBuilder {
    fn new() -> Self {
        Self { ops: Vec::new() }
    }

    fn text(&mut self, font: &str, size: f32, x: f32, y: f32, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.ops.push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops
            .push(Operation::new("Tj", vec![Object::string_literal(sanitize(text))]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn rule(&mut self, y: f32) {
        self.ops.push(Operation::new("w", vec![0.5f32.into()]));
        self.ops.push(Operation::new("m", vec![MARGIN.into(), y.into()]));
        self.ops
            .push(Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn finish(self) -> Content {
        Content { operations: self.ops }
    }
}

/// Lay the table out over as many pages as needed
fn layout(table: &Table) -> Vec<Content> {
    let columns = table.headers.len().max(1);
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let top = PAGE_HEIGHT - MARGIN;
    let bottom = MARGIN + LINE_HEIGHT;

    let mut pages = Vec::new();
    let mut page = PageBuilder::new();
    let mut y = top - TITLE_SIZE;

    page.text("F2", TITLE_SIZE, MARGIN, y, &table.title);
    y -= LINE_HEIGHT * 1.5;
    if let Some(subtitle) = &table.subtitle {
        page.text("F1", FONT_SIZE, MARGIN, y, subtitle);
        y -= LINE_HEIGHT;
    }

    let header_row = |page: &mut PageBuilder, y: f32| {
        for (col, header) in table.headers.iter().enumerate() {
            let x = MARGIN + col as f32 * column_width;
            page.text("F2", FONT_SIZE, x, y, &fit(header, column_width));
        }
        page.rule(y - 4.0);
    };

    y -= LINE_HEIGHT / 2.0;
    header_row(&mut page, y);
    y -= LINE_HEIGHT;

    for row in &table.rows {
        if y < bottom {
            pages.push(std::mem::replace(&mut page, PageBuilder::new()).finish());
            y = top - FONT_SIZE;
            header_row(&mut page, y);
            y -= LINE_HEIGHT;
        }
        for (col, cell) in row.iter().enumerate() {
            let x = MARGIN + col as f32 * column_width;
            page.text("F1", FONT_SIZE, x, y, &fit(&cell.display(&table.currency), column_width));
        }
        y -= LINE_HEIGHT;
    }

    if !table.summary.is_empty() {
        y -= LINE_HEIGHT / 2.0;
        for (label, value) in &table.summary {
            if y < bottom {
                pages.push(std::mem::replace(&mut page, PageBuilder::new()).finish());
                y = top - FONT_SIZE;
            }
            page.text("F2", FONT_SIZE, MARGIN, y, label);
            page.text(
                "F1",
                FONT_SIZE,
                MARGIN + column_width,
                y,
                &value.display(&table.currency),
            );
            y -= LINE_HEIGHT;
        }
    }

    pages.push(page.finish());
    pages
}

pub(super) fn render(table: &Table) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<ObjectId> = Vec::new();
    for content in layout(table) {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id);
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids.into_iter().map(Object::from).collect::<Vec<Object>>(),
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::Cell;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Total €"), "Total EUR");
        assert_eq!(sanitize("Μαρία"), "?????");
        assert_eq!(sanitize("tab\there"), "tab here");
    }

    #[test]
    fn test_fit_truncates() {
        let short = fit("abc", 100.0);
        assert_eq!(short, "abc");
        let long = fit(&"x".repeat(100), 50.0);
        assert_eq!(long.chars().count(), 10);
        assert!(long.ends_with('~'));
    }

    #[test]
    fn test_long_tables_span_pages() {
        let mut table = Table::new("Orders", &["#", "Customer"], "EUR");
        for n in 0..120u32 {
            table.push_row(vec![n.into(), Cell::text("Maria Papadopoulou")]);
        }
        let pages = layout(&table);
        assert!(pages.len() >= 3);

        let bytes = render(&table).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), pages.len());
    }
}
