//! PDF encoding of a laid-out [`Document`].

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::ExportError;
use crate::document::{Document, PAGE_HEIGHT, PAGE_WIDTH};

/// Encode a document into PDF bytes.
///
/// Layout y coordinates are measured from the top of the page; PDF measures
/// from the bottom, hence the flip.
pub fn render_pdf(document: &Document) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        &document.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (index, page) in document.pages.iter().enumerate() {
        if index > 0 {
            let (page_idx, layer_idx) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page_idx).get_layer(layer_idx);
        }
        for text in &page.texts {
            layer.use_text(
                text.text.clone(),
                text.size,
                Mm(text.x),
                Mm(PAGE_HEIGHT - text.y),
                &font,
            );
        }
    }

    let mut bytes = Vec::new();
    doc.save(&mut BufWriter::new(&mut bytes))?;
    Ok(bytes)
}
