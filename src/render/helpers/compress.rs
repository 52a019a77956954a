//! PDF compression helper
//!
//! printpdf writes its content streams uncompressed. lopdf re-reads the
//! document, deflates every stream and saves it again.

use std::io::Cursor;

/// Compress all streams of an in-memory PDF
pub fn compress_pdf(uncompressed: Vec<u8>) -> Result<Vec<u8>, String> {
    let mut doc = lopdf::Document::load_mem(&uncompressed)
        .map_err(|e| format!("Failed to parse PDF for compression: {}", e))?;

    doc.compress();

    let mut output = Cursor::new(Vec::new());
    doc.save_to(&mut output)
        .map_err(|e| format!("Failed to save compressed PDF: {}", e))?;

    Ok(output.into_inner())
}
