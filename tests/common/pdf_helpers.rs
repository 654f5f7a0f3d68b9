//! PDF inspection helpers.

use anyhow::Result;
use lopdf::content::Content;
use lopdf::{Document, Object};

/// Loads a PDF from memory.
pub fn load_pdf(bytes: &[u8]) -> Result<Document> {
    Document::load_mem(bytes).map_err(|e| anyhow::anyhow!("Failed to load PDF: {}", e))
}

fn push_string(obj: &Object, out: &mut String) {
    match obj {
        Object::String(bytes, _) => out.push_str(&String::from_utf8_lossy(bytes)),
        Object::Array(items) => items.iter().for_each(|item| push_string(item, out)),
        _ => {}
    }
}

/// Every string drawn with `Tj`/`TJ`, one entry per operation, in page order.
pub fn text_runs(bytes: &[u8]) -> Result<Vec<String>> {
    let doc = load_pdf(bytes)?;
    let mut runs = Vec::new();

    for page_id in doc.get_pages().values() {
        let content = Content::decode(&doc.get_page_content(*page_id)?)?;
        for op in content.operations {
            if op.operator == "Tj" || op.operator == "TJ" {
                let mut run = String::new();
                op.operands.iter().for_each(|o| push_string(o, &mut run));
                runs.push(run);
            }
        }
    }

    Ok(runs)
}

/// Number of pages in a PDF.
pub fn page_count(bytes: &[u8]) -> Result<usize> {
    Ok(load_pdf(bytes)?.get_pages().len())
}

/// Number of image XObjects embedded in a PDF.
pub fn image_count(bytes: &[u8]) -> Result<usize> {
    let doc = load_pdf(bytes)?;
    Ok(doc
        .objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            stream
                .dict
                .get(b"Subtype")
                .and_then(|s| s.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
        .count())
}

/// Validates that bytes are a loadable PDF.
pub fn is_valid_pdf(bytes: &[u8]) -> bool {
    load_pdf(bytes).is_ok()
}
