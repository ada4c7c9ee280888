use crate::document::Document;
use crate::parser::BOM;

/// Serializes a document. Untouched entries and headers are written exactly as they were read.
pub fn write_document(doc: &Document) -> String {
    let mut lines: Vec<String> = doc.preamble.clone();

    for section in doc.sections() {
        lines.push(section.header());
        for entry in section.entries() {
            lines.extend(entry.leading.iter().cloned());
            lines.push(entry.render());
        }
        lines.extend(section.trailer.iter().cloned());
    }

    let ending = doc.line_ending.as_str();
    let mut out = String::new();
    if doc.bom {
        out.push(BOM);
    }
    out.push_str(&lines.join(ending));
    if doc.final_newline && !lines.is_empty() {
        out.push_str(ending);
    }
    out
}
