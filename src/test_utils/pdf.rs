use lopdf::{Document, Object, content::Content};

/// Decode the text shown by every `Tj` operator in the PDF, page by page.
///
/// Strings are decoded as Latin-1, matching how the export encodes them.
#[track_caller]
pub(crate) fn pdf_text_lines(bytes: &[u8]) -> Vec<String> {
    let document = Document::load_mem(bytes).expect("Could not parse PDF");
    let mut lines = Vec::new();

    for page_id in document.get_pages().into_values() {
        let content = document
            .get_page_content(page_id)
            .expect("Could not read page content");
        let content = Content::decode(&content).expect("Could not decode page content");

        for operation in content.operations {
            if operation.operator != "Tj" {
                continue;
            }

            if let Some(Object::String(text, _)) = operation.operands.first() {
                lines.push(text.iter().map(|&byte| char::from(byte)).collect());
            }
        }
    }

    lines
}
