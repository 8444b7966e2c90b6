//! Encodes laid out pages as a PDF document.

use lopdf::{
    Document, Object, Stream,
    content::{Content, Operation},
    dictionary,
};

use crate::{
    Error,
    export::{
        font::{BASE_FONT, FONT_RESOURCE_NAME, encode_text},
        layout::{FONT_SIZE, PAGE_HEIGHT, PAGE_WIDTH, PageLayout},
    },
};

/// Build a PDF with one page per entry in `pages` and return its bytes.
///
/// # Errors
/// Returns [Error::ExportFailed] if a line contains a character that cannot
/// be encoded in the standard Helvetica font, or if the document cannot be written.
pub fn encode_pdf(pages: &[PageLayout]) -> Result<Vec<u8>, Error> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => BASE_FONT,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE_NAME => font_id,
        },
    });

    let mut page_ids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content_id = document.add_object(Stream::new(dictionary! {}, page_content(page)?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    document
        .save_to(&mut bytes)
        .map_err(|error| Error::ExportFailed(format!("could not write PDF: {error}")))?;

    Ok(bytes)
}

/// The content stream that draws every line on `page`.
fn page_content(page: &PageLayout) -> Result<Vec<u8>, Error> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![FONT_RESOURCE_NAME.into(), FONT_SIZE.into()]),
    ];

    for line in &page.lines {
        let text = encode_text(&line.text).map_err(|character| {
            Error::ExportFailed(format!(
                "character {character:?} in {:?} cannot be encoded in the PDF font",
                line.text
            ))
        })?;

        // PDF coordinates start at the bottom-left corner of the page.
        operations.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                line.x.into(),
                (PAGE_HEIGHT - line.baseline).into(),
            ],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    }

    operations.push(Operation::new("ET", vec![]));

    Content { operations }
        .encode()
        .map_err(|error| Error::ExportFailed(format!("could not encode page content: {error}")))
}
