//! Output document assembly.
//!
//! Builds one output PDF per report group: synthesized cover page(s)
//! rendering the group's raw report lines, followed by verbatim copies of
//! the source document's trailing pages. Copying is structural — page
//! objects and everything they reference are imported into the output
//! document with remapped object ids, never re-rendered.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::error::DocumentError;
use super::SourceDocument;

/// US Letter page geometry, in points.
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;

const LEFT_MARGIN: f32 = 36.0;
const BOTTOM_MARGIN: f32 = 48.0;

/// Baseline of the cover page title.
const TITLE_BASELINE: f32 = 742.0;
const TITLE_FONT_SIZE: i64 = 20;

/// First body baseline on a page carrying the title, and on continuation
/// pages (which have no title).
const BODY_START_FIRST: f32 = 706.0;
const BODY_START_CONTINUATION: f32 = 742.0;
const BODY_FONT_SIZE: i64 = 8;
const LINE_PITCH: f32 = 12.0;

/// Composes per-group output documents from a shared source document.
///
/// A composer only reads the source; one instance can compose every group's
/// document, in any order.
#[derive(Debug)]
pub struct DocumentComposer<'a> {
    source: &'a SourceDocument,
}

impl<'a> DocumentComposer<'a> {
    #[must_use]
    pub fn new(source: &'a SourceDocument) -> Self {
        Self { source }
    }

    /// Builds the output PDF for one group and serializes it to bytes.
    ///
    /// The document consists of synthesized cover page(s) listing `lines`
    /// under a `LO {code}` heading, followed by verbatim copies of source
    /// pages 2..N in order. A single-page source yields cover pages only.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::PageCopyError`] if a source page cannot be
    /// copied and [`DocumentError::CompositionError`] if the output cannot
    /// be encoded. Either failure aborts the whole request upstream; partial
    /// archives are never produced.
    pub fn compose(&self, code: &str, lines: &[String]) -> Result<Vec<u8>, DocumentError> {
        let mut dest = Document::with_version("1.5");
        let pages_id = dest.new_object_id();

        let title_font_id = dest.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let body_font_id = dest.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = dest.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => title_font_id,
                "F2" => body_font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();

        for content in cover_page_contents(code, lines) {
            let encoded = content
                .encode()
                .map_err(|e| DocumentError::CompositionError {
                    message: format!("failed to encode cover page content: {e}"),
                })?;
            let content_id = dest.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = dest.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => letter_media_box(),
                "Resources" => resources_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        // One id map for all copied pages, so resources shared between
        // source pages are imported once.
        let mut id_map: BTreeMap<ObjectId, ObjectId> = BTreeMap::new();
        let source_pages = self.source.inner().get_pages();

        for (&page_number, &src_page_id) in source_pages.iter() {
            if page_number < 2 {
                continue;
            }
            let copied =
                self.import_page(&mut dest, page_number, src_page_id, pages_id, &mut id_map)?;
            kids.push(copied.into());
        }

        let count = kids.len() as i64;
        dest.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = dest.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        dest.trailer.set("Root", catalog_id);
        dest.compress();

        let mut buffer = Vec::new();
        dest.save_to(&mut buffer)
            .map_err(|e| DocumentError::CompositionError {
                message: format!("failed to serialize output document: {e}"),
            })?;

        Ok(buffer)
    }

    /// Imports one source page into `dest`, preserving its visual content.
    ///
    /// The page dictionary is detached from the source page tree before the
    /// import: `Parent` and `StructParents` are dropped, and the inheritable
    /// attributes (`Resources`, `MediaBox`, `CropBox`, `Rotate`) that a page
    /// may inherit from its ancestors are resolved and pinned directly onto
    /// the copy. Annotations are dropped as well; they reference the source
    /// page tree and have no meaning in the split output.
    fn import_page(
        &self,
        dest: &mut Document,
        page_number: u32,
        src_page_id: ObjectId,
        dest_parent: ObjectId,
        id_map: &mut BTreeMap<ObjectId, ObjectId>,
    ) -> Result<ObjectId, DocumentError> {
        let src = self.source.inner();

        let mut page_dict = src
            .get_dictionary(src_page_id)
            .map_err(|source| DocumentError::PageCopyError {
                page_number,
                source,
            })?
            .clone();

        page_dict.remove(b"Parent");
        page_dict.remove(b"StructParents");
        page_dict.remove(b"Annots");

        for key in [
            b"Resources".as_slice(),
            b"MediaBox".as_slice(),
            b"CropBox".as_slice(),
            b"Rotate".as_slice(),
        ] {
            if !page_dict.has(key) {
                if let Some(value) = inherited_attribute(src, src_page_id, key) {
                    page_dict.set(key.to_vec(), value.clone());
                }
            }
        }
        if !page_dict.has(b"MediaBox") {
            page_dict.set("MediaBox", letter_media_box());
        }

        let mut imported = import_dictionary(src, &page_dict, dest, id_map).map_err(|source| {
            DocumentError::PageCopyError {
                page_number,
                source,
            }
        })?;
        imported.set("Parent", Object::Reference(dest_parent));

        Ok(dest.add_object(Object::Dictionary(imported)))
    }
}

/// Lays the raw report lines out as one or more cover page content streams.
///
/// Lines advance down the page at a fixed pitch; when the next baseline
/// would cross the bottom margin a new page is started, so no line is ever
/// truncated. Only the first page carries the `LO {code}` title.
fn cover_page_contents(code: &str, lines: &[String]) -> Vec<Content> {
    let mut pages = Vec::new();

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), TITLE_FONT_SIZE.into()]),
        Operation::new("Td", vec![LEFT_MARGIN.into(), TITLE_BASELINE.into()]),
        Operation::new("Tj", vec![Object::string_literal(format!("LO {code}"))]),
        Operation::new("ET", vec![]),
    ];
    let mut y = BODY_START_FIRST;

    for line in lines {
        if y < BOTTOM_MARGIN {
            pages.push(Content {
                operations: std::mem::take(&mut operations),
            });
            y = BODY_START_CONTINUATION;
        }

        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F2".into(), BODY_FONT_SIZE.into()]),
            Operation::new("Td", vec![LEFT_MARGIN.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(line.as_str())]),
            Operation::new("ET", vec![]),
        ]);
        y -= LINE_PITCH;
    }

    pages.push(Content { operations });
    pages
}

fn letter_media_box() -> Object {
    Object::Array(vec![
        0.into(),
        0.into(),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ])
}

/// Resolves an inheritable page attribute by walking up the source page
/// tree.
fn inherited_attribute<'d>(doc: &'d Document, page_id: ObjectId, key: &[u8]) -> Option<&'d Object> {
    let mut current = page_id;
    loop {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        match dict.get(b"Parent") {
            Ok(Object::Reference(parent)) => current = *parent,
            _ => return None,
        }
    }
}

/// Deep-copies an object graph from `src` into `dest`.
///
/// References are remapped through `id_map`; a referenced object is
/// imported the first time it is seen and reused afterwards. Cycles are
/// tolerated by reserving the destination id before descending. A dangling
/// reference in the source becomes a reference to `null`.
fn import_object(
    src: &Document,
    obj: &Object,
    dest: &mut Document,
    id_map: &mut BTreeMap<ObjectId, ObjectId>,
) -> Result<Object, lopdf::Error> {
    match obj {
        Object::Reference(id) => {
            if let Some(&mapped) = id_map.get(id) {
                return Ok(Object::Reference(mapped));
            }

            let new_id = dest.new_object_id();
            id_map.insert(*id, new_id);
            dest.objects.insert(new_id, Object::Null);

            let imported = match src.get_object(*id) {
                Ok(target) => import_object(src, target, dest, id_map)?,
                Err(_) => Object::Null,
            };
            dest.objects.insert(new_id, imported);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(import_dictionary(
            src, dict, dest, id_map,
        )?)),
        Object::Array(items) => {
            let mut imported = Vec::with_capacity(items.len());
            for item in items {
                imported.push(import_object(src, item, dest, id_map)?);
            }
            Ok(Object::Array(imported))
        }
        Object::Stream(stream) => {
            let dict = import_dictionary(src, &stream.dict, dest, id_map)?;
            Ok(Object::Stream(Stream::new(dict, stream.content.clone())))
        }
        other => Ok(other.clone()),
    }
}

fn import_dictionary(
    src: &Document,
    dict: &Dictionary,
    dest: &mut Document,
    id_map: &mut BTreeMap<ObjectId, ObjectId>,
) -> Result<Dictionary, lopdf::Error> {
    let mut imported = Dictionary::new();
    for (key, value) in dict.iter() {
        imported.set(key.to_vec(), import_object(src, value, dest, id_map)?);
    }
    Ok(imported)
}
