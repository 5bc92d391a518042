//! Font enumeration across all pages

use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;

/// Guard against cyclic `Parent` links in broken page trees
const MAX_TREE_DEPTH: usize = 32;

/// Collect the `BaseFont` name of every font referenced from any page's
/// resources. Broken or missing entries are skipped.
pub fn document_fonts(doc: &Document) -> BTreeSet<String> {
    let mut fonts = BTreeSet::new();

    for page_id in doc.get_pages().values() {
        let Some(font_dict) = page_font_dict(doc, *page_id) else {
            continue;
        };

        for (_, font_ref) in font_dict.iter() {
            let Some(font) = resolve(doc, font_ref).and_then(|o| o.as_dict().ok()) else {
                continue;
            };
            if let Some(name) = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_name().ok())
            {
                fonts.insert(String::from_utf8_lossy(name).into_owned());
            }
        }
    }

    fonts
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// The page's `/Resources /Font` dictionary, inherited from ancestors of the
/// page tree when the page itself has none
fn page_font_dict(doc: &Document, page_id: ObjectId) -> Option<&Dictionary> {
    let mut node = doc.get_object(page_id).ok()?.as_dict().ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Some(resources) = node
            .get(b"Resources")
            .ok()
            .and_then(|o| resolve(doc, o))
            .and_then(|o| o.as_dict().ok())
        {
            return resources
                .get(b"Font")
                .ok()
                .and_then(|o| resolve(doc, o))
                .and_then(|o| o.as_dict().ok());
        }

        let parent_id = node.get(b"Parent").ok()?.as_reference().ok()?;
        node = doc.get_object(parent_id).ok()?.as_dict().ok()?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    fn doc_with_fonts(inherit: bool) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let helvetica = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "ABCDEF+SegoeUI-Bold",
        });
        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => helvetica,
                "F2" => bold,
            },
        };

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        let mut pages = dictionary! {
            "Type" => "Pages",
            "Count" => 1,
        };
        if inherit {
            pages.set("Resources", resources);
        } else {
            page.set("Resources", resources);
        }

        let page_id = doc.add_object(page);
        pages.set("Kids", vec![Object::Reference(page_id)]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    #[test]
    fn test_collects_base_font_names() {
        let fonts = document_fonts(&doc_with_fonts(false));
        let names: Vec<_> = fonts.into_iter().collect();
        assert_eq!(names, vec!["ABCDEF+SegoeUI-Bold", "Helvetica"]);
    }

    #[test]
    fn test_inherits_resources_from_page_tree() {
        let fonts = document_fonts(&doc_with_fonts(true));
        assert!(fonts.contains("Helvetica"));
    }

    #[test]
    fn test_empty_document_has_no_fonts() {
        assert!(document_fonts(&Document::with_version("1.5")).is_empty());
    }
}
