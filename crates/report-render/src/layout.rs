//! Page geometry, pagination and document assembly

use crate::canvas::{Canvas, Rgb};
use crate::encoding::{text_width, Font};
use crate::error::RenderError;
use crate::logo::{LogoImage, LOGO_RESOURCE};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// Landscape US Letter
pub const PAGE_WIDTH: f32 = 792.0;
pub const PAGE_HEIGHT: f32 = 612.0;
pub const MARGIN: f32 = 36.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const FOOTER_HEIGHT: f32 = 24.0;
const FOOTER_SIZE: f32 = 8.0;
const CONTENT_TOP: f32 = PAGE_HEIGHT - MARGIN;
const CONTENT_BOTTOM: f32 = MARGIN + FOOTER_HEIGHT;

/// Vertical flow of blocks over as many pages as needed. `cursor` is the
/// top edge of the next block.
#[derive(Debug)]
pub struct PageLayout {
    done: Vec<Canvas>,
    current: Canvas,
    cursor: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            done: Vec::new(),
            current: Canvas::default(),
            cursor: CONTENT_TOP,
        }
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.current
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn advance(&mut self, height: f32) {
        self.cursor -= height;
    }

    pub fn remaining(&self) -> f32 {
        self.cursor - CONTENT_BOTTOM
    }

    pub fn new_page(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.cursor = CONTENT_TOP;
    }

    /// Start a new page unless `height` still fits. Returns whether a page
    /// break happened. A block taller than a whole page never breaks an
    /// empty page.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if height <= self.remaining() || self.cursor >= CONTENT_TOP {
            return false;
        }
        self.new_page();
        true
    }

    pub fn page_count(&self) -> usize {
        self.done.len() + 1
    }

    /// Finish the flow into a document, stamping the footer on every page
    pub fn into_document(
        self,
        footer: &str,
        logo: Option<&LogoImage>,
    ) -> Result<Document, RenderError> {
        let mut pages = self.done;
        pages.push(self.current);

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font_dictionary(Font::Regular));
        let bold_id = doc.add_object(font_dictionary(Font::Bold));
        let mut resources = dictionary! {
            "Font" => dictionary! {
                Font::Regular.resource() => regular_id,
                Font::Bold.resource() => bold_id,
            },
        };
        if let Some(logo) = logo {
            let image_id = doc.add_object(logo.to_stream());
            resources.set(
                "XObject",
                dictionary! {
                    LOGO_RESOURCE => image_id,
                },
            );
        }
        let resources_id = doc.add_object(resources);

        let page_count = pages.len();
        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for (index, mut canvas) in pages.into_iter().enumerate() {
            draw_footer(&mut canvas, footer, index + 1);
            let content_id = doc.add_object(Stream::new(dictionary! {}, canvas.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "MediaBox" => vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(PAGE_WIDTH),
                Object::Real(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        Ok(doc)
    }
}

fn font_dictionary(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn draw_footer(canvas: &mut Canvas, footer: &str, page_number: usize) {
    let y = MARGIN;
    canvas.line(
        MARGIN,
        y + 12.0,
        PAGE_WIDTH - MARGIN,
        y + 12.0,
        Rgb::GREY,
        0.5,
    );
    canvas.text(MARGIN, y, Font::Regular, FOOTER_SIZE, Rgb::DARK_GREY, footer);

    let page = format!("Page {}", page_number);
    let width = text_width(&page, FOOTER_SIZE, Font::Regular);
    canvas.text(
        PAGE_WIDTH - MARGIN - width,
        y,
        Font::Regular,
        FOOTER_SIZE,
        Rgb::DARK_GREY,
        &page,
    );
}
