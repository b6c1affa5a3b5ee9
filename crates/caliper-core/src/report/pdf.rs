use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{
    BuiltinFont, Image as PdfImage, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point as PdfPoint, Pt,
};
use tracing::{info, warn};

use super::layout::{FontStyle, Page, PageItem, PageLayout, DOCUMENT_TITLE};
use crate::error::RenderError;

const LAYER_NAME: &str = "Layer 1";

fn mm(points: f32) -> Mm {
    Mm::from(Pt(points))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.regular,
            FontStyle::Bold => &self.bold,
        }
    }
}

/// Render laid-out pages to a PDF at `path`.
///
/// An image that cannot be embedded is replaced by a `Could not insert image`
/// note; the document is still written.
pub fn write_pdf(pages: &[Page], layout: &PageLayout, path: &Path) -> Result<(), RenderError> {
    let (w, h) = (mm(layout.width), mm(layout.height));
    let (doc, first_page, first_layer) = PdfDocument::new(DOCUMENT_TITLE, w, h, LAYER_NAME);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?,
    };

    for (i, page) in pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (p, l) = doc.add_page(w, h, LAYER_NAME);
            doc.get_page(p).get_layer(l)
        };
        draw_page(&layer, page, &fonts, layout);
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    info!(path = %path.display(), pages = pages.len(), "Saved report");
    Ok(())
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts, layout: &PageLayout) {
    for item in &page.items {
        match item {
            PageItem::Text {
                text,
                x,
                y,
                size,
                style,
            } => {
                layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*style));
            }
            PageItem::Rule { x0, x1, y } => {
                layer.add_line(Line {
                    points: vec![
                        (PdfPoint::new(mm(*x0), mm(*y)), false),
                        (PdfPoint::new(mm(*x1), mm(*y)), false),
                    ],
                    is_closed: false,
                });
            }
            PageItem::Image {
                path,
                x,
                y,
                width,
                height,
                width_px,
                height_px,
            } => {
                let scale_x = *width / *width_px as f32;
                let scale_y = *height / *height_px as f32;
                if let Err(e) = embed_image(layer, path, *x, *y, scale_x, scale_y) {
                    warn!(path = %path.display(), "Could not insert image: {e}");
                    layer.use_text(
                        format!("Could not insert image: {e}"),
                        layout.body_size,
                        mm(layout.margin),
                        mm(layout.subtitle_y),
                        &fonts.regular,
                    );
                }
            }
        }
    }
}

/// Place an image at `(x, y)` points, scaled from 1 pt per pixel.
fn embed_image(
    layer: &PdfLayerReference,
    path: &Path,
    x: f32,
    y: f32,
    scale_x: f32,
    scale_y: f32,
) -> Result<(), RenderError> {
    let decoded = printpdf::image_crate::open(path).map_err(|e| RenderError::Pdf(e.to_string()))?;
    let rgb = printpdf::image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let image = PdfImage::from_dynamic_image(&rgb);
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(mm(x)),
            translate_y: Some(mm(y)),
            scale_x: Some(scale_x),
            scale_y: Some(scale_y),
            dpi: Some(72.0),
            ..Default::default()
        },
    );
    Ok(())
}
