//! Drawing surface abstraction and the printpdf-backed implementation.

use std::fs::File;
use std::io::BufWriter;

use ::image::DynamicImage;
use printpdf::*;

use crate::units::{INCH, MM};
use crate::LabelError;

/// A vector-graphics document sink with a page lifecycle and a graphics
/// state stack. Coordinates and sizes are in points, origin at the page's
/// bottom-left corner.
///
/// Ending a page is lazy: the next drawing operation after [`end_page`]
/// opens the fresh page, so a run that ends exactly on a page boundary
/// leaves no trailing blank page.
///
/// [`end_page`]: Canvas::end_page
pub trait Canvas {
    /// Finish the current page.
    fn end_page(&mut self);
    /// Push the current graphics state.
    fn save_state(&mut self);
    /// Pop the graphics state pushed by the matching [`save_state`].
    ///
    /// [`save_state`]: Canvas::save_state
    fn restore_state(&mut self);
    /// Shift the coordinate system by `(x, y)`.
    fn translate(&mut self, x: f32, y: f32);
    /// Set the stroke width for subsequent outlines.
    fn set_line_width(&mut self, width: f32);
    /// Stroke a rectangle outline.
    fn rect_outline(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Draw `text` at `(x, y)` with the given font size.
    fn text(&mut self, text: &str, size: f32, x: f32, y: f32);
    /// Draw a raster image with its bottom-left corner at `(x, y)`, scaled
    /// so its width spans `size` points.
    fn image(&mut self, image: &DynamicImage, x: f32, y: f32, size: f32);
}

fn mm(points: f32) -> Mm {
    Mm(points / MM)
}

/// [`Canvas`] implementation writing a PDF document via printpdf.
pub struct PdfCanvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    page: (f32, f32),
    page_pending: bool,
}

impl PdfCanvas {
    /// Creates a document with one open page of the given size.
    pub fn new(title: &str, page: (f32, f32)) -> Result<Self, LabelError> {
        let (doc, page1, layer1) = PdfDocument::new(title, mm(page.0), mm(page.1), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| LabelError::Pdf(e.to_string()))?;

        Ok(Self {
            doc,
            layer,
            font,
            page,
            page_pending: false,
        })
    }

    /// Materializes the page requested by a previous `end_page`.
    fn ensure_page(&mut self) {
        if self.page_pending {
            let (page, layer) = self
                .doc
                .add_page(mm(self.page.0), mm(self.page.1), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.page_pending = false;
        }
    }

    /// Writes the document to `path`.
    pub fn save(self, path: &str) -> Result<(), LabelError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| LabelError::Pdf(e.to_string()))
    }
}

impl Canvas for PdfCanvas {
    fn end_page(&mut self) {
        self.page_pending = true;
    }

    fn save_state(&mut self) {
        self.ensure_page();
        self.layer.save_graphics_state();
    }

    fn restore_state(&mut self) {
        self.layer.restore_graphics_state();
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.layer
            .set_ctm(CurTransMat::Translate(mm(x).into(), mm(y).into()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.layer.set_outline_thickness(width);
    }

    fn rect_outline(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ensure_page();
        let points = vec![
            (Point::new(mm(x), mm(y)), false),
            (Point::new(mm(x + width), mm(y)), false),
            (Point::new(mm(x + width), mm(y + height)), false),
            (Point::new(mm(x), mm(y + height)), false),
        ];
        let line = Line {
            points,
            is_closed: true,
        };
        self.layer.add_line(line);
    }

    fn text(&mut self, text: &str, size: f32, x: f32, y: f32) {
        self.ensure_page();
        self.layer.use_text(text, size, mm(x), mm(y), &self.font);
    }

    fn image(&mut self, image: &DynamicImage, x: f32, y: f32, size: f32) {
        self.ensure_page();

        let rgb_image = image.to_rgb8();
        let (width_px, height_px) = rgb_image.dimensions();
        let raw_pixels = rgb_image.into_raw();

        let xobject = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: raw_pixels,
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI such that width_px pixels span `size` points on the page.
        let dpi = width_px as f32 * INCH / size;

        xobject.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(x)),
                translate_y: Some(mm(y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }
}

/// Event-recording canvas for unit tests. Draw calls are captured instead of
/// rendered, so grid arithmetic can be asserted without parsing a PDF.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingCanvas {
    pub pages_ended: u32,
    pub saves: u32,
    pub restores: u32,
    pub translates: Vec<(f32, f32)>,
    pub rects: Vec<(f32, f32, f32, f32)>,
    pub texts: Vec<(String, f32, f32, f32)>,
    pub images: Vec<(f32, f32, f32)>,
}

#[cfg(test)]
impl Canvas for RecordingCanvas {
    fn end_page(&mut self) {
        self.pages_ended += 1;
    }

    fn save_state(&mut self) {
        self.saves += 1;
    }

    fn restore_state(&mut self) {
        self.restores += 1;
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.translates.push((x, y));
    }

    fn set_line_width(&mut self, _width: f32) {}

    fn rect_outline(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.rects.push((x, y, width, height));
    }

    fn text(&mut self, text: &str, size: f32, x: f32, y: f32) {
        self.texts.push((text.to_string(), size, x, y));
    }

    fn image(&mut self, _image: &DynamicImage, x: f32, y: f32, size: f32) {
        self.images.push((x, y, size));
    }
}
