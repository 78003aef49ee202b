//! Incremental PDF document writer.
//!
//! A [`Document`] streams objects to its sink as soon as they are complete:
//! the catalog when the document is opened, each page object when the page
//! begins, and the page's content stream, image directory and images when
//! the page ends. Closing writes the page tree, the cross-reference table
//! and the trailer.
//!
//! Drawing styles are single-slot values owned by the document. They are not
//! saved or restored around draw calls and they carry over from one page to
//! the next.

use super::content_stream::{ContentStream, ContentStreamOp};
use super::graphics_state::{paint_mode, FillStyle, LineStyle, PaintMode, TextStyle};
use super::image_handler::{resource_name, ImagePlacement, PendingImage, RasterImage};
use super::object_serializer::{ObjectSerializer, EOL};
use super::offset_writer::OffsetWriter;
use crate::config::WriterConfig;
use crate::encoders::{Ascii85Encoder, FlateEncoder, StreamEncoder};
use crate::error::{Error, ErrorKind, Result};
use crate::geometry::{Point, Rect};
use crate::object::{Dictionary, Object, ObjectId};
use crate::xref::{self, ObjectAllocator};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Resource name under which the text font is registered on every page.
const FONT_RESOURCE: &str = "F1";

/// Lifecycle state of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentState {
    /// Created, no sink bound yet
    Empty,
    /// A page is accepting drawing operations
    PageOpen,
    /// Trailer written; terminal
    Closed,
    /// A write, encoding or bookkeeping error left the output unusable
    Failed,
}

impl fmt::Display for DocumentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DocumentState::Empty => "not open",
            DocumentState::PageOpen => "open",
            DocumentState::Closed => "closed",
            DocumentState::Failed => "failed",
        };
        f.write_str(text)
    }
}

/// Working state of the page currently being drawn.
#[derive(Debug)]
struct PageState {
    page_id: ObjectId,
    content_id: ObjectId,
    xobject_id: ObjectId,
    content: ContentStream,
    images: Vec<PendingImage>,
}

/// A document being written page by page.
///
/// # Example
///
/// ```
/// use pdf_plotter::geometry::{Color, Point, Rect};
/// use pdf_plotter::writer::{Document, LineStyle};
/// use pdf_plotter::WriterConfig;
///
/// # fn main() -> pdf_plotter::Result<()> {
/// let mut doc = Document::new(WriterConfig::default());
/// doc.open(Vec::new(), Rect::from_coords(0.0, 0.0, 612.0, 792.0))?;
/// doc.set_line_style(LineStyle::solid(Color::black(), 1.0))?;
/// doc.draw_line(Point::new(72.0, 72.0), Point::new(540.0, 720.0))?;
/// let bytes = doc.close()?.unwrap_or_default();
/// assert!(bytes.starts_with(b"%PDF-1.4"));
/// # Ok(())
/// # }
/// ```
pub struct Document<W: Write> {
    config: WriterConfig,
    state: DocumentState,
    sink: Option<OffsetWriter<W>>,
    allocator: ObjectAllocator,
    serializer: ObjectSerializer,
    media_box: Rect,
    catalog_id: Option<ObjectId>,
    pages_id: Option<ObjectId>,
    page_ids: Vec<ObjectId>,
    page: Option<PageState>,
    line_style: LineStyle,
    fill_style: FillStyle,
    text_style: TextStyle,
    compressor: Box<dyn StreamEncoder + Send>,
    text_encoder: Ascii85Encoder,
}

impl<W: Write> fmt::Debug for Document<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("state", &self.state)
            .field("pages", &self.page_ids.len())
            .field("objects", &self.allocator.allocated())
            .field("compressor", &self.compressor.filter_name())
            .finish()
    }
}

impl Document<BufWriter<File>> {
    /// Create `path` and open a document on it.
    pub fn create(path: impl AsRef<Path>, config: WriterConfig, media_box: Rect) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        let mut doc = Self::new(config);
        doc.open(BufWriter::new(file), media_box)?;
        Ok(doc)
    }
}

impl<W: Write> Document<W> {
    /// Create an empty document using the deflate compressor.
    pub fn new(config: WriterConfig) -> Self {
        Self::with_compressor(config, Box::new(FlateEncoder::new()))
    }

    /// Create an empty document with a custom compressor.
    ///
    /// The compressor replaces deflate for both image data and content
    /// streams; its filter name is written as the stream's `/Filter`.
    pub fn with_compressor(config: WriterConfig, compressor: Box<dyn StreamEncoder + Send>) -> Self {
        let allocator = ObjectAllocator::starting_at(config.first_object_id);
        Self {
            config,
            state: DocumentState::Empty,
            sink: None,
            allocator,
            serializer: ObjectSerializer::new(),
            media_box: Rect::default(),
            catalog_id: None,
            pages_id: None,
            page_ids: Vec::new(),
            page: None,
            line_style: LineStyle::default(),
            fill_style: FillStyle::default(),
            text_style: TextStyle::default(),
            compressor,
            text_encoder: Ascii85Encoder::new(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DocumentState {
        self.state
    }

    /// Configuration in effect.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Number of pages begun so far.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Bytes accumulated in the current page's content stream.
    pub fn content_len(&self) -> usize {
        self.page.as_ref().map(|page| page.content.len()).unwrap_or(0)
    }

    /// Current line style.
    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    /// Current fill style.
    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    /// Current text style.
    pub fn text_style(&self) -> TextStyle {
        self.text_style
    }

    /// Deflate image data (or keep ASCII-85) from the next image written.
    pub fn set_image_compression(&mut self, enable: bool) {
        self.config.compress_images = enable;
    }

    /// Deflate content streams from the next page end.
    pub fn set_content_compression(&mut self, enable: bool) {
        self.config.compress_content = enable;
    }

    /// Bind the sink, write the header and catalog, and begin the first page.
    ///
    /// `media_box` is used for every page of the document.
    pub fn open(&mut self, sink: W, media_box: Rect) -> Result<()> {
        if self.state != DocumentState::Empty {
            return Err(self.state_error("open the document"));
        }
        if !media_box.is_finite() {
            return Err(Error::NonFiniteValue {
                operation: "open the document",
            });
        }

        self.media_box = media_box;
        self.sink = Some(OffsetWriter::new(sink));
        self.state = DocumentState::PageOpen;
        let result = self.write_prologue();
        self.track(result)
    }

    /// End the current page and begin a new one.
    pub fn next_page(&mut self) -> Result<()> {
        self.require_page("start a new page")?;
        let result = self.end_page().and_then(|_| self.begin_page());
        self.track(result)
    }

    /// Finish the document and release the sink.
    ///
    /// The first successful call returns the sink. Closing a document that
    /// was never opened or is already closed does nothing and returns `None`.
    pub fn close(&mut self) -> Result<Option<W>> {
        match self.state {
            DocumentState::Empty | DocumentState::Closed => return Ok(None),
            DocumentState::Failed => return Err(self.state_error("close the document")),
            DocumentState::PageOpen => {},
        }

        let result = self.end_page().and_then(|_| self.write_epilogue());
        self.track(result)?;

        self.state = DocumentState::Closed;
        let sink = self.sink.take().map(OffsetWriter::into_inner);
        log::debug!("Closed document with {} pages", self.page_ids.len());
        Ok(sink)
    }

    /// Replace the line style and emit its color and width.
    pub fn set_line_style(&mut self, style: LineStyle) -> Result<()> {
        self.require_page("set the line style")?;
        if !style.is_finite() {
            return Err(Error::NonFiniteValue {
                operation: "set the line style",
            });
        }
        self.line_style = style;
        let content = self.content()?;
        content.ops([
            ContentStreamOp::SetStrokeColorRGB(style.color.r, style.color.g, style.color.b),
            ContentStreamOp::SetLineWidth(style.width),
        ]);
        Ok(())
    }

    /// Replace the fill style and emit its color.
    pub fn set_fill_style(&mut self, style: FillStyle) -> Result<()> {
        self.require_page("set the fill style")?;
        if !style.color.is_finite() {
            return Err(Error::NonFiniteValue {
                operation: "set the fill style",
            });
        }
        self.fill_style = style;
        let content = self.content()?;
        content.op(ContentStreamOp::SetFillColorRGB(
            style.color.r,
            style.color.g,
            style.color.b,
        ));
        Ok(())
    }

    /// Replace the text style. Nothing is emitted until text is drawn.
    pub fn set_text_style(&mut self, style: TextStyle) -> Result<()> {
        self.require_page("set the text style")?;
        if !style.is_finite() {
            return Err(Error::NonFiniteValue {
                operation: "set the text style",
            });
        }
        self.text_style = style;
        Ok(())
    }

    /// Draw a line segment with the current line style.
    pub fn draw_line(&mut self, from: Point, to: Point) -> Result<()> {
        self.draw_polyline(&[from, to])
    }

    /// Draw connected line segments with the current line style.
    ///
    /// Nothing is emitted when the line pattern is null.
    pub fn draw_polyline(&mut self, points: &[Point]) -> Result<()> {
        self.require_page("draw a polyline")?;
        check_points(points, "draw a polyline")?;
        if !self.line_style.is_visible() || points.is_empty() {
            return Ok(());
        }
        let content = self.content()?;
        append_path(content, points);
        content.op(ContentStreamOp::Stroke);
        Ok(())
    }

    /// Draw a closed polygon with the current line and fill styles.
    ///
    /// Stroke and fill combine with the even-odd rule. Nothing is emitted
    /// when both patterns are null.
    pub fn draw_polygon(&mut self, points: &[Point]) -> Result<()> {
        self.require_page("draw a polygon")?;
        check_points(points, "draw a polygon")?;
        let Some(mode) = paint_mode(&self.line_style, &self.fill_style) else {
            return Ok(());
        };
        if points.is_empty() {
            return Ok(());
        }

        let content = self.content()?;
        append_path(content, points);
        content.op(ContentStreamOp::ClosePath);
        content.op(match mode {
            PaintMode::FillStroke => ContentStreamOp::FillStrokeEvenOdd,
            PaintMode::Fill => ContentStreamOp::FillEvenOdd,
            PaintMode::Stroke => ContentStreamOp::Stroke,
        });
        Ok(())
    }

    /// Draw a rectangle as a four-corner polygon.
    pub fn draw_rectangle(&mut self, rect: Rect) -> Result<()> {
        self.draw_polygon(&rect.corners())
    }

    /// Draw a text string at `position` with the current text style.
    ///
    /// Every character must fit in one byte (U+0000 to U+00FF).
    pub fn draw_text(&mut self, position: Point, text: &str) -> Result<()> {
        self.require_page("draw text")?;
        if !position.is_finite() {
            return Err(Error::NonFiniteValue {
                operation: "draw text",
            });
        }
        let encoded = encode_text(text)?;
        let style = self.text_style;

        let content = self.content()?;
        content.ops([
            ContentStreamOp::SaveState,
            ContentStreamOp::BeginText,
            ContentStreamOp::SetFont(FONT_RESOURCE.to_string(), style.height),
            ContentStreamOp::SetFillColorRGB(style.color.r, style.color.g, style.color.b),
            ContentStreamOp::MoveText(position.x, position.y),
            ContentStreamOp::ShowText(encoded),
            ContentStreamOp::EndText,
            ContentStreamOp::RestoreState,
        ]);
        Ok(())
    }

    /// Place an image on the current page.
    ///
    /// The image's object id is reserved immediately; its pixels are encoded
    /// and written when the page ends.
    pub fn draw_image(&mut self, image: RasterImage, placement: ImagePlacement) -> Result<ObjectId> {
        self.require_page("draw an image")?;
        if !placement.is_finite() {
            return Err(Error::NonFiniteValue {
                operation: "draw an image",
            });
        }

        let id = self.allocator.allocate_id();
        let page = self.page_mut()?;
        let index = page.images.len();
        let (a, b, c, d, e, f) = placement.transform_matrix();
        page.content.ops([
            ContentStreamOp::SaveState,
            ContentStreamOp::Transform(a, b, c, d, e, f),
            ContentStreamOp::PaintXObject(resource_name(index)),
            ContentStreamOp::RestoreState,
        ]);
        page.images.push(PendingImage { id, index, image });
        log::trace!("Queued image {} as object {}", resource_name(index), id);
        Ok(id)
    }

    /// Place an image copied from a borrowed pixel buffer.
    pub fn draw_image_from_slice(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        stride: usize,
        placement: ImagePlacement,
    ) -> Result<ObjectId> {
        self.require_page("draw an image")?;
        let image = RasterImage::from_slice(width, height, bits_per_pixel, stride, pixels)?;
        self.draw_image(image, placement)
    }

    fn write_prologue(&mut self) -> Result<()> {
        let version = format!("%PDF-{}\r\n", self.config.version);
        let producer = format!("%{}\r\n", self.config.producer);
        let sink = self.sink_mut()?;
        sink.write_all(version.as_bytes())?;
        // Binary marker (recommended for binary content)
        sink.write_all(b"%\xE2\xE3\xCF\xD3\r\n")?;
        sink.write_all(producer.as_bytes())?;

        let catalog_id = self.allocator.allocate_id();
        let pages_id = self.allocator.allocate_id();
        self.catalog_id = Some(catalog_id);
        self.pages_id = Some(pages_id);

        let catalog = Object::dict([
            ("Type", Object::name("Catalog")),
            ("Pages", pages_id.reference()),
        ]);
        self.write_object(catalog_id, &catalog)?;
        log::debug!(
            "Opened document: catalog {}, page tree {}",
            catalog_id,
            pages_id
        );

        self.begin_page()
    }

    fn begin_page(&mut self) -> Result<()> {
        let pages_id = self.pages_id.ok_or_else(|| self.state_error("begin a page"))?;
        let page_id = self.allocator.allocate_id();
        let content_id = self.allocator.allocate_id();
        let xobject_id = self.allocator.allocate_id();
        self.page_ids.push(page_id);

        let font = Object::dict([
            ("Type", Object::name("Font")),
            ("Subtype", Object::name("Type1")),
            ("BaseFont", Object::name(self.config.font_name.clone())),
            ("Encoding", Object::name("WinAnsiEncoding")),
        ]);
        let resources = Object::dict([
            (
                "ProcSet",
                Object::Array(
                    ["PDF", "Text", "ImageB", "ImageC", "ImageI"]
                        .into_iter()
                        .map(Object::name)
                        .collect(),
                ),
            ),
            ("Font", Object::dict([(FONT_RESOURCE, font)])),
            ("XObject", xobject_id.reference()),
        ]);
        let media_box = self.media_box;
        let page = Object::dict([
            ("Type", Object::name("Page")),
            ("Parent", pages_id.reference()),
            (
                "MediaBox",
                Object::reals(&[media_box.min.x, media_box.min.y, media_box.max.x, media_box.max.y]),
            ),
            ("Contents", content_id.reference()),
            ("Resources", resources),
        ]);
        self.write_object(page_id, &page)?;

        self.page = Some(PageState {
            page_id,
            content_id,
            xobject_id,
            content: ContentStream::new(),
            images: Vec::new(),
        });
        log::debug!("Began page {} (object {})", self.page_ids.len(), page_id);
        Ok(())
    }

    fn end_page(&mut self) -> Result<()> {
        let mut page = self.page.take().ok_or_else(|| self.state_error("end a page"))?;

        let raw = page.content.take();
        let mut dict = Dictionary::new();
        let data = if self.config.compress_content {
            let encoded = self
                .compressor
                .encode(&raw)
                .map_err(|e| e.for_object(page.content_id))?;
            dict.insert("Filter".to_string(), Object::name(self.compressor.filter_name()));
            encoded
        } else {
            raw.to_vec()
        };
        self.write_stream(page.content_id, &dict, &data)?;

        let directory: Dictionary = page
            .images
            .iter()
            .map(|pending| (resource_name(pending.index), pending.id.reference()))
            .collect();
        self.write_object(page.xobject_id, &Object::Dictionary(directory))?;

        let image_count = page.images.len();
        for pending in page.images.drain(..) {
            self.write_image(&pending)?;
        }

        log::debug!(
            "Ended page object {}: {} content bytes, {} images",
            page.page_id,
            data.len(),
            image_count
        );
        Ok(())
    }

    fn write_image(&mut self, pending: &PendingImage) -> Result<()> {
        let packed = pending.image.repack();
        let encoder: &mut dyn StreamEncoder = if self.config.compress_images {
            &mut self.compressor
        } else {
            &mut self.text_encoder
        };
        let data = encoder.encode(&packed).map_err(|e| e.for_object(pending.id))?;
        let dict = pending
            .image
            .build_xobject_dict(pending.index, encoder.filter_name());
        self.write_stream(pending.id, &dict, &data)
    }

    fn write_epilogue(&mut self) -> Result<()> {
        let catalog_id = self
            .catalog_id
            .ok_or_else(|| self.state_error("close the document"))?;
        let pages_id = self
            .pages_id
            .ok_or_else(|| self.state_error("close the document"))?;

        let kids = self.page_ids.iter().map(|id| id.reference()).collect();
        let pages = Object::dict([
            ("Type", Object::name("Pages")),
            ("Kids", Object::Array(kids)),
            ("Count", Object::from(self.page_ids.len())),
        ]);
        self.write_object(pages_id, &pages)?;

        let table = self.allocator.finalize_table()?;
        let id_bytes = self
            .config
            .document_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().into_bytes())
            .to_vec();
        let trailer: Dictionary = [
            ("Size".to_string(), Object::from(xref::trailer_size(&table))),
            ("Root".to_string(), catalog_id.reference()),
            (
                "ID".to_string(),
                Object::Array(vec![
                    Object::HexString(id_bytes.clone()),
                    Object::HexString(id_bytes),
                ]),
            ),
        ]
        .into_iter()
        .collect();

        let serializer = self.serializer;
        let sink = self.sink_mut()?;
        sink.write_all(EOL)?;
        let xref_offset = sink.position();
        xref::write_table(sink, &table)?;
        sink.write_all(b"trailer")?;
        sink.write_all(EOL)?;
        serializer.write_block_dictionary(sink, &trailer)?;
        sink.write_all(EOL)?;
        write!(sink, "startxref\r\n{}\r\n%%EOF\r\n", xref_offset)?;
        sink.flush()?;
        Ok(())
    }

    /// Write a blank line, record the offset, then write the object.
    fn write_object(&mut self, id: ObjectId, obj: &Object) -> Result<()> {
        let offset = self.begin_object()?;
        self.allocator.record_offset(id, offset)?;
        let serializer = self.serializer;
        serializer.write_indirect(self.sink_mut()?, id, obj)?;
        Ok(())
    }

    fn write_stream(&mut self, id: ObjectId, dict: &Dictionary, data: &[u8]) -> Result<()> {
        let offset = self.begin_object()?;
        self.allocator.record_offset(id, offset)?;
        let serializer = self.serializer;
        serializer.write_stream(self.sink_mut()?, id, dict, data)?;
        Ok(())
    }

    fn begin_object(&mut self) -> Result<u64> {
        let sink = self.sink_mut()?;
        sink.write_all(EOL)?;
        Ok(sink.position())
    }

    fn sink_mut(&mut self) -> Result<&mut OffsetWriter<W>> {
        let state = self.state;
        self.sink.as_mut().ok_or_else(|| Error::InvalidState {
            operation: "write to the output",
            state,
        })
    }

    fn page_mut(&mut self) -> Result<&mut PageState> {
        let state = self.state;
        self.page.as_mut().ok_or_else(|| Error::InvalidState {
            operation: "draw on a page",
            state,
        })
    }

    fn content(&mut self) -> Result<&mut ContentStream> {
        Ok(&mut self.page_mut()?.content)
    }

    fn require_page(&self, operation: &'static str) -> Result<()> {
        if self.state == DocumentState::PageOpen && self.page.is_some() {
            Ok(())
        } else {
            Err(self.state_error(operation))
        }
    }

    fn state_error(&self, operation: &'static str) -> Error {
        Error::InvalidState {
            operation,
            state: self.state,
        }
    }

    /// Mark the document failed when an error leaves the output unusable.
    fn track<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if matches!(
                e.kind(),
                ErrorKind::Sink | ErrorKind::Encoding | ErrorKind::Consistency
            ) {
                log::error!("Document failed: {}", e);
                self.state = DocumentState::Failed;
            }
        }
        result
    }
}

impl<W: Write> Drop for Document<W> {
    fn drop(&mut self) {
        if self.state != DocumentState::PageOpen {
            return;
        }
        if let Err(e) = self.close() {
            log::error!("Failed to close document on drop: {}", e);
            let pending = self.allocator.pending_ids();
            if !pending.is_empty() {
                log::warn!("{} reserved objects were never written", pending.len());
            }
        }
    }
}

fn append_path(content: &mut ContentStream, points: &[Point]) {
    for (i, point) in points.iter().enumerate() {
        content.op(if i == 0 {
            ContentStreamOp::MoveTo(point.x, point.y)
        } else {
            ContentStreamOp::LineTo(point.x, point.y)
        });
    }
}

fn check_points(points: &[Point], operation: &'static str) -> Result<()> {
    if points.iter().all(Point::is_finite) {
        Ok(())
    } else {
        Err(Error::NonFiniteValue { operation })
    }
}

/// Encode text as single bytes (Latin-1 code points).
fn encode_text(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .enumerate()
        .map(|(index, character)| {
            u8::try_from(u32::from(character))
                .map_err(|_| Error::UnencodableText { character, index })
        })
        .collect()
}
