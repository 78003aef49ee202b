//! PDF writing module.
//!
//! ## Architecture
//!
//! ```text
//! draw calls
//!     ↓
//! [ContentStream] (operator records for the open page)
//!     ↓                              images → [RasterImage::repack]
//! [Document] (page lifecycle, object ids, offsets)    ↓
//!     ↓                              [StreamEncoder] (ASCII85 / Flate)
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! [OffsetWriter] → sink
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pdf_plotter::geometry::{Color, Rect};
//! use pdf_plotter::writer::{Document, FillStyle};
//! use pdf_plotter::WriterConfig;
//!
//! # fn main() -> pdf_plotter::Result<()> {
//! let letter = Rect::from_coords(0.0, 0.0, 612.0, 792.0);
//! let mut doc = Document::create("out.pdf", WriterConfig::default(), letter)?;
//! doc.set_fill_style(FillStyle::solid(Color::new(0.9, 0.1, 0.1)))?;
//! doc.draw_rectangle(Rect::from_coords(72.0, 72.0, 288.0, 216.0))?;
//! doc.next_page()?;
//! doc.close()?;
//! # Ok(())
//! # }
//! ```

mod content_stream;
mod graphics_state;
mod image_handler;
mod object_serializer;
mod offset_writer;
mod pdf_writer;

pub use content_stream::{ContentStream, ContentStreamOp};
pub use graphics_state::{FillPattern, FillStyle, LinePattern, LineStyle, TextStyle};
pub use image_handler::{ColorSpace, ImagePlacement, RasterImage};
pub use object_serializer::ObjectSerializer;
pub use offset_writer::OffsetWriter;
pub use pdf_writer::{Document, DocumentState};
