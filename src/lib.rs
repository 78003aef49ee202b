// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::too_many_arguments)]

//! # PDF Plotter
//!
//! Incremental PDF writer for vector drawings and raster images.
//!
//! ## Core Features
//!
//! - **Streaming output**: objects are written to the sink as soon as they
//!   are complete; only the open page is held in memory
//! - **Vector drawing**: lines, polylines, polygons and rectangles with
//!   single-slot line and fill styles
//! - **Text**: single-byte strings in a base-14 font
//! - **Images**: 8-bit gray, 24-bit RGB and 32-bit RGBA pixel buffers with any
//!   scanline stride, repacked and encoded with ASCII85 or Flate
//! - **Cross-reference bookkeeping**: every object's byte offset is tracked
//!   and checked before the trailer is written
//!
//! ## Quick Start
//!
//! ```
//! use pdf_plotter::geometry::{Point, Rect};
//! use pdf_plotter::writer::{Document, ImagePlacement, RasterImage};
//! use pdf_plotter::WriterConfig;
//!
//! # fn main() -> pdf_plotter::Result<()> {
//! let mut doc = Document::new(WriterConfig::default());
//! doc.open(Vec::new(), Rect::from_coords(0.0, 0.0, 612.0, 792.0))?;
//!
//! doc.draw_line(Point::new(72.0, 72.0), Point::new(540.0, 72.0))?;
//! doc.draw_text(Point::new(72.0, 90.0), "Hello")?;
//!
//! let pixels = vec![0u8, 255, 255, 0];
//! let image = RasterImage::new(2, 2, 8, 2, pixels)?;
//! doc.draw_image(image, ImagePlacement::new(72.0, 120.0, 144.0, 144.0))?;
//!
//! let pdf = doc.close()?.unwrap_or_default();
//! assert!(pdf.ends_with(b"%%EOF\r\n"));
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Object model and cross-reference bookkeeping
pub mod object;
pub mod xref;

// Stream encoders
pub mod encoders;

// Drawing primitives
pub mod geometry;

// PDF writing
pub mod writer;

// Re-exports
pub use config::WriterConfig;
pub use error::{Error, ErrorKind, Result};
pub use object::ObjectId;
pub use writer::{Document, DocumentState};
