//! Configuration for document generation.

/// Settings captured when a [`Document`](crate::writer::Document) is created.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// PDF version written in the header (e.g., "1.4")
    pub version: String,
    /// Text of the generator comment line following the header
    pub producer: String,
    /// Deflate image data instead of ASCII-85 encoding it
    pub compress_images: bool,
    /// Deflate page content streams
    pub compress_content: bool,
    /// Base-14 font used for text strings
    pub font_name: String,
    /// First object number handed out by the allocator
    pub first_object_id: u32,
    /// Fixed trailer identifier; a random one is generated when unset
    pub document_id: Option<[u8; 16]>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl WriterConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self {
            version: "1.4".to_string(),
            producer: format!("PDF file generated by {}", env!("CARGO_PKG_NAME")),
            compress_images: false,
            compress_content: false,
            font_name: "Helvetica".to_string(),
            first_object_id: 1,
            document_id: None,
        }
    }

    /// Set the header version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the generator comment.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Enable or disable image compression.
    ///
    /// When disabled, image data is written with the ASCII85Decode filter.
    pub fn with_image_compression(mut self, enable: bool) -> Self {
        self.compress_images = enable;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_content_compression(mut self, enable: bool) -> Self {
        self.compress_content = enable;
        self
    }

    /// Set the base font used for text.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the first object number, clamped to
    /// `1..=`[`MAX_FIRST_OBJECT_ID`](crate::xref::MAX_FIRST_OBJECT_ID).
    pub fn with_first_object_id(mut self, first: u32) -> Self {
        self.first_object_id = first.clamp(1, crate::xref::MAX_FIRST_OBJECT_ID);
        self
    }

    /// Use a fixed trailer identifier (useful for reproducible output).
    pub fn with_document_id(mut self, id: [u8; 16]) -> Self {
        self.document_id = Some(id);
        self
    }
}
