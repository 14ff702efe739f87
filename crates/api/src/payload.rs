use bytes::Bytes;

/// Captured image handed to the client by the UI layer.
///
/// `bytes` is reference-counted, so cloning the payload into a request body
/// does not copy the image.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Bytes,
    pub filename: String,
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(
        bytes: impl Into<Bytes>,
        filename: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            filename: filename.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
