//! Hand-built `multipart/form-data` bodies for attachment uploads.

use rand::RngExt;

/// Multipart form body under construction.
pub(crate) struct Multipart {
    boundary: String,
    body: Vec<u8>,
}

impl Multipart {
    pub(crate) fn new() -> Self {
        Self::with_boundary(format!(
            "----Md2cflFormBoundary{:016x}",
            rand::rng().random::<u64>()
        ))
    }

    pub(crate) fn with_boundary(boundary: String) -> Self {
        Self {
            boundary,
            body: Vec::new(),
        }
    }

    /// Add a file part.
    pub(crate) fn file(mut self, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.open_part();
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Add a plain form field.
    pub(crate) fn field(mut self, name: &str, value: &str) -> Self {
        self.open_part();
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Close the body; returns the `Content-Type` header value and the bytes.
    pub(crate) fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }

    fn open_part(&mut self) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_file_and_field() {
        let (content_type, body) = Multipart::with_boundary("XYZ".to_owned())
            .file("a.png", "image/png", b"PNG")
            .field("minorEdit", "true")
            .finish();

        assert_eq!(content_type, "multipart/form-data; boundary=XYZ");
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "--XYZ\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"a.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             PNG\r\n\
             --XYZ\r\n\
             Content-Disposition: form-data; name=\"minorEdit\"\r\n\r\n\
             true\r\n\
             --XYZ--\r\n"
        );
    }

    #[test]
    fn test_random_boundary() {
        let (content_type, _) = Multipart::new().finish();
        assert!(content_type.starts_with("multipart/form-data; boundary=----Md2cflFormBoundary"));
    }
}
