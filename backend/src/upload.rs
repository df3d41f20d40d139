use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

lazy_static::lazy_static! {
    static ref ACCEPTED_MIME_TYPES: HashSet<&'static str> =
        ["image/jpeg", "image/jpg", "image/png"].into_iter().collect();
    static ref ACCEPTED_EXTENSIONS: HashSet<&'static str> =
        ["jpg", "jpeg", "png"].into_iter().collect();
}

/// One file received from the browser. Lives for a single request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn sha256(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        hex::encode(hasher.finalize())
    }

    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Same filter as the upload widget: jpg, jpeg or png, by declared MIME
    /// type or by file extension.
    pub fn is_accepted_type(&self) -> bool {
        let mime = self.mime_type.to_ascii_lowercase();
        ACCEPTED_MIME_TYPES.contains(mime.as_str())
            || self
                .extension()
                .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(ext.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha256() {
        let upload = UploadedImage::new(b"abc".to_vec(), "a.png", "image/png");
        assert_eq!(
            upload.sha256(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(upload.size(), 3);
    }

    #[test]
    fn accepts_by_mime_or_extension() {
        assert!(UploadedImage::new(vec![], "photo", "image/jpeg").is_accepted_type());
        assert!(UploadedImage::new(vec![], "PUPPY.JPG", "application/octet-stream").is_accepted_type());
        assert!(UploadedImage::new(vec![], "notes.jpg", "text/plain").is_accepted_type());
        assert!(UploadedImage::new(vec![], "kitten.png", "").is_accepted_type());
    }

    #[test]
    fn rejects_other_types() {
        assert!(!UploadedImage::new(vec![], "anim.gif", "image/gif").is_accepted_type());
        assert!(!UploadedImage::new(vec![], "readme.txt", "text/plain").is_accepted_type());
        assert!(!UploadedImage::new(vec![], "", "").is_accepted_type());
    }
}
