//! Storage of uploaded catalog images under the public web root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

/// Which catalog entity an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Products,
    Categories,
    Brands,
}

impl ImageKind {
    pub const fn folder(self) -> &'static str {
        match self {
            ImageKind::Products => "products",
            ImageKind::Categories => "categories",
            ImageKind::Brands => "brands",
        }
    }

    /// Placeholder shown when an entity has no image.
    pub const fn default_url(self) -> &'static str {
        match self {
            ImageKind::Products => "/images/products/default.jpg",
            ImageKind::Categories => "/images/categories/default.jpg",
            ImageKind::Brands => "/images/brands/default.jpg",
        }
    }
}

/// File received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ImageUpload {
    /// Returns `None` for an empty upload.
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Option<Self> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() || content.is_empty() {
            return None;
        }
        Some(Self { file_name, content })
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid file name")]
    InvalidFileName,
    #[error("failed to store image: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg_attr(any(test, feature = "test-mocks"), automock)]
pub trait ImageStore {
    /// Stores the upload and returns its public URL.
    fn save(&self, kind: ImageKind, upload: &ImageUpload) -> Result<String, UploadError>;
    /// Removes the image referenced by `url`. Missing files are ignored.
    fn delete(&self, kind: ImageKind, url: &str) -> Result<(), UploadError>;
}

/// Last path component of a client-supplied name, accepting both separators.
fn base_name(name: &str) -> Option<&str> {
    let base = name.rsplit(['/', '\\']).next()?.trim();
    match base {
        "" | "." | ".." => None,
        base => Some(base),
    }
}

/// Writes images to `{web_root}/images/{kind}`.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    web_root: PathBuf,
}

impl LocalImageStore {
    pub fn new(web_root: impl Into<PathBuf>) -> Self {
        Self {
            web_root: web_root.into(),
        }
    }

    fn folder(&self, kind: ImageKind) -> PathBuf {
        self.web_root.join("images").join(kind.folder())
    }
}

impl ImageStore for LocalImageStore {
    fn save(&self, kind: ImageKind, upload: &ImageUpload) -> Result<String, UploadError> {
        let original = base_name(&upload.file_name).ok_or(UploadError::InvalidFileName)?;
        let file_name = format!("{}_{}", Uuid::new_v4(), original);

        let folder = self.folder(kind);
        std::fs::create_dir_all(&folder)?;
        std::fs::write(folder.join(&file_name), &upload.content)?;

        log::info!("Stored image {file_name} in {}", folder.display());
        Ok(format!("/images/{}/{}", kind.folder(), file_name))
    }

    fn delete(&self, kind: ImageKind, url: &str) -> Result<(), UploadError> {
        let Some(file_name) = base_name(url) else {
            return Ok(());
        };
        let path = self.folder(kind).join(Path::new(file_name));

        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(UploadError::Io(e)),
        }
    }
}
