//! Local file persistence for uploaded assets.
//!
//! Two kinds of upload exist: the resume (one file, fixed name, pdf or
//! plain text) and certification badge images (many files, generated
//! names). Only the filename goes back into the store; the bytes stay on
//! local disk where the site serves them from.

use std::error::Error;
use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

/// Extensions accepted for the resume upload.
pub const RESUME_EXTENSIONS: &[&str] = &[".pdf", ".txt"];

/// Extensions accepted for certification images.
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

/// An upload that could not be stored.
#[derive(Debug)]
pub enum UploadError {
    /// The filename's extension is not in the allowlist for its kind.
    Extension { filename: String, allowed: &'static [&'static str] },
    /// Writing to the local directory failed.
    Io(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Extension { filename, allowed } => {
                write!(f, "'{}' is not an accepted file type (allowed: {})", filename, allowed.join(", "))
            }
            UploadError::Io(message) => write!(f, "could not store upload: {}", message),
        }
    }
}

impl Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.to_string())
    }
}

/// A stored resume: what gets recorded in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
    pub filename: String,
    /// Uppercased extension without the dot, e.g. `PDF`.
    pub file_type: String,
}

/// Writes uploads to the local asset directories, creating them on demand.
#[derive(Debug, Clone)]
pub struct UploadStore {
    resume_dir: PathBuf,
    image_dir: PathBuf,
}

impl UploadStore {
    pub fn new(resume_dir: impl Into<PathBuf>, image_dir: impl Into<PathBuf>) -> Self {
        UploadStore { resume_dir: resume_dir.into(), image_dir: image_dir.into() }
    }

    /// Store the resume as `Resume<ext>`, removing the stale counterpart so
    /// only one resume file exists at a time.
    pub async fn save_resume(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredResume, UploadError> {
        let ext = allowed_extension(original_name, RESUME_EXTENSIONS)?;
        tokio::fs::create_dir_all(&self.resume_dir).await?;

        let filename = format!("Resume{}", ext);
        tokio::fs::write(self.resume_dir.join(&filename), bytes).await?;

        for stale in RESUME_EXTENSIONS {
            if *stale != ext {
                // Best effort; the counterpart usually does not exist.
                let _ = tokio::fs::remove_file(self.resume_dir.join(format!("Resume{}", stale))).await;
            }
        }

        Ok(StoredResume { filename, file_type: ext[1..].to_uppercase() })
    }

    /// Store a certification image under a generated name. Returns the
    /// site-relative path recorded in the store.
    pub async fn save_image(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let ext = allowed_extension(original_name, IMAGE_EXTENSIONS)?;
        tokio::fs::create_dir_all(&self.image_dir).await?;

        let unique = Uuid::new_v4().simple().to_string();
        let filename = format!("cert-{}{}", &unique[..8], ext);
        tokio::fs::write(self.image_dir.join(&filename), bytes).await?;

        Ok(format!("assets/img/portfolio/{}", filename))
    }

    /// Where a stored resume lives on disk.
    pub fn resume_path(&self, filename: &str) -> PathBuf {
        self.resume_dir.join(filename)
    }
}

/// The lowercased extension of `filename` when it is in `allowed`.
fn allowed_extension(
    filename: &str,
    allowed: &'static [&'static str],
) -> Result<String, UploadError> {
    let ext = filename
        .rfind('.')
        .map(|dot| filename[dot..].to_lowercase())
        .unwrap_or_default();
    if allowed.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(UploadError::Extension { filename: filename.to_string(), allowed })
    }
}
