//! Configuration types for a document generation run.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. The config is an immutable snapshot of the caller's
//! selections, constructed once at the start of a run and threaded through
//! every pipeline stage — no stage reads ambient state.
//!
//! # Design choice: builder over constructor
//! A many-field constructor is unreadable and breaks on every new field.
//! The builder lets callers set only what they care about and rely on
//! documented defaults for the rest.

use crate::error::FigPdfError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Image extensions enabled when the caller does not choose their own set.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Configuration for one generation run.
///
/// Built via [`RunConfig::builder()`].
///
/// # Example
/// ```rust
/// use figpdf::RunConfig;
///
/// let config = RunConfig::builder("/photos/holiday")
///     .recurse(true)
///     .extensions(["jpg", "PNG"])
///     .build()
///     .unwrap();
/// assert_eq!(config.extensions, vec!["jpg", "png"]);
/// ```
#[derive(Clone)]
pub struct RunConfig {
    /// Directory scanned for the marker file and the source images.
    pub directory: PathBuf,

    /// Walk into subdirectories when collecting images. Default: false.
    ///
    /// The marker file is always looked up in the top-level directory only,
    /// regardless of this flag.
    pub recurse: bool,

    /// Enabled image extensions, lowercased and without a leading dot.
    /// Matching against filenames is case-insensitive. Default:
    /// [`DEFAULT_EXTENSIONS`]. An empty set yields zero images (and a
    /// validation warning), not an error.
    pub extensions: Vec<String>,

    /// Explicit marker base name, needed only when the directory holds more
    /// than one marker file. Default: None.
    pub marker_name: Option<String>,

    /// Output resolution used for page geometry. Range: 72–600. Default: 300.
    ///
    /// Pixels map to PDF points at `72 / dpi`, so a higher value shrinks the
    /// physical page size of the same image rather than resampling it.
    pub dpi: u32,

    /// JPEG quality for the embedded page streams. Range: 1–100. Default: 95.
    pub jpeg_quality: u8,

    /// Preferred caption font file. When unset, or when the file cannot be
    /// loaded, a bundled default font is used; a missing font is never fatal.
    pub font_path: Option<PathBuf>,

    /// Per-page progress observer. Default: None (no events).
    pub progress: Option<ProgressCallback>,
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("directory", &self.directory)
            .field("recurse", &self.recurse)
            .field("extensions", &self.extensions)
            .field("marker_name", &self.marker_name)
            .field("dpi", &self.dpi)
            .field("jpeg_quality", &self.jpeg_quality)
            .field("font_path", &self.font_path)
            .field("progress", &self.progress.as_ref().map(|_| "<dyn RenderProgress>"))
            .finish()
    }
}

impl RunConfig {
    /// Create a new builder scanning `directory`.
    pub fn builder(directory: impl Into<PathBuf>) -> RunConfigBuilder {
        RunConfigBuilder {
            config: RunConfig {
                directory: directory.into(),
                recurse: false,
                extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
                marker_name: None,
                dpi: 300,
                jpeg_quality: 95,
                font_path: None,
                progress: None,
            },
        }
    }
}

/// Builder for [`RunConfig`].
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn recurse(mut self, v: bool) -> Self {
        self.config.recurse = v;
        self
    }

    /// Replace the enabled extension set. Entries are lowercased and any
    /// leading dot is stripped, so `"JPG"`, `".jpg"` and `"jpg"` are the
    /// same selection. An empty iterator selects nothing.
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.extensions = exts
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn marker_name(mut self, name: impl Into<String>) -> Self {
        self.config.marker_name = Some(name.into());
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 600);
        self
    }

    pub fn jpeg_quality(mut self, q: u8) -> Self {
        self.config.jpeg_quality = q.clamp(1, 100);
        self
    }

    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = Some(path.into());
        self
    }

    pub fn progress(mut self, cb: ProgressCallback) -> Self {
        self.config.progress = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunConfig, FigPdfError> {
        let c = &self.config;
        if c.directory.as_os_str().is_empty() {
            return Err(FigPdfError::InvalidConfig(
                "Source directory must not be empty".into(),
            ));
        }
        if c.dpi < 72 || c.dpi > 600 {
            return Err(FigPdfError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.jpeg_quality == 0 || c.jpeg_quality > 100 {
            return Err(FigPdfError::InvalidConfig(format!(
                "JPEG quality must be 1–100, got {}",
                c.jpeg_quality
            )));
        }
        if let Some(ref name) = c.marker_name {
            if name.trim().is_empty() {
                return Err(FigPdfError::InvalidConfig(
                    "Explicit marker name must not be blank".into(),
                ));
            }
        }
        Ok(self.config)
    }
}

/// Lowercase an extension and strip a leading dot: `".JPG"` → `"jpg"`.
pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = RunConfig::builder("/tmp/p").build().unwrap();
        assert!(!c.recurse);
        assert_eq!(c.extensions, vec!["jpg", "jpeg", "png"]);
        assert_eq!(c.dpi, 300);
        assert_eq!(c.jpeg_quality, 95);
        assert!(c.marker_name.is_none());
    }

    #[test]
    fn extensions_are_normalized() {
        let c = RunConfig::builder("/tmp/p")
            .extensions([".JPG", "Png", "", "  .jpeg "])
            .build()
            .unwrap();
        assert_eq!(c.extensions, vec!["jpg", "png", "jpeg"]);
    }

    #[test]
    fn empty_extension_set_is_allowed() {
        let c = RunConfig::builder("/tmp/p")
            .extensions(Vec::<String>::new())
            .build()
            .unwrap();
        assert!(c.extensions.is_empty());
    }

    #[test]
    fn setters_clamp_values() {
        let c = RunConfig::builder("/tmp/p")
            .dpi(10_000)
            .jpeg_quality(0)
            .build()
            .unwrap();
        assert_eq!(c.dpi, 600);
        assert_eq!(c.jpeg_quality, 1);
    }

    #[test]
    fn blank_marker_name_rejected() {
        let err = RunConfig::builder("/tmp/p")
            .marker_name("   ")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("marker name"));
    }

    #[test]
    fn empty_directory_rejected() {
        assert!(RunConfig::builder("").build().is_err());
    }
}
