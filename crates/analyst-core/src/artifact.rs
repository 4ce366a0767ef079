//! Artifact loading: turn a path on disk into plain text.
//!
//! PDFs are extracted page by page with `lopdf`; pages without extractable
//! text contribute an empty line instead of aborting the whole document.
//! Everything else is read as bytes and decoded as UTF-8, silently dropping
//! undecodable sequences.

use crate::error::{AnalystError, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// How an artifact's content is turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pdf,
    Text,
}

impl ArtifactKind {
    /// Classify by extension, case-insensitively.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some(e) if e.eq_ignore_ascii_case("pdf") => Self::Pdf,
            _ => Self::Text,
        }
    }
}

/// A caller-supplied reference to the artifact under analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath {
    path: PathBuf,
    kind: ArtifactKind,
}

impl ArtifactPath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = ArtifactKind::from_extension(path.extension().and_then(|e| e.to_str()));
        Self { path, kind }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    /// File name without its final extension, used to name the analysis output.
    /// Non-UTF-8 bytes become U+FFFD; only a path with no file name falls back to `artifact`.
    pub fn stem(&self) -> Cow<'_, str> {
        self.path
            .file_stem()
            .map_or(Cow::Borrowed("artifact"), |s| s.to_string_lossy())
    }
}

/// Loads artifact text. Stateless; one instance can serve any number of paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactLoader;

impl ArtifactLoader {
    pub fn new() -> Self {
        Self
    }

    /// Extract the artifact's text. The result may be empty.
    pub fn load(&self, artifact: &ArtifactPath) -> Result<String> {
        let path = artifact.path();
        if !path.exists() {
            return Err(AnalystError::NotFound(path.display().to_string()));
        }

        let text = match artifact.kind() {
            ArtifactKind::Pdf => extract_pdf(path)?,
            ArtifactKind::Text => read_text_lossy(path)?,
        };

        tracing::debug!(
            path = %path.display(),
            kind = ?artifact.kind(),
            chars = text.chars().count(),
            "loaded artifact"
        );
        Ok(text)
    }
}

/// Read raw bytes and decode as UTF-8, dropping invalid sequences.
fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| AnalystError::Extraction(e.to_string()))?;
    Ok(decode_utf8_ignoring_errors(&bytes))
}

/// UTF-8 decode that skips undecodable bytes instead of failing or substituting.
pub fn decode_utf8_ignoring_errors(bytes: &[u8]) -> String {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s.replace(char::REPLACEMENT_CHARACTER, ""),
    }
}

fn extract_pdf(path: &Path) -> Result<String> {
    let doc =
        lopdf::Document::load(path).map_err(|e| AnalystError::Extraction(e.to_string()))?;
    Ok(extract_pages(&doc))
}

/// Join the text of every page in page order, one page per line group.
fn extract_pages(doc: &lopdf::Document) -> String {
    let pages = doc.get_pages();
    tracing::debug!(pages = pages.len(), "extracting pdf text");

    let texts: Vec<String> = pages
        .keys()
        .map(|&page_num| match doc.extract_text(&[page_num]) {
            Ok(text) if !text.trim().is_empty() => text.trim_end().to_string(),
            Ok(_) => {
                tracing::warn!(page = page_num, "pdf page has no extractable text");
                String::new()
            }
            Err(e) => {
                tracing::warn!(page = page_num, error = %e, "pdf page text extraction failed");
                String::new()
            }
        })
        .collect();

    texts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(ArtifactKind::from_extension(Some("pdf")), ArtifactKind::Pdf);
        assert_eq!(ArtifactKind::from_extension(Some("PDF")), ArtifactKind::Pdf);
        assert_eq!(ArtifactKind::from_extension(Some("log")), ArtifactKind::Text);
        assert_eq!(ArtifactKind::from_extension(None), ArtifactKind::Text);
    }

    #[test]
    fn test_artifact_path_stem() {
        assert_eq!(ArtifactPath::new("/var/log/auth.log").stem(), "auth");
        assert_eq!(ArtifactPath::new("report.tar.gz").stem(), "report.tar");
        assert_eq!(ArtifactPath::new("README").stem(), "README");
        assert_eq!(ArtifactPath::new("/").stem(), "artifact");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_stem_keeps_readable_part() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"evil\xff.log");
        let artifact = ArtifactPath::new(Path::new("/tmp").join(name));
        let stem = artifact.stem();
        assert_eq!(stem, "evil\u{FFFD}");

        let output = crate::output::output_path_for(&artifact, Path::new("."));
        let name = output.file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(name, "evil\u{FFFD}_ANALYSIS.txt");
    }

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let bytes = b"user=root\xff\xfe login ok";
        assert_eq!(decode_utf8_ignoring_errors(bytes), "user=root login ok");
    }

    #[test]
    fn test_decode_keeps_valid_utf8() {
        let text = "héllo wörld ✓";
        assert_eq!(decode_utf8_ignoring_errors(text.as_bytes()), text);
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = ArtifactPath::new(tmp.path().join("nope.log"));
        let err = ArtifactLoader::new().load(&missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_load_directory_is_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ArtifactLoader::new()
            .load(&ArtifactPath::new(tmp.path()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }

    #[test]
    fn test_load_corrupt_pdf_is_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();
        let err = ArtifactLoader::new()
            .load(&ArtifactPath::new(&path))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);
    }
}
