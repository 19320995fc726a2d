//! Screenshot intake: turns text pulled out of chat screenshots into a single
//! transcript the analysis pipeline can consume.
//!
//! The OCR engine itself lives behind [`TextExtractor`]. This module only
//! orders the extracts by their detected timestamps and stitches them together.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SignalLabError};
use crate::transcript::timestamp::parse_timestamp;

pub use crate::transcript::timestamp::extract_timestamp;

/// Text recovered from one screenshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedText {
    pub text: String,
    pub detected_timestamp: Option<String>,
}

impl ExtractedText {
    /// Wrap raw OCR output, detecting its first timestamp
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let detected_timestamp = extract_timestamp(&text);
        Self {
            text,
            detected_timestamp,
        }
    }

    fn sort_key(&self) -> Option<NaiveDateTime> {
        self.detected_timestamp.as_deref().and_then(parse_timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub path: PathBuf,
}

impl ImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, image: &ImageSource) -> anyhow::Result<ExtractedText>;
}

/// Reads text an external OCR tool already wrote next to the image,
/// `shot.png` -> `shot.png.txt`, falling back to `shot.txt`.
pub struct SidecarTextExtractor;

impl SidecarTextExtractor {
    fn candidates(path: &Path) -> [PathBuf; 2] {
        let mut appended = path.as_os_str().to_owned();
        appended.push(".txt");
        [PathBuf::from(appended), path.with_extension("txt")]
    }
}

#[async_trait]
impl TextExtractor for SidecarTextExtractor {
    async fn extract(&self, image: &ImageSource) -> anyhow::Result<ExtractedText> {
        for candidate in Self::candidates(&image.path) {
            match tokio::fs::read_to_string(&candidate).await {
                Ok(text) => return Ok(ExtractedText::from_text(text)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "failed to read {}: {}",
                        candidate.display(),
                        e
                    ));
                }
            }
        }
        anyhow::bail!("no extracted text found for {}", image.path.display())
    }
}

/// Run `extractor` over every image in order. Failures are logged and skipped.
pub async fn extract_all(
    extractor: &dyn TextExtractor,
    images: &[ImageSource],
) -> Vec<ExtractedText> {
    let mut out = Vec::with_capacity(images.len());
    for image in images {
        match extractor.extract(image).await {
            Ok(extracted) => out.push(extracted),
            Err(e) => tracing::warn!("Skipping {}: {}", image.path.display(), e),
        }
    }
    tracing::debug!("extracted text from {}/{} images", out.len(), images.len());
    out
}

/// Order extracts chronologically and join them with a blank line.
///
/// Extracts without a parsable timestamp come first; ties keep input order.
/// Blank extracts are dropped.
pub fn assemble_transcript(extracts: &[ExtractedText]) -> String {
    let mut ordered: Vec<&ExtractedText> = extracts
        .iter()
        .filter(|e| !e.text.trim().is_empty())
        .collect();
    ordered.sort_by_key(|e| e.sort_key());
    ordered
        .iter()
        .map(|e| e.text.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Extract every image and assemble the result into one transcript.
///
/// Fails with [`SignalLabError::Extraction`] when no image yields any text.
pub async fn assemble_from_images(
    extractor: &dyn TextExtractor,
    images: &[ImageSource],
) -> Result<String> {
    let extracts = extract_all(extractor, images).await;
    let transcript = assemble_transcript(&extracts);
    if transcript.is_empty() {
        return Err(SignalLabError::Extraction {
            message: format!("no text could be extracted from {} image(s)", images.len()),
        });
    }
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct StubExtractor {
        texts: HashMap<PathBuf, &'static str>,
    }

    #[async_trait]
    impl TextExtractor for StubExtractor {
        async fn extract(&self, image: &ImageSource) -> anyhow::Result<ExtractedText> {
            self.texts
                .get(&image.path)
                .map(|t| ExtractedText::from_text(*t))
                .ok_or_else(|| anyhow::anyhow!("unreadable"))
        }
    }

    fn extract(text: &str, ts: Option<&str>) -> ExtractedText {
        ExtractedText {
            text: text.to_string(),
            detected_timestamp: ts.map(str::to_string),
        }
    }

    #[test]
    fn test_assemble_orders_by_timestamp() {
        let out = assemble_transcript(&[
            extract("C: third", Some("11/16/24, 9:00 AM")),
            extract("A: first", None),
            extract("   ", Some("11/01/24, 9:00 AM")),
            extract("B: second", Some("11/15/24, 10:00 PM")),
            extract("D: unparsable stamp", Some("yesterday")),
        ]);
        assert_eq!(
            out,
            "A: first\n\nD: unparsable stamp\n\nB: second\n\nC: third"
        );
    }

    #[test]
    fn test_from_text_detects_timestamp() {
        let e = ExtractedText::from_text("[11/15/24, 9:32 PM] Alex: hi");
        assert_eq!(e.detected_timestamp.as_deref(), Some("11/15/24, 9:32 PM"));
        assert_eq!(ExtractedText::from_text("no clock here").detected_timestamp, None);
    }

    #[test]
    fn test_sidecar_candidates() {
        let [a, b] = SidecarTextExtractor::candidates(Path::new("shots/one.png"));
        assert_eq!(a, PathBuf::from("shots/one.png.txt"));
        assert_eq!(b, PathBuf::from("shots/one.txt"));
    }

    #[tokio::test]
    async fn test_extract_all_skips_failures() {
        let stub = StubExtractor {
            texts: HashMap::from([
                (PathBuf::from("a.png"), "Sam: 9:15 AM hey"),
                (PathBuf::from("c.png"), "You: sup"),
            ]),
        };
        let images = [
            ImageSource::new("a.png"),
            ImageSource::new("b.png"),
            ImageSource::new("c.png"),
        ];
        let out = extract_all(&stub, &images).await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].detected_timestamp.as_deref(), Some("9:15 AM"));
        assert_eq!(out[1].text, "You: sup");
    }

    #[tokio::test]
    async fn test_assemble_from_images() {
        let stub = StubExtractor {
            texts: HashMap::from([
                (PathBuf::from("late.png"), "[11/16/24, 9:00 AM] Sam: later"),
                (PathBuf::from("early.png"), "[11/15/24, 9:00 AM] Sam: earlier"),
                (PathBuf::from("blank.png"), "  "),
            ]),
        };
        let out = assemble_from_images(
            &stub,
            &[ImageSource::new("late.png"), ImageSource::new("early.png")],
        )
        .await
        .unwrap();
        assert!(out.starts_with("[11/15/24, 9:00 AM] Sam: earlier"));

        let err = assemble_from_images(
            &stub,
            &[ImageSource::new("blank.png"), ImageSource::new("gone.png")],
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SignalLabError::Extraction { .. }));
        assert!(err.to_string().contains("2 image(s)"));
    }

    #[tokio::test]
    async fn test_sidecar_missing_file_errors() {
        let err = SidecarTextExtractor
            .extract(&ImageSource::new("/nonexistent/dir/shot.png"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no extracted text"));
    }
}
