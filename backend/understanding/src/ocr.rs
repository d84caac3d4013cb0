//! Optical Character Recognition (OCR)
//!
//! Runs the `tesseract` CLI over uploaded images. PDFs are first rasterized
//! (first page only) with `pdftoppm`. The engine is probed once per process and
//! the result is shared by every request.

use std::path::{Path, PathBuf};

use aegis_core::document::extension_of;
use aegis_core::{AegisError, Document, DocumentKind, TextFragments, TextRecognizer};
use async_trait::async_trait;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Default rendering resolution for PDF pages.
pub const DEFAULT_DPI: u32 = 300;

/// Engine details captured by the one-time probe.
#[derive(Debug, Clone)]
pub struct EngineInfo {
    pub program: String,
    pub version: String,
}

static ENGINE: OnceCell<EngineInfo> = OnceCell::const_new();

/// Version string of the OCR engine, once it has been initialized.
pub fn engine_version() -> Option<&'static str> {
    ENGINE.get().map(|engine| engine.version.as_str())
}

/// External tool locations and OCR options.
#[derive(Debug, Clone)]
pub struct OcrSettings {
    pub tesseract_path: String,
    pub pdftoppm_path: String,
    /// Tesseract language pack, e.g. "eng".
    pub language: String,
    pub dpi: u32,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            tesseract_path: "tesseract".to_string(),
            pdftoppm_path: "pdftoppm".to_string(),
            language: "eng".to_string(),
            dpi: DEFAULT_DPI,
        }
    }
}

/// Reads images and PDFs through tesseract.
pub struct TesseractRecognizer {
    settings: OcrSettings,
}

impl TesseractRecognizer {
    pub fn new(settings: OcrSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &OcrSettings {
        &self.settings
    }

    /// Probe the engine on first use. A failed probe is not cached, so a
    /// later request tries again.
    pub async fn initialize(&self) -> Result<&'static EngineInfo, AegisError> {
        ENGINE
            .get_or_try_init(|| probe_engine(&self.settings.tesseract_path))
            .await
    }

    /// Rasterize the first page of a PDF into `workdir` and return the image path.
    async fn render_first_page(
        &self,
        document: &Document,
        workdir: &Path,
    ) -> Result<PathBuf, AegisError> {
        let pdf_path = workdir.join("input.pdf");
        tokio::fs::write(&pdf_path, &document.bytes).await?;

        let output_root = workdir.join("page");
        let output = Command::new(&self.settings.pdftoppm_path)
            .arg("-f")
            .arg("1")
            .arg("-l")
            .arg("1")
            .arg("-r")
            .arg(self.settings.dpi.to_string())
            .arg("-singlefile")
            .arg("-png")
            .arg(&pdf_path)
            .arg(&output_root)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AegisError::EngineUnavailable {
                program: self.settings.pdftoppm_path.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AegisError::Render {
                filename: document.filename.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let png_path = output_root.with_extension("png");
        if !png_path.exists() {
            return Err(AegisError::Render {
                filename: document.filename.clone(),
                message: "pdftoppm produced no image".to_string(),
            });
        }
        debug!(dpi = self.settings.dpi, "Rendered first PDF page");
        Ok(png_path)
    }

    async fn run_tesseract(&self, image_path: &Path) -> Result<String, AegisError> {
        let output = Command::new(&self.settings.tesseract_path)
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.settings.language)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| AegisError::EngineUnavailable {
                program: self.settings.tesseract_path.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AegisError::Recognition(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn supports(&self, kind: DocumentKind) -> bool {
        matches!(kind, DocumentKind::Pdf | DocumentKind::Image)
    }

    async fn recognize(&self, document: &Document) -> Result<TextFragments, AegisError> {
        if !self.supports(document.kind) {
            return Err(AegisError::UnsupportedFormat {
                extension: extension_of(&document.filename),
            });
        }
        self.initialize().await?;

        let workdir = tempfile::tempdir()?;
        let image_path = match document.kind {
            DocumentKind::Pdf => self.render_first_page(document, workdir.path()).await?,
            _ => {
                let extension = extension_of(&document.filename);
                let path = workdir.path().join(format!("input.{extension}"));
                tokio::fs::write(&path, &document.bytes).await?;
                path
            }
        };

        let text = self.run_tesseract(&image_path).await?;
        let fragments = split_fragments(&text);
        info!(
            kind = document.kind.as_str(),
            fragments = fragments.len(),
            "OCR complete"
        );
        Ok(fragments)
    }
}

async fn probe_engine(program: &str) -> Result<EngineInfo, AegisError> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .await
        .map_err(|e| {
            warn!(program, error = %e, "OCR engine not found");
            AegisError::EngineUnavailable {
                program: program.to_string(),
                reason: e.to_string(),
            }
        })?;

    if !output.status.success() {
        return Err(AegisError::EngineUnavailable {
            program: program.to_string(),
            reason: format!("`{program} --version` exited with {}", output.status),
        });
    }

    let version = parse_version(&output.stdout, &output.stderr);
    info!(program, version = %version, "OCR engine initialized");
    Ok(EngineInfo {
        program: program.to_string(),
        version,
    })
}

/// First line of the version banner; older tesseract builds print it to stderr.
fn parse_version(stdout: &[u8], stderr: &[u8]) -> String {
    let banner = if stdout.iter().any(|b| !b.is_ascii_whitespace()) {
        String::from_utf8_lossy(stdout)
    } else {
        String::from_utf8_lossy(stderr)
    };
    banner.lines().next().unwrap_or_default().trim().to_string()
}

/// Turn raw OCR output into fragments: one per non-blank line.
pub fn split_fragments(text: &str) -> TextFragments {
    TextFragments::from_lines(&text.replace('\u{0000}', ""))
}
