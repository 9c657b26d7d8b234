//! Monospace font loading and system font discovery.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use walkdir::WalkDir;

use crate::error::{ConversionError, Result};

/// Generic monospace families tried, in order, when the requested family
/// is not installed.
pub const FALLBACK_FAMILIES: &[&str] = &[
    "Menlo",
    "SF Mono",
    "Monaco",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "Ubuntu Mono",
    "Consolas",
    "Courier New",
    "FreeMono",
];

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// How deep to descend into each font directory.
const MAX_SEARCH_DEPTH: usize = 5;

/// A parsed font face, cheap to clone and share across threads.
#[derive(Clone)]
pub struct MonospaceFont {
    face: Arc<Font>,
    name: String,
}

impl std::fmt::Debug for MonospaceFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonospaceFont").field("name", &self.name).finish()
    }
}

impl MonospaceFont {
    /// Parse a font from in-memory TTF/OTF/TTC bytes (first face of a collection).
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let name = name.into();
        let face = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| {
            ConversionError::RenderFailure(format!("failed to parse font '{}': {}", name, e))
        })?;
        Ok(Self {
            face: Arc::new(face),
            name,
        })
    }

    /// Load a font file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ConversionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("font")
            .to_string();
        Self::from_bytes(name, &bytes)
    }

    /// Find and load `family` from the system font directories, falling
    /// back to the first installed face from [`FALLBACK_FAMILIES`].
    ///
    /// # Errors
    /// Returns [`ConversionError::RenderFailure`] if no candidate is installed.
    pub fn discover(family: &str) -> Result<Self> {
        let dirs = font_dirs();
        let candidates = std::iter::once(family)
            .chain(FALLBACK_FAMILIES.iter().copied().filter(|f| !f.eq_ignore_ascii_case(family)));

        for candidate in candidates {
            let Some(path) = find_font_file(&dirs, candidate) else {
                continue;
            };
            match Self::load(&path) {
                Ok(font) => {
                    if !candidate.eq_ignore_ascii_case(family) {
                        log::warn!(
                            "Font '{}' not found, falling back to '{}'",
                            family,
                            candidate
                        );
                    }
                    log::debug!("Using font {}", path.display());
                    return Ok(font);
                }
                Err(e) => log::warn!("Skipping unusable font {}: {}", path.display(), e),
            }
        }

        Err(ConversionError::RenderFailure(format!(
            "no monospace font available (looked for '{}' and {} fallbacks)",
            family,
            FALLBACK_FAMILIES.len()
        )))
    }

    /// Name of the font (file stem for fonts loaded from disk).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn face(&self) -> &Font {
        &self.face
    }
}

/// Directories searched for installed fonts, user directory first.
pub fn font_dirs() -> Vec<PathBuf> {
    let mut dirs_found = Vec::new();
    if let Some(user) = dirs::font_dir() {
        dirs_found.push(user);
    }
    if let Some(home) = dirs::home_dir() {
        dirs_found.push(home.join(".fonts"));
    }

    let system: &[&str] = if cfg!(target_os = "macos") {
        &["/System/Library/Fonts", "/Library/Fonts"]
    } else if cfg!(windows) {
        &["C:\\Windows\\Fonts"]
    } else {
        &["/usr/share/fonts", "/usr/local/share/fonts"]
    };
    dirs_found.extend(system.iter().map(PathBuf::from));

    dirs_found.retain(|d| d.is_dir());
    dirs_found
}

/// First font file under `dirs` whose name matches `family`.
fn find_font_file(dirs: &[PathBuf], family: &str) -> Option<PathBuf> {
    let wanted = normalize(family);
    dirs.iter().find_map(|dir| {
        WalkDir::new(dir)
            .max_depth(MAX_SEARCH_DEPTH)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .find(|path| is_font_file(path) && stem_matches(path, &wanted))
    })
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FONT_EXTENSIONS.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Accepts "Family", "Family-Regular", "Family Book" and similar.
fn stem_matches(path: &Path, wanted: &str) -> bool {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let stem = normalize(stem);
    match stem.strip_prefix(wanted) {
        Some(rest) => matches!(rest, "" | "regular" | "book" | "roman" | "medium"),
        None => false,
    }
}

/// Lowercase and drop separators: "DejaVu Sans-Mono" -> "dejavusansmono".
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
