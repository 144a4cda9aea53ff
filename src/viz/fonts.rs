//! Font discovery for the `ab_glyph` text path.
//!
//! `ab_glyph` does not look up OS fonts, so a TrueType file has to be registered under
//! the `sans-serif` family before anything with text is drawn. The file comes from (in
//! order) an explicit path, the `SPECIES_PLANTED_FONT` environment variable, or a list of
//! well-known system locations. A matching bold face is registered when one sits next to
//! the regular file.

use anyhow::{Result, anyhow};
use log::debug;
use plotters::style::FontStyle;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable naming a `.ttf` file to use for all chart text.
pub const FONT_ENV: &str = "SPECIES_PLANTED_FONT";

const CANDIDATES: [&str; 10] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Outcome of the one-time registration (path of the regular face, or why it failed).
static REGISTERED: OnceLock<std::result::Result<PathBuf, String>> = OnceLock::new();

/// First usable regular font file: `preferred`, then `$SPECIES_PLANTED_FONT`, then system paths.
pub fn discover_font(preferred: Option<&Path>) -> Option<PathBuf> {
    let env = std::env::var_os(FONT_ENV).map(PathBuf::from);
    preferred
        .map(Path::to_path_buf)
        .into_iter()
        .chain(env)
        .chain(CANDIDATES.iter().map(PathBuf::from))
        .find(|p| p.is_file())
}

/// Bold sibling of a regular face, e.g. `DejaVuSans.ttf` -> `DejaVuSans-Bold.ttf`.
fn bold_sibling(regular: &Path) -> Option<PathBuf> {
    let stem = regular.file_stem()?.to_str()?;
    let base = stem.strip_suffix("-Regular").unwrap_or(stem);
    let ext = regular.extension()?.to_str()?;
    [format!("{base}-Bold.{ext}"), format!("{base}bd.{ext}")]
        .into_iter()
        .map(|name| regular.with_file_name(name))
        .find(|p| p.is_file())
}

fn register(path: &Path, style: FontStyle) -> std::result::Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    // plotters keeps a 'static reference for the life of the process
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font("sans-serif", style, bytes)
        .map_err(|_| format!("invalid font {}", path.display()))
}

/// Register chart fonts once per process. Later calls return the first outcome, so a
/// different `preferred` path after the first call has no effect.
pub fn ensure_fonts_registered(preferred: Option<&Path>) -> Result<PathBuf> {
    REGISTERED
        .get_or_init(|| {
            let regular = discover_font(preferred).ok_or_else(|| {
                format!("no usable font found; pass --font or set {FONT_ENV} to a .ttf file")
            })?;
            register(&regular, FontStyle::Normal)?;
            if let Some(bold) = bold_sibling(&regular) {
                register(&bold, FontStyle::Bold)?;
                debug!("registered bold face {}", bold.display());
            }
            debug!("registered chart font {}", regular.display());
            Ok(regular)
        })
        .clone()
        .map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_path_wins_when_it_exists() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join("Custom.ttf");
        std::fs::write(&f, b"not really a font").unwrap();
        assert_eq!(discover_font(Some(&f)), Some(f));
    }

    #[test]
    fn garbage_bytes_are_rejected_as_font() {
        let dir = tempfile::tempdir().unwrap();
        let f = dir.path().join("Broken.ttf");
        std::fs::write(&f, b"not really a font").unwrap();
        let err = register(&f, FontStyle::Normal).unwrap_err();
        assert!(err.starts_with("invalid font"), "{err}");

        let missing = dir.path().join("Missing.ttf");
        assert!(register(&missing, FontStyle::Normal).unwrap_err().starts_with("reading"));
    }

    #[test]
    fn bold_sibling_naming() {
        let dir = tempfile::tempdir().unwrap();
        let regular = dir.path().join("LiberationSans-Regular.ttf");
        let bold = dir.path().join("LiberationSans-Bold.ttf");
        std::fs::write(&regular, b"").unwrap();
        assert_eq!(bold_sibling(&regular), None);
        std::fs::write(&bold, b"").unwrap();
        assert_eq!(bold_sibling(&regular), Some(bold));
    }
}
