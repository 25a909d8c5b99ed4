//! Runtime font registration for the ab_glyph text path.
//!
//! `ab_glyph` doesn't discover OS fonts; every family named in a
//! [`FontSpec`](crate::style::FontSpec) must be registered first.

use log::debug;
use plotters::style::FontStyle;
use std::path::Path;

use crate::error::{GraphError, Result};

/// Register font bytes under `family`.
pub fn register_font_bytes(family: &str, bytes: &'static [u8]) -> Result<()> {
    plotters::style::register_font(family, FontStyle::Normal, bytes)
        .map_err(|_| GraphError::Font(format!("{family}: not a valid TrueType/OpenType font")))?;
    debug!("registered font family {family:?} ({} bytes)", bytes.len());
    Ok(())
}

/// Read a font file and register it under `family`.
///
/// Font data stays alive for the rest of the process.
pub fn register_font_file<P: AsRef<Path>>(family: &str, path: P) -> Result<()> {
    let bytes = std::fs::read(path.as_ref())?;
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font_bytes(family, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let e = register_font_bytes("graphing-garbage", b"not a font");
        assert!(matches!(e, Err(GraphError::Font(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let e = register_font_file("graphing-missing", "/definitely/not/here.ttf");
        assert!(matches!(e, Err(GraphError::Io(_))));
    }
}
