//! Console capability probe.
//!
//! Box-drawing characters render everywhere except legacy Windows consoles,
//! where the tree falls back to ASCII connectors.

use crate::render::GlyphSet;

/// Choose the glyph set for the current standard output.
pub fn detect_glyph_set() -> GlyphSet {
    if console_supports_unicode() {
        GlyphSet::Unicode
    } else {
        GlyphSet::Ascii
    }
}

/// On Windows, a stdout whose console mode can be queried is a real console
/// (Windows Terminal, conhost with VT) that renders UTF-8 box drawing.
#[cfg(windows)]
fn console_supports_unicode() -> bool {
    use windows::Win32::System::Console::{
        GetConsoleMode, GetStdHandle, CONSOLE_MODE, STD_OUTPUT_HANDLE,
    };

    let handle = match unsafe { GetStdHandle(STD_OUTPUT_HANDLE) } {
        Ok(h) => h,
        Err(err) => {
            tracing::debug!("GetStdHandle failed: {err}");
            return false;
        }
    };
    let mut mode = CONSOLE_MODE::default();
    unsafe { GetConsoleMode(handle, &mut mode) }.is_ok()
}

#[cfg(not(windows))]
fn console_supports_unicode() -> bool {
    true
}
