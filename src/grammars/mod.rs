//! Built-in grammars

mod c;
mod ini;

pub use c::C;
pub use ini::INI;

use crate::engine::Engine;
use crate::registry::GrammarInfo;

/// Descriptions of the built-in grammars, in auto-detection preference order
#[must_use]
pub fn builtin() -> Vec<GrammarInfo> {
    vec![
        GrammarInfo::new(&C)
            .with_names(["c", "cpp", "c++"])
            .with_mime_types(["text/x-csrc", "text/x-chdr", "text/x-c++src", "text/x-c++hdr"])
            .with_file_names(["*.c", "*.h", "*.cc", "*.cpp", "*.cxx", "*.hh", "*.hpp"]),
        GrammarInfo::new(&INI)
            .with_names(["ini", "cfg", "dosini"])
            .with_mime_types(["text/x-ini"])
            .with_file_names(["*.ini", "*.cfg", "*.inf", ".editorconfig", ".gitconfig"]),
    ]
}

fn starts_with(engine: &Engine<'_>, c: u8) -> bool {
    engine.remaining_text().as_bytes().first() == Some(&c)
}

fn starts_with_whitespace(engine: &Engine<'_>) -> bool {
    engine
        .remaining_text()
        .as_bytes()
        .first()
        .is_some_and(|&c| crate::cursor::is_whitespace(c))
}
