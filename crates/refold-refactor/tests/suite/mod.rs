mod lookup;
mod replace_method_with_property;
mod split_if;
mod trivia_merge;

use refold_refactor::{Document, TextRange, TextSize};

/// Empty selection at the first occurrence of `needle`, shifted by `delta` bytes.
pub(crate) fn caret_at(src: &str, needle: &str, delta: usize) -> TextRange {
    let offset = src.find(needle).expect("needle in source") + delta;
    TextRange::empty(TextSize::from(offset as u32))
}

pub(crate) fn annotated_text(document: &Document, range: TextRange) -> String {
    document.text()[range].to_string()
}
