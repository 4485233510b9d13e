//! Removal of invisible code points that break tokenization.

/// Outcome of sanitizing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizeOutcome {
    pub text: String,
    /// Number of code points removed.
    pub removed: usize,
}

impl SanitizeOutcome {
    /// Whether anything was removed.
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Whether `c` is stripped by [`sanitize`].
///
/// Zero-width space/non-joiner/joiner, word joiner, byte-order mark,
/// non-breaking space, and every C0/C1 control except `\t`, `\n` and `\r`.
pub fn is_invisible(c: char) -> bool {
    match c {
        '\t' | '\n' | '\r' => false,
        '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}' | '\u{00A0}' => true,
        c => c.is_control(),
    }
}

/// Strips invisible code points from the whole text.
///
/// Never touches visible characters and never changes the line count.
pub fn sanitize(text: &str) -> SanitizeOutcome {
    let removed = text.chars().filter(|c| is_invisible(*c)).count();
    if removed == 0 {
        return SanitizeOutcome {
            text: text.to_string(),
            removed,
        };
    }

    SanitizeOutcome {
        text: text.chars().filter(|c| !is_invisible(*c)).collect(),
        removed,
    }
}
