/// Text recovered from one PDF: every non-empty page followed by a newline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    raw: String,
}

impl DocumentText {
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = String::new();
        for page in pages {
            let page = page.as_ref();
            if page.is_empty() {
                continue;
            }
            raw.push_str(page);
            raw.push('\n');
        }
        DocumentText { raw }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Trimmed lines, blank ones skipped. Form feeds and the Unicode line
    /// separators PDF extractors sometimes emit also end a line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw
            .split(is_line_break)
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn char_len(&self) -> usize {
        self.raw.chars().count()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl From<&str> for DocumentText {
    fn from(raw: &str) -> Self {
        DocumentText {
            raw: raw.to_string(),
        }
    }
}
