/// A blockquote line split at the end of its prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Leading whitespace, the `>` run and at most one following space,
    /// exactly as written.
    pub prefix: String,
    /// Everything after the prefix.
    pub content: String,
    /// True when nothing but whitespace follows the prefix.
    pub is_stub: bool,
}

impl Quote {
    /// Prepends this line's exact prefix to `content`.
    pub fn apply(&self, content: &str) -> String {
        format!("{}{}", self.prefix, content)
    }
}

/// Blockquote syntax with owned delimiter constant.
///
/// All blockquote-related syntax knowledge lives here, not scattered in
/// classifier or normalizer code.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Measures the blockquote prefix at the start of `s`, returning
    /// `(depth, byte_len)`.
    ///
    /// The prefix is leading whitespace, one or more `>`, then at most one
    /// space. `> > spaced` therefore has a one-level prefix whose content
    /// starts with another `>`.
    pub fn prefix_len(s: &str) -> Option<(u8, usize)> {
        let b = s.as_bytes();
        let mut i = 0usize;

        while i < b.len() && matches!(b[i], b' ' | b'\t') {
            i += 1;
        }
        let run_start = i;
        while i < b.len() && b[i] == (Self::PREFIX as u8) {
            i += 1;
        }
        if i == run_start {
            return None;
        }
        let depth = u8::try_from(i - run_start).unwrap_or(u8::MAX);
        if i < b.len() && b[i] == b' ' {
            i += 1;
        }
        Some((depth, i))
    }

    pub fn parse(line: &str) -> Option<Quote> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (_, len) = Self::prefix_len(line)?;
        let (prefix, content) = line.split_at(len);
        Some(Quote {
            prefix: prefix.to_string(),
            content: content.to_string(),
            is_stub: content.trim().is_empty(),
        })
    }

    /// Removes one blockquote prefix from `line`, if it has one.
    pub fn strip(line: &str) -> &str {
        match Self::prefix_len(line) {
            Some((_, len)) => &line[len..],
            None => line,
        }
    }
}
