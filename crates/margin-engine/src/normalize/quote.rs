use crate::classify::{BlockQuote, Quote};

use super::spacing::{strip_leading_blank_lines, strip_trailing_blank_lines};

fn quote_body(content: &str) -> Option<impl Iterator<Item = &str>> {
    let body = strip_trailing_blank_lines(strip_leading_blank_lines(content));
    if body.trim().is_empty() {
        return None;
    }
    Some(
        body.split('\n')
            .map(|line| BlockQuote::strip(line.trim_end_matches('\r'))),
    )
}

/// Rewrites output for a prefix-only blockquote line: any prefix the model
/// added is stripped, then the destination's exact prefix goes on every line.
pub fn reapply_quote_prefix(content: &str, quote: &Quote) -> String {
    let Some(lines) = quote_body(content) else {
        return String::new();
    };
    lines
        .map(|line| quote.apply(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrites output for insertion into a blockquote line that already has text.
///
/// At the end of the line the output starts a new quoted line; mid-line its
/// first line continues inline and the rest are quoted below.
pub fn continue_quote(content: &str, quote: &Quote, at_line_end: bool) -> String {
    let Some(lines) = quote_body(content) else {
        return String::new();
    };
    let mut out = String::new();
    for (i, line) in lines.enumerate() {
        if i == 0 && !at_line_end {
            out.push_str(line);
            continue;
        }
        out.push('\n');
        out.push_str(&quote.apply(line));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quote(line: &str) -> Quote {
        BlockQuote::parse(line).unwrap()
    }

    #[test]
    fn prefix_is_not_doubled() {
        assert_eq!(
            reapply_quote_prefix("> Already quoted", &quote("> ")),
            "> Already quoted"
        );
    }

    #[test]
    fn missing_prefix_is_added() {
        assert_eq!(
            reapply_quote_prefix("one\n> two\n\nfour", &quote(">> ")),
            ">> one\n>> two\n>> \n>> four"
        );
    }

    #[test]
    fn indented_prefix_is_reapplied_verbatim() {
        assert_eq!(reapply_quote_prefix("x", &quote("  >")), "  >x");
    }

    #[test]
    fn continuation_at_line_end_starts_new_line() {
        assert_eq!(
            continue_quote("> more\nlines", &quote("> Quote"), true),
            "\n> more\n> lines"
        );
    }

    #[test]
    fn continuation_mid_line_stays_inline() {
        assert_eq!(
            continue_quote("inline\nnext", &quote("> Quote"), false),
            "inline\n> next"
        );
    }

    #[test]
    fn empty_continuation_is_empty() {
        assert_eq!(continue_quote("\n\n", &quote("> Quote"), true), "");
    }
}
