use crate::classify::{ListItem, ListMarker};

use super::spacing::{strip_leading_blank_lines, strip_trailing_blank_lines};

/// Re-derives model output as list content under a stub list line.
///
/// The first line takes the stub's own prefix, dropping any marker the model
/// wrote. Later lines that carry a marker keep it but nest under the stub's
/// indent; lines without one are continuation text aligned under the stub's
/// text column.
pub fn rewrite_for_list_stub(content: &str, stub: &ListItem) -> String {
    let body = strip_trailing_blank_lines(strip_leading_blank_lines(content));
    let continuation = stub.continuation_indent();

    body.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                let text = match ListMarker::parse(line) {
                    Some(item) => item.content,
                    None => line.trim_start().to_string(),
                };
                return format!("{}{}", stub.prefix(), text);
            }
            if line.trim().is_empty() {
                return String::new();
            }
            match ListMarker::parse(line) {
                Some(_) => format!("{}{}", stub.indent, line),
                None => format!("{}{}", continuation, line.trim_start()),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
