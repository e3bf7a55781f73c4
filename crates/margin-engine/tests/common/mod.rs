#![allow(dead_code)]

use margin_engine::{GenerationError, GenerationRequest, RopeBuffer};

/// Builds a buffer from text with a `|` marking the cursor, or `[` and `]`
/// marking a selection.
pub fn buffer(marked: &str) -> RopeBuffer {
    if let Some(at) = marked.find('|') {
        let text = marked.replacen('|', "", 1);
        let mut buf = RopeBuffer::new(&text);
        buf.set_selection(at..at);
        return buf;
    }
    let start = marked.find('[').expect("cursor or selection marker");
    let end = marked.find(']').expect("closing selection marker") - 1;
    let text = marked.replacen('[', "", 1).replacen(']', "", 1);
    let mut buf = RopeBuffer::new(&text);
    buf.set_selection(start..end);
    buf
}

pub type Reply = Result<String, GenerationError>;

/// A generator that always answers `text`.
pub fn reply(text: &'static str) -> impl FnMut(&GenerationRequest) -> Reply {
    move |_: &GenerationRequest| Ok(text.to_string())
}
