pub mod block_quote;
pub mod code_fence;
pub mod list_item;

pub use block_quote::{BlockQuote, Quote};
pub use code_fence::{CodeFence, FenceKind};
pub use list_item::{ListItem, ListMarker};
