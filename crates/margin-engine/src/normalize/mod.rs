//! # Content Normalization
//!
//! Independent passes that rewrite raw model output for its destination.
//! Each pass is a pure string function; the insertion planner decides which
//! passes run and in what order.
//!
//! - **`fence`**: drop a redundant outer fence, force one trailing newline
//! - **`spacing`**: trim blank lines at boundaries, match paragraph spacing
//! - **`list`**: re-derive output lines as items under a stub list line
//! - **`quote`**: strip model quote prefixes and apply the destination's

pub mod fence;
pub mod list;
pub mod quote;
pub mod spacing;

pub use fence::{ensure_single_trailing_newline, strip_outer_fence};
pub use list::rewrite_for_list_stub;
pub use quote::{continue_quote, reapply_quote_prefix};
pub use spacing::{
    normalize_paragraph_spacing, strip_leading_blank_lines, strip_trailing_blank_lines,
    trim_boundary_blank_lines,
};
