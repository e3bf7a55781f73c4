//! End-to-end insertions through an edit session and a rope buffer.

mod common;

use common::{buffer, reply};
use margin_engine::{Buffer, EditSession, Mode, SilentStatus};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn insert(marked: &str, model: &'static str) -> String {
    let mut buf = buffer(marked);
    let mut session = EditSession::new(reply(model), SilentStatus);
    session.run(&mut buf, Mode::Insert, "continue").unwrap();
    buf.text()
}

#[rstest]
#[case::stub_bullet_takes_model_text(
    "Workspace\n- Desk\n- |\n",
    "- Mail handling",
    "Workspace\n- Desk\n- Mail handling\n"
)]
#[case::nested_stub_compounds_indent(
    "- Parent\n  - |\n",
    "- Child\n  - Grandchild",
    "- Parent\n  - Child\n    - Grandchild\n"
)]
#[case::quote_prefix_not_doubled(
    "> Quote\n> |\n",
    "> Already quoted",
    "> Quote\n> Already quoted\n"
)]
#[case::fence_blank_line_consumed(
    "```\ncode line\n|\n```\n",
    "```\nnewCall();\n```",
    "```\ncode line\nnewCall();\n```\n"
)]
#[case::paragraph_on_first_blank_line(
    "Para1\n|\n\nPara2\n",
    "Inserted paragraph",
    "Para1\n\nInserted paragraph\n\nPara2\n"
)]
#[case::paragraph_on_second_blank_line(
    "Para1\n\n|\nPara2\n",
    "Inserted paragraph",
    "Para1\n\nInserted paragraph\n\nPara2\n"
)]
#[case::filled_bullet_gets_a_newline(
    "- A\n- B\n- Quiet space|",
    "- Good lighting\n- Ergonomic chair",
    "- A\n- B\n- Quiet space\n- Good lighting\n- Ergonomic chair"
)]
#[case::checkbox_stub(
    "- [ ] |\n",
    "- [ ] Water plants",
    "- [ ] Water plants\n"
)]
#[case::ordered_stub(
    "1. First\n2. |",
    "2. Second",
    "1. First\n2. Second"
)]
#[case::fence_content_line_goes_before_closer(
    "~~~\nlet a = 1;|\n~~~\n",
    "let b = 2;",
    "~~~\nlet a = 1;\nlet b = 2;\n~~~\n"
)]
#[case::other_style_boundary_inside_fence_is_code(
    "```\n~~~\nx|\n```",
    "y",
    "```\n~~~\nx\ny\n```"
)]
#[case::bullet_without_space_is_a_list_item(
    "- A\n-B|",
    "- C",
    "- A\n-B\n- C"
)]
#[case::fenced_output_outside_fence_is_kept(
    "Example:\n|",
    "```\nx\n```",
    "Example:\n\n```\nx\n```"
)]
#[case::mid_sentence_is_verbatim(
    "The |cat sat.",
    "black ",
    "The black cat sat."
)]
#[case::model_blank_lines_do_not_stack(
    "Intro\n|\nOutro",
    "\n\nMiddle\n\n",
    "Intro\n\nMiddle\n\nOutro"
)]
fn insert_into_structure(#[case] marked: &str, #[case] model: &'static str, #[case] expected: &str) {
    assert_eq!(insert(marked, model), expected);
}

#[test]
fn replace_overwrites_selection_verbatim() {
    let mut buf = buffer("- [old item]\n");
    let mut session = EditSession::new(reply("- new item\n\n"), SilentStatus);
    let outcome = session.run(&mut buf, Mode::Replace, "rewrite").unwrap();
    assert_eq!(buf.text(), "- - new item\n\n\n");
    assert_eq!(outcome.text, "- new item\n\n");
}

#[test]
fn insert_with_selection_anchors_at_selection_end() {
    let mut buf = buffer("[Hello] world");
    let mut session = EditSession::new(reply(","), SilentStatus);
    session.run(&mut buf, Mode::Insert, "punctuate").unwrap();
    assert_eq!(buf.text(), "Hello, world");
}

#[test]
fn each_run_is_one_buffer_write() {
    let mut buf = buffer("- A\n- |\n- C");
    let mut session = EditSession::new(reply("- B\n"), SilentStatus);
    session.run(&mut buf, Mode::Insert, "fill").unwrap();
    assert_eq!(buf.version(), 1);
    assert_eq!(buf.text(), "- A\n- B\n- C");
}
