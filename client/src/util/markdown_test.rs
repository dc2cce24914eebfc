use super::*;

#[test]
fn renders_emphasis_and_lists() {
    let html = render_markdown_html("**North** leads:\n\n- north: 3\n- south: 1\n");
    assert!(html.contains("<strong>North</strong>"));
    assert!(html.contains("<li>north: 3</li>"));
}

#[test]
fn renders_gfm_tables() {
    let html = render_markdown_html("| region | total |\n|---|---|\n| north | 3 |\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("<td>north</td>"));
}

#[test]
fn drops_raw_html() {
    let html = render_markdown_html("hello <script>alert(1)</script> world\n\n<div>block</div>\n");
    assert!(!html.contains("<script>"));
    assert!(!html.contains("<div>"));
    assert!(html.contains("hello"));
}

#[test]
fn partial_markdown_renders_while_streaming() {
    let html = render_markdown_html("Total is **12");
    assert!(html.contains("Total is"));
}

#[test]
fn html_inside_table_cells_is_dropped() {
    let html = render_markdown_html("| region |\n|---|\n| <img src=x onerror=alert(1)> north |\n");
    assert!(!html.contains("<img"));
    assert!(!html.contains("onerror"));
    assert!(html.contains("north"));
}
