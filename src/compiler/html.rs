//! HTML whitespace collapsing.

/// Collapse insignificant whitespace.
///
/// Closing tags, the `<html>`/`<head>` opening tags and comments are kept so
/// the output stays structurally identical to the source. Inline CSS and JS
/// are left alone; stylesheets and scripts have their own tasks.
pub fn collapse_whitespace(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = true;
    cfg.minify_css = false;
    cfg.minify_js = false;
    minify_html::minify(html, &cfg)
}
