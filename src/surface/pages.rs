//! Inline documents rendered into a surface instead of a navigation.

// ============================================================================
// Public Functions
// ============================================================================

/// Builds the "file does not exist" document for a missing local asset.
///
/// # Arguments
///
/// * `file_name` - Asset name relative to the local root
/// * `local_root` - Local root shown to the user, e.g. `/bolt/`
#[must_use]
pub fn missing_file_document(file_name: &str, local_root: &str) -> String {
    let file = escape_html(file_name);
    let root = escape_html(local_root);
    format!(
        r##"<!doctype html>
<html>
<head><meta charset="UTF-8"><title>Bolt file missing</title></head>
<body style="font-family:Arial, sans-serif; background:#f7f7f9; color:#0f172a; padding:24px;">
  <h2 style="margin:0 0 12px;">Bolt file does not exist</h2>
  <p style="margin:0;">Could not find <strong>{file}</strong> inside <code>{root}</code>.</p>
</body>
</html>"##
    )
}

// ============================================================================
// Internal Functions
// ============================================================================

/// Escapes text for HTML element content.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
