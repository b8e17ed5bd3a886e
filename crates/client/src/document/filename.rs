//! Download filename sanitization.

/// Filename used when a title has no usable characters.
pub const FALLBACK_FILENAME: &str = "document.pdf";

/// Turn a display title into a safe `.pdf` filename.
///
/// Every character outside `[A-Za-z0-9]` becomes `_` and the result is
/// lowercased.
pub fn sanitize_filename(title: &str) -> String {
    if title.trim().is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();

    format!("{stem}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_order_title() {
        assert_eq!(sanitize_filename("Order dated 1/2/2024"), "order_dated_1_2_2024.pdf");
    }

    #[test]
    fn test_sanitize_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "______etc_passwd.pdf");
    }

    #[test]
    fn test_sanitize_non_ascii() {
        assert_eq!(sanitize_filename("Notice – final"), "notice___final.pdf");
    }

    #[test]
    fn test_sanitize_empty() {
        assert_eq!(sanitize_filename("  "), FALLBACK_FILENAME);
    }
}
