/// Join an upstream base URL and a path, normalising the slash between them.
/// Absolute `path`s are returned as-is.
pub fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_slash() {
        assert_eq!(
            join_url("https://app.beekeys.com/nigeria/", "/wp-json/geodir/v2/listings"),
            "https://app.beekeys.com/nigeria/wp-json/geodir/v2/listings"
        );
        assert_eq!(join_url("http://h", "x"), "http://h/x");
        assert_eq!(join_url("http://h", "/"), "http://h");
        assert_eq!(join_url("http://h", "https://other/x"), "https://other/x");
    }
}
