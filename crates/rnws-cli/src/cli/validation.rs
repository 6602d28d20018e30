/// Parse and validate an entry module name (`index.ios`, `app/main`).
///
/// The name becomes part of a URL path (`/<name>.bundle`), so it:
/// - cannot be empty
/// - cannot start with `/`
/// - cannot contain whitespace, `?` or `#`
///
/// # Errors
///
/// Returns an error message if the name is invalid.
pub fn parse_entry_name(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Entry name cannot be empty".to_string());
    }

    if s.starts_with('/') {
        return Err(format!(
            "Entry name must be relative to the project root: '{}'",
            s
        ));
    }

    if let Some(c) = s
        .chars()
        .find(|c| c.is_whitespace() || *c == '?' || *c == '#')
    {
        return Err(format!("Entry name contains invalid character {:?}: '{}'", c, s));
    }

    Ok(s.to_string())
}
