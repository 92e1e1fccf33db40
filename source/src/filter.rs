//! Comment and blank-line filtering.
//!
//! Produces the "active" lines of a configuration file: everything from the
//! comment character to the end of a line is dropped, trailing whitespace is
//! trimmed, and lines left blank are skipped. Leading whitespace is kept so
//! positional columns stay aligned with the header. Order is preserved.

/// Default comment character.
pub const COMMENT_CHAR: char = '#';

/// Returns the active lines of `content`, using `#` comments.
///
/// # Examples
///
/// ```
/// use mounttab_source::active_lines;
///
/// let content = "# /etc/fstab\n\n/dev/sda1 / xfs defaults 0 0  # root\n   \n";
/// assert_eq!(active_lines(content), vec!["/dev/sda1 / xfs defaults 0 0"]);
/// ```
pub fn active_lines(content: &str) -> Vec<&str> {
    active_lines_with(content, COMMENT_CHAR)
}

/// Returns the active lines of `content`, using `comment_char` comments.
pub fn active_lines_with(content: &str, comment_char: char) -> Vec<&str> {
    content
        .lines()
        .map(|line| match line.split_once(comment_char) {
            Some((active, _)) => active,
            None => line,
        })
        .map(str::trim_end)
        .filter(|line| !line.trim_start().is_empty())
        .collect()
}
