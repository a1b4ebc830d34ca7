//! Display paths for report files.
//!
//! Reports list files relative to the directory they all share, so the
//! viewer shows `lib/util.js` instead of a long absolute path or URL.

/// Longest directory prefix (ending in `/`) shared by every non-empty path
///
/// Returns an empty string when the paths share no directory.
pub fn determine_common_root<'a>(files: impl IntoIterator<Item = &'a str>) -> String {
    let mut root: Option<&str> = None;

    for file in files.into_iter().filter(|f| !f.is_empty()) {
        let dir = match file.rfind('/') {
            Some(idx) => &file[..=idx],
            None => return String::new(),
        };

        root = Some(match root {
            None => dir,
            Some(current) => common_dir_prefix(current, dir),
        });
    }

    root.unwrap_or_default().to_string()
}

/// Shared prefix of two directory strings, cut back to a `/` boundary
fn common_dir_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let shared = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map(|((idx, c), _)| idx + c.len_utf8())
        .unwrap_or(0);

    match a[..shared].rfind('/') {
        Some(idx) => &a[..=idx],
        None => "",
    }
}

/// `file` with `root` stripped, or unchanged when it does not start with it
pub fn relative_path<'a>(file: &'a str, root: &str) -> &'a str {
    if root.is_empty() {
        return file;
    }
    file.strip_prefix(root).unwrap_or(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_root_of_sibling_dirs() {
        let root = determine_common_root(["/app/src/a.js", "/app/src/lib/b.js", "/app/test/c.js"]);
        assert_eq!(root, "/app/");
    }

    #[test]
    fn test_common_root_does_not_split_names() {
        let root = determine_common_root(["/app/src1/a.js", "/app/src2/b.js"]);
        assert_eq!(root, "/app/");
    }

    #[test]
    fn test_common_root_single_file() {
        assert_eq!(determine_common_root(["/app/src/a.js"]), "/app/src/");
    }

    #[test]
    fn test_common_root_ignores_unknown_key() {
        assert_eq!(determine_common_root(["", "/x/a.js", "/x/b.js"]), "/x/");
        assert_eq!(determine_common_root([""]), "");
    }

    #[test]
    fn test_common_root_urls_and_relative() {
        assert_eq!(
            determine_common_root(["https://a.com/js/x.js", "https://a.com/y.js"]),
            "https://a.com/"
        );
        assert_eq!(determine_common_root(["/app/a.js", "node:fs"]), "");
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(relative_path("/app/src/a.js", "/app/"), "src/a.js");
        assert_eq!(relative_path("node:fs", "/app/"), "node:fs");
        assert_eq!(relative_path("/app/a.js", ""), "/app/a.js");
    }
}
