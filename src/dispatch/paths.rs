// src/dispatch/paths.rs

//! Pure path helpers used when turning an intent into a wire payload.
//!
//! Both functions are total over strings; they never fail and never touch
//! the filesystem.

/// Parent directory of `path`, rebuilt segment by segment.
///
/// Splits on `/`, drops the empty leading segment and the final segment
/// (the file name), and rejoins the rest with a leading separator.
///
/// A path with fewer than two meaningful segments (a file directly at the
/// watch root, e.g. `/song.mp3`) yields the empty string: the watch root
/// itself. The remote treats an empty path as "the library root", so the
/// degenerate value is kept as-is rather than mapped to a sentinel.
pub fn parent_folder(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 3 {
        return String::new();
    }

    let mut folder = String::new();
    for segment in &segments[1..segments.len() - 1] {
        folder.push('/');
        folder.push_str(segment);
    }
    folder
}

/// Escape every literal single quote for the remote's query processing.
///
/// The remote treats unescaped quotes as unsafe, so `'` becomes `\\'`.
/// This is applied exactly once, immediately before payload construction;
/// re-escaping an already escaped string is not supported.
pub fn escape(path: &str) -> String {
    path.replace('\'', "\\\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_folder_drops_file_name() {
        assert_eq!(parent_folder("/music/Artist/song.mp3"), "/music/Artist");
    }

    #[test]
    fn parent_folder_of_nested_album() {
        assert_eq!(
            parent_folder("/lib/Genre/Artist/Album/01.mp3"),
            "/lib/Genre/Artist/Album"
        );
    }

    #[test]
    fn parent_folder_at_watch_root_is_empty() {
        // File directly under the root resolves to the root itself,
        // represented by the empty string.
        assert_eq!(parent_folder("/song.mp3"), "");
    }

    #[test]
    fn parent_folder_of_relative_path_has_no_leading_segment() {
        // The first segment is always discarded, mirroring the split on
        // the leading separator of absolute paths.
        assert_eq!(parent_folder("a/b/c.mp3"), "/b");
    }

    #[test]
    fn escape_replaces_single_quotes() {
        assert_eq!(escape("O'Brien/track.mp3"), "O\\\\'Brien/track.mp3");
    }

    #[test]
    fn escape_handles_multiple_quotes() {
        assert_eq!(escape("/a'b'c"), "/a\\\\'b\\\\'c");
    }

    #[test]
    fn escape_leaves_clean_paths_untouched() {
        assert_eq!(escape("/music/Artist/song.mp3"), "/music/Artist/song.mp3");
    }
}
