//! File-level entry points for reading archived work pages.
//!
//! Host frameworks hand this reader whole documents; discovery,
//! routing, and rendering stay on their side.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::extract;
use crate::util::decode_text;
use crate::work::Work;

/// File extensions this reader claims when registered with a site
/// generator.
pub const FILE_EXTENSIONS: &[&str] = &["htm", "html"];

/// Returns true if `path` has an extension this reader handles.
pub fn is_work_path<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            FILE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Read an archived work page from disk.
///
/// Bytes are decoded as UTF-8 with a Windows-1252 fallback before
/// extraction.
///
/// # Example
///
/// ```no_run
/// use ficread::read_work;
///
/// let work = read_work("works/123456.html")?;
/// println!("{} by {}", work.metadata.title, work.metadata.authors.join(", "));
/// # Ok::<(), ficread::Error>(())
/// ```
pub fn read_work<P: AsRef<Path>>(path: P) -> Result<Work> {
    let bytes = fs::read(path)?;
    let html = decode_text(&bytes);
    read_work_from_str(&html)
}

/// Extract a work from an in-memory document.
///
/// # Example
///
/// ```
/// use ficread::read_work_from_str;
///
/// let html = r#"<body><div class="meta"><h1>My Fic</h1></div><div id="chapters"><p>Hello</p></div></body>"#;
/// let work = read_work_from_str(html)?;
/// assert_eq!(work.metadata.title, "My Fic");
/// # Ok::<(), ficread::Error>(())
/// ```
pub fn read_work_from_str(html: &str) -> Result<Work> {
    extract::extract_work(html)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_is_work_path() {
        assert!(is_work_path("works/123456.html"));
        assert!(is_work_path("works/old.htm"));
        assert!(is_work_path("works/SHOUTY.HTML"));
        assert!(!is_work_path("works/123456.md"));
        assert!(!is_work_path("works/123456"));
    }

    #[test]
    fn test_read_work_matches_in_memory_extraction() {
        let html = r#"<body><div class="meta"><h1>On Disk</h1></div><div id="chapters"><p>Hi</p></div></body>"#;

        let mut file = tempfile::Builder::new()
            .suffix(".html")
            .tempfile()
            .unwrap();
        file.write_all(html.as_bytes()).unwrap();

        let from_file = read_work(file.path()).unwrap();
        let from_str = read_work_from_str(html).unwrap();
        assert_eq!(from_file, from_str);
        assert_eq!(from_file.metadata.title, "On Disk");
    }

    #[test]
    fn test_read_work_decodes_windows_1252() {
        // é as a single 0xE9 byte, as pre-Unicode dumps have it.
        let mut file = tempfile::Builder::new()
            .suffix(".html")
            .tempfile()
            .unwrap();
        file.write_all(b"<body><div class=\"meta\"><h1>Caf\xE9</h1></div></body>")
            .unwrap();

        let work = read_work(file.path()).unwrap();
        assert_eq!(work.metadata.title, "Café");
    }
}
