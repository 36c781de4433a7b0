//! Comment injection into downloaded files.

use std::path::Path;

use crate::{CoreError, Result};

const PHP_OPEN_TAG: &[u8] = b"<?php";

/// How a comment is injected, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    Php,
    Css,
    Js,
}

impl CommentStyle {
    pub fn for_path(path: &Path) -> Option<Self> {
        let lower = path.to_string_lossy().to_lowercase();
        if lower.ends_with(".php") {
            Some(Self::Php)
        } else if lower.ends_with(".css") {
            Some(Self::Css)
        } else if lower.ends_with(".js") {
            Some(Self::Js)
        } else {
            None
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Php => "PHP",
            Self::Css => "CSS",
            Self::Js => "JS",
        }
    }

    /// New content with the comment, or `None` when left untouched.
    pub fn inject(self, content: &[u8], comment: &str) -> Option<Vec<u8>> {
        match self {
            Self::Php => {
                let rest = content.strip_prefix(PHP_OPEN_TAG)?;
                let mut output = PHP_OPEN_TAG.to_vec();
                output.extend_from_slice(format!("\r\n/* {comment} */").as_bytes());
                output.extend_from_slice(rest);
                Some(output)
            }
            Self::Css | Self::Js => {
                let mut output = format!("/* {comment} */\r\n").into_bytes();
                output.extend_from_slice(content);
                Some(output)
            }
        }
    }
}

/// Inject a comment into a file in place.
///
/// Returns the applied style, if any.
pub async fn apply_comment(path: &Path, comment: &str) -> Result<Option<CommentStyle>> {
    let Some(style) = CommentStyle::for_path(path) else {
        return Ok(None);
    };

    let io_error = |e: std::io::Error| CoreError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let content = tokio::fs::read(path).await.map_err(io_error)?;
    match style.inject(&content, comment) {
        Some(output) => {
            tokio::fs::write(path, output).await.map_err(io_error)?;
            Ok(Some(style))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::{apply_comment, CommentStyle};

    #[test]
    fn test_style_for_path() {
        assert_eq!(CommentStyle::for_path(Path::new("a/index.PHP")), Some(CommentStyle::Php));
        assert_eq!(CommentStyle::for_path(Path::new("style.Css")), Some(CommentStyle::Css));
        assert_eq!(CommentStyle::for_path(Path::new("app.js")), Some(CommentStyle::Js));
        assert_eq!(CommentStyle::for_path(Path::new("data.json")), None);
        assert_eq!(CommentStyle::for_path(Path::new("readme.md")), None);
    }

    #[test]
    fn test_inject_php() {
        assert_eq!(
            CommentStyle::Php.inject(b"<?php echo 1;", "synced").unwrap(),
            b"<?php\r\n/* synced */ echo 1;".to_vec()
        );
    }

    #[test]
    fn test_inject_php_without_open_tag() {
        assert_eq!(CommentStyle::Php.inject(b"<html><?php", "synced"), None);
        assert_eq!(CommentStyle::Php.inject(b"<?ph", "synced"), None);
    }

    #[test]
    fn test_inject_css_and_js() {
        assert_eq!(
            CommentStyle::Css.inject(b"body {}", "synced").unwrap(),
            b"/* synced */\r\nbody {}".to_vec()
        );
        assert_eq!(
            CommentStyle::Js.inject(b"", "synced").unwrap(),
            b"/* synced */\r\n".to_vec()
        );
    }

    #[tokio::test]
    async fn test_apply_comment() {
        let dir = tempfile::tempdir().unwrap();

        let php = dir.path().join("index.php");
        std::fs::write(&php, "<?php\necho 1;").unwrap();
        assert_eq!(
            apply_comment(&php, "synced").await.unwrap(),
            Some(CommentStyle::Php)
        );
        assert_eq!(
            std::fs::read_to_string(&php).unwrap(),
            "<?php\r\n/* synced */\necho 1;"
        );

        let html_php = dir.path().join("page.php");
        std::fs::write(&html_php, "<html></html>").unwrap();
        assert_eq!(apply_comment(&html_php, "synced").await.unwrap(), None);
        assert_eq!(std::fs::read_to_string(&html_php).unwrap(), "<html></html>");

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "notes").unwrap();
        assert_eq!(apply_comment(&txt, "synced").await.unwrap(), None);
        assert_eq!(std::fs::read_to_string(&txt).unwrap(), "notes");
    }

    #[tokio::test]
    async fn test_apply_comment_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(apply_comment(&dir.path().join("missing.css"), "synced")
            .await
            .is_err());
    }
}
