use std::path::{Path, PathBuf};

use super::Loader;

const ICON_EXTENSIONS: [&str; 2] = ["png", "svg"];

impl Loader {
    /// Looks up `<icons_dir>/<display_name>.png` (or `.svg`) and returns its
    /// absolute path.
    pub fn find_icon(icons_dir: &Path, display_name: &str) -> Option<String> {
        if display_name.is_empty() || !icons_dir.is_dir() {
            return None;
        }
        ICON_EXTENSIONS
            .iter()
            .map(|ext| icons_dir.join(format!("{}.{}", display_name, ext)))
            .find(|path| path.is_file())
            .map(|path| absolute(&path))
            .and_then(|path| path.to_str().map(str::to_string))
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_png_by_display_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Editor.png"), b"png").unwrap();

        let found = Loader::find_icon(dir.path(), "Editor").unwrap();
        assert!(Path::new(&found).is_absolute());
        assert!(found.ends_with("Editor.png"));
    }

    #[test]
    fn prefers_png_over_svg() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Mail.svg"), b"<svg/>").unwrap();
        assert!(Loader::find_icon(dir.path(), "Mail").unwrap().ends_with("Mail.svg"));

        fs::write(dir.path().join("Mail.png"), b"png").unwrap();
        assert!(Loader::find_icon(dir.path(), "Mail").unwrap().ends_with("Mail.png"));
    }

    #[test]
    fn missing_icon_or_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Loader::find_icon(dir.path(), "Nothing"), None);
        assert_eq!(Loader::find_icon(&dir.path().join("absent"), "Editor"), None);
        assert_eq!(Loader::find_icon(dir.path(), ""), None);
    }
}
