use std::path::{Path, PathBuf};

/// Where the LRC file for `file` lives: `<root>/<stem>.lrc`.
///
/// Only the final extension is stripped and directories are dropped, so
/// `/x/a.b.mp3` maps to `<root>/a.b.lrc`. Returns `None` when `file` has no
/// file name component.
///
/// Everything from the last dot of the name is the extension, so a bare
/// `.mp3` has an empty stem and maps to `<root>/.lrc`.
pub fn lrc_path(root: &Path, file: &str) -> Option<PathBuf> {
    let name = Path::new(file).file_name()?.to_string_lossy();
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => &name[..],
    };
    Some(root.join(format!("{}.lrc", stem)))
}

/// `<home>/Music/Music`
pub fn default_root(home: &Path) -> PathBuf {
    home.join("Music").join("Music")
}
