use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub trait PathExt {
    fn is_markup_file(&self) -> bool;
}

impl PathExt for Path {
    fn is_markup_file(&self) -> bool {
        self.extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("fxml"))
    }
}

/// Expands `~`, `$VAR` and `${VAR}` in a user-supplied path.
/// Unknown variables leave the input untouched.
pub fn expand_path(input: &str) -> PathBuf {
    let expanded = shellexpand::full(input.trim())
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| input.trim().to_string());
    PathBuf::from(expanded)
}
