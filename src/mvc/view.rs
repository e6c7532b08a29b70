//! View references
//!
//! A view reference is a relative path below the views root. Validation
//! happens once at construction so nothing downstream can escape the root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Validated relative path of a view file, e.g. `home/index.html`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewReference(String);

impl ViewReference {
    pub fn new(view: impl Into<String>) -> Result<Self, &'static str> {
        let view = view.into();
        check_relative(&view)?;
        Ok(Self(view))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against the views root
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

impl fmt::Display for ViewReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject anything that is empty, absolute or walks outside its root
pub fn check_relative(path: &str) -> Result<(), &'static str> {
    if path.trim().is_empty() {
        return Err("empty path");
    }
    if path.contains('\0') {
        return Err("contains a NUL byte");
    }
    for component in Path::new(path).components() {
        match component {
            Component::Normal(_) => {}
            Component::ParentDir => return Err("parent directory traversal"),
            Component::CurDir => return Err("current directory component"),
            Component::RootDir | Component::Prefix(_) => return Err("absolute path"),
        }
    }
    Ok(())
}
