/// One file or directory inside an archive, as reported by `7zz l -slt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub size: u64,
    pub packed_size: u64,
    /// Modification time with the sub-second part removed.
    pub modified: String,
    pub attributes: String,
    pub is_directory: bool,
}

impl ArchiveEntry {
    pub fn is_image(&self) -> bool {
        const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".gif", ".bmp", ".webp"];
        let lower = self.name.to_lowercase();
        IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

/// Session password. Empty means "not known yet, try without one".
#[derive(Default, Clone)]
pub struct Password(pub Option<String>);

impl Password {
    pub fn set(&mut self, value: String) {
        self.0 = if value.is_empty() { None } else { Some(value) };
    }

    pub fn clear(&mut self) {
        self.0 = None;
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Password(***)"),
            None => f.write_str("Password(None)"),
        }
    }
}

/// Identifies the most recent user action. Background results carrying an
/// older token are discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct OperationToken(pub u64);

impl OperationToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}
