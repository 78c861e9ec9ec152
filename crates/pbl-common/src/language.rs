//! Source languages known to the compiler, keyed by file extension.

use serde::Serialize;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    Java,
}

impl Language {
    pub const ALL: &'static [Language] = &[Language::Java];

    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Java => "java",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Java => "Java",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
