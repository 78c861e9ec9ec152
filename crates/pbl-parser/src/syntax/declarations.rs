//! Packages, imports, modifiers, annotations and type references.

use pbl_scanner::TokenId;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
    /// No access keyword.
    #[default]
    Package,
}

impl AccessModifier {
    #[must_use]
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "public" => Some(Self::Public),
            "protected" => Some(Self::Protected),
            "private" => Some(Self::Private),
            _ => None,
        }
    }
}

/// Access level and modifier flags on a declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub access: AccessModifier,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
}

impl Modifiers {
    /// Apply a modifier keyword. Returns `false` if `word` is not one.
    pub fn apply(&mut self, word: &str) -> bool {
        if let Some(access) = AccessModifier::from_keyword(word) {
            self.access = access;
            return true;
        }
        match word {
            "static" => self.is_static = true,
            "final" => self.is_final = true,
            "abstract" => self.is_abstract = true,
            _ => return false,
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    pub paths: Vec<String>,
    pub token: TokenId,
}

impl Package {
    #[must_use]
    pub fn path(&self) -> String {
        self.paths.join(".")
    }
}

/// An import statement.
///
/// `import a.b.C;` has paths `[a, b, C]` and default import `C`.
/// `import static a.b.C.m;` has default import `C` (the imported class).
/// `import a.b.*;` is a wildcard with no default import.
/// `import a.b.{ C, D };` lists non-default imports.
#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    pub paths: Vec<String>,
    pub default_import: Option<String>,
    pub non_default_imports: Vec<String>,
    pub is_wildcard: bool,
    pub is_static: bool,
    pub token: TokenId,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<super::Statement>,
    pub token: TokenId,
}

/// A type reference such as `java.util.List<String>[]`.
#[derive(Clone, Debug, PartialEq)]
pub struct JavaType {
    pub namespace_chain: Vec<String>,
    pub generic_types: Vec<JavaType>,
    pub array_dimensions: u32,
    pub token: TokenId,
}

impl JavaType {
    #[must_use]
    pub fn named(name: impl Into<String>, token: TokenId) -> Self {
        Self {
            namespace_chain: vec![name.into()],
            generic_types: Vec::new(),
            array_dimensions: 0,
            token,
        }
    }

    /// The last segment of the namespace chain.
    #[must_use]
    pub fn name(&self) -> &str {
        self.namespace_chain.last().map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_namespaced(&self) -> bool {
        self.namespace_chain.len() > 1
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.array_dimensions > 0
    }

    /// The same type with one fewer array dimension.
    #[must_use]
    pub fn element_type(&self) -> Self {
        Self {
            array_dimensions: self.array_dimensions.saturating_sub(1),
            ..self.clone()
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.namespace_chain.join("."))?;
        if !self.generic_types.is_empty() {
            f.write_str("<")?;
            for (i, generic) in self.generic_types.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{generic}")?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
