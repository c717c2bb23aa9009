//! The two-language kind vocabulary.

use std::fmt;

pub use super::cs_kind::CsKind;
pub use super::vb_kind::VbKind;

/// Source or target language of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Language {
    /// Curly-brace, case-sensitive.
    CSharp,
    /// Keyword-block, case-insensitive.
    VisualBasic,
}

impl Language {
    /// The language a conversion from `self` produces.
    pub fn other(self) -> Self {
        match self {
            Language::CSharp => Language::VisualBasic,
            Language::VisualBasic => Language::CSharp,
        }
    }

    pub fn is_case_sensitive(self) -> bool {
        matches!(self, Language::CSharp)
    }

    /// Compare two identifiers under this language's case rules.
    pub fn names_equal(self, a: &str, b: &str) -> bool {
        if self.is_case_sensitive() {
            a == b
        } else {
            a.eq_ignore_ascii_case(b)
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::CSharp => "C#",
            Language::VisualBasic => "Visual Basic",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A kind from either vocabulary.
///
/// Trees are single-language; a kind from the other vocabulary inside a tree
/// is reported as malformed input by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    Cs(CsKind),
    Vb(VbKind),
}

impl SyntaxKind {
    pub fn language(self) -> Language {
        match self {
            SyntaxKind::Cs(_) => Language::CSharp,
            SyntaxKind::Vb(_) => Language::VisualBasic,
        }
    }

    pub fn is_token(self) -> bool {
        match self {
            SyntaxKind::Cs(k) => k.is_token(),
            SyntaxKind::Vb(k) => k.is_token(),
        }
    }

    pub fn is_node(self) -> bool {
        match self {
            SyntaxKind::Cs(k) => k.is_node(),
            SyntaxKind::Vb(k) => k.is_node(),
        }
    }

    /// Reserved keyword of either language.
    pub fn is_keyword(self) -> bool {
        match self {
            SyntaxKind::Cs(k) => k.is_keyword(),
            SyntaxKind::Vb(k) => k.is_keyword(),
        }
    }

    pub fn is_contextual_keyword(self) -> bool {
        match self {
            SyntaxKind::Cs(k) => k.is_contextual_keyword(),
            SyntaxKind::Vb(k) => k.is_contextual_keyword(),
        }
    }

    /// Canonical spelling for fixed tokens and keywords.
    pub fn text(self) -> Option<&'static str> {
        match self {
            SyntaxKind::Cs(k) => k.text(),
            SyntaxKind::Vb(k) => k.text(),
        }
    }

    pub fn is_identifier(self) -> bool {
        matches!(self, SyntaxKind::Cs(CsKind::IDENT) | SyntaxKind::Vb(VbKind::IDENT))
    }

    pub fn is_end_of_file(self) -> bool {
        matches!(self, SyntaxKind::Cs(CsKind::EOF_TOKEN) | SyntaxKind::Vb(VbKind::EOF_TOKEN))
    }

    pub fn as_cs(self) -> Option<CsKind> {
        match self {
            SyntaxKind::Cs(k) => Some(k),
            SyntaxKind::Vb(_) => None,
        }
    }

    pub fn as_vb(self) -> Option<VbKind> {
        match self {
            SyntaxKind::Vb(k) => Some(k),
            SyntaxKind::Cs(_) => None,
        }
    }
}

impl From<CsKind> for SyntaxKind {
    fn from(kind: CsKind) -> Self {
        SyntaxKind::Cs(kind)
    }
}

impl From<VbKind> for SyntaxKind {
    fn from(kind: VbKind) -> Self {
        SyntaxKind::Vb(kind)
    }
}

impl PartialEq<CsKind> for SyntaxKind {
    fn eq(&self, other: &CsKind) -> bool {
        *self == SyntaxKind::Cs(*other)
    }
}

impl PartialEq<VbKind> for SyntaxKind {
    fn eq(&self, other: &VbKind) -> bool {
        *self == SyntaxKind::Vb(*other)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxKind::Cs(k) => write!(f, "C#::{k:?}"),
            SyntaxKind::Vb(k) => write!(f, "VB::{k:?}"),
        }
    }
}
