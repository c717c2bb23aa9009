use smol_str::SmolStr;
use thiserror::Error;

use crate::semantic::ModelError;
use crate::syntax::SyntaxKind;

/// Failures raised by conversion rules.
///
/// [`ConvertError::Unsupported`] and [`ConvertError::Internal`] are local:
/// the converter replaces the offending node with a stub and carries on.
/// The other two abandon the whole unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("no {target} equivalent for {kind}: {detail}")]
    Unsupported { kind: SyntaxKind, target: &'static str, detail: SmolStr },
    #[error("conversion of {kind} failed: {detail}")]
    Internal { kind: SyntaxKind, detail: SmolStr },
    #[error("malformed input: {0}")]
    Malformed(String),
    #[error("conversion cancelled")]
    Cancelled,
}

impl ConvertError {
    pub fn unsupported(kind: impl Into<SyntaxKind>, detail: impl Into<SmolStr>) -> Self {
        let kind = kind.into();
        ConvertError::Unsupported { kind, target: kind.language().other().name(), detail: detail.into() }
    }

    pub fn internal(kind: impl Into<SyntaxKind>, detail: impl Into<SmolStr>) -> Self {
        ConvertError::Internal { kind: kind.into(), detail: detail.into() }
    }

    /// Errors that only degrade the node they were raised for.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ConvertError::Unsupported { .. } | ConvertError::Internal { .. })
    }
}

impl From<ModelError> for ConvertError {
    fn from(error: ModelError) -> Self {
        ConvertError::Malformed(error.to_string())
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{CsKind, VbKind};

    #[test]
    fn test_unsupported_names_the_target_language() {
        let err = ConvertError::unsupported(CsKind::GOTO_STATEMENT, "labels");
        assert_eq!(err.to_string(), "no Visual Basic equivalent for C#::GOTO_STATEMENT: labels");
        assert!(err.is_recoverable());

        let err = ConvertError::unsupported(VbKind::WITH_BLOCK, "with blocks");
        assert!(err.to_string().starts_with("no C# equivalent"));
    }

    #[test]
    fn test_fatal_errors_are_not_recoverable() {
        assert!(!ConvertError::Cancelled.is_recoverable());
        assert!(!ConvertError::Malformed("x".into()).is_recoverable());
        let err: ConvertError = ModelError::TreeMismatch.into();
        assert!(matches!(err, ConvertError::Malformed(_)));
    }
}
