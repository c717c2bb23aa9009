//! Syntax layer for C# and Visual Basic.
//!
//! Green values ([`GreenNode`], [`GreenToken`]) are immutable and shared;
//! [`SyntaxTree`] lays a green root out in an arena with parents, ranges and
//! a line index. Conversion never mutates a tree: it builds new green nodes
//! with [`factory`] and wraps them in a new tree.

pub mod cs_kind;
pub mod factory;
pub mod green;
pub mod kind;
pub mod lexer;
pub mod tokens;
pub mod tree;
pub mod vb_kind;

pub use cs_kind::CsKind;
pub use green::{Annotation, GreenElement, GreenNode, GreenToken, Trivia, TriviaKind};
pub use kind::{Language, SyntaxKind};
pub use lexer::{Lexer, tokenize};
pub use tree::{ElementId, NodeId, SyntaxTree, TokenId};
pub use vb_kind::VbKind;

// Re-export Position and Span from base for convenience
pub use crate::base::{Position, Span};
