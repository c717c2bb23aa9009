//! Logos-based lexers for C# and Visual Basic.
//!
//! The raw [`Lexer`] yields every piece of input, trivia included. [`tokenize`]
//! attaches trivia to tokens the usual way: a token's trailing trivia runs up
//! to and including the first line break, everything after it leads the next
//! token. Directives always lead.
//!
//! Identifiers are resolved to keywords through the kind tables, so the lexer
//! and [`CsKind::text`] / [`VbKind::text`] cannot drift apart. Contextual
//! keywords stay identifiers.

use logos::Logos;
use text_size::TextSize;

use super::green::{GreenToken, Trivia, TriviaKind};
use super::{CsKind, Language, SyntaxKind, VbKind};

/// What a raw lexeme is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    Token(SyntaxKind),
    Trivia(TriviaKind),
}

/// A lexeme with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: LexKind,
    pub text: &'a str,
    pub offset: TextSize,
}

enum Inner<'a> {
    Cs(logos::Lexer<'a, CsLogosToken>),
    Vb(logos::Lexer<'a, VbLogosToken>),
}

/// Lexer wrapping the logos-generated tokenizers
pub struct Lexer<'a> {
    inner: Inner<'a>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(language: Language, input: &'a str) -> Self {
        let inner = match language {
            Language::CSharp => Inner::Cs(CsLogosToken::lexer(input)),
            Language::VisualBasic => Inner::Vb(VbLogosToken::lexer(input)),
        };
        Self { inner, offset: 0 }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (kind, text) = match &mut self.inner {
            Inner::Cs(lexer) => {
                let token = lexer.next()?;
                let text = lexer.slice();
                let kind = match token {
                    Ok(t) => t.classify(text),
                    Err(()) => LexKind::Token(CsKind::BAD_TOKEN.into()),
                };
                (kind, text)
            }
            Inner::Vb(lexer) => {
                let token = lexer.next()?;
                let text = lexer.slice();
                let kind = match token {
                    Ok(t) => t.classify(text),
                    Err(()) => LexKind::Token(VbKind::BAD_TOKEN.into()),
                };
                (kind, text)
            }
        };
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;
        Some(Token { kind, text, offset })
    }
}

/// Raw lexemes of `input`, trivia included.
pub fn lex(language: Language, input: &str) -> Vec<Token<'_>> {
    Lexer::new(language, input).collect()
}

/// Tokens of `input` with trivia attached, ending in an end-of-file token
/// that carries any trailing trivia of the text.
pub fn tokenize(language: Language, input: &str) -> Vec<GreenToken> {
    let eof: SyntaxKind = match language {
        Language::CSharp => CsKind::EOF_TOKEN.into(),
        Language::VisualBasic => VbKind::EOF_TOKEN.into(),
    };

    let mut out: Vec<GreenToken> = Vec::new();
    let mut leading: Vec<Trivia> = Vec::new();
    // Trailing trivia collects after a token until the first line break.
    let mut collecting_trailing = false;

    for lexeme in Lexer::new(language, input) {
        match lexeme.kind {
            LexKind::Token(kind) => {
                collecting_trailing = true;
                let token = GreenToken::new(kind, lexeme.text).with_leading_trivia(std::mem::take(&mut leading));
                out.push(token);
            }
            LexKind::Trivia(kind) => {
                let trivia = Trivia::new(kind, lexeme.text);
                let attach_trailing = collecting_trailing && kind != TriviaKind::Directive;
                match out.last_mut() {
                    Some(last) if attach_trailing => {
                        let mut trailing = last.trailing().to_vec();
                        trailing.push(trivia);
                        *last = last.clone().with_trailing_trivia(trailing);
                        if kind == TriviaKind::EndOfLine {
                            collecting_trailing = false;
                        }
                    }
                    _ => {
                        collecting_trailing = false;
                        leading.push(trivia);
                    }
                }
            }
        }
    }

    out.push(GreenToken::new(eof, "").with_leading_trivia(leading));
    out
}

/// The single token kind `text` lexes to, if it is exactly one token.
pub fn single_token_kind(language: Language, text: &str) -> Option<SyntaxKind> {
    let mut lexer = Lexer::new(language, text);
    let first = lexer.next()?;
    match (first.kind, lexer.next()) {
        (LexKind::Token(kind), None) => Some(kind),
        _ => None,
    }
}

/// True when `text` is a reserved keyword of `language` and must be escaped
/// to be used as an identifier.
pub fn is_reserved_word(language: Language, text: &str) -> bool {
    single_token_kind(language, text).is_some_and(SyntaxKind::is_keyword)
}

// ============================================================================
// C#
// ============================================================================

/// Logos token enum for C#
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum CsLogosToken {
    // Trivia
    #[regex(r"[ \t\f]+")]
    Whitespace,
    #[regex(r"\r?\n")]
    EndOfLine,
    #[regex(r"//[^\r\n]*")]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,
    #[regex(r"#[^\r\n]*")]
    Directive,

    // Literals and names
    #[regex(r"@?[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?([eE][+-]?[0-9]+)?[fFdDmMuUlL]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+[uUlL]*")]
    Number,
    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    String,
    #[regex(r"'([^'\\\r\n]|\\.)+'")]
    Char,

    // Multi-character punctuation
    #[token("::")]
    ColonColon,
    #[token("??")]
    QuestionQuestion,
    #[token("<<")]
    LtLt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("=>")]
    FatArrow,

    // Single-character punctuation
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
}

impl CsLogosToken {
    fn classify(self, text: &str) -> LexKind {
        use CsLogosToken as T;
        let kind = match self {
            T::Whitespace => return LexKind::Trivia(TriviaKind::Whitespace),
            T::EndOfLine => return LexKind::Trivia(TriviaKind::EndOfLine),
            T::LineComment => return LexKind::Trivia(TriviaKind::LineComment),
            T::BlockComment => return LexKind::Trivia(TriviaKind::BlockComment),
            T::Directive => return LexKind::Trivia(TriviaKind::Directive),
            T::Ident => CsKind::from_keyword_text(text)
                .filter(|k| k.is_keyword())
                .unwrap_or(CsKind::IDENT),
            T::Number => CsKind::NUMERIC_LITERAL,
            T::String => CsKind::STRING_LITERAL,
            T::Char => CsKind::CHAR_LITERAL,
            T::ColonColon => CsKind::COLON_COLON,
            T::QuestionQuestion => CsKind::QUESTION_QUESTION,
            T::LtLt => CsKind::LT_LT,
            T::LtEq => CsKind::LT_EQ,
            T::GtEq => CsKind::GT_EQ,
            T::EqEq => CsKind::EQ_EQ,
            T::BangEq => CsKind::BANG_EQ,
            T::PlusEq => CsKind::PLUS_EQ,
            T::MinusEq => CsKind::MINUS_EQ,
            T::StarEq => CsKind::STAR_EQ,
            T::SlashEq => CsKind::SLASH_EQ,
            T::PercentEq => CsKind::PERCENT_EQ,
            T::AmpEq => CsKind::AMP_EQ,
            T::PipeEq => CsKind::PIPE_EQ,
            T::CaretEq => CsKind::CARET_EQ,
            T::AmpAmp => CsKind::AMP_AMP,
            T::PipePipe => CsKind::PIPE_PIPE,
            T::PlusPlus => CsKind::PLUS_PLUS,
            T::MinusMinus => CsKind::MINUS_MINUS,
            T::FatArrow => CsKind::FAT_ARROW,
            T::LBrace => CsKind::L_BRACE,
            T::RBrace => CsKind::R_BRACE,
            T::LParen => CsKind::L_PAREN,
            T::RParen => CsKind::R_PAREN,
            T::LBracket => CsKind::L_BRACKET,
            T::RBracket => CsKind::R_BRACKET,
            T::Semicolon => CsKind::SEMICOLON,
            T::Comma => CsKind::COMMA,
            T::Dot => CsKind::DOT,
            T::Colon => CsKind::COLON,
            T::Question => CsKind::QUESTION,
            T::Lt => CsKind::LT,
            T::Gt => CsKind::GT,
            T::Eq => CsKind::EQ,
            T::Plus => CsKind::PLUS,
            T::Minus => CsKind::MINUS,
            T::Star => CsKind::STAR,
            T::Slash => CsKind::SLASH,
            T::Percent => CsKind::PERCENT,
            T::Amp => CsKind::AMP,
            T::Pipe => CsKind::PIPE,
            T::Caret => CsKind::CARET,
            T::Bang => CsKind::BANG,
            T::Tilde => CsKind::TILDE,
        };
        LexKind::Token(kind.into())
    }
}

// ============================================================================
// VISUAL BASIC
// ============================================================================

/// Logos token enum for Visual Basic
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum VbLogosToken {
    // Trivia
    #[regex(r"[ \t\f]+")]
    Whitespace,
    #[regex(r"\r?\n")]
    EndOfLine,
    #[regex(r"'[^\r\n]*")]
    LineComment,
    #[regex(r"#[a-zA-Z][^\r\n]*")]
    Directive,

    // Literals and names
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
    #[regex(r"\[[a-zA-Z_][a-zA-Z0-9_]*\]")]
    EscapedIdent,
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?([uU]?[sSiIlL]|[dDfFrR])?")]
    #[regex(r"&[hH][0-9a-fA-F]+([uU]?[sSiIlL])?")]
    Number,
    #[regex(r#""([^"\r\n]|"")*""#)]
    String,
    #[regex(r#""([^"\r\n]|"")"[cC]"#)]
    Char,

    // Multi-character punctuation
    #[token("<>")]
    LtGt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("\\=")]
    BackslashEq,
    #[token("&=")]
    AmpEq,
    #[token(":=")]
    ColonEq,

    // Single-character punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("\\")]
    Backslash,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
}

impl VbLogosToken {
    fn classify(self, text: &str) -> LexKind {
        use VbLogosToken as T;
        let kind = match self {
            T::Whitespace => return LexKind::Trivia(TriviaKind::Whitespace),
            T::EndOfLine => return LexKind::Trivia(TriviaKind::EndOfLine),
            T::LineComment => return LexKind::Trivia(TriviaKind::LineComment),
            T::Directive => return LexKind::Trivia(TriviaKind::Directive),
            T::Ident => VbKind::from_keyword_text(text)
                .filter(|k| k.is_keyword())
                .unwrap_or(VbKind::IDENT),
            T::EscapedIdent => VbKind::IDENT,
            T::Number => VbKind::NUMERIC_LITERAL,
            T::String => VbKind::STRING_LITERAL,
            T::Char => VbKind::CHAR_LITERAL,
            T::LtGt => VbKind::LT_GT,
            T::LtEq => VbKind::LT_EQ,
            T::GtEq => VbKind::GT_EQ,
            T::LtLt => VbKind::LT_LT,
            T::GtGt => VbKind::GT_GT,
            T::PlusEq => VbKind::PLUS_EQ,
            T::MinusEq => VbKind::MINUS_EQ,
            T::StarEq => VbKind::STAR_EQ,
            T::SlashEq => VbKind::SLASH_EQ,
            T::BackslashEq => VbKind::BACKSLASH_EQ,
            T::AmpEq => VbKind::AMP_EQ,
            T::ColonEq => VbKind::COLON_EQ,
            T::LParen => VbKind::L_PAREN,
            T::RParen => VbKind::R_PAREN,
            T::LBrace => VbKind::L_BRACE,
            T::RBrace => VbKind::R_BRACE,
            T::Dot => VbKind::DOT,
            T::Comma => VbKind::COMMA,
            T::Eq => VbKind::EQ,
            T::Lt => VbKind::LT,
            T::Gt => VbKind::GT,
            T::Plus => VbKind::PLUS,
            T::Minus => VbKind::MINUS,
            T::Star => VbKind::STAR,
            T::Slash => VbKind::SLASH,
            T::Backslash => VbKind::BACKSLASH,
            T::Caret => VbKind::CARET,
            T::Amp => VbKind::AMP,
            T::Colon => VbKind::COLON,
            T::Question => VbKind::QUESTION,
        };
        LexKind::Token(kind.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(language: Language, input: &str) -> Vec<SyntaxKind> {
        lex(language, input)
            .into_iter()
            .filter_map(|t| match t.kind {
                LexKind::Token(k) => Some(k),
                LexKind::Trivia(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_lex_cs_event_subscription() {
        assert_eq!(
            kinds(Language::CSharp, "x.Click += Handler;"),
            vec![
                SyntaxKind::from(CsKind::IDENT),
                SyntaxKind::from(CsKind::DOT),
                SyntaxKind::from(CsKind::IDENT),
                SyntaxKind::from(CsKind::PLUS_EQ),
                SyntaxKind::from(CsKind::IDENT),
                SyntaxKind::from(CsKind::SEMICOLON),
            ]
        );
    }

    #[test]
    fn test_lex_cs_contextual_keyword_is_identifier() {
        assert_eq!(kinds(Language::CSharp, "var"), vec![SyntaxKind::from(CsKind::IDENT)]);
        assert_eq!(kinds(Language::CSharp, "class"), vec![SyntaxKind::from(CsKind::CLASS_KW)]);
        assert_eq!(kinds(Language::CSharp, "@class"), vec![SyntaxKind::from(CsKind::IDENT)]);
    }

    #[test]
    fn test_lex_cs_generic_closers_stay_separate() {
        let k = kinds(Language::CSharp, "List<List<int>>");
        assert_eq!(k.iter().filter(|k| **k == CsKind::GT).count(), 2);
    }

    #[test]
    fn test_lex_vb_keywords_ignore_case() {
        assert_eq!(
            kinds(Language::VisualBasic, "addhandler X.Click, ADDRESSOF Handler"),
            vec![
                SyntaxKind::from(VbKind::ADD_HANDLER_KW),
                SyntaxKind::from(VbKind::IDENT),
                SyntaxKind::from(VbKind::DOT),
                SyntaxKind::from(VbKind::IDENT),
                SyntaxKind::from(VbKind::COMMA),
                SyntaxKind::from(VbKind::ADDRESS_OF_KW),
                SyntaxKind::from(VbKind::IDENT),
            ]
        );
    }

    #[test]
    fn test_lex_vb_literals() {
        assert_eq!(kinds(Language::VisualBasic, r#""a""b""#), vec![SyntaxKind::from(VbKind::STRING_LITERAL)]);
        assert_eq!(kinds(Language::VisualBasic, r#""a"c"#), vec![SyntaxKind::from(VbKind::CHAR_LITERAL)]);
        assert_eq!(kinds(Language::VisualBasic, "&HFF"), vec![SyntaxKind::from(VbKind::NUMERIC_LITERAL)]);
        assert_eq!(kinds(Language::VisualBasic, "[Class]"), vec![SyntaxKind::from(VbKind::IDENT)]);
        assert_eq!(kinds(Language::VisualBasic, "\\="), vec![SyntaxKind::from(VbKind::BACKSLASH_EQ)]);
    }

    #[test]
    fn test_tokenize_attaches_trivia() {
        let tokens = tokenize(Language::CSharp, "// lead\nx = 1; // tail\n  y");
        let x = &tokens[0];
        assert_eq!(x.text(), "x");
        assert_eq!(x.leading().len(), 2);
        assert_eq!(x.leading()[0].kind, TriviaKind::LineComment);

        let semi = &tokens[3];
        assert_eq!(semi.text(), ";");
        let trailing: Vec<_> = semi.trailing().iter().map(|t| t.kind).collect();
        assert_eq!(
            trailing,
            vec![TriviaKind::Whitespace, TriviaKind::LineComment, TriviaKind::EndOfLine]
        );

        let y = &tokens[4];
        assert_eq!(y.leading(), &[Trivia::whitespace("  ")]);
        assert!(tokens.last().unwrap().kind().is_end_of_file());
    }

    #[test]
    fn test_tokenize_is_lossless() {
        let input = "#region A\nclass C { } /* x */\n#endregion\n";
        let text: String = tokenize(Language::CSharp, input).iter().map(|t| t.to_string()).collect();
        assert_eq!(text, input);
    }

    #[test]
    fn test_reserved_words() {
        assert!(is_reserved_word(Language::CSharp, "class"));
        assert!(!is_reserved_word(Language::CSharp, "Class"));
        assert!(is_reserved_word(Language::VisualBasic, "class"));
        assert!(is_reserved_word(Language::VisualBasic, "Error"));
        assert!(!is_reserved_word(Language::VisualBasic, "var"));
        assert!(!is_reserved_word(Language::CSharp, "a b"));
    }
}
