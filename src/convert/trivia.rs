//! Comment and directive translation.
//!
//! Whitespace and line breaks pass through untouched so indentation
//! survives. Comments change delimiters; a C# block comment becomes one
//! Visual Basic line comment per line. Directives with a counterpart are
//! rewritten, the rest are kept as comments so their text is not lost.

use crate::syntax::{Language, Trivia, TriviaKind};

/// Translate a trivia run into `target`'s comment and directive syntax.
pub fn convert_trivia(trivia: &[Trivia], target: Language) -> Vec<Trivia> {
    let mut out = Vec::with_capacity(trivia.len());
    let mut indent: Option<Trivia> = None;
    // a VB line comment swallowed the rest of the line; the next token needs a fresh one
    let mut needs_break = false;

    for item in trivia {
        if needs_break {
            match item.kind {
                TriviaKind::EndOfLine => needs_break = false,
                TriviaKind::Whitespace => continue,
                _ => {
                    out.push(Trivia::end_of_line());
                    out.extend(indent.clone());
                    needs_break = false;
                }
            }
        }
        match item.kind {
            TriviaKind::Whitespace => {
                indent = Some(item.clone());
                out.push(item.clone());
            }
            TriviaKind::EndOfLine => {
                indent = None;
                out.push(item.clone());
            }
            TriviaKind::LineComment | TriviaKind::BlockComment => {
                let lines = convert_comment(item, target);
                for (i, line) in lines.into_iter().enumerate() {
                    if i > 0 {
                        out.push(Trivia::end_of_line());
                        out.extend(indent.clone());
                    }
                    out.push(line);
                }
                needs_break = target == Language::VisualBasic && item.kind == TriviaKind::BlockComment;
            }
            TriviaKind::Directive => out.push(convert_directive(&item.text, target)),
        }
    }
    if needs_break {
        out.push(Trivia::end_of_line());
        out.extend(indent);
    }
    out
}

/// A line comment in `target` holding `body`.
pub fn comment_line(target: Language, body: &str) -> Trivia {
    let body = body.trim_end();
    let delimiter = match target {
        Language::CSharp => "//",
        Language::VisualBasic => "'",
    };
    if body.is_empty() {
        Trivia::line_comment(delimiter)
    } else {
        Trivia::line_comment(format!("{delimiter} {body}"))
    }
}

fn convert_comment(comment: &Trivia, target: Language) -> Vec<Trivia> {
    let text = comment.text.as_str();
    match (comment.kind, target) {
        (TriviaKind::BlockComment, Language::VisualBasic) => block_comment_lines(text)
            .into_iter()
            .map(|line| comment_line(Language::VisualBasic, &line))
            .collect(),
        (TriviaKind::BlockComment, Language::CSharp) => vec![comment.clone()],
        (_, Language::VisualBasic) => {
            let converted = if let Some(rest) = text.strip_prefix("///") {
                format!("'''{rest}")
            } else if let Some(rest) = text.strip_prefix("//") {
                format!("'{rest}")
            } else {
                text.to_string()
            };
            vec![Trivia::line_comment(converted)]
        }
        (_, Language::CSharp) => {
            let converted = if let Some(rest) = text.strip_prefix("'''") {
                format!("///{rest}")
            } else if let Some(rest) = text.strip_prefix('\'') {
                format!("//{rest}")
            } else if text.len() >= 3 && text[..3].eq_ignore_ascii_case("rem") {
                format!("//{}", &text[3..])
            } else {
                text.to_string()
            };
            vec![Trivia::line_comment(converted)]
        }
    }
}

/// Body lines of a `/* */` comment, with decorative leading `*` removed and
/// blank first and last lines dropped.
fn block_comment_lines(text: &str) -> Vec<String> {
    let inner = text.strip_prefix("/*").unwrap_or(text);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    let mut lines: Vec<String> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').map(str::trim_start).unwrap_or(line).to_string()
        })
        .collect();
    if lines.first().is_some_and(String::is_empty) && lines.len() > 1 {
        lines.remove(0);
    }
    if lines.last().is_some_and(String::is_empty) && lines.len() > 1 {
        lines.pop();
    }
    lines
}

/// Normalised comment text of a trivia run in either language: one entry per
/// comment line, delimiters and decoration stripped. Two runs hold the same
/// comments exactly when their `comment_lines` are equal.
pub fn comment_lines(trivia: &[Trivia]) -> Vec<String> {
    let mut out = Vec::new();
    for item in trivia {
        match item.kind {
            TriviaKind::BlockComment => out.extend(block_comment_lines(&item.text)),
            TriviaKind::LineComment => {
                let text = item.text.as_str();
                let body = ["///", "'''", "//", "'"]
                    .iter()
                    .find_map(|d| text.strip_prefix(d))
                    .unwrap_or(text);
                out.push(body.trim().to_string());
            }
            _ => {}
        }
    }
    out
}

pub fn has_comments(trivia: &[Trivia]) -> bool {
    trivia.iter().any(|t| t.kind.is_comment() || t.kind == TriviaKind::Directive)
}

/// Comments and directives of an already converted run, each on its own line.
pub fn as_lines(converted: &[Trivia]) -> Vec<Trivia> {
    let mut out = Vec::new();
    for item in converted {
        if item.kind.is_comment() || item.kind == TriviaKind::Directive {
            out.push(item.clone());
            out.push(Trivia::end_of_line());
        }
    }
    out
}

/// Comments of an already converted run laid out to follow code on the same
/// line: the first after a space, any others on following lines.
pub fn end_of_line_comments(converted: &[Trivia]) -> Vec<Trivia> {
    let lines = as_lines(converted);
    if lines.is_empty() {
        return lines;
    }
    let mut out = Vec::with_capacity(lines.len() + 1);
    out.push(Trivia::space());
    out.extend(lines);
    out
}

// ============================================================================
// DIRECTIVES
// ============================================================================

/// Rewrite one directive. Directives without a counterpart become comments.
pub fn convert_directive(text: &str, target: Language) -> Trivia {
    let converted = match target {
        Language::VisualBasic => cs_directive_to_vb(text),
        Language::CSharp => vb_directive_to_cs(text),
    };
    match converted {
        Some(directive) => Trivia::directive(directive),
        None => {
            tracing::trace!(directive = text, "directive kept as comment");
            comment_line(target, text.trim())
        }
    }
}

fn split_directive(text: &str) -> (String, &str) {
    let body = text.trim().trim_start_matches('#').trim_start();
    match body.find(char::is_whitespace) {
        Some(end) => (body[..end].to_ascii_lowercase(), body[end..].trim()),
        None => (body.to_ascii_lowercase(), ""),
    }
}

fn cs_directive_to_vb(text: &str) -> Option<String> {
    let (keyword, rest) = split_directive(text);
    let directive = match keyword.as_str() {
        "region" => format!("#Region \"{}\"", rest.replace('"', "\"\"")),
        "endregion" => "#End Region".to_string(),
        "if" => format!("#If {} Then", translate_condition(rest, Language::VisualBasic)),
        "elif" => format!("#ElseIf {} Then", translate_condition(rest, Language::VisualBasic)),
        "else" => "#Else".to_string(),
        "endif" => "#End If".to_string(),
        "define" => format!("#Const {rest} = True"),
        "undef" => format!("#Const {rest} = False"),
        "pragma" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some("warning"), Some("disable")) => format!("#Disable Warning {}", words.collect::<Vec<_>>().join(" ")),
                (Some("warning"), Some("restore")) => format!("#Enable Warning {}", words.collect::<Vec<_>>().join(" ")),
                _ => return None,
            }
        }
        _ => return None,
    };
    Some(directive.trim_end().to_string())
}

fn vb_directive_to_cs(text: &str) -> Option<String> {
    let (keyword, rest) = split_directive(text);
    let lower_rest = rest.to_ascii_lowercase();
    let directive = match keyword.as_str() {
        "region" => format!("#region {}", unquote(rest)),
        "end" if lower_rest == "region" => "#endregion".to_string(),
        "end" if lower_rest == "if" => "#endif".to_string(),
        "if" => format!("#if {}", translate_condition(strip_then(rest), Language::CSharp)),
        "elseif" => format!("#elif {}", translate_condition(strip_then(rest), Language::CSharp)),
        "else" => "#else".to_string(),
        "const" => {
            let (name, value) = rest.split_once('=')?;
            match value.trim().to_ascii_lowercase().as_str() {
                "true" => format!("#define {}", name.trim()),
                "false" | "nothing" => format!("#undef {}", name.trim()),
                _ => return None,
            }
        }
        "disable" | "enable" if lower_rest.starts_with("warning") => {
            let codes = rest["warning".len()..].trim();
            let action = if keyword == "disable" { "disable" } else { "restore" };
            format!("#pragma warning {action} {codes}")
        }
        _ => return None,
    };
    Some(directive.trim_end().to_string())
}

fn unquote(text: &str) -> String {
    let text = text.trim();
    match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => text.to_string(),
    }
}

fn strip_then(condition: &str) -> &str {
    let trimmed = condition.trim_end();
    if trimmed.len() >= 4 && trimmed[trimmed.len() - 4..].eq_ignore_ascii_case("then") {
        trimmed[..trimmed.len() - 4].trim_end()
    } else {
        trimmed
    }
}

/// Rewrite the operators and literals of a conditional-compilation
/// expression.
fn translate_condition(condition: &str, target: Language) -> String {
    let mut out = String::with_capacity(condition.len());
    let chars: Vec<char> = condition.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_alphanumeric() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push_str(&translate_word(&word, target));
            continue;
        }
        let next = chars.get(i + 1).copied();
        let (replacement, width) = match (target, c, next) {
            (Language::VisualBasic, '&', Some('&')) => (" AndAlso ", 2),
            (Language::VisualBasic, '|', Some('|')) => (" OrElse ", 2),
            (Language::VisualBasic, '=', Some('=')) => ("=", 2),
            (Language::VisualBasic, '!', Some('=')) => ("<>", 2),
            (Language::VisualBasic, '!', _) => ("Not ", 1),
            (Language::CSharp, '<', Some('>')) => ("!=", 2),
            (Language::CSharp, '=', _) => ("==", 1),
            _ => {
                out.push(c);
                i += 1;
                continue;
            }
        };
        out.push_str(replacement);
        i += width;
    }
    // operator replacements pad with spaces; collapse any doubles
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn translate_word(word: &str, target: Language) -> String {
    let lower = word.to_ascii_lowercase();
    let mapped = match (target, lower.as_str()) {
        (Language::VisualBasic, "true") if word == "true" => "True",
        (Language::VisualBasic, "false") if word == "false" => "False",
        (Language::CSharp, "true") => "true",
        (Language::CSharp, "false") => "false",
        (Language::CSharp, "andalso") => "&&",
        (Language::CSharp, "orelse") => "||",
        (Language::CSharp, "not") => "!",
        _ => word,
    };
    mapped.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(trivia: &[Trivia]) -> Vec<&str> {
        trivia.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_line_comments_swap_delimiters() {
        let cs = vec![Trivia::whitespace("    "), Trivia::line_comment("// note"), Trivia::end_of_line()];
        let vb = convert_trivia(&cs, Language::VisualBasic);
        assert_eq!(texts(&vb), vec!["    ", "' note", "\n"]);

        let back = convert_trivia(&vb, Language::CSharp);
        assert_eq!(texts(&back), vec!["    ", "// note", "\n"]);
    }

    #[test]
    fn test_doc_comments_keep_their_marker() {
        let vb = convert_trivia(&[Trivia::line_comment("/// <summary>")], Language::VisualBasic);
        assert_eq!(texts(&vb), vec!["''' <summary>"]);
        let cs = convert_trivia(&vb, Language::CSharp);
        assert_eq!(texts(&cs), vec!["/// <summary>"]);
    }

    #[test]
    fn test_block_comment_becomes_one_line_each() {
        let cs = vec![
            Trivia::whitespace("  "),
            Trivia::block_comment("/*\n   * first\n   * second\n   */"),
            Trivia::end_of_line(),
        ];
        let vb = convert_trivia(&cs, Language::VisualBasic);
        assert_eq!(texts(&vb), vec!["  ", "' first", "\n", "  ", "' second", "\n"]);
        assert_eq!(comment_lines(&cs), comment_lines(&vb));
    }

    #[test]
    fn test_inline_block_comment_breaks_the_line() {
        let cs = vec![Trivia::whitespace("    "), Trivia::block_comment("/* a */"), Trivia::space()];
        let vb = convert_trivia(&cs, Language::VisualBasic);
        assert_eq!(texts(&vb), vec!["    ", "' a", "\n", "    "]);
    }

    #[test]
    fn test_rem_comment() {
        let cs = convert_trivia(&[Trivia::line_comment("REM old style")], Language::CSharp);
        assert_eq!(texts(&cs), vec!["// old style"]);
    }

    #[test]
    fn test_region_directives() {
        assert_eq!(convert_directive("#region Helpers", Language::VisualBasic).text, "#Region \"Helpers\"");
        assert_eq!(convert_directive("#endregion", Language::VisualBasic).text, "#End Region");
        assert_eq!(convert_directive("#Region \"Helpers\"", Language::CSharp).text, "#region Helpers");
        assert_eq!(convert_directive("#End Region", Language::CSharp).text, "#endregion");
    }

    #[test]
    fn test_conditional_directives() {
        let vb = convert_directive("#if DEBUG && !TRACE", Language::VisualBasic);
        assert_eq!(vb.kind, TriviaKind::Directive);
        assert_eq!(vb.text, "#If DEBUG AndAlso Not TRACE Then");
        let cs = convert_directive(&vb.text, Language::CSharp);
        assert_eq!(cs.text, "#if DEBUG && ! TRACE");
        assert_eq!(convert_directive("#End If", Language::CSharp).text, "#endif");
        assert_eq!(convert_directive("#define FAST", Language::VisualBasic).text, "#Const FAST = True");
        assert_eq!(convert_directive("#Const FAST = True", Language::CSharp).text, "#define FAST");
    }

    #[test]
    fn test_pragma_warning() {
        let vb = convert_directive("#pragma warning disable CS0168", Language::VisualBasic);
        assert_eq!(vb.text, "#Disable Warning CS0168");
        assert_eq!(convert_directive(&vb.text, Language::CSharp).text, "#pragma warning disable CS0168");
    }

    #[test]
    fn test_unknown_directive_is_kept_as_comment() {
        let vb = convert_directive("#nullable enable", Language::VisualBasic);
        assert_eq!(vb.kind, TriviaKind::LineComment);
        assert_eq!(vb.text, "' #nullable enable");
    }

    #[test]
    fn test_end_of_line_layout() {
        let converted = vec![Trivia::line_comment("' a"), Trivia::end_of_line(), Trivia::line_comment("' b")];
        let laid_out = end_of_line_comments(&converted);
        assert_eq!(texts(&laid_out), vec![" ", "' a", "\n", "' b", "\n"]);
        assert!(end_of_line_comments(&[Trivia::space()]).is_empty());
    }
}
