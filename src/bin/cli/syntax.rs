use crate::theme::Theme;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tree_sitter::{Parser, Query, QueryCursor};

const PYTHON_QUERY: &str = r#"
    (comment) @comment
    (string) @string
    (integer) @number
    (float) @number
    [
        "def" "class" "import" "from" "return" "if" "elif" "else" "for" "while" "in"
        "with" "as" "lambda" "yield" "async" "await" "try" "except" "finally" "raise"
        "pass" "break" "continue" "and" "or" "not" "is"
    ] @keyword
    (none) @constant
    (true) @constant
    (false) @constant
    (function_definition name: (identifier) @function)
    (call function: (identifier) @function)
    (class_definition name: (identifier) @type)
"#;

const PYTHON_KEYWORDS: &[&str] = &[
    "def", "class", "import", "from", "return", "if", "elif", "else", "for", "while", "in",
    "with", "as", "lambda", "yield", "async", "await", "try", "except", "finally", "raise",
    "pass", "break", "continue", "and", "or", "not", "is",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Comment,
    Keyword,
    String,
    Number,
    Function,
    Type,
    Constant,
    Normal,
}

fn map_capture_to_kind(capture_name: &str) -> TokenKind {
    match capture_name {
        "comment" => TokenKind::Comment,
        "keyword" => TokenKind::Keyword,
        "string" => TokenKind::String,
        "number" => TokenKind::Number,
        "function" => TokenKind::Function,
        "type" => TokenKind::Type,
        "constant" => TokenKind::Constant,
        _ => TokenKind::Normal,
    }
}

fn style_for_kind(kind: TokenKind, theme: &Theme) -> Style {
    let base = Style::default().bg(theme.input_bg);
    match kind {
        TokenKind::Comment => base.fg(theme.muted).add_modifier(Modifier::ITALIC),
        TokenKind::Keyword => base.fg(theme.accent).add_modifier(Modifier::BOLD),
        TokenKind::String => base.fg(Color::Rgb(80, 160, 80)),
        TokenKind::Number => base.fg(Color::Rgb(120, 140, 230)),
        TokenKind::Function => base.fg(Color::Rgb(190, 150, 40)),
        TokenKind::Type => base.fg(Color::Rgb(40, 160, 200)),
        TokenKind::Constant => base.fg(Color::Rgb(220, 140, 40)),
        TokenKind::Normal => base.fg(theme.text),
    }
}

/// Byte ranges of highlighted tokens in `source`, or `None` when the
/// grammar could not be loaded.
fn tree_sitter_ranges(source: &str) -> Option<Vec<(usize, usize, TokenKind)>> {
    let mut parser = Parser::new();
    parser.set_language(tree_sitter_python::language()).ok()?;
    let tree = parser.parse(source, None)?;
    let query = Query::new(tree_sitter_python::language(), PYTHON_QUERY).ok()?;

    let mut cursor = QueryCursor::new();
    let mut ranges = Vec::new();
    for m in cursor.matches(&query, tree.root_node(), source.as_bytes()) {
        for capture in m.captures {
            let kind = map_capture_to_kind(&query.capture_names()[capture.index as usize]);
            ranges.push((capture.node.start_byte(), capture.node.end_byte(), kind));
        }
    }
    Some(ranges)
}

// Keyword, number and comment spotting for when tree-sitter is unavailable.
fn keyword_ranges(source: &str) -> Vec<(usize, usize, TokenKind)> {
    let mut ranges = Vec::new();
    let mut offset = 0;
    for line in source.split('\n') {
        let code_end = line.find('#').unwrap_or(line.len());
        if code_end < line.len() {
            ranges.push((offset + code_end, offset + line.len(), TokenKind::Comment));
        }

        let mut word_start = None;
        for (i, ch) in line[..code_end].char_indices().chain([(code_end, ' ')]) {
            let is_word = ch.is_alphanumeric() || ch == '_';
            match (is_word, word_start) {
                (true, None) => word_start = Some(i),
                (false, Some(start)) => {
                    let word = &line[start..i];
                    if PYTHON_KEYWORDS.contains(&word) {
                        ranges.push((offset + start, offset + i, TokenKind::Keyword));
                    } else if word.chars().all(|c| c.is_ascii_digit()) {
                        ranges.push((offset + start, offset + i, TokenKind::Number));
                    }
                    word_start = None;
                }
                _ => {}
            }
        }
        offset += line.len() + 1;
    }
    ranges
}

/// Highlight the whole editor buffer and split it into display lines.
/// `selection` is a byte range drawn reversed on top of the highlighting.
pub fn highlight_source(
    source: &str,
    selection: Option<(usize, usize)>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut styles = vec![style_for_kind(TokenKind::Normal, theme); source.len()];

    let mut ranges = tree_sitter_ranges(source).unwrap_or_else(|| keyword_ranges(source));
    // Outer nodes first so nested captures win.
    ranges.sort_by_key(|(start, end, _)| (*start, std::cmp::Reverse(*end)));
    for (start, end, kind) in ranges {
        let end = end.min(source.len());
        if start >= end {
            continue;
        }
        let style = style_for_kind(kind, theme);
        styles[start..end].iter_mut().for_each(|s| *s = style);
    }

    if let Some((start, end)) = selection {
        let end = end.min(source.len());
        for s in styles.iter_mut().take(end).skip(start) {
            *s = s.add_modifier(Modifier::REVERSED);
        }
    }

    let mut lines = Vec::new();
    let mut offset = 0;
    for line in source.split('\n') {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run_start = 0;
        let mut run_style: Option<Style> = None;

        for (i, _) in line.char_indices() {
            let style = styles[offset + i];
            if run_style != Some(style) {
                if let Some(prev) = run_style {
                    spans.push(Span::styled(line[run_start..i].to_string(), prev));
                }
                run_start = i;
                run_style = Some(style);
            }
        }
        if let Some(prev) = run_style {
            spans.push(Span::styled(line[run_start..].to_string(), prev));
        }

        lines.push(Line::from(spans));
        offset += line.len() + 1;
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::DARK;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn keeps_every_line_and_character() {
        let source = "def factorial(n):\n    # write your code here\n    pass";
        let lines = highlight_source(source, None, &DARK);
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(
            texts,
            vec!["def factorial(n):", "    # write your code here", "    pass"]
        );
    }

    #[test]
    fn fallback_finds_keywords_and_comments() {
        let ranges = keyword_ranges("if n == 0: # base\n    return 1");
        assert!(ranges.contains(&(0, 2, TokenKind::Keyword)));
        assert!(ranges.contains(&(11, 17, TokenKind::Comment)));
        assert!(ranges.contains(&(22, 28, TokenKind::Keyword)));
        assert!(ranges.contains(&(29, 30, TokenKind::Number)));
    }

    #[test]
    fn selection_is_reversed() {
        let lines = highlight_source("abc", Some((1, 2)), &DARK);
        let selected = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "b")
            .expect("selected char gets its own span");
        assert!(selected.style.add_modifier.contains(Modifier::REVERSED));
    }
}
