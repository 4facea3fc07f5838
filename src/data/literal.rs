use thiserror::Error;

// ---------------------------------------------------------------------------
// List literals – `['Action', 'Indie']` as written by the cleaning notebook
// ---------------------------------------------------------------------------

/// Why a list-literal cell could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("expected '[' at the start of a list literal")]
    NotAList,
    #[error("unterminated string starting at byte {0}")]
    UnterminatedString(usize),
    #[error("unexpected character '{ch}' at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("missing closing ']'")]
    Unclosed,
    #[error("trailing input after closing ']'")]
    TrailingInput,
}

/// Parse a Python-style list literal of strings.
///
/// Accepts single- or double-quoted items with backslash escapes and bare
/// tokens (numbers, `None`), which are kept as their text.
pub fn parse_list(text: &str) -> Result<Vec<String>, LiteralError> {
    let mut chars = text.char_indices().peekable();
    skip_ws(&mut chars);
    match chars.next() {
        Some((_, '[')) => {}
        _ => return Err(LiteralError::NotAList),
    }

    let mut items = Vec::new();
    loop {
        skip_ws(&mut chars);
        match chars.peek().copied() {
            None => return Err(LiteralError::Unclosed),
            Some((_, ']')) => {
                chars.next();
                break;
            }
            Some((pos, quote @ ('\'' | '"'))) => {
                chars.next();
                let mut item = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    match c {
                        '\\' => {
                            if let Some((_, escaped)) = chars.next() {
                                item.push(unescape(escaped));
                            }
                        }
                        c if c == quote => {
                            closed = true;
                            break;
                        }
                        c => item.push(c),
                    }
                }
                if !closed {
                    return Err(LiteralError::UnterminatedString(pos));
                }
                items.push(item);
            }
            Some((pos, ch)) if ch == ',' => {
                return Err(LiteralError::UnexpectedChar { ch, pos });
            }
            Some(_) => {
                let mut token = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c == ',' || c == ']' {
                        break;
                    }
                    token.push(c);
                    chars.next();
                }
                items.push(token.trim().to_string());
            }
        }

        skip_ws(&mut chars);
        match chars.next() {
            Some((_, ',')) => continue,
            Some((_, ']')) => break,
            Some((pos, ch)) => return Err(LiteralError::UnexpectedChar { ch, pos }),
            None => return Err(LiteralError::Unclosed),
        }
    }

    skip_ws(&mut chars);
    if chars.next().is_some() {
        return Err(LiteralError::TrailingInput);
    }
    Ok(items)
}

/// Render items back into the literal form `parse_list` reads.
pub fn format_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
    format!("[{}]", quoted.join(", "))
}

fn quote(item: &str) -> String {
    // Same choice Python's repr makes: prefer single quotes.
    let delim = if item.contains('\'') && !item.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(item.len() + 2);
    out.push(delim);
    for c in item.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

fn skip_ws(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) {
    while let Some(&(_, c)) = chars.peek() {
        if !c.is_whitespace() {
            break;
        }
        chars.next();
    }
}
