use super::ExprError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` or `**`
    Caret,
    LParen,
    RParen,
}

/// A token and the byte offset where it starts.
pub type Spanned = (Token, usize);

pub fn tokenize(src: &str) -> Result<Vec<Spanned>, ExprError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
                continue;
            }
            b'+' => tokens.push((Token::Plus, start)),
            b'-' => tokens.push((Token::Minus, start)),
            b'/' => tokens.push((Token::Slash, start)),
            b'^' => tokens.push((Token::Caret, start)),
            b'(' => tokens.push((Token::LParen, start)),
            b')' => tokens.push((Token::RParen, start)),
            b'*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    tokens.push((Token::Caret, start));
                    i += 1;
                } else {
                    tokens.push((Token::Star, start));
                }
            }
            b'0'..=b'9' | b'.' => {
                i = scan_number(bytes, i);
                let text = &src[start..i];
                let value = text.parse::<f64>().map_err(|_| ExprError::InvalidNumber {
                    text: text.to_string(),
                    pos: start,
                })?;
                tokens.push((Token::Number(value), start));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((Token::Ident(src[start..i].to_string()), start));
                continue;
            }
            _ => {
                let ch = src[start..].chars().next().unwrap_or('?');
                return Err(ExprError::UnexpectedChar { ch, pos: start });
            }
        }
        i += 1;
    }

    Ok(tokens)
}

/// End offset of the number starting at `i`: digits, one optional fraction,
/// and an exponent only when digits actually follow `e[+-]`.
fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    let digits = |i: &mut usize| {
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
    };
    digits(&mut i);
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        digits(&mut i);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            i = j;
            digits(&mut i);
        }
    }
    i
}
