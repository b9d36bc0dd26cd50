//! Lenient JSON repair: best-effort rewrites that turn near-JSON model output into
//! text `serde_json` can parse.
//!
//! Every rule works on a token stream rather than on raw characters:
//! - structural punctuation: `{ } [ ] : ,`
//! - quoted strings, kept byte-for-byte (escapes honoured; an unterminated
//!   string runs to the end of the input)
//! - whitespace runs
//! - bare runs: everything else up to the next structural character or quote,
//!   internal spaces included (`Relevance Score`, `Shop Intent`)
//!
//! Quoted strings are opaque to every rule, so `word:` inside a string value is
//! never rewritten and applying a rule twice is the same as applying it once.
//!
//! Known limitation: a bare value that itself contains a colon
//! (`Category: Shop: Intent`, `Link: https://...`) is split at the colon and the
//! left part is quoted as a key. The result usually fails to parse and the
//! normalizer falls back to an empty table.

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Punct(char),
    Str(&'a str),
    Bare(&'a str),
    Space(&'a str),
}

impl Token<'_> {
    fn write_to(&self, out: &mut String) {
        match self {
            Token::Punct(c) => out.push(*c),
            Token::Str(s) | Token::Bare(s) | Token::Space(s) => out.push_str(s),
        }
    }
}

fn is_structural(c: char) -> bool {
    matches!(c, '{' | '}' | '[' | ']' | ':' | ',')
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if is_structural(c) {
            chars.next();
            tokens.push(Token::Punct(c));
        } else if c == '"' {
            chars.next();
            let mut end = text.len();
            let mut escaped = false;
            for (i, ch) in chars.by_ref() {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == '"' {
                    end = i + ch.len_utf8();
                    break;
                }
            }
            tokens.push(Token::Str(&text[start..end]));
        } else if c.is_whitespace() {
            let mut end = text.len();
            while let Some(&(i, ch)) = chars.peek() {
                if !ch.is_whitespace() {
                    end = i;
                    break;
                }
                chars.next();
            }
            tokens.push(Token::Space(&text[start..end]));
        } else {
            let mut end = text.len();
            while let Some(&(i, ch)) = chars.peek() {
                if is_structural(ch) || ch == '"' {
                    end = i;
                    break;
                }
                chars.next();
            }
            let run = &text[start..end];
            let trimmed = run.trim_end();
            tokens.push(Token::Bare(trimmed));
            if trimmed.len() < run.len() {
                tokens.push(Token::Space(&run[trimmed.len()..]));
            }
        }
    }

    tokens
}

fn next_significant<'a>(tokens: &[Token<'a>], index: usize) -> Option<Token<'a>> {
    tokens[index + 1..]
        .iter()
        .copied()
        .find(|t| !matches!(t, Token::Space(_)))
}

fn prev_significant<'a>(tokens: &[Token<'a>], index: usize) -> Option<Token<'a>> {
    tokens[..index]
        .iter()
        .rev()
        .copied()
        .find(|t| !matches!(t, Token::Space(_)))
}

fn quote(run: &str) -> String {
    Value::String(run.to_string()).to_string()
}

fn is_json_scalar(run: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(run),
        Ok(Value::Number(_) | Value::Bool(_) | Value::Null)
    )
}

/// Removes every `**` emphasis marker, inside strings as well.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

/// Quotes every bare run that is followed by a `:`.
pub fn quote_keys(text: &str) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len() + 16);
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Bare(run) if next_significant(&tokens, i) == Some(Token::Punct(':')) => {
                out.push_str(&quote(run));
            }
            other => other.write_to(&mut out),
        }
    }
    out
}

/// Quotes a bare run sitting right after a `:` unless it is a JSON number,
/// `true`, `false` or `null`. Bare runs anywhere else are left alone.
pub fn quote_bare_values(text: &str) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len() + 16);
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Bare(run)
                if prev_significant(&tokens, i) == Some(Token::Punct(':'))
                    && !is_json_scalar(run) =>
            {
                out.push_str(&quote(run));
            }
            other => other.write_to(&mut out),
        }
    }
    out
}

/// Drops a `,` (and the whitespace after it) when the next token is `}`.
/// A `,` before `]` is kept.
pub fn strip_trailing_commas(text: &str) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len());
    let mut dropping = false;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Punct(',') if next_significant(&tokens, i) == Some(Token::Punct('}')) => {
                dropping = true;
            }
            Token::Space(_) if dropping => {}
            other => {
                dropping = false;
                other.write_to(&mut out);
            }
        }
    }
    out
}

/// Surrounds the text with `[` and `]` so a lone object becomes a one-element array.
pub fn wrap_in_array(text: &str) -> String {
    format!("[{text}]")
}

/// Applies every rule in order and returns text ready for `serde_json`.
pub fn repair(text: &str) -> String {
    let text = strip_emphasis(text);
    let text = quote_keys(&text);
    let text = quote_bare_values(&text);
    let text = strip_trailing_commas(&text);
    wrap_in_array(&text)
}
