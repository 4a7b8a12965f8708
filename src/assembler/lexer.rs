//! This lexer splits the text form of a function body into tokens.
//!
//! Tokens are the raw mnemonic and operand strings. Deciding what
//! a token means is the parser's job, not the lexer's.

/// Splits `text` on spaces, tabs, linefeeds and carriage returns.
///
/// Runs of delimiters collapse into a single boundary, so no empty
/// token is ever produced. Text made of delimiters only yields nothing.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = Vec::with_capacity(text.len() / 4);

    // Start of the token currently being built.
    let mut off = 0;
    for (i, c) in text.char_indices() {
        match c {
            ' ' | '\t' | '\n' | '\r' => {
                if off < i {
                    tokens.push(&text[off..i]);
                }
                off = i + c.len_utf8();
            }
            _ => {}
        }
    }
    // Process any final token that is not followed by a delimiter.
    if off < text.len() {
        tokens.push(&text[off..]);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_delimiters() {
        assert_eq!(tokenize(" a  b\tc\n"), vec!["a", "b", "c"]);
        assert_eq!(tokenize("i32.const \t\t\r\n 5"), vec!["i32.const", "5"]);
        assert_eq!(tokenize("local.get 0\r\nlocal.get 1\r\ni32.add"),
            vec!["local.get", "0", "local.get", "1", "i32.add"]);
    }

    #[test]
    fn test_tokenize_trailing_token() {
        assert_eq!(tokenize("return"), vec!["return"]);
        assert_eq!(tokenize("i32.const 5"), vec!["i32.const", "5"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\r\n  \n").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_other_characters() {
        // Only the four delimiters bound tokens. Commas, semicolons and
        // other whitespace stay inside the token.
        assert_eq!(tokenize("a,b ;c"), vec!["a,b", ";c"]);
        assert_eq!(tokenize("a\x0Bb"), vec!["a\x0Bb"]);
        assert_eq!(tokenize("föö bär"), vec!["föö", "bär"]);
    }
}
