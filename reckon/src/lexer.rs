//! Token scanner for infix expressions

use reckon_core::CalcError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Ident(String),
    Str(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(s) => format!("identifier '{}'", s),
            Token::Str(s) => format!("string \"{}\"", s),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Caret => "'^'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
            Token::Comma => "','".to_string(),
        }
    }
}

/// A token together with its byte offset in the source text
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Scan an expression string into tokens.
///
/// Numbers are integer, decimal, or leading-dot forms. Identifiers are
/// ASCII alphabetic followed by alphanumerics or underscores.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, CalcError> {
    let mut tokens = Vec::new();
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '+' => { tokens.push(Spanned { token: Token::Plus, pos }); i += 1; }
            '-' => { tokens.push(Spanned { token: Token::Minus, pos }); i += 1; }
            '*' => { tokens.push(Spanned { token: Token::Star, pos }); i += 1; }
            '/' => { tokens.push(Spanned { token: Token::Slash, pos }); i += 1; }
            '^' => { tokens.push(Spanned { token: Token::Caret, pos }); i += 1; }
            '(' => { tokens.push(Spanned { token: Token::LParen, pos }); i += 1; }
            ')' => { tokens.push(Spanned { token: Token::RParen, pos }); i += 1; }
            ',' => { tokens.push(Spanned { token: Token::Comma, pos }); i += 1; }
            '"' | '\'' => {
                let quote = c;
                let mut j = i + 1;
                while j < chars.len() && chars[j].1 != quote {
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(CalcError::parse_error("unterminated string literal")
                        .with_expression(input)
                        .at_position(pos));
                }
                let start = chars[i + 1].0;
                let end = chars[j].0;
                tokens.push(Spanned {
                    token: Token::Str(input[start..end].to_string()),
                    pos,
                });
                i = j + 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let mut seen_dot = false;
                while i < chars.len() {
                    let ch = chars[i].1;
                    if ch.is_ascii_digit() {
                        i += 1;
                    } else if ch == '.' && !seen_dot {
                        seen_dot = true;
                        i += 1;
                    } else {
                        break;
                    }
                }
                let end = if i < chars.len() { chars[i].0 } else { input.len() };
                let text = &input[pos..end];
                let number: f64 = text.parse().map_err(|_| {
                    CalcError::parse_error(format!("invalid number '{}'", text))
                        .with_expression(input)
                        .at_position(pos)
                })?;
                tokens.push(Spanned { token: Token::Number(number), pos });
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut end = input.len();
                let mut j = i;
                while j < chars.len() {
                    let ch = chars[j].1;
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        j += 1;
                    } else {
                        end = chars[j].0;
                        break;
                    }
                }
                tokens.push(Spanned {
                    token: Token::Ident(input[pos..end].to_string()),
                    pos,
                });
                i = j;
            }
            other => {
                return Err(CalcError::parse_error(format!("unexpected character '{}'", other))
                    .with_expression(input)
                    .at_position(pos));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_numbers_and_operators() {
        assert_eq!(
            kinds("2 + 3.5"),
            vec![Token::Number(2.0), Token::Plus, Token::Number(3.5)]
        );
    }

    #[test]
    fn test_leading_dot_number() {
        assert_eq!(kinds(".5"), vec![Token::Number(0.5)]);
    }

    #[test]
    fn test_identifier_and_call_tokens() {
        assert_eq!(
            kinds("sin(x)"),
            vec![
                Token::Ident("sin".to_string()),
                Token::LParen,
                Token::Ident("x".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_positions_recorded() {
        let toks = tokenize("1 + 22").unwrap();
        assert_eq!(toks[0].pos, 0);
        assert_eq!(toks[1].pos, 2);
        assert_eq!(toks[2].pos, 4);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            kinds("convert(1, \"km\", 'm')"),
            vec![
                Token::Ident("convert".to_string()),
                Token::LParen,
                Token::Number(1.0),
                Token::Comma,
                Token::Str("km".to_string()),
                Token::Comma,
                Token::Str("m".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_rejected() {
        let err = tokenize("convert(1, \"km").unwrap_err();
        assert_eq!(err.code, reckon_core::codes::PARSE_ERROR);
    }

    #[test]
    fn test_double_dot_rejected() {
        let err = tokenize("1.2.3").unwrap_err();
        assert_eq!(err.code, reckon_core::codes::PARSE_ERROR);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("2 $ 3").unwrap_err();
        assert_eq!(err.code, reckon_core::codes::PARSE_ERROR);
        assert_eq!(err.context.unwrap().position, Some(2));
    }
}
