use super::token::{Pos, Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    code: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self { code }
    }

    /// Tokenize the whole source. The result always ends with one `End` token.
    pub fn tokenize(self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last = 1;
        for (idx, line) in self.code.lines().enumerate() {
            last = idx + 1;
            tokens.extend(LineLexer::new(line, last).parse());
        }
        tokens.push(Token::new(TokenKind::End, "", Pos { line: last, col: 0 }));
        tokens
    }
}

struct LineLexer<'a> {
    line: &'a str,
    iter: Peekable<CharIndices<'a>>,
    row: usize,
}

impl<'a> LineLexer<'a> {
    fn new(line: &'a str, row: usize) -> Self {
        Self {
            line,
            iter: line.char_indices().peekable(),
            row,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }
    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }
    fn offset(&mut self) -> usize {
        self.iter.peek().map(|(idx, _)| *idx).unwrap_or(self.line.len())
    }
}

// ----------------------------------------------------------------------------
// Parser
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    fn parse(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some((idx, ch0)) = self.peek_nth(0) {
            // 0. Skip whitespaces
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = Pos {
                line: self.row,
                col: idx + 1,
            };

            // 1. Double character token
            if let Some((_, ch1)) = self.peek_nth(1) {
                // Comment
                if ch0 == '/' && ch1 == '/' {
                    break;
                }

                if let Some(kind) = double_char_token(ch0, ch1) {
                    self.consume();
                    self.consume();
                    tokens.push(Token::new(kind, &self.line[idx..idx + 2], pos));
                    continue;
                }
            }

            // 2. Single character token
            if let Some(kind) = single_char_token(ch0) {
                self.consume();
                tokens.push(Token::new(kind, &self.line[idx..idx + 1], pos));
                continue;
            }

            // 3. Number literal
            if ch0.is_ascii_digit() {
                let kind = self.parse_number();
                let end = self.offset();
                tokens.push(Token::new(kind, &self.line[idx..end], pos));
                continue;
            }

            // 4. Identifier or keyword
            if ch0.is_ascii_alphabetic() {
                let kind = self.parse_word();
                let end = self.offset();
                tokens.push(Token::new(kind, &self.line[idx..end], pos));
                continue;
            }

            // Error
            self.consume();
            tokens.push(Token::new(TokenKind::Failed, ch0.to_string(), pos));
        }
        tokens
    }

    fn parse_word(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        while let Some((_, ch)) = self
            .iter
            .next_if(|(_, ch)| matches!(ch, '_' | '0'..='9' | 'a'..='z' | 'A'..='Z'))
        {
            lexeme.push(ch);
        }
        match keyword(&lexeme) {
            Some(kind) => kind,
            None => TokenKind::Ident(lexeme),
        }
    }

    fn parse_number(&mut self) -> TokenKind {
        if let (Some((_, '0')), Some((_, 'b' | 'B'))) = (self.peek_nth(0), self.peek_nth(1)) {
            self.consume();
            self.consume();
            return self.parse_number_bin();
        }
        self.parse_number_dec()
    }

    fn parse_number_bin(&mut self) -> TokenKind {
        let mut digits = String::new();
        while let Some((_, ch)) = self.iter.next_if(|(_, ch)| ch.is_ascii_alphanumeric()) {
            digits.push(ch);
        }
        match i32::from_str_radix(&digits, 2) {
            Ok(num) => TokenKind::IntValue(num),
            Err(_) => TokenKind::Failed,
        }
    }

    fn parse_number_dec(&mut self) -> TokenKind {
        let mut lexeme = String::new();
        let mut dot = false;
        while let Some(&(_, ch)) = self.iter.peek() {
            if !(ch.is_ascii_alphanumeric() || (ch == '.' && !dot)) {
                break;
            }
            dot |= ch == '.';
            lexeme.push(ch);
            self.consume();
        }
        if dot {
            return match lexeme.parse::<f32>() {
                Ok(num) => TokenKind::FloatValue(num),
                Err(_) => TokenKind::Failed,
            };
        }
        match lexeme.parse::<i32>() {
            Ok(num) => TokenKind::IntValue(num),
            Err(_) => TokenKind::Failed,
        }
    }
}

fn double_char_token(ch0: char, ch1: char) -> Option<TokenKind> {
    match (ch0, ch1) {
        ('&', '&') => Some(TokenKind::AndAnd),
        ('|', '|') => Some(TokenKind::PipePipe),
        ('=', '=') => Some(TokenKind::EqualEqual),
        ('!', '=') => Some(TokenKind::ExclEqual),
        _ => None,
    }
}

fn single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '=' => Some(TokenKind::Equal),
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '~' => Some(TokenKind::Tilde),
        '!' => Some(TokenKind::Excl),
        ';' => Some(TokenKind::Semicolon),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        '{' => Some(TokenKind::LCurly),
        '}' => Some(TokenKind::RCurly),
        '<' => Some(TokenKind::LAngle),
        '>' => Some(TokenKind::RAngle),
        _ => None,
    }
}

fn keyword(s: &str) -> Option<TokenKind> {
    match s {
        "int" => Some(TokenKind::KwInt),
        "float" => Some(TokenKind::KwFloat),
        "return" => Some(TokenKind::KwReturn),
        "if" => Some(TokenKind::KwIf),
        "else" => Some(TokenKind::KwElse),
        _ => None,
    }
}
