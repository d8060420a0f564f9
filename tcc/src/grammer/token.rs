use std::fmt;

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            pos,
        }
    }

    pub fn line(&self) -> usize {
        self.pos.line
    }
}

/// Tokens compare by kind only.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Double character tokens
    AndAnd,     // '&&'
    PipePipe,   // '||'
    EqualEqual, // '=='
    ExclEqual,  // '!='

    // Single character tokens
    Equal,     // '='
    Plus,      // '+'
    Minus,     // '-'
    Star,      // '*'
    Slash,     // '/'
    Tilde,     // '~'
    Excl,      // '!'
    Semicolon, // ';'
    LParen,    // '('
    RParen,    // ')'
    LCurly,    // '{'
    RCurly,    // '}'
    LAngle,    // '<'
    RAngle,    // '>'

    // Keywords
    KwInt,    // "int"
    KwFloat,  // "float"
    KwReturn, // "return"
    KwIf,     // "if"
    KwElse,   // "else"

    // Identifier
    Ident(String),

    // Literals
    IntValue(i32),
    FloatValue(f32),

    // Special
    Failed, // Lexer could not classify the lexeme
    End,
}

impl TokenKind {
    /// Tokens that can begin an expression
    pub fn starts_expression(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Ident(_) | IntValue(_) | FloatValue(_) | LParen | Minus | Tilde | Excl
        )
    }

    /// Tokens that can begin a statement
    pub fn starts_statement(&self) -> bool {
        use TokenKind::*;
        matches!(self, KwReturn | KwIf | LCurly) || self.starts_expression()
    }

    /// Tokens that can begin a declaration or statement
    pub fn starts_block_item(&self) -> bool {
        matches!(self, TokenKind::KwInt) || self.starts_statement()
    }

    pub fn is_unary_operator(&self) -> bool {
        use TokenKind::*;
        matches!(self, Minus | Tilde | Excl)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use TokenKind::*;
        match self {
            AndAnd => write!(f, "'&&'"),
            PipePipe => write!(f, "'||'"),
            EqualEqual => write!(f, "'=='"),
            ExclEqual => write!(f, "'!='"),
            Equal => write!(f, "'='"),
            Plus => write!(f, "'+'"),
            Minus => write!(f, "'-'"),
            Star => write!(f, "'*'"),
            Slash => write!(f, "'/'"),
            Tilde => write!(f, "'~'"),
            Excl => write!(f, "'!'"),
            Semicolon => write!(f, "';'"),
            LParen => write!(f, "'('"),
            RParen => write!(f, "')'"),
            LCurly => write!(f, "'{{'"),
            RCurly => write!(f, "'}}'"),
            LAngle => write!(f, "'<'"),
            RAngle => write!(f, "'>'"),
            KwInt => write!(f, "'int'"),
            KwFloat => write!(f, "'float'"),
            KwReturn => write!(f, "'return'"),
            KwIf => write!(f, "'if'"),
            KwElse => write!(f, "'else'"),
            Ident(name) => write!(f, "identifier `{name}`"),
            IntValue(v) => write!(f, "int value {v}"),
            FloatValue(v) => write!(f, "float value {v}"),
            Failed => write!(f, "unrecognized token"),
            End => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}
