use color_print::cprintln;
use thiserror::Error;

/// A message attached to a 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Diagnostic {
            message: message.into(),
            line,
        }
    }

    pub fn print(&self, file: &str, source: &str) {
        cprintln!("<red,bold>error</>: {}", self.message);
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, self.line);
        cprintln!("      <blue>|</>");

        let line_content = self
            .line
            .checked_sub(1)
            .and_then(|idx| source.lines().nth(idx))
            .unwrap_or("");

        cprintln!(" <blue>{:>4} |</> {}", self.line, line_content);
        cprintln!("      <blue>|</>");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeGenError {
    #[error("Undeclared variable: `{0}`")]
    UndeclaredVariable(String),

    #[error("Duplicate declaration: `{0}`")]
    DuplicateDeclaration(String),

    #[error("Function name is reserved by the program template: `{0}`")]
    ReservedName(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Lexical error ({} unrecognized token(s))", .0.len())]
    Lex(Vec<Diagnostic>),

    #[error("Syntax error ({} diagnostic(s))", .0.len())]
    Syntax(Vec<Diagnostic>),

    #[error("Code generation error: {0}")]
    CodeGen(#[from] CodeGenError),

    #[error("Cannot open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Cannot write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Emulation failed: {0}")]
    Emulate(#[from] emu::Error),
}

impl Error {
    /// Source-level diagnostics carried by this error, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Lex(diags) | Error::Syntax(diags) => diags,
            _ => &[],
        }
    }
}
