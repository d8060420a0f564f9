pub mod compile;
mod error;
pub mod grammer;

pub use compile::{generate, render, Code, FrameLayout};
pub use error::{CodeGenError, Diagnostic, Error};
pub use grammer::ast;
pub use grammer::lexer::Lexer;
pub use grammer::parser::parse;
pub use grammer::parsercore::Parser;
pub use grammer::token::{Pos, Token, TokenKind};

/// Reject a token stream containing anything the lexer could not classify.
pub fn check_tokens(tokens: &[Token]) -> Result<(), Error> {
    let diags: Vec<Diagnostic> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Failed)
        .map(|token| Diagnostic::new(format!("Unrecognized token `{}`", token.lexeme), token.line()))
        .collect();
    if diags.is_empty() {
        Ok(())
    } else {
        Err(Error::Lex(diags))
    }
}

/// Lex and parse source text.
pub fn parse_source(source: &str) -> Result<ast::Program, Error> {
    let tokens = Lexer::new(source).tokenize();
    check_tokens(&tokens)?;
    parse(tokens).map_err(Error::Syntax)
}

/// Lower source text to the instructions of its function.
pub fn compile_source(source: &str, layout: FrameLayout) -> Result<Code, Error> {
    let program = parse_source(source)?;
    Ok(compile::compile(&program, layout)?)
}

/// Lower source text to a complete MASM program.
pub fn generate_source(source: &str, layout: FrameLayout) -> Result<String, Error> {
    let program = parse_source(source)?;
    Ok(generate(&program, layout)?)
}

/// Execute generated code on the emulator and return the accumulator.
pub fn run(code: &Code, hooks: &mut [Box<dyn emu::Hook>], tmax: Option<u64>) -> Result<i32, Error> {
    let machine = emu::Machine::new(code.lines())?;
    let state = machine.run(hooks, tmax)?;
    Ok(state.result())
}
