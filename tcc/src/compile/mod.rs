pub mod func;
pub mod scope;
pub mod template;

use crate::{error::CodeGenError, grammer::ast::Program};
use arch::Asm;
use func::FuncCompiler;
use std::fmt;

/// Generated body of one function, including its frame setup and teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct Code(pub Vec<Asm>);

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.0 {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl Code {
    pub fn lines(&self) -> &[Asm] {
        &self.0
    }
}

/// How declaration slots are placed on the machine stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FrameLayout {
    /// Reserve every slot in the prologue and store into it.
    #[default]
    Reserved,
    /// Push each slot as it is declared; pop one word per open scope on block exit.
    Push,
}

/// Lower the single function of `program`.
pub fn compile(program: &Program, layout: FrameLayout) -> Result<Code, CodeGenError> {
    let function = &program.function;
    if template::is_reserved(&function.name) {
        return Err(CodeGenError::ReservedName(function.name.clone()));
    }
    FuncCompiler::new(&function.name, layout).compile(&function.body)
}

/// Complete MASM source for `program`.
pub fn generate(program: &Program, layout: FrameLayout) -> Result<String, CodeGenError> {
    let code = compile(program, layout)?;
    Ok(render(&program.function.name, &code))
}

/// Wrap an already compiled function body in the program template.
pub fn render(name: &str, code: &Code) -> String {
    format!(
        "{header}\n{numb_proto}\n{proto}\n.data\n{data}\n.code\n{entry}\n{name} PROC\n{code}{name} ENDP\n\n{runtime}end start\n",
        header = template::HEADER,
        numb_proto = template::NUMB_TO_STR_PROTO,
        proto = template::proto(name),
        data = template::DATA,
        entry = template::entry(name),
        runtime = template::NUMB_TO_STR,
    )
}
