use crate::inst::Inst;

use color_print::cformat;
use std::fmt;

/// One line of generated assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asm {
    Label(String),
    Inst(Inst),
}

impl From<Inst> for Asm {
    fn from(inst: Inst) -> Self {
        Asm::Inst(inst)
    }
}

impl fmt::Display for Asm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asm::Label(name) => write!(f, "{name}:"),
            Asm::Inst(inst) => write!(f, "{inst}"),
        }
    }
}

impl Asm {
    pub fn cformat(&self) -> String {
        match self {
            Asm::Label(name) => cformat!("<g,s>{}:</>", name),
            Asm::Inst(inst) => format!("    {}", inst.cformat()),
        }
    }
}

#[test]
fn test() {
    assert_eq!(Asm::Label("L_END_0".into()).to_string(), "L_END_0:");
    assert_eq!(Asm::from(Inst::RET()).to_string(), "ret");
}
