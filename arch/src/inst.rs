use crate::{cond::Cond, reg::Reg};

use color_print::cformat;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    MOV(Reg, Reg),
    MOVI(Reg, i32),
    LOAD(Reg, Reg, i32),   // mov rd, [base+off]
    STORE(Reg, Reg, i32),  // mov [base+off], rs
    STOREI(Reg, i32, i32), // mov DWORD PTR [base+off], imm

    PUSH(Reg),
    PUSHI(i32),
    POP(Reg),

    ADD(Reg, Reg),
    SUB(Reg, Reg),
    SUBI(Reg, i32),
    IMUL(Reg, Reg),
    CDQ(),
    IDIV(Reg),
    NEG(Reg),
    NOT(Reg),
    AND(Reg, Reg),
    OR(Reg, Reg),

    CMP(Reg, Reg),
    CMPI(Reg, i32),
    SET(Cond, Reg),

    JMP(String),
    JCC(Cond, String),
    RET(),
}

/// `[ebp-4]`, `[ebp+8]`, `[esp]`
fn mem(base: &Reg, off: &i32) -> String {
    match *off {
        0 => format!("[{base}]"),
        off if off < 0 => format!("[{base}{off}]"),
        off => format!("[{base}+{off}]"),
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::MOV(rd, rs) => write!(f, "mov {rd}, {rs}"),
            Inst::MOVI(rd, imm) => write!(f, "mov {rd}, {imm}"),
            Inst::LOAD(rd, base, off) => write!(f, "mov {rd}, {}", mem(base, off)),
            Inst::STORE(rs, base, off) => write!(f, "mov {}, {rs}", mem(base, off)),
            Inst::STOREI(base, off, imm) => write!(f, "mov DWORD PTR {}, {imm}", mem(base, off)),
            Inst::PUSH(rs) => write!(f, "push {rs}"),
            Inst::PUSHI(imm) => write!(f, "push {imm}"),
            Inst::POP(rd) => write!(f, "pop {rd}"),
            Inst::ADD(rd, rs) => write!(f, "add {rd}, {rs}"),
            Inst::SUB(rd, rs) => write!(f, "sub {rd}, {rs}"),
            Inst::SUBI(rd, imm) => write!(f, "sub {rd}, {imm}"),
            Inst::IMUL(rd, rs) => write!(f, "imul {rd}, {rs}"),
            Inst::CDQ() => write!(f, "cdq"),
            Inst::IDIV(rs) => write!(f, "idiv {rs}"),
            Inst::NEG(rd) => write!(f, "neg {rd}"),
            Inst::NOT(rd) => write!(f, "not {rd}"),
            Inst::AND(rd, rs) => write!(f, "and {rd}, {rs}"),
            Inst::OR(rd, rs) => write!(f, "or {rd}, {rs}"),
            Inst::CMP(rs1, rs2) => write!(f, "cmp {rs1}, {rs2}"),
            Inst::CMPI(rs, imm) => write!(f, "cmp {rs}, {imm}"),
            Inst::SET(cc, rd) => write!(f, "set{cc} {rd}"),
            Inst::JMP(label) => write!(f, "jmp {label}"),
            Inst::JCC(cc, label) => write!(f, "j{cc} {label}"),
            Inst::RET() => write!(f, "ret"),
        }
    }
}

impl Inst {
    /// Jump target, if this instruction transfers control to a label.
    pub fn target(&self) -> Option<&str> {
        match self {
            Inst::JMP(label) | Inst::JCC(_, label) => Some(label),
            _ => None,
        }
    }

    pub fn cformat(&self) -> String {
        macro_rules! rr {
            ($name:expr, $rd:expr, $rs:expr) => {
                cformat!("<r>{:<6}</><b>{:<16} {:<16}</>", $name, $rd, $rs)
            };
        }

        macro_rules! ri {
            ($name:expr, $rd:expr, $imm:expr) => {
                cformat!("<r>{:<6}</><b>{:<16} <y>{:<16}</></>", $name, $rd, $imm)
            };
        }

        macro_rules! lab {
            ($name:expr, $label:expr) => {
                cformat!("<r>{:<6}</><g>{}</>", $name, $label)
            };
        }

        match self {
            Inst::MOV(rd, rs) => rr!("mov", rd, rs),
            Inst::MOVI(rd, imm) => ri!("mov", rd, imm),
            Inst::LOAD(rd, base, off) => rr!("mov", rd, mem(base, off)),
            Inst::STORE(rs, base, off) => rr!("mov", mem(base, off), rs),
            Inst::STOREI(base, off, imm) => ri!("mov", mem(base, off), imm),
            Inst::PUSH(rs) => rr!("push", rs, ""),
            Inst::PUSHI(imm) => ri!("push", "", imm),
            Inst::POP(rd) => rr!("pop", rd, ""),
            Inst::ADD(rd, rs) => rr!("add", rd, rs),
            Inst::SUB(rd, rs) => rr!("sub", rd, rs),
            Inst::SUBI(rd, imm) => ri!("sub", rd, imm),
            Inst::IMUL(rd, rs) => rr!("imul", rd, rs),
            Inst::CDQ() => rr!("cdq", "", ""),
            Inst::IDIV(rs) => rr!("idiv", rs, ""),
            Inst::NEG(rd) => rr!("neg", rd, ""),
            Inst::NOT(rd) => rr!("not", rd, ""),
            Inst::AND(rd, rs) => rr!("and", rd, rs),
            Inst::OR(rd, rs) => rr!("or", rd, rs),
            Inst::CMP(rs1, rs2) => rr!("cmp", rs1, rs2),
            Inst::CMPI(rs, imm) => ri!("cmp", rs, imm),
            Inst::SET(cc, rd) => rr!(format!("set{cc}"), rd, ""),
            Inst::JMP(label) => lab!("jmp", label),
            Inst::JCC(cc, label) => lab!(format!("j{cc}"), label),
            Inst::RET() => rr!("ret", "", ""),
        }
    }
}
