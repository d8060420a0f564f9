use arch::{Asm, Inst, Reg};
use std::collections::HashMap;

use crate::error::Error;

/// Highest stack address (exclusive). The stack grows down from here.
pub const STACK_TOP: i64 = 0x0010_0000;
/// Stack size in 32-bit words.
pub const STACK_WORDS: usize = 0x4000;
/// Return address pushed before entering the code; `ret` to it halts.
pub const RETURN_SENTINEL: i32 = -16;

const STACK_BASE: i64 = STACK_TOP - 4 * STACK_WORDS as i64;

#[derive(Debug, Clone)]
pub struct State {
    regs: [i32; 6],
    stack: Vec<i32>,
    cmp: (i32, i32),
    pub pc: usize,
    shutdown: bool,
}

impl State {
    pub fn new() -> Self {
        let mut state = State {
            regs: [0; 6],
            stack: vec![0; STACK_WORDS],
            cmp: (0, 0),
            pc: 0,
            shutdown: false,
        };
        state.regs[Self::index(Reg::ESP)] = STACK_TOP as i32;
        state.regs[Self::index(Reg::EBP)] = STACK_TOP as i32;
        state
    }

    fn index(reg: Reg) -> usize {
        match reg.full() {
            Reg::EAX => 0,
            Reg::EBX => 1,
            Reg::ECX => 2,
            Reg::EDX => 3,
            Reg::ESP => 4,
            _ => 5,
        }
    }

    pub fn get(&self, reg: Reg) -> i32 {
        let value = self.regs[Self::index(reg)];
        if reg.is_byte() {
            value & 0xFF
        } else {
            value
        }
    }

    pub fn set(&mut self, reg: Reg, value: i32) {
        let slot = &mut self.regs[Self::index(reg)];
        if reg.is_byte() {
            *slot = (*slot & !0xFF) | (value & 0xFF);
        } else {
            *slot = value;
        }
    }

    fn slot(&self, addr: i64) -> Result<usize, Error> {
        if addr % 4 != 0 || addr < STACK_BASE || addr >= STACK_TOP {
            return Err(Error::StackAccess(addr));
        }
        Ok(((addr - STACK_BASE) / 4) as usize)
    }

    pub fn read(&self, addr: i64) -> Result<i32, Error> {
        Ok(self.stack[self.slot(addr)?])
    }

    pub fn write(&mut self, addr: i64, value: i32) -> Result<(), Error> {
        let slot = self.slot(addr)?;
        self.stack[slot] = value;
        Ok(())
    }

    fn addr(&self, base: Reg, off: i32) -> i64 {
        self.get(base) as i64 + off as i64
    }

    pub fn push(&mut self, value: i32) -> Result<(), Error> {
        let sp = self.get(Reg::ESP).wrapping_sub(4);
        self.set(Reg::ESP, sp);
        self.write(sp as i64, value)
    }

    pub fn pop(&mut self) -> Result<i32, Error> {
        let sp = self.get(Reg::ESP);
        let value = self.read(sp as i64)?;
        self.set(Reg::ESP, sp.wrapping_add(4));
        Ok(value)
    }

    /// Words between `esp` and the top of the stack, lowest address first.
    pub fn stack(&self) -> Vec<(i64, i32)> {
        let sp = (self.get(Reg::ESP) as i64).max(STACK_BASE);
        (sp..STACK_TOP)
            .step_by(4)
            .filter_map(|addr| self.read(addr).ok().map(|v| (addr, v)))
            .collect()
    }

    pub fn is_terminated(&self) -> bool {
        self.shutdown
    }

    /// Value left in the accumulator.
    pub fn result(&self) -> i32 {
        self.get(Reg::EBX)
    }

    pub fn exec(&mut self, line: &Asm, labels: &HashMap<String, usize>) -> Result<(), Error> {
        let inst = match line {
            Asm::Label(_) => {
                self.pc += 1;
                return Ok(());
            }
            Asm::Inst(inst) => inst,
        };

        let jump = |label: &String| {
            labels
                .get(label)
                .copied()
                .ok_or_else(|| Error::UndefinedLabel(label.clone()))
        };

        let mut next = self.pc + 1;
        match inst {
            Inst::MOV(rd, rs) => self.set(*rd, self.get(*rs)),
            Inst::MOVI(rd, imm) => self.set(*rd, *imm),
            Inst::LOAD(rd, base, off) => {
                let value = self.read(self.addr(*base, *off))?;
                self.set(*rd, value);
            }
            Inst::STORE(rs, base, off) => self.write(self.addr(*base, *off), self.get(*rs))?,
            Inst::STOREI(base, off, imm) => self.write(self.addr(*base, *off), *imm)?,

            Inst::PUSH(rs) => self.push(self.get(*rs))?,
            Inst::PUSHI(imm) => self.push(*imm)?,
            Inst::POP(rd) => {
                let value = self.pop()?;
                self.set(*rd, value);
            }

            Inst::ADD(rd, rs) => self.set(*rd, self.get(*rd).wrapping_add(self.get(*rs))),
            Inst::SUB(rd, rs) => self.set(*rd, self.get(*rd).wrapping_sub(self.get(*rs))),
            Inst::SUBI(rd, imm) => self.set(*rd, self.get(*rd).wrapping_sub(*imm)),
            Inst::IMUL(rd, rs) => self.set(*rd, self.get(*rd).wrapping_mul(self.get(*rs))),
            Inst::CDQ() => self.set(Reg::EDX, if self.get(Reg::EAX) < 0 { -1 } else { 0 }),
            Inst::IDIV(rs) => {
                let dividend =
                    ((self.get(Reg::EDX) as i64) << 32) | (self.get(Reg::EAX) as u32 as i64);
                let divisor = self.get(*rs) as i64;
                if divisor == 0 {
                    return Err(Error::DivideError(dividend, divisor));
                }
                let quotient = dividend / divisor;
                let remainder = dividend % divisor;
                let quotient =
                    i32::try_from(quotient).map_err(|_| Error::DivideError(dividend, divisor))?;
                self.set(Reg::EAX, quotient);
                self.set(Reg::EDX, remainder as i32);
            }
            Inst::NEG(rd) => self.set(*rd, self.get(*rd).wrapping_neg()),
            Inst::NOT(rd) => self.set(*rd, !self.get(*rd)),
            Inst::AND(rd, rs) => self.set(*rd, self.get(*rd) & self.get(*rs)),
            Inst::OR(rd, rs) => self.set(*rd, self.get(*rd) | self.get(*rs)),

            Inst::CMP(rs1, rs2) => self.cmp = (self.get(*rs1), self.get(*rs2)),
            Inst::CMPI(rs, imm) => self.cmp = (self.get(*rs), *imm),
            Inst::SET(cc, rd) => {
                let (lhs, rhs) = self.cmp;
                self.set(*rd, cc.holds(lhs, rhs) as i32);
            }

            Inst::JMP(label) => next = jump(label)?,
            Inst::JCC(cc, label) => {
                let (lhs, rhs) = self.cmp;
                if cc.holds(lhs, rhs) {
                    next = jump(label)?;
                }
            }
            Inst::RET() => {
                let ra = self.pop()?;
                if ra == RETURN_SENTINEL {
                    self.shutdown = true;
                } else {
                    next = usize::try_from(ra).map_err(|_| Error::PcOutOfRange(ra as usize))?;
                }
            }
        }
        self.pc = next;
        Ok(())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::Cond;

    fn run(code: &[Inst]) -> State {
        let mut state = State::new();
        let labels = HashMap::new();
        for inst in code {
            state.exec(&Asm::Inst(inst.clone()), &labels).unwrap();
        }
        state
    }

    #[test]
    fn byte_register_writes_keep_upper_bits() {
        let state = run(&[Inst::MOVI(Reg::EBX, 0x1200), Inst::SET(Cond::E, Reg::BL)]);
        assert_eq!(state.get(Reg::EBX), 0x1201);
    }

    #[test]
    fn push_pop_round_trip() {
        let state = run(&[
            Inst::MOVI(Reg::EBX, 42),
            Inst::PUSH(Reg::EBX),
            Inst::PUSHI(7),
            Inst::POP(Reg::ECX),
            Inst::POP(Reg::EAX),
        ]);
        assert_eq!(state.get(Reg::ECX), 7);
        assert_eq!(state.get(Reg::EAX), 42);
        assert_eq!(state.get(Reg::ESP), STACK_TOP as i32);
    }

    #[test]
    fn signed_division() {
        let state = run(&[
            Inst::MOVI(Reg::EAX, -7),
            Inst::MOVI(Reg::EBX, 2),
            Inst::CDQ(),
            Inst::IDIV(Reg::EBX),
        ]);
        assert_eq!(state.get(Reg::EAX), -3);
        assert_eq!(state.get(Reg::EDX), -1);
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let mut state = State::new();
        let labels = HashMap::new();
        let err = state.exec(&Asm::Inst(Inst::IDIV(Reg::EBX)), &labels);
        assert!(matches!(err, Err(Error::DivideError(0, 0))));
    }

    #[test]
    fn popping_an_empty_stack_is_an_error() {
        let mut state = State::new();
        assert!(matches!(state.pop(), Err(Error::StackAccess(_))));
    }
}
