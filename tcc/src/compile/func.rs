use crate::{
    compile::{scope::Scopes, Code, FrameLayout},
    error::CodeGenError,
    grammer::ast::{BinaryOp, Block, BlockItem, Condition, Declaration, Expr, Stmt, UnaryOp},
};
use arch::{Asm, Cond, Inst, Reg};
use itertools::chain;

/// Accumulator: every expression leaves its value here.
const ACC: Reg = Reg::EBX;
/// Left operand of a binary operator after it is popped back.
const TMP: Reg = Reg::ECX;

macro_rules! asm {
    ($($inst:expr),* $(,)?) => {
        vec![$(Asm::from($inst)),*]
    };
}

pub struct FuncCompiler<'a> {
    name: &'a str,
    layout: FrameLayout,
    scopes: Scopes,
    labels: usize,
}

impl<'a> FuncCompiler<'a> {
    pub fn new(name: &'a str, layout: FrameLayout) -> Self {
        Self {
            name,
            layout,
            scopes: Scopes::new(),
            labels: 0,
        }
    }

    pub fn compile(mut self, body: &Block) -> Result<Code, CodeGenError> {
        let prologue = self.prologue(body);
        let body = self.compile_block(body)?;
        let epilogue = self.epilogue();
        Ok(Code(chain!(prologue, body, epilogue).collect()))
    }

    fn ret_label(&self) -> String {
        format!("L_RET_{}", self.name)
    }

    fn next_label(&mut self) -> usize {
        let id = self.labels;
        self.labels += 1;
        id
    }

    fn prologue(&self, body: &Block) -> Vec<Asm> {
        let mut code = asm![Inst::PUSH(Reg::EBP), Inst::MOV(Reg::EBP, Reg::ESP)];
        if self.layout == FrameLayout::Reserved {
            let slots = body.count_declarations() as i32;
            if slots > 0 {
                code.push(Inst::SUBI(Reg::ESP, 4 * slots).into());
            }
        }
        code
    }

    fn epilogue(&self) -> Vec<Asm> {
        chain!(
            [Asm::Label(self.ret_label())],
            asm![
                Inst::MOV(Reg::ESP, Reg::EBP),
                Inst::POP(Reg::EBP),
                Inst::RET()
            ]
        )
        .collect()
    }

    fn compile_block(&mut self, block: &Block) -> Result<Vec<Asm>, CodeGenError> {
        self.scopes.enter();
        let mut code = Vec::new();
        for item in &block.0 {
            code.extend(self.compile_item(item)?);
        }
        if self.layout == FrameLayout::Push {
            // One pop per open frame, not per declaration
            for _ in 0..self.scopes.depth() {
                code.push(Inst::POP(TMP).into());
            }
        }
        self.scopes.leave();
        Ok(code)
    }

    fn compile_item(&mut self, item: &BlockItem) -> Result<Vec<Asm>, CodeGenError> {
        match item {
            BlockItem::Declaration(decl) => self.compile_decl(decl),
            BlockItem::Statement(stmt) => self.compile_stmt(stmt),
        }
    }

    fn compile_decl(&mut self, decl: &Declaration) -> Result<Vec<Asm>, CodeGenError> {
        let offset = self.scopes.declare(&decl.name)?;
        match (&decl.init, self.layout) {
            (Some(init), FrameLayout::Reserved) => Ok(chain!(
                self.compile_expr(init)?,
                asm![Inst::STORE(ACC, Reg::EBP, offset)]
            )
            .collect()),
            (None, FrameLayout::Reserved) => Ok(asm![Inst::STOREI(Reg::EBP, offset, 0)]),
            (Some(init), FrameLayout::Push) => {
                Ok(chain!(self.compile_expr(init)?, asm![Inst::PUSH(ACC)]).collect())
            }
            (None, FrameLayout::Push) => Ok(asm![Inst::PUSHI(0)]),
        }
    }

    fn compile_stmt(&mut self, stmt: &Stmt) -> Result<Vec<Asm>, CodeGenError> {
        match stmt {
            Stmt::Return(expr) => Ok(chain!(
                self.compile_expr(expr)?,
                asm![Inst::JMP(self.ret_label())]
            )
            .collect()),
            Stmt::Expr(expr) => self.compile_expr(expr),
            Stmt::Block(block) => self.compile_block(block),
            Stmt::Cond(cond) => self.compile_cond(cond),
        }
    }

    fn compile_cond(&mut self, cond: &Condition) -> Result<Vec<Asm>, CodeGenError> {
        let id = self.next_label();
        let else_label = format!("L_ELSE_{id}");
        let end_label = format!("L_END_{id}");

        let test = self.compile_expr(&cond.test)?;
        let then_code = self.compile_block(&cond.then_block)?;

        match &cond.else_block {
            Some(else_block) => {
                let else_code = self.compile_block(else_block)?;
                Ok(chain!(
                    test,
                    asm![Inst::CMPI(ACC, 0), Inst::JCC(Cond::E, else_label.clone())],
                    then_code,
                    asm![Inst::JMP(end_label.clone())],
                    [Asm::Label(else_label)],
                    else_code,
                    [Asm::Label(end_label)]
                )
                .collect())
            }
            None => Ok(chain!(
                test,
                asm![Inst::CMPI(ACC, 0), Inst::JCC(Cond::E, end_label.clone())],
                then_code,
                asm![Inst::JMP(end_label.clone())],
                [Asm::Label(end_label)]
            )
            .collect()),
        }
    }

    fn compile_expr(&mut self, expr: &Expr) -> Result<Vec<Asm>, CodeGenError> {
        match expr {
            Expr::IntLit(value) => Ok(asm![Inst::MOVI(ACC, *value)]),

            Expr::Var(name) => {
                let offset = self.scopes.resolve(name)?;
                Ok(asm![Inst::LOAD(ACC, Reg::EBP, offset)])
            }

            Expr::Assign(name, value) => {
                let value = self.compile_expr(value)?;
                let offset = self.scopes.resolve(name)?;
                Ok(chain!(value, asm![Inst::STORE(ACC, Reg::EBP, offset)]).collect())
            }

            Expr::Unary(op, operand) => {
                let operand = self.compile_expr(operand)?;
                let apply = match op {
                    UnaryOp::Neg => asm![Inst::NEG(ACC)],
                    UnaryOp::Complement => asm![Inst::NOT(ACC)],
                    UnaryOp::Not => asm![
                        Inst::CMPI(ACC, 0),
                        Inst::MOVI(ACC, 0),
                        Inst::SET(Cond::E, Reg::BL)
                    ],
                };
                Ok(chain!(operand, apply).collect())
            }

            Expr::Binary(op, lhs, rhs) => {
                let lhs = self.compile_expr(lhs)?;
                let rhs = self.compile_expr(rhs)?;
                Ok(chain!(
                    lhs,
                    asm![Inst::PUSH(ACC)],
                    rhs,
                    asm![Inst::POP(TMP)],
                    Self::combine(*op)
                )
                .collect())
            }
        }
    }

    /// Combine left (`ecx`) and right (`ebx`) into `ebx`.
    fn combine(op: BinaryOp) -> Vec<Asm> {
        let compare = |cc: Cond| {
            asm![
                Inst::CMP(TMP, ACC),
                Inst::MOVI(ACC, 0),
                Inst::SET(cc, Reg::BL)
            ]
        };
        let booleans = || {
            asm![
                Inst::CMPI(TMP, 0),
                Inst::MOVI(TMP, 0),
                Inst::SET(Cond::NE, Reg::CL),
                Inst::CMPI(ACC, 0),
                Inst::MOVI(ACC, 0),
                Inst::SET(Cond::NE, Reg::BL)
            ]
        };

        match op {
            BinaryOp::Add => asm![Inst::ADD(ACC, TMP)],
            BinaryOp::Sub => asm![Inst::SUB(TMP, ACC), Inst::MOV(ACC, TMP)],
            BinaryOp::Mul => asm![Inst::IMUL(ACC, TMP)],
            BinaryOp::Div => asm![
                Inst::MOV(Reg::EAX, TMP),
                Inst::CDQ(),
                Inst::IDIV(ACC),
                Inst::MOV(ACC, Reg::EAX)
            ],
            BinaryOp::And => chain!(booleans(), asm![Inst::AND(ACC, TMP)]).collect(),
            BinaryOp::Or => chain!(booleans(), asm![Inst::OR(ACC, TMP)]).collect(),
            BinaryOp::Eq => compare(Cond::E),
            BinaryOp::Ne => compare(Cond::NE),
            BinaryOp::Lt => compare(Cond::L),
            BinaryOp::Gt => compare(Cond::G),
        }
    }
}
