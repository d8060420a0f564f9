#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub function: Function, // function EOF
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String, // "int" ident "(" ")" block
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block(pub Vec<BlockItem>); // "{" { block-item } "}"

#[derive(Debug, Clone, PartialEq)]
pub enum BlockItem {
    Declaration(Declaration), // declaration
    Statement(Stmt),          // statement
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,       // "int" ident
    pub init: Option<Expr>, // [ "=" expr ] ";"
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Return(Expr),    // "return" expr ";"
    Expr(Expr),      // expr ";"
    Block(Block),    // block
    Cond(Condition), // "if" "(" expr ")" block [ "else" block ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub test: Expr,
    pub then_block: Block,
    pub else_block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(i32),                            // int-lit
    Unary(UnaryOp, Box<Expr>),              // unary-op factor
    Binary(BinaryOp, Box<Expr>, Box<Expr>), // expr (binop) expr
    Assign(String, Box<Expr>),              // ident "=" expr
    Var(String),                            // ident
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,        // "-"
    Complement, // "~"
    Not,        // "!"
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, // "+"
    Sub, // "-"
    Mul, // "*"
    Div, // "/"
    And, // "&&"
    Or,  // "||"
    Eq,  // "=="
    Ne,  // "!="
    Lt,  // "<"
    Gt,  // ">"
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Expr::Assign(name.into(), Box::new(value))
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }
}

impl Block {
    /// Declarations in this block and every nested block.
    pub fn count_declarations(&self) -> usize {
        self.0
            .iter()
            .map(|item| match item {
                BlockItem::Declaration(_) => 1,
                BlockItem::Statement(stmt) => stmt.count_declarations(),
            })
            .sum()
    }
}

impl Stmt {
    fn count_declarations(&self) -> usize {
        match self {
            Stmt::Block(block) => block.count_declarations(),
            Stmt::Cond(cond) => {
                cond.then_block.count_declarations()
                    + cond
                        .else_block
                        .as_ref()
                        .map_or(0, |block| block.count_declarations())
            }
            Stmt::Return(_) | Stmt::Expr(_) => 0,
        }
    }
}
