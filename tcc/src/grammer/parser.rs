use super::ast::{
    BinaryOp, Block, BlockItem, Condition, Declaration, Expr, Function, Program, Stmt, UnaryOp,
};
use super::parsercore::Parser;
use super::token::{Token, TokenKind::*};
use crate::error::Diagnostic;
use crate::{check, expect, optional};

/// Build the AST for a whole token stream.
///
/// Parsing stops at the first failure; the error list then holds exactly one
/// diagnostic and no tree is produced.
pub fn parse(tokens: Vec<Token>) -> Result<Program, Vec<Diagnostic>> {
    Parser::new(tokens).parse().map_err(|diag| vec![diag])
}

impl Parser {
    pub fn parse(mut self) -> Result<Program, Diagnostic> {
        self.parse_program()
    }
}

impl Parser {
    /// program = function EOF
    fn parse_program(&mut self) -> Result<Program, Diagnostic> {
        let function = self.parse_function()?;
        expect!(self, End, "Expected end of input!")?;
        Ok(Program { function })
    }

    /// function = "int" ident "(" ")" block
    fn parse_function(&mut self) -> Result<Function, Diagnostic> {
        expect!(self, KwInt, "Expected 'int'!")?;
        let name = self.parse_ident("Function definition must have identifier.")?;
        expect!(self, LParen, "Expected '('!")?;
        expect!(self, RParen, "Expected ')'!")?;
        let body = self.parse_block()?;
        Ok(Function { name, body })
    }

    /// block = "{" { block-item } "}"
    fn parse_block(&mut self) -> Result<Block, Diagnostic> {
        expect!(self, LCurly, "Expected '{'!")?;
        let mut items = Vec::new();
        while self.check_if(|kind| kind.starts_block_item() || matches!(kind, KwFloat)) {
            items.push(self.parse_block_item()?);
        }
        expect!(self, RCurly, "Expected '}'!")?;
        Ok(Block(items))
    }

    /// block-item = declaration | statement
    fn parse_block_item(&mut self) -> Result<BlockItem, Diagnostic> {
        if check!(self, KwFloat) {
            return Err(self.error("Type 'float' is not supported!"));
        }
        if check!(self, KwInt) {
            Ok(BlockItem::Declaration(self.parse_declaration()?))
        } else {
            Ok(BlockItem::Statement(self.parse_statement()?))
        }
    }

    /// declaration = "int" ident [ "=" expr ] ";"
    fn parse_declaration(&mut self) -> Result<Declaration, Diagnostic> {
        expect!(self, KwInt, "Expected 'int'!")?;
        let name = self.parse_ident("Expected identifier!")?;
        let init = optional!(self, Equal, self.parse_expr()?);
        expect!(self, Semicolon, "Expected ';'!")?;
        Ok(Declaration { name, init })
    }

    /// statement = "return" expr ";" | expr ";" | block | "if" "(" expr ")" block [ "else" block ]
    fn parse_statement(&mut self) -> Result<Stmt, Diagnostic> {
        match self.peek().kind {
            // "return" expr ";"
            KwReturn => {
                expect!(self, KwReturn, "Expected 'return'!")?;
                let expr = self.parse_expr()?;
                expect!(self, Semicolon, "Expected ';'!")?;
                Ok(Stmt::Return(expr))
            }

            // "if" "(" expr ")" block [ "else" block ]
            KwIf => {
                expect!(self, KwIf, "Expected 'if'!")?;
                expect!(self, LParen, "Expected '('!")?;
                let test = self.parse_expr()?;
                expect!(self, RParen, "Expected ')'!")?;
                let then_block = self.parse_block()?;
                let else_block = optional!(self, KwElse, self.parse_block()?);
                Ok(Stmt::Cond(Condition {
                    test,
                    then_block,
                    else_block,
                }))
            }

            // block
            LCurly => Ok(Stmt::Block(self.parse_block()?)),

            // expr ";"
            _ => {
                let expr = self.parse_expr()?;
                expect!(self, Semicolon, "Expected ';'!")?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    /// expr = ident "=" expr | logical-or
    pub fn parse_expr(&mut self) -> Result<Expr, Diagnostic> {
        if let Ident(name) = self.peek().kind.clone() {
            self.next();
            if optional!(self, Equal).is_some() {
                let value = self.parse_expr()?;
                return Ok(Expr::assign(name, value));
            }
            self.back();
        }
        self.parse_logical_or()
    }

    /// logical-or = logical-and { "||" logical-and }
    fn parse_logical_or(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_logical_and()?;
        while optional!(self, PipePipe).is_some() {
            let rhs = self.parse_logical_and()?;
            lhs = Expr::binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    /// logical-and = equality { "&&" equality }
    fn parse_logical_and(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_equality()?;
        while optional!(self, AndAnd).is_some() {
            let rhs = self.parse_equality()?;
            lhs = Expr::binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    /// equality = relational { ( "==" | "!=" ) relational }
    fn parse_equality(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.peek().kind {
                EqualEqual => BinaryOp::Eq,
                ExclEqual => BinaryOp::Ne,
                _ => break,
            };
            self.next();
            let rhs = self.parse_relational()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// relational = additive { ( "<" | ">" ) additive }
    fn parse_relational(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                LAngle => BinaryOp::Lt,
                RAngle => BinaryOp::Gt,
                _ => break,
            };
            self.next();
            let rhs = self.parse_additive()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// additive = term { ( "+" | "-" ) term }
    fn parse_additive(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                Plus => BinaryOp::Add,
                Minus => BinaryOp::Sub,
                _ => break,
            };
            self.next();
            let rhs = self.parse_term()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// term = factor { ( "*" | "/" ) factor }
    fn parse_term(&mut self) -> Result<Expr, Diagnostic> {
        let mut lhs = self.parse_factor()?;
        loop {
            let op = match self.peek().kind {
                Star => BinaryOp::Mul,
                Slash => BinaryOp::Div,
                _ => break,
            };
            self.next();
            let rhs = self.parse_factor()?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    /// factor = "(" expr ")" | unary-op factor | int-lit | ident
    fn parse_factor(&mut self) -> Result<Expr, Diagnostic> {
        match self.peek().kind.clone() {
            // "(" expr ")"
            LParen => {
                expect!(self, LParen, "Expected '('!")?;
                let expr = self.parse_expr()?;
                expect!(self, RParen, "Expected ')'!")?;
                Ok(expr)
            }

            // unary-op factor
            kind if kind.is_unary_operator() => {
                self.next();
                let op = match kind {
                    Minus => UnaryOp::Neg,
                    Tilde => UnaryOp::Complement,
                    _ => UnaryOp::Not,
                };
                let operand = self.parse_factor()?;
                Ok(Expr::unary(op, operand))
            }

            // int-lit
            IntValue(value) => {
                self.next();
                Ok(Expr::IntLit(value))
            }

            // ident
            Ident(name) => {
                self.next();
                Ok(Expr::Var(name))
            }

            FloatValue(_) => Err(self.error("Floating-point literals are not supported!")),

            _ => Err(self.error("Expected expression!")),
        }
    }

    fn parse_ident(&mut self, message: &str) -> Result<String, Diagnostic> {
        match self.peek().kind.clone() {
            Ident(name) => {
                self.next();
                Ok(name)
            }
            _ => Err(self.error(message)),
        }
    }
}
