use tcc::ast::{BinaryOp, Block, BlockItem, Condition, Declaration, Expr, Program, Stmt, UnaryOp};
use tcc::{parse, Diagnostic, Lexer};

fn parse_code(code: &str) -> Result<Program, Vec<Diagnostic>> {
    for (idx, line) in code.lines().enumerate() {
        println!("{:>2}: {}", idx + 1, line);
    }
    let result = parse(Lexer::new(code).tokenize());
    println!("{:#?}", result);
    result
}

/// Body of `int main() { ... }`
fn body(items: &str) -> Vec<BlockItem> {
    let program = parse_code(&format!("int main() {{ {items} }}")).unwrap();
    program.function.body.0
}

/// Expression of `int main() { return ...; }`
fn ret(expr: &str) -> Expr {
    match body(&format!("return {expr};")).remove(0) {
        BlockItem::Statement(Stmt::Return(expr)) => expr,
        other => panic!("not a return: {other:?}"),
    }
}

fn int(v: i32) -> Expr {
    Expr::IntLit(v)
}

macro_rules! case {
    ($name:ident, $code:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert_eq!(ret($code), $expect);
        }
    };
}

case!(
    test_mul_binds_tighter,
    "1+2*3",
    Expr::binary(BinaryOp::Add, int(1), Expr::binary(BinaryOp::Mul, int(2), int(3)))
);

case!(
    test_left_assoc_sub,
    "1-2-3",
    Expr::binary(BinaryOp::Sub, Expr::binary(BinaryOp::Sub, int(1), int(2)), int(3))
);

case!(
    test_parens,
    "(1+2)*3",
    Expr::binary(BinaryOp::Mul, Expr::binary(BinaryOp::Add, int(1), int(2)), int(3))
);

case!(
    test_right_assoc_assign,
    "a = b = 3",
    Expr::assign("a", Expr::assign("b", int(3)))
);

case!(
    test_unary_chain,
    "-~!x",
    Expr::unary(
        UnaryOp::Neg,
        Expr::unary(UnaryOp::Complement, Expr::unary(UnaryOp::Not, Expr::var("x")))
    )
);

case!(
    test_unary_binds_tighter,
    "-1*2",
    Expr::binary(BinaryOp::Mul, Expr::unary(UnaryOp::Neg, int(1)), int(2))
);

case!(
    test_logical_ladder,
    "a || b && c == d < e + f",
    Expr::binary(
        BinaryOp::Or,
        Expr::var("a"),
        Expr::binary(
            BinaryOp::And,
            Expr::var("b"),
            Expr::binary(
                BinaryOp::Eq,
                Expr::var("c"),
                Expr::binary(
                    BinaryOp::Lt,
                    Expr::var("d"),
                    Expr::binary(BinaryOp::Add, Expr::var("e"), Expr::var("f"))
                )
            )
        )
    )
);

case!(
    test_variable_not_assignment,
    "x != y",
    Expr::binary(BinaryOp::Ne, Expr::var("x"), Expr::var("y"))
);

#[test]
fn declarations() {
    assert_eq!(
        body("int x; int y = 2;"),
        vec![
            BlockItem::Declaration(Declaration {
                name: "x".into(),
                init: None
            }),
            BlockItem::Declaration(Declaration {
                name: "y".into(),
                init: Some(int(2))
            }),
        ]
    );
}

#[test]
fn empty_function_body() {
    let program = parse_code("int main() {}").unwrap();
    assert_eq!(program.function.name, "main");
    assert_eq!(program.function.body, Block::default());
}

#[test]
fn if_else_and_nested_blocks() {
    assert_eq!(
        body("if (x > 1) { y = 1; } else { { } }"),
        vec![BlockItem::Statement(Stmt::Cond(Condition {
            test: Expr::binary(BinaryOp::Gt, Expr::var("x"), int(1)),
            then_block: Block(vec![BlockItem::Statement(Stmt::Expr(Expr::assign(
                "y",
                int(1)
            )))]),
            else_block: Some(Block(vec![BlockItem::Statement(Stmt::Block(Block::default()))])),
        }))]
    );
}

#[test]
fn if_without_else() {
    match body("if (1) { }").remove(0) {
        BlockItem::Statement(Stmt::Cond(cond)) => assert!(cond.else_block.is_none()),
        other => panic!("not a condition: {other:?}"),
    }
}

fn error(code: &str) -> Diagnostic {
    let diags = parse_code(code).unwrap_err();
    assert_eq!(diags.len(), 1);
    diags[0].clone()
}

macro_rules! syntax_error {
    ($name:ident, $code:expr, $message:expr, $line:expr) => {
        #[test]
        fn $name() {
            assert_eq!(error($code), Diagnostic::new($message, $line));
        }
    };
}

syntax_error!(
    test_missing_rparen,
    "int main( {\n  return 0;\n}",
    "Expected ')'!",
    1
);
syntax_error!(test_missing_int, "main() {}", "Expected 'int'!", 1);
syntax_error!(
    test_missing_name,
    "int () {}",
    "Function definition must have identifier.",
    1
);
syntax_error!(
    test_missing_semicolon,
    "int main() {\n  int x = 1\n  return x;\n}",
    "Expected ';'!",
    3
);
syntax_error!(
    test_missing_rcurly,
    "int main() {\n  return 0;\n",
    "Expected '}'!",
    2
);
syntax_error!(
    test_declaration_without_name,
    "int main() { int = 3; }",
    "Expected identifier!",
    1
);
syntax_error!(
    test_trailing_tokens,
    "int main() { }\n}",
    "Expected end of input!",
    2
);
syntax_error!(
    test_float_type,
    "int main() {\n float f;\n}",
    "Type 'float' is not supported!",
    2
);
syntax_error!(
    test_float_literal,
    "int main() { return 1.5; }",
    "Floating-point literals are not supported!",
    1
);
syntax_error!(
    test_missing_operand,
    "int main() { return 1 + ; }",
    "Expected expression!",
    1
);
