use arch::{Asm, Cond, Inst, Reg};
use tcc::{
    compile_source, generate_source, parse_source, render, CodeGenError, Error, FrameLayout,
};

fn lines(code: &str, layout: FrameLayout) -> Vec<Asm> {
    let code = compile_source(code, layout).unwrap();
    print!("{code}");
    code.0
}

fn text(code: &str, layout: FrameLayout) -> Vec<String> {
    lines(code, layout).iter().map(|line| line.to_string()).collect()
}

fn codegen_error(code: &str) -> CodeGenError {
    match compile_source(code, FrameLayout::Reserved) {
        Err(Error::CodeGen(e)) => e,
        other => panic!("expected code generation error, got {other:?}"),
    }
}

macro_rules! case {
    ($name:ident, $code:expr, $layout:expr, $expect:expr) => {
        #[test]
        fn $name() {
            assert_eq!(text($code, $layout), $expect);
        }
    };
}

case!(
    test_return_literal,
    "int main() { return 2; }",
    FrameLayout::Reserved,
    vec![
        "push ebp",
        "mov ebp, esp",
        "mov ebx, 2",
        "jmp L_RET_main",
        "L_RET_main:",
        "mov esp, ebp",
        "pop ebp",
        "ret",
    ]
);

case!(
    test_reserved_declarations,
    "int main() { int x = 2; int y; return x - y; }",
    FrameLayout::Reserved,
    vec![
        "push ebp",
        "mov ebp, esp",
        "sub esp, 8",
        "mov ebx, 2",
        "mov [ebp-4], ebx",
        "mov DWORD PTR [ebp-8], 0",
        "mov ebx, [ebp-4]",
        "push ebx",
        "mov ebx, [ebp-8]",
        "pop ecx",
        "sub ecx, ebx",
        "mov ebx, ecx",
        "jmp L_RET_main",
        "L_RET_main:",
        "mov esp, ebp",
        "pop ebp",
        "ret",
    ]
);

case!(
    test_push_declarations,
    "int main() { int x = 2; int y; { y = x; } return y; }",
    FrameLayout::Push,
    vec![
        "push ebp",
        "mov ebp, esp",
        "mov ebx, 2",
        "push ebx",
        "push 0",
        "mov ebx, [ebp-4]",
        "mov [ebp-8], ebx",
        "pop ecx",
        "pop ecx",
        "mov ebx, [ebp-8]",
        "jmp L_RET_main",
        "pop ecx",
        "L_RET_main:",
        "mov esp, ebp",
        "pop ebp",
        "ret",
    ]
);

case!(
    test_if_else,
    "int main() { if (1 == 2) { return 1; } else { return 0; } }",
    FrameLayout::Reserved,
    vec![
        "push ebp",
        "mov ebp, esp",
        "mov ebx, 1",
        "push ebx",
        "mov ebx, 2",
        "pop ecx",
        "cmp ecx, ebx",
        "mov ebx, 0",
        "sete bl",
        "cmp ebx, 0",
        "je L_ELSE_0",
        "mov ebx, 1",
        "jmp L_RET_main",
        "jmp L_END_0",
        "L_ELSE_0:",
        "mov ebx, 0",
        "jmp L_RET_main",
        "L_END_0:",
        "L_RET_main:",
        "mov esp, ebp",
        "pop ebp",
        "ret",
    ]
);

case!(
    test_logical_not,
    "int main() { return !0; }",
    FrameLayout::Reserved,
    vec![
        "push ebp",
        "mov ebp, esp",
        "mov ebx, 0",
        "cmp ebx, 0",
        "mov ebx, 0",
        "sete bl",
        "jmp L_RET_main",
        "L_RET_main:",
        "mov esp, ebp",
        "pop ebp",
        "ret",
    ]
);

#[test]
fn division_uses_edx_eax() {
    let code = lines("int main() { return 7 / 2; }", FrameLayout::Reserved);
    let div: Vec<Asm> = vec![
        Inst::MOV(Reg::EAX, Reg::ECX).into(),
        Inst::CDQ().into(),
        Inst::IDIV(Reg::EBX).into(),
        Inst::MOV(Reg::EBX, Reg::EAX).into(),
    ];
    assert!(code.windows(div.len()).any(|w| w == div.as_slice()));
}

#[test]
fn labels_are_unique_per_if() {
    let code = lines(
        "int main() { if (1) { if (2) { } } if (3) { } else { } return 0; }",
        FrameLayout::Reserved,
    );
    let labels: Vec<&str> = code
        .iter()
        .filter_map(|line| match line {
            Asm::Label(name) => Some(name.as_str()),
            Asm::Inst(_) => None,
        })
        .collect();
    assert_eq!(
        labels,
        vec!["L_END_1", "L_END_0", "L_ELSE_2", "L_END_2", "L_RET_main"]
    );
    assert!(code.contains(&Asm::from(Inst::JCC(Cond::E, "L_END_1".into()))));
}

#[test]
fn nested_declarations_are_reserved_up_front() {
    let code = lines(
        "int main() { int a; { int b; if (a) { int c; } else { int d; } } return 0; }",
        FrameLayout::Reserved,
    );
    assert_eq!(code[2], Asm::from(Inst::SUBI(Reg::ESP, 16)));
    assert!(code.contains(&Asm::from(Inst::STOREI(Reg::EBP, -16, 0))));
    assert!(!code.contains(&Asm::from(Inst::POP(Reg::ECX))));
}

#[test]
fn shadowing_uses_the_innermost_slot() {
    let code = text(
        "int main() { int x = 1; { int x = 2; x = 3; } x = 4; return x; }",
        FrameLayout::Reserved,
    );
    let stores: Vec<&String> = code.iter().filter(|l| l.starts_with("mov [ebp")).collect();
    assert_eq!(
        stores,
        vec![
            "mov [ebp-4], ebx",
            "mov [ebp-8], ebx",
            "mov [ebp-8], ebx",
            "mov [ebp-4], ebx",
        ]
    );
}

#[test]
fn duplicate_declaration() {
    assert_eq!(
        codegen_error("int main() { int x; int x = 1; return 0; }"),
        CodeGenError::DuplicateDeclaration("x".into())
    );
    assert_eq!(
        codegen_error("int main() { int x = 1; int x; return 0; }"),
        CodeGenError::DuplicateDeclaration("x".into())
    );
}

#[test]
fn undeclared_variable() {
    for code in [
        "int main() { return y; }",
        "int main() { y = 1; return 0; }",
        "int main() { int x = -y; return x; }",
        "int main() { if (y) { } return 0; }",
        "int main() { { int y; } return y; }",
    ] {
        assert_eq!(
            codegen_error(code),
            CodeGenError::UndeclaredVariable("y".into())
        );
    }
}

#[test]
fn lexical_errors_stop_before_parsing() {
    match compile_source("int main() { return 1 & 2; }", FrameLayout::Reserved) {
        Err(Error::Lex(diags)) => {
            assert_eq!(diags.len(), 1);
            assert_eq!(diags[0].line, 1);
        }
        other => panic!("expected lexical error, got {other:?}"),
    }
}

#[test]
fn syntax_errors_produce_no_code() {
    assert!(matches!(
        compile_source("int main( { return 0; }", FrameLayout::Reserved),
        Err(Error::Syntax(_))
    ));
}

#[test]
fn program_text_wraps_function() {
    let text = generate_source("int main() { return 8; }", FrameLayout::Reserved).unwrap();
    print!("{text}");
    assert!(text.starts_with(".386\n"));
    assert!(text.contains("main PROTO\n"));
    assert!(text.contains(".data\nbuff        db 11 dup(?)\n.code\n"));
    assert!(text.contains("start:\ncall    main\n"));
    assert!(text.contains("main PROC\npush ebp\nmov ebp, esp\nmov ebx, 8\n"));
    assert!(text.contains("ret\nmain ENDP\n"));
    assert!(text.contains("NumbToStr PROC uses ebx"));
    assert!(text.ends_with("end start\n"));
}

#[test]
fn render_wraps_compiled_body() {
    let source = "int main() { int a = 2; return a * 3; }";
    let program = parse_source(source).unwrap();
    let code = tcc::compile::compile(&program, FrameLayout::Push).unwrap();
    assert_eq!(
        render(&program.function.name, &code),
        generate_source(source, FrameLayout::Push).unwrap()
    );
}

#[test]
fn reserved_function_names() {
    for name in ["start", "NumbToStr", "buff", "ExitProcess", "L_RET_main"] {
        let source = format!("int {name}() {{ return 1; }}");
        assert_eq!(
            codegen_error(&source),
            CodeGenError::ReservedName(name.into())
        );
        assert!(matches!(
            generate_source(&source, FrameLayout::Reserved),
            Err(Error::CodeGen(CodeGenError::ReservedName(_)))
        ));
    }
    assert!(generate_source("int starts() { return 1; }", FrameLayout::Reserved).is_ok());
}
