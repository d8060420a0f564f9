//! Fixed MASM text wrapped around the generated function.

pub const HEADER: &str = r".386
.model flat, stdcall
option casemap :none
include masm32\include\windows.inc
include masm32\include\kernel32.inc
include masm32\include\masm32.inc
includelib masm32\lib\kernel32.lib
includelib masm32\lib\masm32.lib
";

pub const NUMB_TO_STR_PROTO: &str = "NumbToStr   PROTO :DWORD,:DWORD";

pub const DATA: &str = "buff        db 11 dup(?)";

/// Converts `x` to decimal text ending at `buffer+10`; returns its start in `eax`.
pub const NUMB_TO_STR: &str = r"NumbToStr PROC uses ebx x:DWORD,buffer:DWORD
mov     ecx, buffer
mov     eax, x
mov     ebx, 10
add     ecx, ebx

test    eax, eax
js      NEGATIVE_NUM

@@:
xor     edx, edx
div     ebx
add     edx, 48
mov     BYTE PTR [ecx], dl
dec     ecx
test    eax, eax
jnz     @b
jmp     NUM_DONE

NEGATIVE_NUM:
neg     eax
@@:
xor     edx, edx
div     ebx
add     edx, 48
mov     BYTE PTR [ecx], dl
dec     ecx
test    eax, eax
jnz     @b
mov     BYTE PTR [ecx], '-'
dec     ecx

NUM_DONE:
inc     ecx
mov     eax, ecx
ret
NumbToStr ENDP
";

/// Process entry: run the function, print its result, exit with it.
pub fn entry(function: &str) -> String {
    format!(
        "start:
call    {function}
invoke  NumbToStr, ebx, ADDR buff
invoke  StdOut, eax
invoke  ExitProcess, ebx
"
    )
}

pub fn proto(function: &str) -> String {
    format!("{function} PROTO")
}

/// Symbols defined by the surrounding program text.
const SYMBOLS: [&str; 7] = [
    "start",
    "buff",
    "NumbToStr",
    "StdOut",
    "ExitProcess",
    "NEGATIVE_NUM",
    "NUM_DONE",
];

/// Prefixes of the labels emitted inside a function body.
const LABEL_PREFIXES: [&str; 3] = ["L_ELSE_", "L_END_", "L_RET_"];

/// A function with this name would clash with a template or generated label.
pub fn is_reserved(name: &str) -> bool {
    SYMBOLS.contains(&name) || LABEL_PREFIXES.iter().any(|p| name.starts_with(p))
}
