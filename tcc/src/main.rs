use clap::Parser;
use color_print::cprintln;
use emu::{Dump, Hook};
use tcc::compile::{compile, render};
use tcc::{check_tokens, parse, Error, FrameLayout, Lexer};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "code.c")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "code.asm")]
    output: String,

    /// Print the token stream
    #[clap(long)]
    tokens: bool,

    /// Print the syntax tree
    #[clap(long)]
    ast: bool,

    /// Print the generated function body
    #[clap(long)]
    dump: bool,

    /// Execute the generated function on the emulator
    #[clap(long)]
    run: bool,

    /// Trace every emulated instruction
    #[clap(long)]
    trace: bool,

    /// YAML file listing labels to trace
    #[clap(long)]
    trace_cfg: Option<String>,

    /// Emulator step limit
    #[clap(long)]
    tmax: Option<u64>,

    /// Stack slot layout for declarations
    #[clap(long, value_enum, default_value_t = FrameLayout::Reserved)]
    layout: FrameLayout,

    /// Print each stage
    #[clap(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let source = match std::fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => fail(&args, "", Error::FileOpen(args.input.clone(), e)),
    };
    if let Err(e) = drive(&args, &source) {
        fail(&args, &source, e);
    }
}

fn drive(args: &Args, source: &str) -> Result<(), Error> {
    macro_rules! stage {
        ($($arg:tt)*) => {
            if args.verbose {
                println!($($arg)*);
            }
        };
    }

    stage!("1. Lex {}", args.input);
    let tokens = Lexer::new(source).tokenize();
    if args.tokens {
        for token in &tokens {
            cprintln!(
                "<s>{:>4}:{:<3}</> <b>{:<16}</> {}",
                token.pos.line,
                token.pos.col,
                token.lexeme,
                token.kind
            );
        }
    }
    check_tokens(&tokens)?;

    stage!("2. Parse");
    let program = parse(tokens).map_err(Error::Syntax)?;
    if args.ast {
        println!("{:#?}", program);
    }

    stage!("3. Generate ({:?} layout)", args.layout);
    let code = compile(&program, args.layout)?;
    let text = render(&program.function.name, &code);
    if args.dump {
        for (idx, line) in code.lines().iter().enumerate() {
            cprintln!("<s>{:>4}</> {}", idx, line.cformat());
        }
    }

    stage!("4. Write");
    stage!("  > {}", args.output);
    std::fs::write(&args.output, text).map_err(|e| Error::FileWrite(args.output.clone(), e))?;

    if args.run {
        let mut hooks: Vec<Box<dyn Hook>> = Vec::new();
        if args.trace || args.trace_cfg.is_some() {
            hooks.push(Box::new(Dump::arg(args.trace_cfg.clone(), args.trace)?));
        }
        let result = tcc::run(&code, &mut hooks, args.tmax)?;
        cprintln!("<g,s>{}</> returned <s>{}</>", program.function.name, result);
    }
    Ok(())
}

fn fail(args: &Args, source: &str, e: Error) -> ! {
    let diags = e.diagnostics();
    if diags.is_empty() {
        cprintln!("<red,bold>error</>: {}", e);
    }
    for diag in diags {
        diag.print(&args.input, source);
    }
    std::process::exit(1);
}
