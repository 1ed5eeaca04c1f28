use anyhow::Context;
use grape_nfa::{parser, Compiler, Config, Token};

const USAGE: &str = "\
Usage: nfa-dump [--state-limit <N>] <pattern>...

Prints the token stream, the postfix stream and the compiled NFA for each
pattern. Set RUST_LOG=debug to see what the compiler logs.";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = Config::new();
    let mut patterns = vec![];
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            "--state-limit" => {
                let limit = args.next().context("--state-limit needs a value")?;
                let limit = limit
                    .parse()
                    .with_context(|| format!("invalid state limit '{}'", limit))?;
                config = config.state_limit(Some(limit));
            }
            _ => patterns.push(arg),
        }
    }
    if patterns.is_empty() {
        anyhow::bail!("no patterns given\n\n{}", USAGE);
    }

    let compiler = Compiler::new().configure(config);
    for pattern in patterns {
        println!("\n=== Pattern: '{}' ===", pattern);

        let tokens = parser::insert_concats(&parser::tokenize(pattern.as_bytes()));
        println!("tokens:  {}", join(&tokens));
        let postfix = parser::to_postfix(&tokens);
        println!("postfix: {}", join(&postfix));

        match compiler.compile(&postfix) {
            Ok(nfa) => print!("{}", nfa),
            Err(e) => println!("Failed to compile: {}", e),
        }
    }
    Ok(())
}

fn join(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
}
