use std::io::{self, BufRead};
use std::process::ExitCode;

use anyhow::Context;

// Usage: echo <input_text> | grape -E <pattern>
fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(true) => {
            println!("true");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("false");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<bool> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        anyhow::bail!("Expected two arguments\n\nUsage: grape -E <pattern>");
    }
    if args[0] != "-E" {
        anyhow::bail!("Expected first argument to be '-E'");
    }
    let re = grape::Regex::new(&args[1])?;

    let line = read_line(std::io::stdin().lock())
        .context("failed to read input from stdin")?;
    Ok(re.is_match(&line))
}

/// Read one line of input as bytes, without its `\n` or `\r\n` ending.
fn read_line<R: BufRead>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(line)
}
