mod args;
mod output;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use mailprobe_lib::check::Checker;

use args::Cli;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let format = cli.output_format()?;
    let lines = read_lines(&cli)?;
    if lines.is_empty() {
        eprintln!("No addresses found in input");
        return Ok(ExitCode::from(2));
    }

    let checker = Checker::from_system_conf(cli.check_options()).context("initialize resolver")?;

    let mut stdout = io::stdout().lock();
    for result in checker.check_all(&lines) {
        output::write_result(&mut stdout, &result, format)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn read_lines(cli: &Cli) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    if let Some(path) = &cli.input {
        let file = File::open(path).with_context(|| format!("open input file '{path}'"))?;
        for line in BufReader::new(file).lines() {
            push_line(&mut lines, line.context("read input file")?);
        }
    } else {
        for line in io::stdin().lock().lines() {
            push_line(&mut lines, line.context("read stdin")?);
        }
    }
    Ok(lines)
}

fn push_line(lines: &mut Vec<String>, line: String) {
    if !line.trim().is_empty() {
        lines.push(line);
    }
}
