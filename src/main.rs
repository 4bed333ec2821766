use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pascal_lex::scanner;

#[derive(Parser, Debug)]
#[command(name = "pascal-lex", about = "A Pascal lexical analyzer")]
struct Cli {
    /// Pascal source file to scan
    file: Option<PathBuf>,

    /// Emit tokens as JSON instead of one textual token per line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(path) = cli.file else {
        eprintln!("Supply a pascal code filename");
        std::process::exit(1);
    };

    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("read source file '{}'", path.display()))?;

    let (tokens, diagnostics) = scanner::scan(&source);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tokens)?);
    } else {
        for token in &tokens {
            println!("{token}");
        }
    }

    if diagnostics.had_error() {
        for err in diagnostics {
            let report = miette::Report::new(
                err.with_source_code(path.display().to_string(), source.clone()),
            );
            eprintln!("{report:?}");
        }
        std::process::exit(2);
    }

    Ok(())
}
