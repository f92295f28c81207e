//! Parse a ZenScript file and print its tree.
//!
//! ```text
//! zensyn script.zs
//! zensyn -e 'val x = 1;' --edit 8:9:42 -v
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;
use zensyn::{Grammar, InputEdit, Parser, ParserOptions};

#[derive(ClapParser)]
#[command(name = "zensyn")]
#[command(about = "Parse ZenScript and print the syntax tree")]
struct Args {
    /// Script to parse
    #[arg(required_unless_present = "expr", conflicts_with = "expr")]
    file: Option<PathBuf>,

    /// Parse this source text instead of a file
    #[arg(short, long)]
    expr: Option<String>,

    /// Apply START:END:TEXT to the source and reparse incrementally
    #[arg(long, value_name = "START:END:TEXT")]
    edit: Vec<String>,

    /// Nesting limit before the parser stops descending
    #[arg(long, default_value_t = ParserOptions::default().max_depth)]
    max_depth: u32,

    /// Always parse from scratch
    #[arg(long)]
    no_reuse: bool,

    /// Log parse details (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_edit(arg: &str) -> Result<(usize, usize, &str), String> {
    let mut parts = arg.splitn(3, ':');
    let (Some(start), Some(end), Some(text)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("edit '{arg}' is not START:END:TEXT"));
    };
    let start = start.parse().map_err(|_| format!("bad start offset in '{arg}'"))?;
    let end = end.parse().map_err(|_| format!("bad end offset in '{arg}'"))?;
    Ok((start, end, text))
}

fn run(args: Args) -> Result<bool, Box<dyn Error>> {
    let mut source = match (&args.file, args.expr) {
        (Some(path), _) => fs::read_to_string(path)?,
        (None, Some(expr)) => expr,
        (None, None) => return Err("no input".into()),
    };

    let options = ParserOptions::default()
        .with_max_depth(args.max_depth)
        .with_reuse(!args.no_reuse);
    let mut parser = Parser::with_options(Grammar::zenscript(), options)?;
    let mut tree = parser.parse(&source, None)?;

    for arg in &args.edit {
        let (start, end, text) = parse_edit(arg)?;
        let edit = InputEdit::replace(&source, start..end, text)?;
        tree.edit(&edit)?;
        source.replace_range(start..end, text);
        let old = tree;
        tree = parser.parse(&source, Some(&old))?;
        let stats = parser.last_reuse();
        eprintln!(
            "reparse: {:?}, {} reused, {} rebuilt, {} bytes relexed, changed {:?}",
            stats.strategy,
            stats.reused_nodes,
            stats.reparsed_nodes,
            stats.relexed_bytes,
            old.changed_ranges(&tree),
        );
    }

    println!("{tree}");
    let errors = tree.errors();
    for error in &errors {
        eprintln!("{error}");
    }
    Ok(errors.is_empty())
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
