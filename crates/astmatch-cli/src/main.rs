use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};

use astmatch_core::{Factory, MatchFinder, Shower};
use astmatch_cpp::{CppProvider, PatternFactory};

#[derive(Parser, Debug)]
#[command(
    name = "astmatch",
    about = "find structural matches of a code pattern against a C++ translation unit",
    version,
    group = ArgGroup::new("source").required(true).args(["file", "text"])
)]
struct Cli {
    /// Source file to search (.cpp/.h/.cc)
    #[arg(short = 'f', long = "file", value_name = "FILE", conflicts_with = "text")]
    file: Option<String>,

    /// Literal source text to search, instead of a file
    #[arg(long = "text", value_name = "CODE", conflicts_with = "file")]
    text: Option<String>,

    /// Pattern expression fragment (repeatable), e.g. '$a == $b'
    #[arg(long = "expr", value_name = "FRAGMENT", action = clap::ArgAction::Append)]
    expr: Vec<String>,

    /// Pattern statement fragment (repeatable), e.g. 'if ($cond) { $$body; }'
    #[arg(long = "stmt", value_name = "FRAGMENT", action = clap::ArgAction::Append)]
    stmt: Vec<String>,

    /// Search only the top-level siblings, skip recursing into children
    #[arg(long = "no-recurse", default_value_t = false)]
    no_recurse: bool,
}

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(args: Cli) -> Result<()> {
    let start = Instant::now();

    let factory = Factory::new(CppProvider::new());
    let root = match (&args.file, &args.text) {
        (Some(path), _) => factory.create(path).with_context(|| format!("loading {path}"))?,
        (None, Some(text)) => factory
            .create_from_text(text, "<cli-input>")
            .context("parsing --text")?,
        (None, None) => unreachable!("clap requires exactly one of --file / --text"),
    };

    let pattern_factory = PatternFactory::new();
    let mut patterns_list = Vec::new();
    for fragment in &args.expr {
        let pattern = pattern_factory
            .create_expression(fragment)
            .with_context(|| format!("compiling expression pattern {fragment:?}"))?;
        patterns_list.push(vec![pattern]);
    }
    for fragment in &args.stmt {
        let pattern = pattern_factory
            .create_statement(fragment, &[], &[])
            .with_context(|| format!("compiling statement pattern {fragment:?}"))?;
        patterns_list.push(vec![pattern]);
    }
    if patterns_list.is_empty() {
        anyhow::bail!("at least one --expr or --stmt pattern is required");
    }

    let finder = MatchFinder::new(patterns_list);
    let shower = Shower::new();

    let mut count = 0usize;
    for pattern_match in finder.find_all(&[root], !args.no_recurse) {
        count += 1;
        println!("--- match {count} ---");
        for key_match in pattern_match.key_matches() {
            println!("{}:", key_match.key);
            for node in &key_match.nodes {
                print!("{}", shower.render(node));
            }
        }
    }

    tracing::info!(matches = count, elapsed_secs = start.elapsed().as_secs_f64(), "astmatch: search complete");
    eprintln!("{count} match(es) in {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}
