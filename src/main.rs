//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::fs;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::cli::{Args, adjust_output_extension};
use chatstats::config::{ExportLayout, ParserConfig, StatsConfig};
use chatstats::core::{Report, Summary};
use chatstats::format::{OutputFormat, write_to_format};
use chatstats::lexicon::{LexicalFixMap, Lexicon, find_suspicious_chars};
use chatstats::parser::{MessengerParser, Parser};
use chatstats::progress::stderr_progress;
use chatstats::ChatstatsError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    if let Some(ref listing) = args.fix_listing {
        let map = LexicalFixMap::from_paired_listing(&fs::read_to_string(listing)?);
        println!("{}", map.to_json_string()?);
        return Ok(());
    }

    if args.scan_corrupted {
        return scan_corrupted(&args);
    }

    let output_path = adjust_output_extension(&args.output, args.format);
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());

    if !args.quiet {
        println!("📦 chatstats v{}", env!("CARGO_PKG_VERSION"));
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📂 Input:   {}", args.input.display());
        println!("💾 Output:  {}", output_path);
        println!("📄 Format:  {}", args.format);
        if let Some(ref report) = args.report {
            println!("📊 Report:  {}", report);
        }
        println!();
    }

    let lexicon = match args.lexicon {
        Some(ref dir) => Lexicon::load_dir(dir)?,
        None => Lexicon::builtin()?,
    };
    let mut config = ParserConfig::new();
    if let Some(ref layout) = args.layout {
        config = config.with_layout(ExportLayout::from_json_file(layout)?);
    }

    let mut parser = MessengerParser::with_config(config, Arc::new(lexicon))?;
    if args.progress {
        parser = parser.with_progress(stderr_progress());
    }

    if !args.quiet {
        println!("⏳ Parsing {}...", parser.name());
    }
    let parse_start = Instant::now();
    let stream = parser.parse(&args.input)?;
    if !args.quiet {
        println!(
            "   Found {} messages ({:.2}s)",
            stream.len(),
            parse_start.elapsed().as_secs_f64()
        );
    }

    let lib_format: OutputFormat = args.format.into();
    if !args.quiet {
        println!("💾 Writing {}...", lib_format);
    }
    write_to_format(stream.records(), &output_path, lib_format)?;

    let stats = StatsConfig::new().with_top_emojis(args.top);
    let report = Report::build(&stream, &stats, today);
    if let Some(ref report_path) = args.report {
        report.write_json(report_path)?;
    }

    if !args.quiet {
        println!();
        println!("✅ Done! Records saved to {}", output_path);
        println!();
        print_summary(&report.summary);
        println!();
        println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    }

    Ok(())
}

/// Prints the headline numbers.
fn print_summary(summary: &Summary) {
    println!("📊 Summary:");
    match summary.first_message {
        Some(first) => println!("   In touch since:     {first}"),
        None => println!("   In touch since:     -"),
    }
    println!("   Days in touch:      {}", summary.days_in_touch);
    println!("   Messages:           {}", summary.messages);
    println!("   Messages per day:   {:.2}", summary.average_per_day);
    println!("   Total words:        {}", summary.total_words);
    println!("   Words per message:  {:.2}", summary.average_words_per_message);
    println!("   Call minutes:       {:.1}", summary.call_minutes);
}

/// Lists characters that look like broken emoji encodings.
///
/// The output starts with `1; ` so it can be completed with a `2; ` line and
/// fed back through `--fix-listing`.
fn scan_corrupted(args: &Args) -> Result<(), ChatstatsError> {
    let content = fs::read_to_string(&args.input)?;
    let suspicious = find_suspicious_chars(&content);
    if suspicious.is_empty() {
        if !args.quiet {
            println!("✅ No suspicious characters found");
        }
        return Ok(());
    }
    println!("1; {}", suspicious.iter().collect::<String>());
    if !args.quiet {
        eprintln!("⚠️  {} suspicious characters", suspicious.len());
    }
    Ok(())
}
