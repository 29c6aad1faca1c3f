use std::net::SocketAddr;

use anyhow::Context;
use colored::Colorize;
use dv_sdk::{
    DeltaVision, DiffStats, FileComparison, PairComparison, Row, SearchOptions, SearchReport,
};
use dv_server::{DvServer, ServerConfig};
use dv_types::{ComparisonPair, PairKind, RowKind};
use serde::Serialize;
use serde_json::json;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Compare(args) => cmd_compare(args, &format).await,
        Command::Diff(args) => cmd_diff(args, &format).await,
        Command::Search(args) => cmd_search(args, &format).await,
        Command::Cat(args) => cmd_cat(args).await,
        Command::Stream(args) => cmd_stream(args, &format).await,
        Command::Keywords(args) => cmd_keywords(args, &format).await,
        Command::Serve(args) => cmd_serve(args).await,
    }
}

fn emit_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_compare(args: CompareArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let dv = DeltaVision::new(args.mode);
    let results = dv.compare_directories(&args.old_dir, &args.new_dir).await?;
    if let OutputFormat::Json = format {
        return emit_json(&json!({ "success": true, "diffResults": results }));
    }

    if results.is_empty() {
        println!("No documents to compare.");
        return Ok(());
    }
    for result in &results {
        print_pair_summary(result);
        if args.rows {
            print_rows(&result.rows);
            println!();
        }
    }
    println!("{} {} pairs compared", "✓".green().bold(), results.len());
    Ok(())
}

fn pair_label(pair: &ComparisonPair) -> colored::ColoredString {
    match &pair.kind {
        PairKind::Matched => "changed ".yellow(),
        PairKind::NewOnly => "new     ".green(),
        PairKind::OldOnly => "removed ".red(),
        PairKind::NewVersions { .. } => "versions".cyan(),
    }
}

fn print_pair_summary(result: &PairComparison) {
    let pair = &result.pair;
    let stats = DiffStats::from_rows(&result.rows);
    let old_name = pair.old_file_name.as_deref().unwrap_or("-");
    let new_name = pair.new_file_name.as_deref().unwrap_or("-");
    print!(
        "{} {}  {} → {}  {}",
        pair_label(pair),
        pair.key().bold(),
        old_name.dimmed(),
        new_name,
        format_stats(&stats),
    );
    if let Some(diff) = pair.kind.time_difference() {
        print!("  ({} apart)", diff.cyan());
    }
    println!();
}

fn format_stats(stats: &DiffStats) -> String {
    if stats.is_identical() {
        return "identical".dimmed().to_string();
    }
    format!(
        "{} {} {}",
        format!("+{}", stats.added).green(),
        format!("-{}", stats.removed).red(),
        format!("~{}", stats.modified).yellow(),
    )
}

fn word_diff_line(row: &Row) -> Option<String> {
    let parts = row.left.word_diff.as_ref()?;
    let mut line = String::new();
    for part in parts.iter() {
        let piece = if part.added {
            part.value.green().underline().to_string()
        } else if part.removed {
            part.value.red().strikethrough().to_string()
        } else {
            part.value.clone()
        };
        line.push_str(&piece);
    }
    Some(line)
}

fn print_rows(rows: &[Row]) {
    for row in rows {
        let n = format!("{:>5}", row.line_number).dimmed();
        match row.kind {
            RowKind::Unchanged => println!("{n}   {}", row.left.content),
            RowKind::Added => println!("{n} {} {}", "+".green(), row.right.content.green()),
            RowKind::Removed => println!("{n} {} {}", "-".red(), row.left.content.red()),
            RowKind::Modified => match word_diff_line(row) {
                Some(line) => println!("{n} {} {line}", "~".yellow()),
                None => {
                    println!("{n} {} {}", "-".red(), row.left.content.red());
                    println!("{n} {} {}", "+".green(), row.right.content.green());
                }
            },
        }
    }
}

async fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let dv = DeltaVision::new(args.mode);
    let cmp: FileComparison = dv
        .compare_files(args.old.as_deref(), args.new.as_deref())
        .await?;
    if let OutputFormat::Json = format {
        return emit_json(&cmp);
    }

    print_rows(&cmp.rows);
    let stats = DiffStats::from_rows(&cmp.rows);
    println!("\n{}", format_stats(&stats));
    Ok(())
}

async fn cmd_search(args: SearchArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let options = SearchOptions {
        search_names: !args.content_only,
        search_content: !args.names_only,
        case_sensitive: args.case_sensitive,
        file_types: args.file_types.iter().map(|t| t.to_ascii_lowercase()).collect(),
        max_results: args.max_results,
    };
    let report: SearchReport = DeltaVision::default()
        .search_files(&args.dir, &args.term, &options)
        .await?;
    if let OutputFormat::Json = format {
        return emit_json(&json!({
            "success": true,
            "results": report.results,
            "stats": report.stats,
        }));
    }

    for hit in &report.results {
        let marker = if hit.matches.in_name { "name".cyan() } else { "text".normal() };
        println!("{} {}", marker, hit.file_path.display().to_string().bold());
        for m in &hit.matches.in_content {
            println!("  {:>5}: {}", m.line_number.to_string().yellow(), m.line_content);
        }
    }
    let stats = report.stats;
    println!(
        "{} {} matches in {} files ({} directories)",
        "✓".green(),
        stats.matches_found,
        stats.files_scanned,
        stats.directories_scanned,
    );
    Ok(())
}

async fn cmd_cat(args: CatArgs) -> anyhow::Result<()> {
    let content = DeltaVision::default().read_file_content(&args.path).await?;
    print!("{content}");
    Ok(())
}

async fn cmd_stream(args: StreamArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let dv = DeltaVision::default();
    if args.list {
        let entries = dv.list_directory(&args.dir).await?;
        if let OutputFormat::Json = format {
            return emit_json(&json!({ "success": true, "files": entries }));
        }
        for entry in &entries {
            if entry.is_directory {
                println!("{}/", entry.name.blue().bold());
            } else {
                println!("{}", entry.name);
            }
        }
        return Ok(());
    }

    let files = dv.stream_files(&args.dir).await?;
    if let OutputFormat::Json = format {
        return emit_json(&files);
    }
    for file in &files {
        let when = file.modified_time.format("%Y-%m-%d %H:%M:%S");
        println!("{} {}  {}", "▸".cyan(), file.title.bold(), when.to_string().dimmed());
        match &file.error {
            Some(e) => println!("  {}", e.red()),
            None => println!("  {} ({} bytes)", file.filename.dimmed(), file.size),
        }
    }
    Ok(())
}

async fn cmd_keywords(args: KeywordsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let categories = DeltaVision::default().parse_keywords_file(&args.path).await;
    if let OutputFormat::Json = format {
        return emit_json(&json!({ "categories": categories, "filePath": args.path }));
    }
    if categories.is_empty() {
        println!("No keyword categories.");
    }
    for category in &categories {
        println!("{} ({})", category.name.bold(), category.color);
        for keyword in &category.keywords {
            println!("  {keyword}");
        }
    }
    Ok(())
}

fn server_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address: {bind}"))?;
    }
    if args.old_dir.is_some() {
        config.old_dir = args.old_dir;
    }
    if args.new_dir.is_some() {
        config.new_dir = args.new_dir;
    }
    if args.keywords.is_some() {
        config.keywords_file = args.keywords;
    }
    if let Some(mode) = args.mode {
        config.default_diff_mode = mode;
    }
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = server_config(args)?;
    println!("DeltaVision server on {}", config.bind_addr.to_string().bold());
    DvServer::new(config).serve().await?;
    Ok(())
}
