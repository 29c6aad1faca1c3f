use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dv_types::DiffMode;

#[derive(Parser)]
#[command(
    name = "deltavision",
    about = "DeltaVision: side-by-side comparison of document directories",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pair and compare the files of an old and a new directory
    Compare(CompareArgs),
    /// Compare two files
    Diff(DiffArgs),
    /// Search a directory tree by filename and content
    Search(SearchArgs),
    /// Print a file under the reading policy
    Cat(CatArgs),
    /// Show every file of a directory, newest first
    Stream(StreamArgs),
    /// Parse a keywords file
    Keywords(KeywordsArgs),
    /// Start the HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct CompareArgs {
    pub old_dir: PathBuf,
    pub new_dir: PathBuf,
    #[arg(short, long, default_value = "line")]
    pub mode: DiffMode,
    /// Print the rows of every pair, not just the summary
    #[arg(long)]
    pub rows: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub old: Option<PathBuf>,
    #[arg(long)]
    pub new: Option<PathBuf>,
    #[arg(short, long, default_value = "line")]
    pub mode: DiffMode,
}

#[derive(Args)]
pub struct SearchArgs {
    pub dir: PathBuf,
    pub term: String,
    #[arg(short = 'c', long)]
    pub case_sensitive: bool,
    /// Only match filenames
    #[arg(long, conflicts_with = "content_only")]
    pub names_only: bool,
    /// Only match file contents
    #[arg(long)]
    pub content_only: bool,
    /// Restrict to these extensions (without the dot)
    #[arg(short = 't', long = "type")]
    pub file_types: Vec<String>,
    #[arg(short = 'n', long, default_value = "1000")]
    pub max_results: usize,
}

#[derive(Args)]
pub struct CatArgs {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct StreamArgs {
    pub dir: PathBuf,
    /// List directory entries instead of loading file contents
    #[arg(long)]
    pub list: bool,
}

#[derive(Args)]
pub struct KeywordsArgs {
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<String>,
    #[arg(long)]
    pub old_dir: Option<PathBuf>,
    #[arg(long)]
    pub new_dir: Option<PathBuf>,
    #[arg(long)]
    pub keywords: Option<PathBuf>,
    #[arg(short, long)]
    pub mode: Option<DiffMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compare() {
        let cli = Cli::try_parse_from(["deltavision", "compare", "old", "new"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.old_dir, PathBuf::from("old"));
            assert_eq!(args.new_dir, PathBuf::from("new"));
            assert_eq!(args.mode, DiffMode::Line);
            assert!(!args.rows);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_compare_word_mode() {
        let cli = Cli::try_parse_from(["deltavision", "compare", "a", "b", "--mode", "word", "--rows"]).unwrap();
        if let Command::Compare(args) = cli.command {
            assert_eq!(args.mode, DiffMode::Word);
            assert!(args.rows);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_bad_mode() {
        assert!(Cli::try_parse_from(["deltavision", "compare", "a", "b", "--mode", "char"]).is_err());
    }

    #[test]
    fn parse_diff_one_side() {
        let cli = Cli::try_parse_from(["deltavision", "diff", "--new", "x.txt"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert!(args.old.is_none());
            assert_eq!(args.new, Some(PathBuf::from("x.txt")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_search() {
        let cli = Cli::try_parse_from([
            "deltavision", "search", "docs", "budget", "-c", "-t", "md", "-t", "txt", "-n", "5",
        ])
        .unwrap();
        if let Command::Search(args) = cli.command {
            assert_eq!(args.term, "budget");
            assert!(args.case_sensitive);
            assert_eq!(args.file_types, vec!["md", "txt"]);
            assert_eq!(args.max_results, 5);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_search_conflicting_scopes() {
        let result = Cli::try_parse_from([
            "deltavision", "search", "d", "t", "--names-only", "--content-only",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_stream_list() {
        let cli = Cli::try_parse_from(["deltavision", "stream", "new", "--list"]).unwrap();
        if let Command::Stream(args) = cli.command {
            assert!(args.list);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from([
            "deltavision", "serve", "--bind", "127.0.0.1:8080", "--old-dir", "o", "--mode", "word",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind.as_deref(), Some("127.0.0.1:8080"));
            assert_eq!(args.old_dir, Some(PathBuf::from("o")));
            assert_eq!(args.mode, Some(DiffMode::Word));
            assert!(args.config.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["deltavision", "--verbose", "cat", "f.txt"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["deltavision", "--format", "json", "keywords", "k.txt"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
