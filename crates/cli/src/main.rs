mod logging;

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use dirseq_core::{
    app_paths, load_config, save_config, walk_tree, AppConfig, SuffixSet, WalkOptions,
    WalkSummary,
};

#[derive(Debug, Parser)]
#[command(name = "dirseq")]
#[command(about = "Numbers media files chronologically per folder, prefixed by the folder name")]
struct Cli {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Rename(RenameArgs),
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct RenameArgs {
    /// Root folder; every directory beneath it is renumbered independently.
    root: String,
    /// Comma-separated file types, e.g. "jpg, png, mp4". Overrides the
    /// configured set for this run only.
    #[arg(long)]
    types: Option<String>,
    #[arg(long, default_value_t = false)]
    apply: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    /// Persist a new file-type list, e.g. "jpg, png, mp4".
    SetTypes { types: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Rename(args) => cmd_rename(args),
        Commands::Config(config) => match config.action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::SetTypes { types } => cmd_config_set_types(&types),
        },
    }
}

fn cmd_rename(args: RenameArgs) -> Result<()> {
    let suffixes = match args.types.as_deref() {
        Some(input) => SuffixSet::parse(input)?,
        None => load_config()?.suffix_set(),
    };
    if suffixes.is_empty() {
        eprintln!("warning: the file-type set is empty, nothing will match");
    }

    let options = WalkOptions {
        root: args.root.into(),
        suffixes,
        apply: args.apply,
    };
    let summary = walk_tree(&options)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => {
            print_table(&summary);
        }
    }

    if args.apply {
        eprintln!(
            "done: {} renamed, {} unchanged",
            summary.modified, summary.unmodified
        );
    } else {
        eprintln!(
            "dry-run: {} would be renamed, {} unchanged. Pass --apply to rename.",
            summary.modified, summary.unmodified
        );
    }

    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let paths = app_paths()?;
    println!("config file: {}", paths.config_path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_config_set_types(types: &str) -> Result<()> {
    let set = SuffixSet::parse(types)?;
    let config = AppConfig {
        suffixes: set.suffixes().to_vec(),
    };
    save_config(&config)?;
    println!("file types updated: {}", set.suffixes().join(", "));
    Ok(())
}

fn print_table(summary: &WalkSummary) {
    for plan in &summary.plans {
        if plan.actions.is_empty() {
            continue;
        }
        println!("{} (prefix {:?})", plan.dir.display(), plan.prefix);
        for action in &plan.actions {
            println!(
                "  {} -> {}",
                action.from.display(),
                action.to.display()
            );
        }
    }

    println!(
        "\ntotals: directories={} modified={} unmodified={}",
        summary.directories, summary.modified, summary.unmodified
    );
}
