use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use std::path::PathBuf;
use table_filters::config::{TableConfig, CONFIG_FILENAME};
use table_filters::error::Result;
use table_filters::model::{Filter, FilterValue};
use table_filters::query::RequestQuery;
use table_filters::table::Table;
use table_filters::view::{theme_with_overrides, FilterView};

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct AppContext {
    config: TableConfig,
    table: Table,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let context = || init_context(&cli);
    match &cli.command {
        Commands::Init { force } => {
            let path = cli
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
            handle_init(path, *force)
        }
        Commands::List => handle_list(&context()?),
        Commands::Live { query } => handle_live(&context()?, query),
        Commands::Values { query } => handle_values(&context()?, query),
        Commands::Enabled { query } => handle_enabled(&context()?, query),
        Commands::Render { query } => handle_render(&context()?, query),
    }
}

fn setup_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new().filter_level(log_level).init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let path = resolve_config_path(cli);
    log::info!("using table config {}", path.display());

    let config = TableConfig::load(&path)?;
    let table = config.to_table()?;
    Ok(AppContext { config, table })
}

/// `--config`, then `./filters.json`, then the user config dir.
fn resolve_config_path(cli: &Cli) -> PathBuf {
    if let Some(path) = &cli.config {
        return path.clone();
    }

    let local = PathBuf::from(CONFIG_FILENAME);
    if local.exists() {
        return local;
    }

    match ProjectDirs::from("com", "table-filters", "table-filters") {
        Some(dirs) => dirs.config_dir().join(CONFIG_FILENAME),
        None => local,
    }
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    if !ctx.table.has_filters() {
        println!("{}", "No filters registered.".dimmed());
        return Ok(());
    }

    println!("{}", ctx.table.name().bold());
    for filter in ctx.table.filters() {
        print_filter(filter);
    }
    Ok(())
}

fn handle_live(ctx: &AppContext, query: &str) -> Result<()> {
    let query = RequestQuery::parse(query)?;
    let live = ctx.table.live_filters(&query);
    println!("{}", serde_json::to_string_pretty(&live)?);
    Ok(())
}

fn handle_values(ctx: &AppContext, query: &str) -> Result<()> {
    let query = RequestQuery::parse(query)?;
    let values = ctx.table.filter_values(&query);
    println!("{}", serde_json::to_string_pretty(&values)?);
    Ok(())
}

fn handle_enabled(ctx: &AppContext, query: &str) -> Result<()> {
    let query = RequestQuery::parse(query)?;
    if ctx.table.has_filters_enabled(&query) {
        println!("{}", "enabled".green());
    } else {
        println!("{}", "disabled".dimmed());
    }
    Ok(())
}

fn handle_render(ctx: &AppContext, query: &str) -> Result<()> {
    let query = RequestQuery::parse(query)?;
    let view = FilterView::with_theme(theme_with_overrides(&ctx.config.classes))?;
    println!("{}", ctx.table.render_filters(&view, &query)?);
    Ok(())
}

fn handle_init(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!(
            "{}",
            format!(
                "{} already exists, use --force to overwrite it.",
                path.display()
            )
            .yellow()
        );
        return Ok(());
    }

    TableConfig::sample().save(&path)?;
    println!("{}", format!("Wrote {}", path.display()).green());
    Ok(())
}

fn print_filter(filter: &Filter) {
    let default = match &filter.value {
        None => "-".to_string(),
        Some(FilterValue::Text(text)) => text.clone(),
        Some(FilterValue::Range(range)) => format!(
            "{}..{}",
            range.start.as_deref().unwrap_or(""),
            range.end.as_deref().unwrap_or("")
        ),
    };

    println!(
        "  {:<20} {:<11} {:<24} {}",
        filter.key.yellow(),
        filter.kind.to_string(),
        filter.label,
        default.dimmed()
    );
}
