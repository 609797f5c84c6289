use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use wallmirror::application::{LinkRewriter, MirrorImagesUseCase, RewritePagesUseCase};
use wallmirror::domain::entities::ImageRecord;
use wallmirror::infrastructure::{
    AppConfig, CliArgs, Command, ConfigStorage, HtmlPageStore, HttpImageFetcher, LocalMirror,
    VariantFetcher, VariantIndexBuilder, load_records,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = ConfigStorage::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn local_mirror(config: &AppConfig) -> LocalMirror {
    LocalMirror::new(config.mirror.root.clone(), config.mirror.web_prefix.clone())
}

async fn run_mirror(config: &AppConfig, records: &[ImageRecord]) -> Result<()> {
    let fetcher = Arc::new(
        HttpImageFetcher::with_options(config.mirror.timeout_secs, &config.mirror.user_agent)
            .wrap_err("failed to build HTTP client")?,
    );
    let variant_fetcher = Arc::new(VariantFetcher::new(fetcher, local_mirror(config)));
    let use_case = MirrorImagesUseCase::new(variant_fetcher, config.mirror.max_images);

    let summary = use_case.execute(records).await;
    info!(
        mirrored = summary.mirrored,
        skipped = summary.skipped,
        failed = summary.failed,
        variants = summary.variants,
        "Mirror finished"
    );
    Ok(())
}

fn run_rewrite(config: &AppConfig, records: &[ImageRecord], pages: &Path) -> Result<()> {
    let index_builder = Arc::new(VariantIndexBuilder::new(local_mirror(config)));
    let rewriter = LinkRewriter::new(index_builder, config.rewrite);
    let use_case = RewritePagesUseCase::new(rewriter, Arc::new(HtmlPageStore::new(pages)));

    let summary = use_case.execute(records)?;
    info!(
        scanned = summary.scanned,
        updated = summary.updated,
        failed = summary.failed,
        replacements = summary.replacements,
        "Rewrite finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = wallmirror::VERSION, "Starting {}", wallmirror::NAME);

    let records = load_records(args.command.records())?;

    match &args.command {
        Command::Mirror { .. } => run_mirror(&config, &records).await?,
        Command::Rewrite { pages, .. } => run_rewrite(&config, &records, pages)?,
        Command::Sync { pages, .. } => {
            run_mirror(&config, &records).await?;
            run_rewrite(&config, &records, pages)?;
        }
    }

    Ok(())
}
