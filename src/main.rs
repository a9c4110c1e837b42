use anyhow::Context;
use hordestats::cli::Cli;
use hordestats::config::{Config, ConfigLoader};
use hordestats::stats::{Granularity, HttpSource, SnapshotSource, StatsSource};
use hordestats::utils::logging;
use hordestats::Pipeline;

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse_args();

    // Handle configuration commands
    if cli.init {
        Config::init()?;
        return Ok(());
    }

    let mut config = ConfigLoader::load();
    if let Some(dir) = cli.dir {
        config.data_dir = dir;
    }

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Configuration valid");
        return Ok(());
    }

    config.check().context("invalid configuration")?;

    let source: Box<dyn StatsSource> = if cli.offline {
        Box::new(SnapshotSource::new(config.snapshot_path()))
    } else {
        Box::new(HttpSource::from_config(&config))
    };

    let mut pipeline = Pipeline::new(config);
    if cli.offline {
        pipeline = pipeline.without_snapshot();
    }

    let summary = pipeline
        .run(source.as_ref())
        .with_context(|| format!("stats run from {} failed", source.describe()))?;

    for granularity in Granularity::ALL {
        println!(
            "{:<6} {} models",
            granularity.sheet_name(),
            summary.rows(granularity)
        );
    }
    if let Some(entries) = summary.whitelist_entries {
        println!(
            "Whitelist: {} entries, {} names rewritten",
            entries, summary.renamed
        );
    }
    println!(
        "Done. Files written to {}",
        pipeline.config().data_dir.display()
    );

    Ok(())
}
