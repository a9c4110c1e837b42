use crate::config::Config;
use crate::error::Result;
use crate::export::{write_csv, write_snapshot, write_xlsx};
use crate::stats::{build_tables, Granularity, Normalizer, StatsSource, UsageTables, Whitelist};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;

/// Outcome of one completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub fetched_at: DateTime<Utc>,
    pub origin: String,
    pub tables: UsageTables,
    pub whitelist_entries: Option<usize>,
    pub renamed: usize,
    pub snapshot_path: Option<PathBuf>,
    pub csv_path: PathBuf,
    pub xlsx_path: PathBuf,
    pub top_csv_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn rows(&self, granularity: Granularity) -> usize {
        self.tables.get(granularity).len()
    }
}

/// Fetch, snapshot, flatten, normalize and export
pub struct Pipeline {
    config: Config,
    write_snapshot: bool,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            write_snapshot: true,
        }
    }

    /// Skip rewriting the snapshot, for runs that read it back as their source
    pub fn without_snapshot(mut self) -> Self {
        self.write_snapshot = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run end to end. Nothing is written unless the source succeeds, its body parses
    /// and the whitelist (if any) can be read.
    pub fn run(&self, source: &dyn StatsSource) -> Result<RunSummary> {
        let snapshot = source.fetch()?;
        let mut tables = build_tables(&snapshot.body)?;
        let whitelist = Whitelist::load(self.config.whitelist_path())?;

        fs::create_dir_all(&self.config.data_dir)?;

        let snapshot_path = if self.write_snapshot {
            let path = self.config.snapshot_path();
            write_snapshot(&snapshot, &path)?;
            Some(path)
        } else {
            None
        };

        let renamed =
            Normalizer::new(whitelist.as_ref(), self.config.normalize).apply(&mut tables);

        let csv_path = self.config.csv_path();
        write_csv(&tables, &csv_path)?;

        let xlsx_path = self.config.xlsx_path();
        write_xlsx(&tables, &xlsx_path)?;

        let top_csv_path = if self.config.top_n > 0 {
            let path = self.config.top_csv_path();
            write_csv(&tables.top(self.config.top_n), &path)?;
            Some(path)
        } else {
            None
        };

        tracing::info!(
            day = tables.day.len(),
            month = tables.month.len(),
            total = tables.total.len(),
            dir = %self.config.data_dir.display(),
            "Wrote usage tables"
        );

        Ok(RunSummary {
            fetched_at: snapshot.fetched_at,
            origin: snapshot.origin,
            tables,
            whitelist_entries: whitelist.as_ref().map(Whitelist::len),
            renamed,
            snapshot_path,
            csv_path,
            xlsx_path,
            top_csv_path,
        })
    }
}
