//! Run orchestration: read rows, reconcile each one in file order, report.
//!
//! A row failure (unsplittable name or CRM error) stops the run unless
//! `keep_going` is set, in which case it is logged and counted as
//! `failed`. Input read errors always stop the run. The summary line is
//! logged either way.

use anyhow::{Context, Result};
use log::{debug, error, info};

use crate::{
    cli::Cli,
    config::Settings,
    crm::{CrmAccessor, HatchbuckClient},
    input::{ContactReader, ContactRow},
    io_utils,
    reconcile::Reconciler,
    stats::RunStats,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions<'a> {
    pub tag: Option<&'a str>,
    pub keep_going: bool,
}

pub fn execute(cli: &Cli) -> Result<RunStats> {
    let settings = Settings::from_env()?;
    debug!("Using {settings:?}");
    let delimiter = io_utils::resolve_input_delimiter(&cli.file, cli.delimiter);
    let encoding = io_utils::resolve_encoding(cli.input_encoding.as_deref())?;
    let rows = ContactReader::from_path(&cli.file, delimiter, encoding)?;
    let client = HatchbuckClient::new(&settings.api_base, &settings.api_key, cli.noop)
        .context("Building Hatchbuck client")?;
    if client.is_noop() {
        info!("noop mode: contacts will be looked up but nothing will be written");
    }

    let options = SyncOptions {
        tag: Some(cli.tag.as_str()),
        keep_going: cli.keep_going,
    };
    let mut stats = RunStats::new();
    let result = sync_rows(rows, &client, options, &mut stats);
    info!("STATS: {stats}");
    result.with_context(|| format!("Syncing {:?}", cli.file))?;
    Ok(stats)
}

/// Reconciles `rows` one at a time, accumulating into `stats` so that a
/// caller still sees the partial counts when this returns an error.
pub fn sync_rows<I, C>(
    rows: I,
    crm: &C,
    options: SyncOptions<'_>,
    stats: &mut RunStats,
) -> Result<()>
where
    I: IntoIterator<Item = Result<ContactRow>>,
    C: CrmAccessor + ?Sized,
{
    let reconciler = Reconciler::new(crm, options.tag);
    for row in rows {
        let row = row?;
        match reconciler.process_row(&row, stats) {
            Ok(outcome) => debug!("line {}: {:?}", row.line, outcome),
            Err(err) if options.keep_going => {
                stats.failed += 1;
                error!("{:#}", anyhow::Error::from(err));
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
