//! Code implementing the "graph export" sub command.

use std::time::Instant;

use clap::Parser;

use crate::catalog;
use crate::common::trace_rss_now;
use crate::graph::query::GraphAssembler;

/// Command line arguments for `graph export` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Export filtered catalog records", long_about = None)]
pub struct Args {
    /// Path to the catalog CSV file.
    #[arg(long, required = true)]
    pub path_input: String,
    /// Filter expression to apply before export.
    #[arg(long, default_value = "")]
    pub filter: String,
    /// Path to the output CSV file.
    #[arg(long, required = true)]
    pub path_output: String,
}

/// Main entry point for `graph export` sub command.
///
/// Export never applies the subtype gate but keeps the significance gate,
/// so an exported dataset is exactly the significant rows matching the
/// filter.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    tracing::info!("Loading catalog records...");
    let before_loading = Instant::now();
    let records = catalog::load_records(&args.path_input)?;
    tracing::info!(
        "...done loading {} records in {:?}",
        records.len(),
        before_loading.elapsed()
    );

    trace_rss_now();

    let assembler = GraphAssembler::new(&records);
    let matched = assembler.evaluate_for_export(&args.filter)?;
    tracing::info!("{} records match the filter", matched.len());

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(&args.path_output)?;
    for record in &matched {
        writer.serialize(record)?;
    }
    writer.flush()?;

    tracing::info!(
        "All of `graph export` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}
