mod cli;
mod load;
mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use preview_engine::{
    write_output, BuildContext, Plugin, PreviewError, PreviewPlugin, RunSummary,
};
use preview_logging::{preview_error, preview_info, preview_warn};

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::initialize(cli.log, cli.verbose);

    if let Err(err) = run(&cli) {
        preview_error!("preview build failed: {err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = load::load_options(cli.options.as_deref())?;
    let plugin = PreviewPlugin::from_options(&options);
    let mut files = load::load_files(&cli.source)?;
    preview_info!("loaded {} files from {}", files.len(), cli.source.display());

    let context = BuildContext {
        source: cli.source.clone(),
        destination: cli.destination.clone(),
    };
    let outcome = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&outcome);
    plugin.run(
        &mut files,
        &context,
        Box::new(move |result: Result<RunSummary, PreviewError>| {
            *sink.borrow_mut() = Some(result);
        }),
    );
    let summary = outcome
        .borrow_mut()
        .take()
        .context("preview plugin never signalled completion")?
        .context("generating previews")?;

    let output = write_output(&context.destination, &files, &plugin.config().key, &summary)
        .with_context(|| format!("writing {}", context.destination.display()))?;
    for path in &output.skipped {
        preview_warn!("skipped {path:?}: no contents to write");
    }
    preview_info!(
        "wrote {} files and {}",
        output.doc_count,
        output.manifest_path.display()
    );
    Ok(())
}
