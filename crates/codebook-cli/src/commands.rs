use anyhow::{Context, Result};
use tracing::{info, info_span};

use codebook_cli::report::{groups_table, item_table, options_json, render_options, summary_table};
use codebook_core::CodebookAccessor;
use codebook_ingest::{SourceConfig, parse_delimiter};

use crate::cli::{DecodeArgs, EncodingArgs, OptionsArgs, SourceArgs};

/// Resolve input locations: defaults, then the TOML file, then flags.
pub fn source_config(args: &SourceArgs) -> Result<SourceConfig> {
    let mut config = match &args.config {
        Some(path) => SourceConfig::load_toml(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => SourceConfig::default(),
    };
    config = config
        .with_codebook(args.codebook.clone())
        .with_data(args.data.clone());
    if let Some(raw) = &args.delimiter {
        config = config.with_delimiter(parse_delimiter(raw)?);
    }
    Ok(config)
}

pub fn load_accessor(args: &SourceArgs) -> Result<CodebookAccessor> {
    let sources = source_config(args)?;
    let span = info_span!("load", codebook = %sources.codebook.display());
    let _guard = span.enter();
    let accessor = CodebookAccessor::from_sources(&sources).context("load codebook sources")?;
    info!(
        groups = accessor.codebook().len(),
        items = accessor.codebook().item_count(),
        data_rows = accessor.data().row_count(),
        "codebook loaded"
    );
    Ok(accessor)
}

pub fn run_groups(accessor: &CodebookAccessor) -> Result<()> {
    println!("{}", groups_table(accessor));
    Ok(())
}

pub fn run_encodings(accessor: &CodebookAccessor) -> Result<()> {
    for encoding in accessor.encodings() {
        println!("{encoding}");
    }
    Ok(())
}

pub fn run_item(accessor: &CodebookAccessor, args: &EncodingArgs) -> Result<()> {
    let table = item_table(accessor, &args.encoding)?;
    println!("{table}");
    Ok(())
}

pub fn run_options(accessor: &CodebookAccessor, args: &OptionsArgs) -> Result<()> {
    let options = accessor.item_options(&args.encoding)?;
    if args.json {
        println!("{}", options_json(options)?);
    } else {
        if options.is_empty() {
            info!(encoding = %args.encoding, "item has no options");
        }
        println!("{}", render_options(options));
    }
    Ok(())
}

pub fn run_question(accessor: &CodebookAccessor, args: &EncodingArgs) -> Result<()> {
    println!("{}", accessor.main_question(&args.encoding));
    Ok(())
}

pub fn run_decode(accessor: &CodebookAccessor, args: &DecodeArgs) -> Result<()> {
    match accessor.decode_value(&args.encoding, &args.value)? {
        Some(label) => println!("{label}"),
        None => anyhow::bail!(
            "value {:?} has no option label for {}",
            args.value,
            args.encoding
        ),
    }
    Ok(())
}

pub fn run_summary(accessor: &CodebookAccessor) -> Result<()> {
    println!("{}", summary_table(accessor)?);
    Ok(())
}
