use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gplot::csv_reader::{self, parse_column_selector, ColumnSelector, CsvData};
use gplot::{
    ArtifactStore, MemoryStore, Plot, PlotOptions, PointData, ScriptRecorder, Session, StyleSpec,
};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gplot")]
#[command(about = "Plot CSV columns from stdin with gnuplot", long_about = None)]
struct Args {
    /// Plot dimensionality (1, 2 or 3); overrides the config file
    #[arg(short, long)]
    dims: Option<usize>,

    /// gnuplot style, e.g. points, lines, yerrorbars
    #[arg(short, long, default_value = gplot::compat::DEFAULT_STYLE)]
    style: String,

    /// Legend title of the point group (empty for none)
    #[arg(short, long, default_value = "")]
    name: String,

    /// Columns to plot, by header name or 1-based index (default: all)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Style attributes, e.g. 'pt 7 ps 1.5 lc rgb "red"'; may be repeated
    #[arg(long)]
    spec: Vec<String>,

    /// Plot title
    #[arg(short, long)]
    title: Option<String>,

    /// Output format (png or pdf)
    #[arg(short, long)]
    format: Option<String>,

    /// Save the plot to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with plot options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the gnuplot window open
    #[arg(long)]
    persist: bool,

    /// Log every gnuplot command
    #[arg(long)]
    debug: bool,

    /// Print the gnuplot commands instead of running gnuplot
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = load_options(&args)?;

    // Read CSV from stdin
    let csv_data = csv_reader::read_csv_from_stdin().context("Failed to read CSV from stdin")?;
    let data = select_data(&csv_data, &args.columns, options.dimensions)?;

    let specs = args
        .spec
        .iter()
        .map(|s| s.parse::<StyleSpec>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid --spec")?;

    if args.dry_run {
        let mut plot = Plot::with_session(
            options.dimensions,
            ScriptRecorder::new(),
            MemoryStore::new(),
            options.debug,
        )?;
        draw(&mut plot, &options, &args, data, specs)?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(plot.session().script().as_bytes())
            .context("Failed to write script to stdout")?;
        handle.flush().context("Failed to flush stdout")?;
    } else {
        let mut plot = Plot::new(options.dimensions, options.persist, options.debug)
            .context("Failed to start gnuplot")?;
        draw(&mut plot, &options, &args, data, specs)?;
        plot.close();
    }

    Ok(())
}

/// Merge the optional JSON config with command line flags
fn load_options(args: &Args) -> Result<PlotOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            PlotOptions::from_json(&text)
                .with_context(|| format!("Failed to parse config '{}'", path.display()))?
        }
        None => PlotOptions::default(),
    };

    if let Some(dims) = args.dims {
        options.dimensions = dims;
    }
    if let Some(title) = &args.title {
        options.title = Some(title.clone());
    }
    if let Some(format) = &args.format {
        options.format = format.parse()?;
    }
    options.persist |= args.persist;
    options.debug |= args.debug;
    Ok(options)
}

/// Pick the plotted columns; 1-d plots use only the first one
fn select_data(csv_data: &CsvData, columns: &[String], dimensions: usize) -> Result<PointData> {
    let selectors: Vec<ColumnSelector> = if columns.is_empty() {
        (1..=csv_data.headers.len()).map(ColumnSelector::Index).collect()
    } else {
        columns.iter().map(|c| parse_column_selector(c)).collect()
    };

    let mut values = Vec::new();
    for selector in selectors {
        let (name, column) = csv_reader::extract_column(csv_data, selector)?;
        debug!(column = %name, rows = column.len(), "selected column");
        values.push(column);
    }

    if dimensions == 1 {
        if !columns.is_empty() && values.len() > 1 {
            warn!(selected = values.len(), "1-d plots use only the first column");
        }
        let first = values
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("CSV input has no columns"))?;
        Ok(PointData::from(first))
    } else {
        Ok(PointData::from(values))
    }
}

fn draw<S: Session, A: ArtifactStore>(
    plot: &mut Plot<S, A>,
    options: &PlotOptions,
    args: &Args,
    data: PointData,
    specs: Vec<StyleSpec>,
) -> Result<()> {
    plot.apply_options(options)?;
    plot.add_point_group(&args.name, &args.style, data, specs)
        .with_context(|| format!("Failed to add point group with style '{}'", args.style))?;
    if let Some(output) = &args.output {
        save(plot, output)?;
    }
    Ok(())
}

fn save<S: Session, A: ArtifactStore>(plot: &mut Plot<S, A>, output: &Path) -> Result<()> {
    plot.save_plot(output)
        .with_context(|| format!("Failed to save plot to '{}'", output.display()))
}
