mod cli;
mod config;
mod logging;

use std::io::{self, BufWriter};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use calgrid::{AnsiSurface, ChronoNames, PageDecor, PhotoList, load_event_file, render};

use crate::cli::Cli;
use crate::config::CalgridConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = CalgridConfig::load(&cli.config)?;
    let today = chrono::Local::now().date_naive();
    let settings = config::resolve(cli, &config, today);
    let year = settings.request.year();

    let mut events = load_event_file(&cli.events, year)
        .with_context(|| format!("failed to load events: {}", cli.events.display()))?;
    events.extend(config.events_for_year(year));
    info!(year, count = events.len(), "events ready");

    let photos = match (&cli.photo, &cli.photos) {
        (Some(photo), _) => PhotoList::single(photo),
        (None, Some(dir)) => PhotoList::from_dir(dir)
            .with_context(|| format!("failed to read photo directory: {}", dir.display()))?,
        (None, None) => PhotoList::default(),
    };

    let names = ChronoNames::from_code(&settings.locale);
    let decor = PageDecor {
        names: &names,
        photos: &photos,
        footer: &settings.footer,
    };

    let color = !settings.request.options.no_color;
    let mut surface = AnsiSurface::new(BufWriter::new(io::stdout().lock()), color);
    render(&mut surface, settings.layout, &settings.request, &events, &decor)
        .context("failed to render calendar")?;
    Ok(())
}
