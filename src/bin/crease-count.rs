use std::path::PathBuf;

use clap::Parser;
use log::info;

use crease_zdd::catalog::TileCatalog;
use crease_zdd::context::Context;
use crease_zdd::engine::Enumeration;
use crease_zdd::symmetry::count_orbits;

#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Count flat-foldable crease patterns on a 45-degree grid", long_about = None)]
struct Cli {
    /// Number of rows of unit squares.
    #[arg(value_name = "ROWS", default_value = "4", value_parser = clap::value_parser!(u32).range(2..))]
    rows: u32,

    /// Number of columns of unit squares.
    #[arg(value_name = "COLS", default_value = "4", value_parser = clap::value_parser!(u32).range(2..))]
    cols: u32,

    /// Tile catalog: one comma-separated row of 8 bits per tile.
    #[arg(long, value_name = "PATH", default_value = "data/tiles.csv")]
    tiles: PathBuf,

    /// Also count patterns up to rotation and reflection.
    #[arg(long)]
    orbits: bool,

    /// Print every accepted pattern as a row of -/0/1 tokens.
    #[arg(long)]
    dump: bool,

    /// Write the diagram in Graphviz format.
    #[arg(long, value_name = "PATH")]
    dot: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let level = match args.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let catalog = TileCatalog::from_path(&args.tiles)?;
    let ctx = Context::for_grid(args.rows as usize, args.cols as usize, catalog);
    info!("{} tiles, frontier estimate {}", ctx.catalog.len(), ctx.topology.max_frontier_width());

    let outcome = Enumeration::new(&ctx).run();
    info!("stats = {:?}", outcome.stats);

    println!("No Considering Symmetry : {}", outcome.reported_total());

    if args.orbits {
        let orbits = count_orbits(&ctx, &outcome.diagram);
        println!("Up To Symmetry : {}", orbits);
    }

    if args.dump {
        for assignment in outcome.diagram.assignments(&ctx) {
            println!("{}", assignment);
        }
    }

    if let Some(path) = &args.dot {
        let dot = outcome.diagram.to_dot()?;
        std::fs::write(path, dot)?;
        info!("Diagram written to {}", path.display());
    }

    let time_total = time_total.elapsed();
    info!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
