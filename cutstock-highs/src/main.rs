//! Cutting stock solver command line

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cutstock::{ColumnGeneration, Config, Instance, LogReporter};
use cutstock_highs::HighsModel;

#[derive(Parser)]
#[command(name = "cutstock")]
#[command(about = "Solve a one-dimensional cutting stock instance by column generation with HiGHS")]
#[command(version)]
struct Cli {
    /// Instance file: stock length, number of item types, item sizes, item demands
    #[arg(default_value = "Data/cutting_stock.txt")]
    instance: PathBuf,

    /// Minimum improvement of a new pattern over its cost of one stock unit
    #[arg(short, long, default_value_t = cutstock::EPSILON)]
    tolerance: f64,

    /// Add a priced pattern even if it is already in the pool
    #[arg(long)]
    keep_duplicates: bool,

    /// Write the final master and pricing problems as LP files to this directory
    #[arg(long, value_name = "DIR")]
    dump_models: Option<PathBuf>,

    /// More log output (-v: debug, -vv: trace and HiGHS solver output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn backend(cli : &Cli) -> HighsModel {
    if cli.verbose >= 2 { HighsModel::new().verbose() } else { HighsModel::new() }
}

fn run(cli : &Cli) -> Result<(),Box<dyn std::error::Error>> {
    let instance = Instance::from_file(&cli.instance)?;
    log::info!("{}: stock length {}, {} item types",cli.instance.display(),instance.stock_length(),instance.num_items());

    let mut config = Config::new()
        .with_tolerance(cli.tolerance)
        .with_skip_duplicates(!cli.keep_duplicates);
    if let Some(dir) = &cli.dump_models {
        std::fs::create_dir_all(dir)?;
        config = config.with_dump_dir(dir);
    }

    let cg = ColumnGeneration::new(instance, config);
    let plan = cg.run(backend(cli), backend(cli), & mut LogReporter)?;
    print!("{}",plan);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}",e);
            ExitCode::FAILURE
        }
    }
}
