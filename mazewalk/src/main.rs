use std::{io, path::PathBuf};

use clap::Parser;
use mazewalk::{
    app::{self, AppError, RunConfig},
    logging,
    settings::Settings,
};
use pmaze::dims::Dims;

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazewalk")]
struct Args {
    #[clap(short, long, help = "Number of rows")]
    rows: Option<usize>,
    #[clap(short, long, help = "Number of columns")]
    cols: Option<usize>,
    #[clap(short, long, help = "Seed for deterministic generation")]
    seed: Option<u64>,
    #[clap(long, help = "Cell width in characters, walls included")]
    cell_width: Option<i32>,
    #[clap(long, help = "Cell height in characters, walls included")]
    cell_height: Option<i32>,
    #[clap(short, long, help = "Animate with this many milliseconds between steps")]
    delay: Option<u64>,
    #[clap(long, action, help = "Only generate the maze")]
    no_solve: bool,
    #[clap(long, help = "Settings file to use instead of the default one")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More logging, repeatable")]
    verbose: u8,
}

impl Args {
    fn apply(&self, config: &mut RunConfig) {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(width) = self.cell_width {
            config.cell_size = Dims(width, config.cell_size.1);
        }
        if let Some(height) = self.cell_height {
            config.cell_size = Dims(config.cell_size.0, height);
        }
        if let Some(delay) = self.delay {
            config.delay = (delay > 0).then(|| std::time::Duration::from_millis(delay));
        }
        config.seed = self.seed.or(config.seed);
        config.solve = !self.no_solve;
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.show_config_path {
        println!("{}", settings_path.display());
        return Ok(());
    }

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(&settings_path)?;
    let level = logging::level_with_verbosity(settings.get_log_level().into(), args.verbose);
    if let Err(err) = logging::init(level) {
        eprintln!("Failed to set up logging: {}", err);
    }

    let mut config = RunConfig::from_settings(&settings);
    args.apply(&mut config);
    log::debug!("Running with {:?}", config);

    let outcome = app::run(&config, io::stdout())?;

    if !outcome.animated {
        println!("{}", outcome.frame);
    }
    println!("Seed: {}", outcome.seed);
    println!("{}", outcome.summary());

    Ok(())
}
