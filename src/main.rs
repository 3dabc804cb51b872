use clap::Parser;
use log::info;

use study_notes::{App, Cli, Config, JsonFileBackend, NoteStore, Result, ViewController};

fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(cli.store)?;
    info!("Using note store at {}", config.store_path.display());

    let backend = JsonFileBackend::new(config.store_path.clone());
    let mut store = NoteStore::new(Box::new(backend));
    store.load()?;
    store.seed_example_note()?;

    let controller = ViewController::new(store);
    let mut app = App::new(controller);
    app.run(cli.command)
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
