use log::{error, info};
use motus::cli::{Cli, CliInterface, parse_cli};
use motus::logging::init_logging;
use motus::tui::TuiInterface;
use motus::{GameSummary, WordSource, game_loop, load_wordbank_from_file};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn load_source(cli: &Cli) -> Result<WordSource, Box<dyn Error>> {
    let source = match &cli.wordbank_path {
        Some(path) => WordSource::new(load_wordbank_from_file(path)?),
        None => WordSource::embedded(),
    };
    source.validate()?;
    info!(
        "Word source ready: {} entries, {} playable",
        source.len(),
        source.eligible_count()
    );
    Ok(source)
}

fn run(cli: &Cli) -> Result<GameSummary, Box<dyn Error>> {
    let source = load_source(cli)?;
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = cli.game_options();

    let summary = if cli.plain {
        let stdin = io::stdin();
        let mut interface = CliInterface::new(stdin.lock());
        game_loop(&source, &mut interface, &mut rng, &options)?
    } else {
        let mut interface = TuiInterface::new()?;
        game_loop(&source, &mut interface, &mut rng, &options)?
    };
    Ok(summary)
}

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Some(destination) = cli.log_destination() {
        if let Err(e) = init_logging(&destination) {
            eprintln!("Failed to set up logging: {e}");
        }
    }

    match run(&cli) {
        Ok(summary) => {
            info!(
                "Session over: score {} after {} game(s)",
                summary.score, summary.games_played
            );
            println!(
                "Final score: {} ({} game(s) played)",
                summary.score, summary.games_played
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
