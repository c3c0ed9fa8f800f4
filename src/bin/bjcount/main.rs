//! Terminal blackjack with a card-counting display.

mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use bjcount::{Checkpoint, Money, Player, RoundFlow, SaveStore, Session, TableOptions};
use clap::Parser;

use terminal::{MenuChoice, Terminal};

#[derive(Parser)]
#[command(
    name = "bjcount",
    about = "Terminal blackjack with a Hi-Lo card-counting display"
)]
struct Cli {
    /// Player name; asked for at the table when omitted
    #[arg(long)]
    name: Option<String>,

    /// Number of decks in the shoe
    #[arg(long, default_value_t = 6)]
    decks: u8,

    /// Shuffle seed; defaults to the clock
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding save files; defaults to the home directory
    #[arg(long, env = "BJCOUNT_SAVE_DIR")]
    save_dir: Option<PathBuf>,

    /// Balance for players without a save file
    #[arg(long, default_value = "1000")]
    balance: Money,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Saves the checkpointed player when the process is interrupted or
/// terminated, then exits.
fn install_interrupt_handler(checkpoint: Checkpoint) {
    let installed = ctrlc::set_handler(move || {
        println!("\nInterrupted, saving progress...");
        match checkpoint.save() {
            Ok(Some(path)) => log::info!("progress saved to {}", path.display()),
            Ok(None) => {}
            Err(err) => log::error!("could not save progress: {err}"),
        }
        std::process::exit(130);
    });
    if let Err(err) = installed {
        log::warn!("could not install the interrupt handler: {err}");
    }
}

/// The player to show on the stats screen: the one seated last, or the saved
/// record of the player named on the command line.
fn stats_player(
    checkpoint: &Checkpoint,
    store: &SaveStore,
    name: Option<&str>,
) -> Option<Player> {
    checkpoint.player().or_else(|| {
        let name = name?;
        match store.load(name) {
            Ok(player) => player,
            Err(err) => {
                log::error!("could not load progress for '{name}': {err}");
                None
            }
        }
    })
}

/// Whether the player asked to leave the program.
enum Leave {
    Menu,
    Program,
}

fn play(
    terminal: &mut Terminal,
    name: &str,
    options: &TableOptions,
    seed: u64,
    store: &SaveStore,
    checkpoint: &Checkpoint,
    last: &mut Option<Session>,
) -> Leave {
    // Saves the previous player
    drop(last.take());

    let mut session = match Session::open(name, options.clone(), seed, store.clone()) {
        Ok(session) => session.with_checkpoint(checkpoint.clone()),
        Err(err) => {
            log::error!("could not open the table: {err}");
            return Leave::Program;
        }
    };
    terminal.welcome(session.game().player(), session.restored());

    let mut leave = Leave::Menu;
    while !session.is_broke() {
        match session.play_round(terminal) {
            Ok(RoundFlow::Settled(result)) => {
                terminal.show_result(session.game(), &result);
                if !terminal.pause("Press Enter to continue...") {
                    leave = Leave::Program;
                    break;
                }
            }
            Ok(RoundFlow::Quit) => {
                leave = Leave::Program;
                break;
            }
            Err(err) => {
                log::error!("round failed: {err}");
                break;
            }
        }
    }

    if session.is_broke() {
        terminal.game_over();
    }
    *last = Some(session);
    leave
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let options = TableOptions::default()
        .with_decks(cli.decks)
        .with_starting_balance(cli.balance);
    if let Err(err) = options.validate() {
        log::error!("invalid table options: {err}");
        return ExitCode::FAILURE;
    }

    let store = cli.save_dir.map_or_else(SaveStore::in_home, SaveStore::new);
    let mut seed = cli.seed.unwrap_or_else(clock_seed);
    let mut terminal = Terminal::new();
    let mut last: Option<Session> = None;
    let checkpoint = Checkpoint::new();
    install_interrupt_handler(checkpoint.clone());

    log::info!("starting blackjack, saves in {}", store.dir().display());

    loop {
        match terminal.menu() {
            Some(MenuChoice::Play) => {
                let name = match &cli.name {
                    Some(name) => name.clone(),
                    None => match terminal.prompt_name() {
                        Some(name) => name,
                        None => break,
                    },
                };
                let leave = play(
                    &mut terminal,
                    &name,
                    &options,
                    seed,
                    &store,
                    &checkpoint,
                    &mut last,
                );
                seed = seed.wrapping_add(1);
                if matches!(leave, Leave::Program) {
                    break;
                }
            }
            Some(MenuChoice::Stats) => {
                let player = stats_player(&checkpoint, &store, cli.name.as_deref());
                terminal.show_stats(player.as_ref());
            }
            Some(MenuChoice::Rules) => terminal.show_rules(),
            Some(MenuChoice::Exit) | None => break,
        }
    }

    log::info!("shutting down");
    // Saves the last player before the final stats
    drop(last);
    terminal.farewell(checkpoint.player().as_ref());
    ExitCode::SUCCESS
}
