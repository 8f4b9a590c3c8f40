use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};

use form::{Field, FormController, PromptOutcome, Prompter, Pools};
use storage::{AppsScriptClient, EndpointConfig, MatchStore};
use tracker::{
    ConsoleNotifier, LogNotifier, Notifier, SubmitOutcome, TrackerConfig, ViewCoordinator,
};

#[derive(Parser, Debug)]
#[command(about = "Record match results in a spreadsheet-backed endpoint")]
struct Params {
    /// Endpoint url; overrides MATCH_TRACKER_ENDPOINT and the config file
    #[arg(short, long)]
    endpoint: Option<String>,

    /// YAML file with an `endpoint:` key
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Send save notifications to the log instead of the terminal
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every recorded match
    List,
    /// Print the known player names and deck names
    Pools,
    /// Record one match from command line arguments
    Submit(SubmitArgs),
    /// Record matches by answering prompts
    Interactive,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long, default_value = "")]
    player: String,
    #[arg(long, default_value = "")]
    opponent: String,
    #[arg(long, default_value = "")]
    format: String,
    #[arg(long, default_value = "")]
    player_deck: String,
    #[arg(long, default_value = "")]
    opponent_deck: String,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    wins: String,
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    losses: String,
    /// Play or Draw
    #[arg(long)]
    play_draw: Option<String>,
    /// Pre-Sideboard or Post-Sideboard
    #[arg(long)]
    sideboard: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let yaml_config = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    let endpoint = EndpointConfig::from_cli_or_env_or_yaml(args.endpoint, yaml_config.endpoint)?;
    log::info!("Using endpoint: {}", endpoint.url);

    let store = AppsScriptClient::new(endpoint);
    if args.quiet {
        run(ViewCoordinator::new(store, LogNotifier), args.command).await
    } else {
        run(ViewCoordinator::new(store, ConsoleNotifier), args.command).await
    }
}

async fn run<S: MatchStore, N: Notifier>(
    coordinator: ViewCoordinator<S, N>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    coordinator.load().await;
    let coordinator = &coordinator;

    match command {
        Command::List => list(coordinator).await,
        Command::Pools => pools(coordinator).await,
        Command::Submit(submit_args) => submit(coordinator, submit_args).await,
        Command::Interactive => interactive(coordinator, io::stdin().lock(), io::stdout()).await,
    }
}

async fn list<S: MatchStore, N: Notifier>(
    coordinator: &ViewCoordinator<S, N>,
) -> Result<(), Box<dyn Error>> {
    let records = coordinator.records().await;
    for record in &records {
        println!("{record}");
    }
    println!("{} match(es)", records.len());
    Ok(())
}

async fn pools<S: MatchStore, N: Notifier>(
    coordinator: &ViewCoordinator<S, N>,
) -> Result<(), Box<dyn Error>> {
    println!("Players: {}", coordinator.name_pool().await.join(", "));
    println!("Decks: {}", coordinator.deck_pool().await.join(", "));
    Ok(())
}

async fn submit<S: MatchStore, N: Notifier>(
    coordinator: &ViewCoordinator<S, N>,
    args: SubmitArgs,
) -> Result<(), Box<dyn Error>> {
    let mut form = FormController::new();
    form.set(Field::Player, args.player);
    form.set(Field::Opponent, args.opponent);
    form.set(Field::Format, args.format);
    form.set(Field::PlayerDeck, args.player_deck);
    form.set(Field::OpponentDeck, args.opponent_deck);
    form.set(Field::Wins, args.wins);
    form.set(Field::Losses, args.losses);
    form.set(Field::PlayDraw, args.play_draw.unwrap_or_default());
    form.set(Field::SideboardStatus, args.sideboard.unwrap_or_default());

    println!("Saving...");
    match form.submit(move |record| coordinator.submit(record)).await {
        Ok(SubmitOutcome::Saved) => Ok(()),
        Ok(outcome) => Err(format!("match result was not saved ({outcome:?})").into()),
        Err(errors) => {
            for error in &errors {
                eprintln!("{error}");
            }
            Err(format!("{} field(s) failed validation", errors.len()).into())
        }
    }
}

async fn interactive<S, N, R, W>(
    coordinator: &ViewCoordinator<S, N>,
    input: R,
    output: W,
) -> Result<(), Box<dyn Error>>
where
    S: MatchStore,
    N: Notifier,
    R: BufRead,
    W: Write,
{
    let mut prompter = Prompter::new(input, output);
    let mut form = FormController::new();
    loop {
        let names = coordinator.name_pool().await;
        let decks = coordinator.deck_pool().await;
        let pools = Pools {
            names: &names,
            decks: &decks,
        };

        let mut fields = Field::ALL.to_vec();
        loop {
            if prompter.fill_fields(&mut form, &pools, &fields)? == PromptOutcome::Quit {
                return Ok(());
            }
            match form.validate() {
                Ok(_) => break,
                Err(errors) => {
                    log::debug!("Form has {} error(s), asking again", errors.len());
                    fields = errors.iter().map(|e| e.field).collect();
                }
            }
        }

        println!("Saving...");
        if let Err(errors) = form.submit(move |record| coordinator.submit(record)).await {
            for error in &errors {
                eprintln!("{error}");
            }
        }
        println!();
    }
}
