mod analysis;
mod api;
mod catalog;
mod config;
mod display;
mod draft;
mod error;
mod live;
mod session;

use analysis::recommender::Recommender;
use analysis::scoring::ScoringEngine;
use analysis::stats::{patch_tier_list, MockStatsProvider};
use api::client::{AnalysisClient, DraftAdvisor};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use config::{Config, OpponentStyle};
use display::output::{
    display_analysis, display_draft_board, display_error, display_info, display_patch_data,
    display_probability_history, display_recommendations, display_series, display_success,
};
use draft::{DraftPhase, SlotKind, Team};
use error::AppError;
use indicatif::ProgressBar;
use live::{HttpLiveFeed, LiveGameFeed, OfflineFeed};
use rand::rngs::StdRng;
use rand::SeedableRng;
use session::DraftSession;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Rift Mind")]
#[command(about = "Draft pick/ban recommendations and win probability for competitive drafts", long_about = None)]
struct Args {
    /// Patch version used for stats lookups (overrides RIFTMIND_PATCH)
    #[arg(short = 'p', long = "patch-version", global = true)]
    patch_version: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a draft and recommend the next selection
    Draft(DraftArgs),

    /// Show the champion tier list for a patch
    Patch,
}

#[derive(clap::Args, Debug)]
struct DraftArgs {
    /// Blue side picks, comma separated (names or ids)
    #[arg(long, value_delimiter = ',')]
    blue_picks: Vec<String>,

    /// Red side picks, comma separated
    #[arg(long, value_delimiter = ',')]
    red_picks: Vec<String>,

    /// Blue side bans, comma separated
    #[arg(long, value_delimiter = ',')]
    blue_bans: Vec<String>,

    /// Red side bans, comma separated
    #[arg(long, value_delimiter = ',')]
    red_bans: Vec<String>,

    /// Slot being edited (0-19, draft order). Omit for global meta picks
    #[arg(short, long)]
    active: Option<usize>,

    /// Remove the champion from a slot after filling (repeatable)
    #[arg(long)]
    clear: Vec<usize>,

    /// Seed for the counter-score jitter, for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Opponent style (Aggressive, Scaling, Split Push, Teamfight)
    #[arg(long)]
    style: Option<String>,

    /// Poll the live game feed until the game ends
    #[arg(long)]
    watch: bool,

    /// Seconds between live feed polls
    #[arg(long, default_value = "5")]
    poll_secs: u64,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(patch) = args.patch_version {
        config.simulation.patch_version = patch;
    }

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(Path::new(path))?,
        None => Catalog::builtin(),
    };
    if catalog.is_empty() {
        return Err(AppError::ConfigError("champion catalog is empty".to_string()));
    }
    info!(champions = catalog.len(), patch = %config.simulation.patch_version, "starting");

    match args.command {
        Command::Patch => {
            let rows = patch_tier_list(&catalog, &config.simulation.patch_version);
            display_patch_data(&rows, &config.simulation.patch_version);
            Ok(())
        }
        Command::Draft(draft_args) => run_draft(draft_args, config, &catalog),
    }
}

fn run_draft(args: DraftArgs, mut config: Config, catalog: &Catalog) -> Result<(), AppError> {
    if let Some(style) = &args.style {
        config.simulation.opponent_style = style.parse::<OpponentStyle>()?;
    }
    let sim = config.simulation.clone();
    let stats = MockStatsProvider;
    let scoring = ScoringEngine::new(&stats);

    // Step 1: Replay the selections in draft order
    let mut session = DraftSession::new(catalog);
    let mut queues = [
        (Team::Blue, SlotKind::Pick, args.blue_picks.iter()),
        (Team::Red, SlotKind::Pick, args.red_picks.iter()),
        (Team::Blue, SlotKind::Ban, args.blue_bans.iter()),
        (Team::Red, SlotKind::Ban, args.red_bans.iter()),
    ];
    for phase in DraftPhase::ORDER {
        let Some((team, kind)) = phase.turn() else {
            continue;
        };
        let Some((_, _, names)) = queues.iter_mut().find(|(t, k, _)| *t == team && *k == kind) else {
            continue;
        };
        let Some(name) = names.next() else {
            continue;
        };
        let champion = session.fill_next(team, kind, name.trim())?;
        debug!(?phase, champion = %champion.id, "replayed selection");

        if kind == SlotKind::Pick {
            let probability = scoring.analyze(session.draft(), &sim).blue_win_probability;
            session.record_probability(probability);
        }
    }
    for (team, kind, mut names) in queues {
        if names.next().is_some() {
            return Err(AppError::TeamFull(format!("{} {}s", team, kind)));
        }
    }
    display_success(&format!(
        "Draft loaded: {} of 20 slots filled, next turn {:?}",
        session.draft().filled_count(),
        session.draft().current_phase()
    ));

    for index in &args.clear {
        session.clear_slot(*index)?;
    }
    if let Some(index) = args.active {
        session.activate_slot(index)?;
    }

    // Step 2: Full analysis (backend when configured, local heuristics otherwise)
    let client = config.backend_url.as_deref().map(AnalysisClient::new);
    let advisor = DraftAdvisor::new(catalog, &stats, client, sim.clone());

    let (response, source) = if advisor.is_online() {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message("Asking analysis backend...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = advisor.analyze(session.draft());
        spinner.finish_and_clear();
        result
    } else {
        display_info("No analysis backend configured, using offline heuristics");
        advisor.analyze(session.draft())
    };
    let local = scoring.analyze(session.draft(), &sim);

    // Step 3: Recommendations for the slot being edited
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let recommender = Recommender::new(catalog, &stats);
    let recommendations =
        recommender.recommend(session.draft(), session.active_slot(), &sim, &mut rng);

    display_draft_board(session.draft());
    display_probability_history(session.history());
    display_analysis(&local, &response, source);
    display_recommendations(&recommendations, session.active_slot());

    // Step 4: Optionally wait for the live game to finish
    if args.watch {
        let feed: Box<dyn LiveGameFeed> = match (&config.live_url, &config.grid_api_key) {
            (Some(url), Some(key)) => Box::new(HttpLiveFeed::new(url, key)),
            _ => {
                display_info("GRID_LIVE_URL / GRID_API_KEY not set, live feed is simulated and never ends");
                Box::new(OfflineFeed)
            }
        };

        display_info(&format!("Watching live game (every {}s)...", args.poll_secs));
        let winner = loop {
            if let Some(winner) = session.poll_live(feed.as_ref()) {
                break winner;
            }
            thread::sleep(Duration::from_secs(args.poll_secs.max(1)));
        };
        display_success(&format!("{} VICTORY! Draft reset.", winner.to_string().to_uppercase()));
    }

    display_series(session.score(), session.games());

    Ok(())
}
