use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use log::info;

use afarust_rewriting::fixtures;
use afarust_utilities::random_generator;
use rewritefuzz::invariant_test;
use rewritefuzz::reachability;
use rewritefuzz::WalkConfig;

#[derive(Parser, Debug)]
#[command(
    name = "rewritefuzz",
    about = "Explores the string rewriting system over abcdpq with random rewrite walks",
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks whether the end points of random walks are connected in the completed system
    Reach {
        #[command(flatten)]
        walk: WalkArgs,

        #[arg(long, default_value_t = 100_000, help = "Gives up a single search after visiting this many words")]
        max_visited: usize,
    },

    /// Checks that the invariants hold for all rules and for random rewrite chains
    Invariants {
        #[command(flatten)]
        walk: WalkArgs,
    },
}

#[derive(Args, Debug)]
struct WalkArgs {
    #[arg(long, default_value_t = 5)]
    count: usize,

    #[arg(long, default_value_t = 15)]
    min_len: usize,

    #[arg(long, default_value_t = 20)]
    max_len: usize,

    #[arg(long, help = "Seed for the random number generator, random when omitted")]
    seed: Option<u64>,
}

impl WalkArgs {
    fn config(&self) -> WalkConfig {
        WalkConfig {
            count: self.count,
            min_len: self.min_len,
            max_len: self.max_len,
            ..WalkConfig::default()
        }
    }
}

/// The number of extra rules added to the completed system.
const COMPLETION_RULES: usize = 10;

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let original = fixtures::original_system();
    let completed = fixtures::completed_system(COMPLETION_RULES);

    match cli.command {
        Command::Reach { walk, max_visited } => {
            let config = walk.config();
            info!("Checking reachability with {config:?}");

            let mut rng = random_generator(walk.seed);
            let results = reachability(&original, &completed, &config, Some(max_visited), &mut rng);

            for (index, result) in results.iter().enumerate() {
                println!("Test {}:", index + 1);
                println!("{result}");
                println!();
            }

            Ok(ExitCode::SUCCESS)
        }
        Command::Invariants { walk } => {
            let config = walk.config();
            info!("Checking invariants with {config:?}");

            println!("Original rewriting system:");
            println!("{original}");
            println!("Completed rewriting system:");
            println!("{completed}");

            let invariants = fixtures::invariants();
            for invariant in &invariants {
                println!("{invariant}");
            }
            println!();

            let mut rng = random_generator(walk.seed);
            let report = invariant_test(
                &[("original", &original), ("completed", &completed)],
                &invariants,
                &config,
                &mut rng,
            );

            println!("{report}");
            if report.systems_passed() && report.chains_passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
