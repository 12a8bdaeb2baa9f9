use crate::cli::FormArgs;
use crate::config::PartialFormationConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use teammate::core::io::{roster, teams};
use teammate::workflows::form;
use tracing::{info, warn};

pub fn run(args: FormArgs) -> Result<()> {
    let partial_config = PartialFormationConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_cli(&args)?;

    info!("Loading participants from {:?}", &args.input);
    let participants = roster::read_participants(&args.input)?;
    println!("Loaded {} participants.", participants.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = progress_handler.reporter();

    println!("Forming teams...");
    info!("Invoking the core formation workflow...");
    let result = form::run(&participants, &final_config, &reporter)?;

    if result.timed_out {
        warn!(
            "Search deadline elapsed; {} of {} attempts completed.",
            result.attempts_completed, result.attempts_launched
        );
    }

    if result.teams.is_empty() {
        warn!("Workflow completed but no teams could be formed.");
        println!("Warning: no teams could be formed from the current roster.");
        return Ok(());
    }

    for team in &result.teams {
        println!("\n{}", team);
    }

    teams::write_teams(&args.output, &result.teams)?;

    println!(
        "{} teams formed with {} participants ({} unassigned).",
        result.teams.len(),
        result.assigned(),
        result.unassigned
    );
    if let Some(quality) = &result.quality {
        println!("Quality: {}", quality);
    }
    println!("✓ Teams written to: {}", args.output.display());

    Ok(())
}
