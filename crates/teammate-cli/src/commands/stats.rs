use crate::cli::StatsArgs;
use crate::error::Result;
use teammate::core::io::roster;
use teammate::core::models::statistics::RosterSummary;
use tracing::info;

pub fn run(args: StatsArgs) -> Result<()> {
    info!("Loading participants from {:?}", &args.input);
    let participants = roster::read_participants(&args.input)?;
    let summary = RosterSummary::from_participants(&participants);
    print!("{}", summary);
    Ok(())
}
