use super::cancellation::CancellationToken;
use super::config::FormationConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::selection::{self, ScoredPartition};
use super::tasks::team_building::{AttemptRng, BuildParams, PartitionStrategy};
use crate::core::models::participant::Participant;
use crate::core::models::partition::Partition;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// What the parallel search produced and how the attempts fared.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Option<ScoredPartition>,
    pub attempts_launched: usize,
    pub completed: usize,
    pub failed: usize,
    /// Whether the deadline elapsed before every attempt reported back.
    pub timed_out: bool,
    pub seed: u64,
    pub elapsed: Duration,
}

type AttemptResult = (usize, Result<Partition, String>);

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Runs `config.attempts` independent constructions of `strategy` on a dedicated worker
/// pool and returns the best partition completed before `config.timeout`.
///
/// Every attempt owns a copy of the pool and a random stream derived from the run seed and
/// its attempt index. A panicking attempt is counted as failed. Attempts still running at
/// the deadline are signalled to stop and their results are discarded.
#[instrument(skip_all, name = "parallel_search", fields(attempts = config.attempts, team_size = config.team_size))]
pub fn run(
    participants: &[Participant],
    config: &FormationConfig,
    strategy: Arc<dyn PartitionStrategy>,
    reporter: &ProgressReporter,
) -> Result<SearchOutcome, EngineError> {
    let started = Instant::now();
    let attempts = config.attempts;
    let seed = config.seed.unwrap_or_else(rand::random);
    let params = BuildParams::from_config(config);

    let workers = ThreadPoolBuilder::new()
        .num_threads(attempts)
        .thread_name(|index| format!("team-builder-{index}"))
        .build()?;

    info!(
        strategy = strategy.name(),
        seed,
        participants = participants.len(),
        "Launching {} team building attempts.",
        attempts
    );
    reporter.report(Progress::TaskStart {
        total_steps: attempts as u64,
    });

    let shared_pool = Arc::new(participants.to_vec());
    let cancel = CancellationToken::new();
    let (sender, receiver) = mpsc::channel::<AttemptResult>();

    for attempt in 0..attempts {
        let sender = sender.clone();
        let strategy = Arc::clone(&strategy);
        let shared_pool = Arc::clone(&shared_pool);
        let cancel = cancel.clone();
        workers.spawn(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                let mut rng = AttemptRng::seed_from_u64(seed);
                rng.set_stream(attempt as u64);
                strategy.build(shared_pool.as_ref().clone(), &params, &mut rng, &cancel)
            }))
            .map_err(|payload| panic_message(&*payload));
            // The receiver is gone once the deadline has passed.
            let _ = sender.send((attempt, result));
        });
    }
    drop(sender);

    let deadline = started + config.timeout;
    let mut candidates = Vec::with_capacity(attempts);
    let mut failed = 0;
    let mut timed_out = false;

    while candidates.len() + failed < attempts {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match receiver.recv_timeout(remaining) {
            Ok((attempt, Ok(partition))) => {
                debug!(
                    attempt,
                    teams = partition.len(),
                    members = partition.total_members(),
                    "Attempt completed."
                );
                candidates.push(ScoredPartition::new(attempt, partition));
                reporter.report(Progress::TaskIncrement);
            }
            Ok((attempt, Err(message))) => {
                warn!(attempt, "Team building attempt failed: {}", message);
                failed += 1;
                reporter.report(Progress::AttemptFailed {
                    attempt,
                    reason: message,
                });
                reporter.report(Progress::TaskIncrement);
            }
            Err(RecvTimeoutError::Timeout) => {
                timed_out = true;
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if timed_out {
        cancel.cancel();
        let abandoned = attempts - candidates.len() - failed;
        warn!(
            "Deadline of {:?} elapsed; abandoning {} unfinished attempts.",
            config.timeout, abandoned
        );
        reporter.report(Progress::SearchTimedOut { abandoned });
    }
    reporter.report(Progress::TaskFinish);

    let completed = candidates.len();
    let best = selection::select_best(candidates);
    match &best {
        Some(winner) => info!(
            attempt = winner.attempt,
            score = winner.score(),
            "Selected best partition: {}",
            winner.quality
        ),
        None => info!("No attempt produced a usable partition."),
    }

    Ok(SearchOutcome {
        best,
        attempts_launched: attempts,
        completed,
        failed,
        timed_out,
        seed,
        elapsed: started.elapsed(),
    })
}
