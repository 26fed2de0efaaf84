use std::thread;

use crossbeam_channel::Receiver;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info};

use crate::aligner::AlignmentResult;
use crate::config::AlignerConfig;
use crate::errors::AlignError;
use crate::sequence::NamedSequence;

/// Which pairs of records to align
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PairMode {
    /// The first record against each of the others
    #[default]
    FirstVsRest,

    /// Every unordered pair of records
    AllPairs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AlignmentJob {
    pub index: usize,
    pub seq1: usize,
    pub seq2: usize,
}

pub fn plan_jobs(num_sequences: usize, mode: PairMode) -> Vec<AlignmentJob> {
    let pairs: Vec<(usize, usize)> = match mode {
        PairMode::FirstVsRest => (1..num_sequences).map(|other| (0, other)).collect(),
        PairMode::AllPairs => (0..num_sequences).tuple_combinations().collect(),
    };

    pairs.into_iter()
        .enumerate()
        .map(|(index, (seq1, seq2))| AlignmentJob { index, seq1, seq2 })
        .collect()
}

/// Alignment of a pair of named records
#[derive(Clone, Debug, Serialize)]
pub struct PairAlignment {
    pub name1: String,
    pub name2: String,

    #[serde(flatten)]
    pub result: AlignmentResult,
}

type JobOutput = (AlignmentJob, Result<AlignmentResult, AlignError>);

/// Align all jobs on `threads` worker threads, each with its own aligner. Results are in job
/// order. The first failing job aborts the batch.
pub fn align_batch(
    config: &AlignerConfig,
    sequences: &[NamedSequence],
    jobs: &[AlignmentJob],
    threads: usize,
) -> Result<Vec<PairAlignment>, AlignError> {
    for job in jobs {
        for seq in [job.seq1, job.seq2] {
            if seq >= sequences.len() {
                return Err(AlignError::InvalidRange { start: seq, end: seq + 1, len: sequences.len() });
            }
        }
    }

    let num_workers = threads.clamp(1, jobs.len().max(1));
    info!("Aligning {} pairs using {num_workers} threads...", jobs.len());

    let (tx, rx) = crossbeam_channel::unbounded();
    let (tx_out, rx_out) = crossbeam_channel::unbounded();

    thread::scope(|scope| {
        scope.spawn(move || {
            for job in jobs {
                if tx.send(*job).is_err() {
                    break;
                }
            }
        });

        for _ in 0..num_workers {
            let thread_rx = rx.clone();
            let tx_out_thread = tx_out.clone();

            scope.spawn(move || {
                let mut aligner = config.build_aligner();

                while let Ok(job) = thread_rx.recv() {
                    let (first, second) = (&sequences[job.seq1], &sequences[job.seq2]);
                    debug!(job = job.index, seq1 = first.name.as_str(), seq2 = second.name.as_str(), "aligning pair");

                    let result = aligner.align(config.alignment_type, &first.seq, &second.seq);
                    if tx_out_thread.send((job, result)).is_err() {
                        break;
                    }
                }
            });
        }

        drop(rx);
        drop(tx_out);

        collect_results(rx_out, sequences, jobs.len())
    })
}

/// Dropping the receiver on error makes the workers stop after their current job.
fn collect_results(
    rx_out: Receiver<JobOutput>,
    sequences: &[NamedSequence],
    num_jobs: usize,
) -> Result<Vec<PairAlignment>, AlignError> {
    let mut results: Vec<Option<PairAlignment>> = (0..num_jobs).map(|_| None).collect();

    while let Ok((job, result)) = rx_out.recv() {
        results[job.index] = Some(PairAlignment {
            name1: sequences[job.seq1].name.clone(),
            name2: sequences[job.seq2].name.clone(),
            result: result?,
        });
    }

    Ok(results.into_iter().flatten().collect())
}
