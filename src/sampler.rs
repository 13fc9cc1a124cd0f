use std::thread;
use std::time::Duration;

use crate::constants::US_PER_SEC;
use crate::error::IdleBenchError;
use crate::report::{CpuIdle, IdleReport, StateIdle};
use crate::snapshot::Snapshot;
use crate::source::CounterSource;
use crate::topology::IdleTopology;

/// Takes two counter snapshots separated by a sleep and turns the
/// deltas into an [`IdleReport`].
pub struct IdleSampler<S: CounterSource> {
	topology: IdleTopology,
	source: S,
}

impl<S: CounterSource> IdleSampler<S> {
	/// Creates a sampler over a fixed topology.
	///
	/// The topology is captured by value here and reused for both
	/// snapshots; the sampler never re-probes mid-run.
	pub fn new(topology: IdleTopology, source: S) -> Self {
		Self { topology, source }
	}

	/// Runs one sampling window of `duration_secs` wall-clock seconds.
	///
	/// The first snapshot reads only the time counters (its usage
	/// values are never consumed); the second reads both. The sleep is
	/// a plain blocking wait — an interrupting signal is not handled
	/// specially. Any read failure aborts the run; there is no partial
	/// report and no retry.
	pub fn run(&mut self, duration_secs: u64) -> Result<IdleReport, IdleBenchError> {
		let before = Snapshot::capture(self.topology, &mut self.source, false)?;
		thread::sleep(Duration::from_secs(duration_secs));
		let after = Snapshot::capture(self.topology, &mut self.source, true)?;

		Ok(compute_report(&before, &after, duration_secs))
	}
}

/// Computes the report from two snapshots and the window length.
///
/// Pure arithmetic, no I/O:
/// - per-CPU idle ratio: idle microseconds accrued during the window
///   over the window's microseconds (deltas use `saturating_sub`, so a
///   counter that went backwards clamps to zero instead of wrapping);
/// - per-state average residency: cumulative time over cumulative
///   entry count from the second snapshot, 0 when never entered;
/// - per-state total: the second snapshot's cumulative value, not a
///   delta (only the ratios are windowed);
/// - aggregate ratio: all idle deltas over the window times CPU count.
pub fn compute_report(before: &Snapshot, after: &Snapshot, duration_secs: u64) -> IdleReport {
	let window_us = (duration_secs * US_PER_SEC) as f64;
	let cpu_count = after.cpu_count();

	let mut cpus = Vec::with_capacity(cpu_count);
	let mut idle_delta_sum: u64 = 0;

	for cpu in 0..cpu_count {
		let delta = after.total(cpu).saturating_sub(before.total(cpu));
		idle_delta_sum += delta;

		let states = (0..after.state_count())
			.map(|state| {
				let time = after.time(cpu, state);
				let usage = after.usage(cpu, state);
				StateIdle {
					avg_residency_us: if usage > 0 { time / usage } else { 0 },
					total_time_us: time,
				}
			})
			.collect();

		cpus.push(CpuIdle {
			idle_ratio: delta as f64 / window_us,
			states,
		});
	}

	IdleReport {
		cpus,
		aggregate_idle_ratio: idle_delta_sum as f64 / (window_us * cpu_count as f64),
	}
}
