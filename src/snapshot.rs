use crate::error::IdleBenchError;
use crate::source::{CounterKind, CounterSource};
use crate::topology::IdleTopology;

/// The two cumulative counters of one (cpu, state) cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCounters {
	pub time: u64,
	pub usage: u64,
}

/// An immutable point-in-time capture of every cpuidle counter across
/// the full topology, plus the derived per-CPU total idle time.
///
/// A snapshot is never mutated after capture; deltas between two
/// snapshots are computed by subtraction into new values.
#[derive(Debug, Clone)]
pub struct Snapshot {
	// Indexed [cpu][state]
	rows: Vec<Vec<StateCounters>>,
	// total[cpu] = sum of time over that cpu's states
	total: Vec<u64>,
}

impl Snapshot {
	/// Reads every counter for the given topology from the source.
	///
	/// `time` is always read. `usage` is only read when `read_usage`
	/// is set: the first snapshot of a run never consumes its usage
	/// values, so the sampler skips those reads for it. Any single
	/// failed read aborts the capture; no partial snapshot is exposed.
	pub fn capture(
		topology: IdleTopology,
		source: &mut dyn CounterSource,
		read_usage: bool,
	) -> Result<Self, IdleBenchError> {
		let mut rows = Vec::with_capacity(topology.cpu_count);

		for cpu in 0..topology.cpu_count {
			let mut row = Vec::with_capacity(topology.state_count);
			for state in 0..topology.state_count {
				let time = source.read(cpu, state, CounterKind::Time)?;
				let usage = if read_usage {
					source.read(cpu, state, CounterKind::Usage)?
				} else {
					0
				};
				row.push(StateCounters { time, usage });
			}
			rows.push(row);
		}

		let total = rows
			.iter()
			.map(|row| row.iter().map(|c| c.time).sum())
			.collect();

		Ok(Self { rows, total })
	}

	pub fn cpu_count(&self) -> usize {
		self.rows.len()
	}

	pub fn state_count(&self) -> usize {
		self.rows.first().map_or(0, |row| row.len())
	}

	/// Cumulative time for one (cpu, state) cell.
	pub fn time(&self, cpu: usize, state: usize) -> u64 {
		self.rows[cpu][state].time
	}

	/// Cumulative entry count for one (cpu, state) cell.
	pub fn usage(&self, cpu: usize, state: usize) -> u64 {
		self.rows[cpu][state].usage
	}

	/// Total idle time of one CPU, summed over all its states.
	pub fn total(&self, cpu: usize) -> u64 {
		self.total[cpu]
	}

	/// Builds a snapshot from literal counter tables.
	#[cfg(test)]
	pub(crate) fn synthetic(time: Vec<Vec<u64>>, usage: Vec<Vec<u64>>) -> Self {
		let rows: Vec<Vec<StateCounters>> = time
			.into_iter()
			.zip(usage)
			.map(|(t_row, u_row)| {
				t_row
					.into_iter()
					.zip(u_row)
					.map(|(time, usage)| StateCounters { time, usage })
					.collect()
			})
			.collect();
		let total = rows
			.iter()
			.map(|row| row.iter().map(|c| c.time).sum())
			.collect();
		Self { rows, total }
	}
}
