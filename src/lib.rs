pub mod constants;
pub mod display;
pub mod error;
pub mod report;
pub mod sampler;
pub mod snapshot;
pub mod source;
pub mod topology;

use crate::error::IdleBenchError;
use crate::report::IdleReport;
use crate::sampler::IdleSampler;
use crate::source::SysfsCounterSource;
use crate::topology::IdleTopology;

/// Samples the cpuidle counters of the running system for one window.
///
/// This is the main entry point: it discovers the topology, opens
/// every counter file, takes two snapshots `duration_secs` apart and
/// returns the computed per-CPU and system-wide idle figures.
pub fn sample_idle(duration_secs: u64) -> Result<IdleReport, IdleBenchError> {
	let topology = IdleTopology::discover();
	let source = SysfsCounterSource::open(topology)?;
	IdleSampler::new(topology, source).run(duration_secs)
}
