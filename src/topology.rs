use std::path::Path;

use crate::constants::{CPU_PROBE_LIMIT, STATE_PROBE_LIMIT, SYSFS_CPU_BASE};

/// The discovered shape of the system: how many CPUs and how many
/// cpuidle states exist.
///
/// Discovery runs once per process; the value is immutable and passed
/// by value into every component that needs it. If CPUs or states
/// appear or disappear between the two snapshots of a run the result
/// is undefined — detecting that is out of scope for a short-lived
/// sampling tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTopology {
	/// Number of CPUs present (cpu0 .. cpu{n-1})
	pub cpu_count: usize,
	/// Number of idle states per CPU (state0 .. state{m-1})
	pub state_count: usize,
}

impl IdleTopology {
	/// Discovers the topology from the live sysfs tree.
	pub fn discover() -> Self {
		Self::discover_at(Path::new(SYSFS_CPU_BASE))
	}

	/// Discovers the topology under an arbitrary base directory.
	///
	/// Probes `cpu1`, `cpu2`, … and `cpu0/cpuidle/state1`, `state2`, …
	/// until the first missing entry. cpu0 and state0 are assumed to
	/// exist; if state0 is actually absent the run fails later with a
	/// verbose read error rather than here, keeping discovery cheap.
	pub fn discover_at(base: &Path) -> Self {
		Self {
			cpu_count: probe_sequential(base, CPU_PROBE_LIMIT, |i| format!("cpu{i}")),
			state_count: probe_sequential(base, STATE_PROBE_LIMIT, |j| format!("cpu0/cpuidle/state{j}")),
		}
	}
}

/// Probes sequentially named entries under `base` starting at index 1
/// (index 0 is assumed present) and returns the first missing index,
/// i.e. the count of present entries. A missing entry simply ends the
/// probe; it is not an error.
fn probe_sequential(base: &Path, limit: usize, name: impl Fn(usize) -> String) -> usize {
	let mut i = 1;
	while i < limit {
		if !base.join(name(i)).exists() {
			break;
		}
		i += 1;
	}
	i
}
