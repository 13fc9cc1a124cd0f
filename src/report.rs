/// Per-state figures reported for one CPU.
///
/// Both values come from the second snapshot and are cumulative since
/// boot: the per-state breakdown is deliberately not windowed, only
/// the idle ratios are. The original tool behaves this way and the
/// asymmetry is preserved as observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateIdle {
	/// Average residency per entry, in microseconds (0 when the state
	/// was never entered)
	pub avg_residency_us: u64,
	/// Cumulative time spent in the state since boot, in microseconds
	pub total_time_us: u64,
}

/// Computed result for one CPU.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuIdle {
	/// Fraction of the sampling window this CPU spent in any idle state
	pub idle_ratio: f64,
	/// One entry per idle state, indexed by state number
	pub states: Vec<StateIdle>,
}

/// The full computed result of one sampling run, handed to the
/// renderer. Pure data; nothing here performs I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct IdleReport {
	/// One entry per CPU, indexed by CPU number
	pub cpus: Vec<CpuIdle>,
	/// System-wide fraction of the window spent idle, across all CPUs
	pub aggregate_idle_ratio: f64,
}
