// Sysfs location of the per-CPU cpuidle counters
pub const SYSFS_CPU_BASE: &str = "/sys/devices/system/cpu";

// Probe caps for topology discovery
pub const CPU_PROBE_LIMIT: usize = 128;
pub const STATE_PROBE_LIMIT: usize = 32;

// Sampling settings
pub const DEFAULT_SAMPLE_SECS: u64 = 1;
pub const US_PER_SEC: u64 = 1_000_000;
