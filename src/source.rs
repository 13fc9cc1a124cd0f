use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::constants::SYSFS_CPU_BASE;
use crate::error::IdleBenchError;
use crate::topology::IdleTopology;

/// The two cumulative counters the kernel keeps per idle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
	/// Cumulative microseconds spent in the state since boot
	Time,
	/// Cumulative number of entries into the state since boot
	Usage,
}

impl CounterKind {
	fn file_name(self) -> &'static str {
		match self {
			CounterKind::Time => "time",
			CounterKind::Usage => "usage",
		}
	}
}

/// Reads the current cumulative counters for one (cpu, state) pair.
///
/// The seam between the sampling engine and the kernel: snapshots are
/// built against this trait, so tests can substitute synthetic
/// counters for the sysfs files.
pub trait CounterSource {
	fn read(&mut self, cpu: usize, state: usize, kind: CounterKind) -> Result<u64, IdleBenchError>;
}

/// Builds the sysfs path for one counter file.
pub fn counter_path(base: &Path, cpu: usize, state: usize, kind: CounterKind) -> PathBuf {
	base.join(format!("cpu{cpu}/cpuidle/state{state}/{}", kind.file_name()))
}

/// One open counter file, kept for the process lifetime and rewound
/// before every read.
#[derive(Debug)]
struct CounterFile {
	path: PathBuf,
	file: File,
}

impl CounterFile {
	fn open(path: PathBuf) -> Result<Self, IdleBenchError> {
		match File::open(&path) {
			Ok(file) => Ok(Self { path, file }),
			Err(source) => Err(IdleBenchError::Open { path, source }),
		}
	}

	fn read_value(&mut self) -> Result<u64, IdleBenchError> {
		let mut buf = String::new();
		self.file
			.seek(SeekFrom::Start(0))
			.and_then(|_| self.file.read_to_string(&mut buf))
			.map_err(|source| IdleBenchError::Read {
				path: self.path.clone(),
				source,
			})?;
		if buf.is_empty() {
			return Err(IdleBenchError::NoData {
				path: self.path.clone(),
			});
		}
		Ok(parse_counter(&buf))
	}
}

/// Sysfs-backed counter source using the fd-caching strategy: every
/// `time` and `usage` file for the full topology is opened up front,
/// then rewound and re-read on each sample. File handles are released
/// by `Drop` on every exit path.
#[derive(Debug)]
pub struct SysfsCounterSource {
	// Indexed [cpu][state]
	time: Vec<Vec<CounterFile>>,
	usage: Vec<Vec<CounterFile>>,
}

impl SysfsCounterSource {
	/// Opens every counter file under the live sysfs tree.
	pub fn open(topology: IdleTopology) -> Result<Self, IdleBenchError> {
		Self::open_at(Path::new(SYSFS_CPU_BASE), topology)
	}

	/// Opens every counter file under an arbitrary base directory.
	///
	/// Fails with the offending path on the first file that cannot be
	/// opened; a missing state0 surfaces here rather than during
	/// discovery.
	pub fn open_at(base: &Path, topology: IdleTopology) -> Result<Self, IdleBenchError> {
		let mut time = Vec::with_capacity(topology.cpu_count);
		let mut usage = Vec::with_capacity(topology.cpu_count);

		for cpu in 0..topology.cpu_count {
			let mut time_row = Vec::with_capacity(topology.state_count);
			let mut usage_row = Vec::with_capacity(topology.state_count);
			for state in 0..topology.state_count {
				time_row.push(CounterFile::open(counter_path(base, cpu, state, CounterKind::Time))?);
				usage_row.push(CounterFile::open(counter_path(base, cpu, state, CounterKind::Usage))?);
			}
			time.push(time_row);
			usage.push(usage_row);
		}

		Ok(Self { time, usage })
	}
}

impl CounterSource for SysfsCounterSource {
	fn read(&mut self, cpu: usize, state: usize, kind: CounterKind) -> Result<u64, IdleBenchError> {
		let table = match kind {
			CounterKind::Time => &mut self.time,
			CounterKind::Usage => &mut self.usage,
		};
		table[cpu][state].read_value()
	}
}

/// Parses a counter value the way `strtoull` would: skip leading ASCII
/// whitespace, consume the longest run of decimal digits, ignore
/// whatever follows. No digits parses as 0 — malformed sysfs content
/// is tolerated rather than rejected, matching the kernel-tool
/// convention of trusting these files.
pub(crate) fn parse_counter(content: &str) -> u64 {
	let digits: String = content
		.trim_start()
		.chars()
		.take_while(|c| c.is_ascii_digit())
		.collect();
	// Only overflow can fail on an all-digit string; saturate like strtoull.
	digits.parse().unwrap_or(if digits.is_empty() { 0 } else { u64::MAX })
}
