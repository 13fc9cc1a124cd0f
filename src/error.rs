use std::path::PathBuf;

/// Errors raised while probing or reading the cpuidle counter files.
#[derive(Debug, thiserror::Error)]
pub enum IdleBenchError {
	/// A counter file could not be opened.
	#[error("{}: {}", path.display(), source)]
	Open {
		path: PathBuf,
		source: std::io::Error,
	},

	/// A counter file could not be read.
	#[error("{}: {}", path.display(), source)]
	Read {
		path: PathBuf,
		source: std::io::Error,
	},

	/// A counter file was readable but contained no bytes.
	#[error("{}: no data", path.display())]
	NoData { path: PathBuf },
}

impl IdleBenchError {
	/// Exit status for the process when this error aborts a run.
	///
	/// Mirrors the errno-propagating behavior of classic sysfs tools:
	/// the OS error code when one exists, otherwise 1.
	pub fn exit_code(&self) -> i32 {
		match self {
			Self::Open { source, .. } | Self::Read { source, .. } => source.raw_os_error().unwrap_or(1),
			Self::NoData { .. } => 1,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io;
	use std::path::Path;

	#[test]
	fn error_message_names_the_path() {
		let err = IdleBenchError::Open {
			path: Path::new("/sys/devices/system/cpu/cpu0/cpuidle/state0/time").to_path_buf(),
			source: io::Error::from_raw_os_error(2),
		};
		let msg = err.to_string();
		assert!(msg.starts_with("/sys/devices/system/cpu/cpu0/cpuidle/state0/time: "));
	}

	#[test]
	fn exit_code_propagates_errno() {
		let err = IdleBenchError::Read {
			path: Path::new("/nonexistent").to_path_buf(),
			source: io::Error::from_raw_os_error(13),
		};
		assert_eq!(err.exit_code(), 13);
	}

	#[test]
	fn exit_code_falls_back_to_one() {
		let err = IdleBenchError::NoData {
			path: Path::new("/nonexistent").to_path_buf(),
		};
		assert_eq!(err.exit_code(), 1);
	}
}
