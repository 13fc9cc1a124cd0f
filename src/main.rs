use std::env;
use std::process;

use cpuidle_bench::constants::DEFAULT_SAMPLE_SECS;
use cpuidle_bench::display::print_report;
use cpuidle_bench::sample_idle;

/// Outcome of parsing the optional duration argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationArg {
	/// A usable duration in whole seconds
	Seconds(u64),
	/// An integer, but outside [1, i32::MAX]; the caller warns and
	/// falls back to the default
	OutOfRange,
	/// Not an integer at all; a usage error
	NotAnInteger,
}

/// Parses the sample duration. Accepts an optionally signed run of
/// decimal digits and nothing else; trailing garbage makes the whole
/// argument non-integer rather than being ignored.
fn parse_duration(arg: &str) -> DurationArg {
	let digits = arg.strip_prefix(['+', '-']).unwrap_or(arg);
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return DurationArg::NotAnInteger;
	}
	// i128 so that values far beyond i32::MAX still classify as
	// out-of-range instead of failing to parse.
	match arg.parse::<i128>() {
		Ok(v) if (1..=i128::from(i32::MAX)).contains(&v) => DurationArg::Seconds(v as u64),
		_ => DurationArg::OutOfRange,
	}
}

fn main() {
	let args: Vec<String> = env::args().collect();

	if args.len() > 2 {
		eprintln!("Usage: {} [sample duration in seconds]", args[0]);
		process::exit(1);
	}

	let duration_secs = match args.get(1) {
		None => DEFAULT_SAMPLE_SECS,
		Some(arg) => match parse_duration(arg) {
			DurationArg::Seconds(secs) => secs,
			DurationArg::OutOfRange => {
				eprintln!("Value {arg} is out of range, using default");
				DEFAULT_SAMPLE_SECS
			},
			DurationArg::NotAnInteger => {
				eprintln!("Sample duration should be an integer");
				process::exit(1);
			},
		},
	};

	let report = match sample_idle(duration_secs) {
		Ok(report) => report,
		Err(err) => {
			eprintln!("{err}");
			process::exit(err.exit_code());
		},
	};

	if print_report(&report).is_err() {
		process::exit(1);
	}
}
