use std::io::{self, Write};

use crate::report::IdleReport;

/// Writes the report in the classic cpuidle-bench layout: one block
/// per CPU with its windowed idle ratio and per-state figures, then a
/// trailing system-wide block.
pub fn render_report(report: &IdleReport, out: &mut impl Write) -> io::Result<()> {
	for (cpu, idle) in report.cpus.iter().enumerate() {
		writeln!(out, "\tCPU {cpu}")?;
		writeln!(out, "idle ratio: {:.4}", idle.idle_ratio)?;
		for (state, figures) in idle.states.iter().enumerate() {
			writeln!(out, "- state {state}")?;
			writeln!(out, "  avg: {}", figures.avg_residency_us)?;
			writeln!(out, "  total: {}", figures.total_time_us)?;
		}
		writeln!(out, "--------------------------")?;
	}

	writeln!(out, "\tTotal")?;
	writeln!(out, "idle ratio: {:.4}", report.aggregate_idle_ratio)?;

	Ok(())
}

/// Renders the report to stdout.
pub fn print_report(report: &IdleReport) -> io::Result<()> {
	let stdout = io::stdout();
	let mut handle = stdout.lock();
	render_report(report, &mut handle)?;
	handle.flush()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::report::{CpuIdle, StateIdle};

	#[test]
	fn renders_per_cpu_blocks_and_total() {
		let report = IdleReport {
			cpus: vec![
				CpuIdle {
					idle_ratio: 0.5,
					states: vec![
						StateIdle {
							avg_residency_us: 250_000,
							total_time_us: 500_000,
						},
						StateIdle {
							avg_residency_us: 0,
							total_time_us: 0,
						},
					],
				},
				CpuIdle {
					idle_ratio: 0.3,
					states: vec![
						StateIdle {
							avg_residency_us: 100_000,
							total_time_us: 300_000,
						},
						StateIdle {
							avg_residency_us: 0,
							total_time_us: 0,
						},
					],
				},
			],
			aggregate_idle_ratio: 0.4,
		};

		let mut out = Vec::new();
		render_report(&report, &mut out).unwrap();
		let text = String::from_utf8(out).unwrap();

		let expected = "\tCPU 0\n\
			idle ratio: 0.5000\n\
			- state 0\n\
			\x20 avg: 250000\n\
			\x20 total: 500000\n\
			- state 1\n\
			\x20 avg: 0\n\
			\x20 total: 0\n\
			--------------------------\n\
			\tCPU 1\n\
			idle ratio: 0.3000\n\
			- state 0\n\
			\x20 avg: 100000\n\
			\x20 total: 300000\n\
			- state 1\n\
			\x20 avg: 0\n\
			\x20 total: 0\n\
			--------------------------\n\
			\tTotal\n\
			idle ratio: 0.4000\n";
		assert_eq!(text, expected);
	}
}
