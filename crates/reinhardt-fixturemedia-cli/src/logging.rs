//! Diagnostic output for the command-line tool.
//!
//! Output goes to stderr so it never mixes with a fixture written to stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for a verbosity count.
pub fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		_ => "debug",
	}
}

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v`.
pub fn init(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr).compact())
		.init();
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, "warn")]
	#[case(1, "info")]
	#[case(2, "debug")]
	#[case(5, "debug")]
	fn test_default_directive(#[case] verbosity: u8, #[case] expected: &str) {
		assert_eq!(default_directive(verbosity), expected);
	}
}
