//! Process setup shared by the server and the inspection binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose events are shown by default.
const LOG_TARGETS: [&str; 4] = [
    "wayfarer_engine",
    "wayfarer_domain",
    "wayfarer_inspect",
    "tower_http",
];

/// Filter directives enabling every Wayfarer target at `level`.
///
/// `tower_http` is only included when `with_http` is set.
pub fn log_directives(level: &str, with_http: bool) -> String {
    LOG_TARGETS
        .iter()
        .filter(|target| with_http || **target != "tower_http")
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. `RUST_LOG` overrides `default_directives`.
pub fn init_logging(default_directives: &str, to_stderr: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));
    let registry = tracing_subscriber::registry().with(filter);

    if to_stderr {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Load `.env.local` then `.env` from the repository root, if present.
///
/// Binaries may run from `crates/engine`, so the root is found from the
/// manifest directory rather than the working directory.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use wayfarer_domain::parse_params;

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedOutput {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture_with(directives: &str, f: impl FnOnce()) -> String {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(move || writer.clone()),
            );
        tracing::subscriber::with_default(subscriber, f);
        output.text()
    }

    #[test]
    fn directives_cover_every_wayfarer_target() {
        assert_eq!(
            log_directives("warn", false),
            "wayfarer_engine=warn,wayfarer_domain=warn,wayfarer_inspect=warn"
        );
        assert!(log_directives("debug", true).ends_with(",tower_http=debug"));
    }

    #[test]
    fn default_filter_shows_malformed_parameter_warning() {
        let logs = capture_with(&log_directives("warn", false), || {
            assert!(parse_params(Some("{bad json")).is_empty());
        });

        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("Failed to parse parameter JSON"), "logs: {logs}");
    }

    #[test]
    fn raised_level_shows_engine_debug_events() {
        let logs = capture_with(&log_directives("debug", false), || {
            tracing::debug!(target: "wayfarer_inspect", "Connected to world store");
        });
        assert!(logs.contains("Connected to world store"), "logs: {logs}");

        let quiet = capture_with(&log_directives("warn", false), || {
            tracing::debug!(target: "wayfarer_inspect", "Connected to world store");
        });
        assert!(quiet.is_empty(), "logs: {quiet}");
    }
}
