use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefix shared by the workspace crates (`sherpa_client`,
/// `sherpa_view`) and the `sherpa` binary.
pub const TARGET_PREFIX: &str = "sherpa";

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Whether `target` belongs to one of the workspace crates.
pub fn is_workspace_target(target: &str) -> bool {
    target.starts_with(TARGET_PREFIX)
}

/// Build a **workspace-scoped** formatting layer writing to stderr.
///
/// - RFC3339 UTC timestamps
/// - Compact single-line format with target
/// - Span close events (duration of instrumented requests)
/// - ANSI colors only when stderr is a terminal
///
/// stdout is left to the rendered answer, so logs never interleave with it.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let use_ansi = io::stderr().is_terminal();

    let only_workspace = filter::filter_fn(|meta| is_workspace_target(meta.target()));

    fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(use_ansi)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(
            fmt::format()
                .compact()
                .with_timer(ChronoRfc3339Utc)
                .with_level(true)
                .with_target(true),
        )
        .with_filter(only_workspace)
}

/// Level directive for the workspace crates only, e.g. `sherpa=debug`.
///
/// `EnvFilter` matches targets by prefix, so this covers every crate.
pub fn level_directive(level: Level) -> Option<Directive> {
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).ok()
}

/// Create an EnvFilter from `RUST_LOG` or the fallback `default`, then raise
/// the workspace crates to `level` when given.
///
/// Example: `default = "warn"`, `level = Some(Level::DEBUG)` shows warnings
/// globally and debug events for the workspace.
pub fn env_filter_with_level(default: &str, level: Option<Level>) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    match level.and_then(level_directive) {
        Some(d) => base.add_directive(d),
        None => base,
    }
}
