//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and alert-gated log output.
//!
//! [`AlertLayer`] is a tracing-subscriber layer that maps each event's level
//! to a numeric alert level, gates it through an [`Alert`], and writes the
//! accepted events to the process-wide log output. Libraries can keep using
//! the standard tracing macros while the application controls their volume
//! with the same thresholds as its own emissions.
//!
//! | tracing level | alert level |
//! |---------------|-------------|
//! | `ERROR`       | 1           |
//! | `WARN`        | 2           |
//! | `INFO`        | 3           |
//! | `DEBUG`       | 4           |
//! | `TRACE`       | 5           |
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{init_tracing, Alert};
//!
//! static TRACING: Alert = Alert::new(3);
//!
//! init_tracing(&TRACING);
//! tracing::info!(target: "proxy", "upstream ready");
//! tracing::debug!("dropped: level 4 exceeds 3");
//! ```

use std::fmt::{self, Write as _};

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::alert::Alert;
use crate::sink;

/// A tracing layer that forwards events admitted by an [`Alert`] to the log output.
#[derive(Clone, Copy, Debug)]
pub struct AlertLayer {
    alert: &'static Alert,
}

impl AlertLayer {
    /// Creates a layer gated by `alert`.
    #[must_use]
    pub const fn new(alert: &'static Alert) -> Self {
        Self { alert }
    }

    /// Maps a tracing level to an alert level.
    #[must_use]
    pub const fn alert_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR => 1,
            Level::WARN => 2,
            Level::INFO => 3,
            Level::DEBUG => 4,
            Level::TRACE => 5,
        }
    }

    /// Renders an event as `LEVEL target: message key=value ...`.
    fn render(event: &tracing::Event<'_>) -> String {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let mut line = format!("{} {}: ", metadata.level(), metadata.target());
        line.push_str(visitor.message.as_deref().unwrap_or_default());
        line.push_str(&visitor.fields);
        line
    }
}

impl<S> Layer<S> for AlertLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = Self::alert_level(event.metadata().level());
        if self.alert.enabled(level) {
            sink::write_record(&Self::render(event));
        }
    }
}

/// Collects the message and any extra fields of an event.
#[derive(Default)]
struct EventVisitor {
    message: Option<String>,
    fields: String,
}

impl tracing::field::Visit for EventVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Installs an [`AlertLayer`] gated by `alert` as the global subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing(alert: &'static Alert) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(AlertLayer::new(alert))
        .init();
}

/// Installs an [`AlertLayer`] behind an additional filter layer.
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// logging::init_tracing_with_filter(&TRACING, EnvFilter::from_default_env());
/// ```
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_tracing_with_filter<F>(alert: &'static Alert, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(AlertLayer::new(alert))
        .init();
}
