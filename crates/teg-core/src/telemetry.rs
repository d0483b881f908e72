//! Telemetry sink and the fire-and-forget emit helper.

use teg_types::TelemetryEvent;
use tracing::{debug, warn};

use crate::error::GatewayError;

/// Destination for telemetry events.
pub trait TelemetrySink {
    /// Store one event.
    fn record(&self, event: TelemetryEvent) -> Result<(), GatewayError>;
}

/// Record an event, logging and dropping any failure. Telemetry never
/// interrupts a turn.
pub fn emit(sink: &dyn TelemetrySink, event: TelemetryEvent) {
    let event_type = event.event_type();
    let player = event.player();
    match sink.record(event) {
        Ok(()) => debug!(?event_type, %player, "telemetry recorded"),
        Err(e) => warn!(?event_type, %player, error = %e, "failed to record telemetry"),
    }
}
