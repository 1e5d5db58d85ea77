use chrono::Utc;

use crate::cookie::codec::ConsentDecision;

/// Records consent decisions for auditing.
///
/// Logging is best effort: implementations must swallow their own failures
/// rather than let them reach response handling.
pub trait ConsentLogger: Send + Sync {
    fn log(&self, decision: &ConsentDecision);
}

/// Logger that records decisions through the `tracing` subscriber.
#[derive(Clone, Copy, Default, Debug)]
pub struct TracingConsentLogger;

impl ConsentLogger for TracingConsentLogger {
    fn log(&self, decision: &ConsentDecision) {
        let categories = decision
            .choices
            .iter()
            .map(|(category, accepted)| format!("{category}={accepted}"))
            .collect::<Vec<_>>()
            .join(" ");

        tracing::info!(
            key = %decision.key,
            %categories,
            at = %Utc::now().to_rfc3339(),
            "cookie consent decision saved",
        );
    }
}
