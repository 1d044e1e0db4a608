//! Dispatch Facade
//!
//! Orchestrates the domain components behind the two entry points of the
//! engine:
//!
//! ```text
//! send_command ─▶ token ─▶ registry.register ─▶ encode ─▶ transport.publish
//!
//! on_inbound_message ─▶ classify ─▶ [time gate + value gate on notifications]
//!                                 ├─▶ registry.resolve      (command results)
//!                                 └─▶ event sink            (unsolicited events)
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dw_types::{Bundle, StatusChangeEvent};
use tracing::{debug, info, trace, warn};

use crate::codec;
use crate::domain::vocabulary::topics;
use crate::domain::{
    Admission, ClassifiedEvent, CommandOutcome, CorrelationToken, DispatchConfig, EventClassifier,
    OutboundCommand, PendingCallRegistry, PendingCommand, RandomTokenSource, StatusDebouncer,
    TokenSource, UnrecognizedReason,
};
use crate::error::{CommandError, ConfigError, RegistryError};
use crate::metrics::{DispatchStats, DispatchStatsSnapshot};
use crate::ports::{Clock, EventSink, InboundHandler, SystemClock, Transport};

/// Command-correlation and event-dispatch engine.
///
/// `send_command` may be called from any number of tasks at once; the
/// inbound path is expected to be driven serially by one bus subscription.
pub struct DispatchFacade {
    config: DispatchConfig,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn TokenSource>,
    registry: PendingCallRegistry,
    classifier: EventClassifier,
    debouncer: StatusDebouncer,
    stats: DispatchStats,
    closed: AtomicBool,
}

impl DispatchFacade {
    /// Create a dispatcher with the system clock and random tokens.
    pub fn new(
        config: DispatchConfig,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        debug!(
            package = %config.package_name,
            debounce_ms = config.status_debounce.as_millis() as u64,
            "Creating dispatch facade"
        );

        Ok(Self {
            tokens: Arc::new(RandomTokenSource::new(config.token_length)),
            classifier: EventClassifier::new(&config.package_name),
            debouncer: StatusDebouncer::new(config.status_debounce),
            config,
            transport,
            sink,
            clock: Arc::new(SystemClock),
            registry: PendingCallRegistry::new(),
            stats: DispatchStats::new(),
            closed: AtomicBool::new(false),
        })
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the token generator.
    #[must_use]
    pub fn with_token_source(mut self, tokens: Arc<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Send `command` and return the handle its result will arrive on.
    ///
    /// Returns immediately. Failures before the command reaches the bus
    /// (unsupported payload, transport refusal, closed dispatcher) are
    /// delivered through the returned handle.
    pub fn send_command(&self, command: OutboundCommand) -> PendingCommand {
        if self.is_closed() {
            debug!(command = command.kind.name(), "Send after shutdown");
            return PendingCommand::failed(None, CommandError::Closed);
        }

        let name = command.kind.name();
        let (token, handle) = match self.register(name) {
            Ok(registered) => registered,
            Err(err) => {
                DispatchStats::incr(&self.stats.send_failures);
                warn!(command = name, error = %err, "Could not register command");
                return PendingCommand::failed(None, err);
            }
        };

        let published = codec::encode_command(&token, &command).and_then(|bundle| {
            trace!(token = %token, payload = %codec::describe(&bundle), "Publishing command");
            self.transport
                .publish(topics::ACTION, bundle)
                .map_err(CommandError::from)
        });

        match published {
            Ok(()) => {
                DispatchStats::incr(&self.stats.sent);
                debug!(token = %token, command = name, "Command sent");
            }
            Err(err) => {
                DispatchStats::incr(&self.stats.send_failures);
                warn!(token = %token, command = name, error = %err, "Command send failed");
                self.registry.fail(&token, err);
            }
        }

        // Lost a race with shutdown(): the entry outlived the clear.
        if self.is_closed() {
            self.registry.fail(&token, CommandError::Closed);
        }

        handle
    }

    fn register(
        &self,
        command: &'static str,
    ) -> Result<(CorrelationToken, PendingCommand), CommandError> {
        let attempts = self.config.max_token_attempts;
        for attempt in 1..=attempts {
            let token = self.tokens.next_token();
            match self.registry.register(token.clone(), command, self.clock.now()) {
                Ok(handle) => return Ok((token, handle)),
                Err(RegistryError::DuplicateToken(existing)) => {
                    debug!(token = %existing, attempt, "Token collision, drawing again");
                }
            }
        }
        Err(CommandError::TokenExhausted { attempts })
    }

    /// Handle one message from the bus. Never fails.
    pub fn on_inbound_message(&self, topic: &str, payload: &Bundle) {
        trace!(topic, payload = %codec::describe(payload), "Inbound message");

        let notification = EventClassifier::is_notification_topic(topic);
        if notification && self.is_closed() {
            debug!(topic, "Dropping notification after shutdown");
            return;
        }

        let now = self.clock.now();
        let event = self.classifier.classify(topic, payload);

        if notification {
            let status = match &event {
                ClassifiedEvent::StatusNotification { status } => Some(status.as_str()),
                _ => None,
            };
            match self.debouncer.admit(now, status) {
                Admission::Accepted => {}
                Admission::Debounced => {
                    DispatchStats::incr(&self.stats.debounced);
                    debug!(topic, "Notification debounced");
                    return;
                }
                Admission::Duplicate => {
                    DispatchStats::incr(&self.stats.deduplicated);
                    debug!(status = status.unwrap_or_default(), "Duplicate scanner status");
                    return;
                }
            }
        }

        self.route(event);
    }

    fn route(&self, event: ClassifiedEvent) {
        match event {
            ClassifiedEvent::CommandResult(outcome) => self.resolve(outcome),
            ClassifiedEvent::Unrecognized(reason) => {
                DispatchStats::incr(&self.stats.dropped);
                match reason {
                    UnrecognizedReason::UnknownTopic(topic) => {
                        debug!(topic = %topic, "Ignoring message on unknown topic");
                    }
                    reason => warn!(reason = %reason, "Dropping inbound message"),
                }
            }
            unsolicited if self.is_closed() => {
                debug!(event = ?unsolicited, "Dropping event after shutdown");
            }
            ClassifiedEvent::Scan(scan) => {
                DispatchStats::incr(&self.stats.scan_events);
                debug!(source = scan.source.as_str(), "Scan event");
                self.sink.deliver_scan_event(scan);
            }
            ClassifiedEvent::StatusNotification { status } => {
                match codec::decode_scanner_state(&status) {
                    Ok(new_state) => {
                        DispatchStats::incr(&self.stats.status_changes);
                        debug!(status = %new_state, "Scanner status changed");
                        self.sink
                            .deliver_status_change(StatusChangeEvent { new_state });
                    }
                    Err(err) => {
                        DispatchStats::incr(&self.stats.dropped);
                        warn!(status = %status, error = %err, "Dropping scanner status");
                    }
                }
            }
            ClassifiedEvent::ProfileChange { profile_name } => {
                DispatchStats::incr(&self.stats.profile_changes);
                debug!(profile = ?profile_name, "Profile switched");
                self.sink.notify_profile_changed(profile_name);
            }
            ClassifiedEvent::ConfigUpdate => {
                DispatchStats::incr(&self.stats.config_updates);
                debug!("Configuration updated");
                self.sink.notify_config_updated();
            }
        }
    }

    fn resolve(&self, outcome: CommandOutcome) {
        let token = outcome.token.clone();
        let command = outcome.command_name.clone();
        let result = outcome.raw_result_code.clone();

        if !self.registry.resolve(&token, outcome) {
            warn!(
                token = %token,
                command = %command,
                result = %result,
                "Unknown command result"
            );
        }
    }

    /// Discard every pending call without an outcome and forget debounce
    /// history. Later sends fail with [`CommandError::Closed`]. Idempotent.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        let discarded = self.registry.clear();
        self.debouncer.reset();
        info!(discarded, "Dispatcher shut down");
    }

    /// Reclaim calls older than the configured TTL and calls whose handle
    /// was dropped. Returns the number removed.
    pub fn sweep_expired(&self) -> usize {
        let ttl = self.config.pending_ttl.unwrap_or(Duration::MAX);
        let removed = self.registry.remove_expired(self.clock.now(), ttl);
        if removed > 0 {
            debug!(removed, remaining = self.registry.pending_count(), "Swept pending calls");
        }
        removed
    }

    #[must_use]
    pub fn stats(&self) -> DispatchStatsSnapshot {
        self.stats
            .snapshot(self.registry.stats().snapshot(), self.registry.pending_count())
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.registry.pending_count()
    }

    #[must_use]
    pub fn is_pending(&self, token: &CorrelationToken) -> bool {
        self.registry.is_pending(token)
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Topics the inbound path needs a subscription for.
    #[must_use]
    pub fn inbound_topics(&self) -> Vec<String> {
        self.classifier.topics().iter().map(|t| t.to_string()).collect()
    }
}

impl InboundHandler for DispatchFacade {
    fn on_inbound_message(&self, topic: &str, payload: &Bundle) {
        DispatchFacade::on_inbound_message(self, topic, payload);
    }
}
