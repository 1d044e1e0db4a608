//! Simulated DataWedge and a fully wired bridge.
//!
//! `SimulatedDataWedge` listens on the command topic of an [`InMemoryBus`],
//! records every command and answers on the result topic with a scripted
//! result code. It can also hold answers back and release them in reverse
//! order, and emit unsolicited scans and notifications.
//!
//! `Bridge` wires bus, facade, pump, sink and simulator together the way a
//! host application would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dw_bus::{InMemoryBus, TopicFilter, Transport};
use dw_dispatch::codec;
use dw_dispatch::domain::vocabulary::{topics, RESULT_SUCCESS};
use dw_dispatch::{
    spawn_pump, ChannelEventSink, CommandKind, ConfigError, CorrelationToken, DispatchConfig,
    DispatchFacade, ManualClock, OutboundCommand, ScannerApi, UnsolicitedEvent,
};
use dw_types::{Bundle, ScanEvent};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How long async helpers wait before giving up.
pub const WAIT_LIMIT: Duration = Duration::from_secs(2);

/// Poll `condition` until it holds or [`WAIT_LIMIT`] passes.
pub async fn eventually<F>(condition: F) -> bool
where
    F: Fn() -> bool,
{
    let poll = async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    };
    tokio::time::timeout(WAIT_LIMIT, poll).await.is_ok()
}

/// Scripted DataWedge stand-in.
pub struct SimulatedDataWedge {
    bus: Arc<InMemoryBus>,
    scan_topic: String,
    codes: Mutex<HashMap<CommandKind, String>>,
    holding: AtomicBool,
    held: Mutex<Vec<Bundle>>,
    received: Mutex<Vec<(CorrelationToken, OutboundCommand)>>,
}

impl SimulatedDataWedge {
    pub fn new(bus: Arc<InMemoryBus>, package_name: &str) -> Arc<Self> {
        Arc::new(Self {
            bus,
            scan_topic: topics::scan_event(package_name),
            codes: Mutex::new(HashMap::new()),
            holding: AtomicBool::new(false),
            held: Mutex::new(Vec::new()),
            received: Mutex::new(Vec::new()),
        })
    }

    /// Start answering commands. The subscription is taken before this
    /// returns, so no command published afterwards is missed.
    pub fn start(self: &Arc<Self>) -> JoinHandle<()> {
        let mut subscription = self.bus.subscribe(TopicFilter::topics([topics::ACTION]));
        let datawedge = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(message) = subscription.recv().await {
                datawedge.handle_command(&message.payload);
            }
        })
    }

    fn handle_command(&self, payload: &Bundle) {
        let (token, command) = match codec::decode_command(payload) {
            Ok(decoded) => decoded,
            Err(err) => {
                warn!(error = %err, "Simulator ignoring malformed command");
                return;
            }
        };
        let kind = command.kind;
        debug!(token = %token, command = kind.name(), "Simulator received command");
        self.received.lock().push((token.clone(), command));

        // DataWedge never answers notification (un)registration.
        if matches!(
            kind,
            CommandKind::RegisterForNotification | CommandKind::UnregisterForNotification
        ) {
            return;
        }

        let code = self
            .codes
            .lock()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| RESULT_SUCCESS.to_string());
        let result = codec::encode_command_result(kind, &token, &code);

        if self.holding.load(Ordering::SeqCst) {
            self.held.lock().push(result);
        } else {
            self.publish(topics::RESULT_ACTION, result);
        }
    }

    fn publish(&self, topic: &str, payload: Bundle) {
        if let Err(err) = self.bus.publish(topic, payload) {
            warn!(topic, error = %err, "Simulator publish failed");
        }
    }

    /// Answer every `kind` command with `code` from now on.
    pub fn respond_with(&self, kind: CommandKind, code: &str) {
        self.codes.lock().insert(kind, code.to_string());
    }

    /// Queue answers instead of sending them.
    pub fn hold_responses(&self) {
        self.holding.store(true, Ordering::SeqCst);
    }

    /// Send every queued answer, newest first, and stop holding.
    pub fn release_reversed(&self) -> usize {
        self.holding.store(false, Ordering::SeqCst);
        let held = std::mem::take(&mut *self.held.lock());
        let count = held.len();
        for result in held.into_iter().rev() {
            self.publish(topics::RESULT_ACTION, result);
        }
        count
    }

    /// Publish an arbitrary result message.
    pub fn send_result(&self, result: Bundle) {
        self.publish(topics::RESULT_ACTION, result);
    }

    pub fn emit_scan(&self, event: &ScanEvent) {
        self.publish(&self.scan_topic, codec::encode_scan_event(event));
    }

    /// Publish a raw scan bundle (for malformed payloads).
    pub fn emit_scan_bundle(&self, payload: Bundle) {
        self.publish(&self.scan_topic, payload);
    }

    pub fn emit_status(&self, status: &str) {
        self.publish(
            topics::NOTIFICATION_ACTION,
            codec::encode_status_notification(status),
        );
    }

    pub fn emit_notification(&self, notification_type: &str, fields: Bundle) {
        self.publish(
            topics::NOTIFICATION_ACTION,
            codec::encode_notification(notification_type, fields),
        );
    }

    /// Every command seen so far, in arrival order.
    pub fn received(&self) -> Vec<(CorrelationToken, OutboundCommand)> {
        self.received.lock().clone()
    }

    pub fn received_count(&self) -> usize {
        self.received.lock().len()
    }
}

/// Bus, facade, pump, sink and simulator wired together.
pub struct Bridge {
    pub bus: Arc<InMemoryBus>,
    pub facade: Arc<DispatchFacade>,
    pub api: ScannerApi,
    pub datawedge: Arc<SimulatedDataWedge>,
    pub clock: Arc<ManualClock>,
    pub events: mpsc::Receiver<UnsolicitedEvent>,
    pump: JoinHandle<u64>,
    responder: JoinHandle<()>,
}

impl Bridge {
    pub const PACKAGE: &'static str = "com.example.inventory";

    /// Wire a bridge with default configuration. Must run inside a tokio
    /// runtime.
    pub fn start() -> Result<Self, ConfigError> {
        Self::with_config(DispatchConfig::for_package(Self::PACKAGE))
    }

    pub fn with_config(config: DispatchConfig) -> Result<Self, ConfigError> {
        let bus = Arc::new(InMemoryBus::new());
        let clock = Arc::new(ManualClock::new());
        let (sink, events) = ChannelEventSink::new(64);

        let facade = Arc::new(
            DispatchFacade::new(config.clone(), bus.clone(), Arc::new(sink))?
                .with_clock(clock.clone()),
        );

        let subscription = bus.subscribe(TopicFilter::topics(facade.inbound_topics()));
        let pump = spawn_pump(facade.clone(), subscription);

        let datawedge = SimulatedDataWedge::new(bus.clone(), &config.package_name);
        let responder = datawedge.start();

        Ok(Self {
            api: ScannerApi::new(facade.clone()),
            bus,
            facade,
            datawedge,
            clock,
            events,
            pump,
            responder,
        })
    }

    /// Next unsolicited event, or `None` after [`WAIT_LIMIT`].
    pub async fn next_event(&mut self) -> Option<UnsolicitedEvent> {
        tokio::time::timeout(WAIT_LIMIT, self.events.recv())
            .await
            .ok()
            .flatten()
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        self.pump.abort();
        self.responder.abort();
    }
}
