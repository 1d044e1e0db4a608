//! Inbound message classification.
//!
//! Every message the bus delivers is routed by exact topic match to exactly
//! one [`ClassifiedEvent`]. Classification is total: malformed input becomes
//! [`ClassifiedEvent::Unrecognized`] and never an error or a panic.

use super::command::CommandOutcome;
use super::vocabulary::{extras, notification_types, topics};
use crate::codec;
use dw_types::{Bundle, DecodeError, ScanEvent};
use std::fmt;

/// What an inbound message turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedEvent {
    /// Answer to a command, matched by token.
    CommandResult(CommandOutcome),
    /// Decoded scan.
    Scan(ScanEvent),
    /// `SCANNER_STATUS` notification with the raw status string.
    StatusNotification { status: String },
    /// `PROFILE_SWITCH` notification.
    ProfileChange { profile_name: Option<String> },
    /// `CONFIGURATION_UPDATE` notification.
    ConfigUpdate,
    /// Dropped.
    Unrecognized(UnrecognizedReason),
}

impl ClassifiedEvent {
    /// Whether the message arrived on the notification topic and carried a
    /// known notification type.
    #[must_use]
    pub fn is_notification(&self) -> bool {
        matches!(
            self,
            Self::StatusNotification { .. } | Self::ProfileChange { .. } | Self::ConfigUpdate
        )
    }
}

/// Why a message was not classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnrecognizedReason {
    UnknownTopic(String),
    /// Notification topic without the nested notification bundle.
    MissingNotification,
    UnknownNotificationType(Option<String>),
    Malformed(DecodeError),
}

impl fmt::Display for UnrecognizedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTopic(topic) => write!(f, "unknown topic {topic}"),
            Self::MissingNotification => f.write_str("notification bundle missing"),
            Self::UnknownNotificationType(Some(kind)) => {
                write!(f, "unknown notification type {kind}")
            }
            Self::UnknownNotificationType(None) => f.write_str("notification type missing"),
            Self::Malformed(err) => write!(f, "malformed payload: {err}"),
        }
    }
}

/// Topic router for one host package.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    scan_topic: String,
}

impl EventClassifier {
    pub fn new(package_name: &str) -> Self {
        Self {
            scan_topic: topics::scan_event(package_name),
        }
    }

    /// Topic scans are delivered on.
    #[must_use]
    pub fn scan_topic(&self) -> &str {
        &self.scan_topic
    }

    /// Every topic this classifier recognises.
    #[must_use]
    pub fn topics(&self) -> [&str; 3] {
        [
            topics::RESULT_ACTION,
            topics::NOTIFICATION_ACTION,
            self.scan_topic.as_str(),
        ]
    }

    /// Whether `topic` is the notification topic (subject to debouncing).
    #[must_use]
    pub fn is_notification_topic(topic: &str) -> bool {
        topic == topics::NOTIFICATION_ACTION
    }

    pub fn classify(&self, topic: &str, payload: &Bundle) -> ClassifiedEvent {
        if topic == topics::RESULT_ACTION {
            return ClassifiedEvent::CommandResult(codec::decode_command_result(payload));
        }

        if topic == self.scan_topic {
            return match codec::decode_scan_event(payload) {
                Ok(event) => ClassifiedEvent::Scan(event),
                Err(err) => ClassifiedEvent::Unrecognized(UnrecognizedReason::Malformed(err)),
            };
        }

        if topic == topics::NOTIFICATION_ACTION {
            return Self::classify_notification(payload);
        }

        ClassifiedEvent::Unrecognized(UnrecognizedReason::UnknownTopic(topic.to_string()))
    }

    fn classify_notification(payload: &Bundle) -> ClassifiedEvent {
        let Some(notification) = payload.get_bundle(extras::NOTIFICATION) else {
            return ClassifiedEvent::Unrecognized(UnrecognizedReason::MissingNotification);
        };

        match notification.get_str(extras::NOTIFICATION_TYPE) {
            Some(notification_types::SCANNER_STATUS) => ClassifiedEvent::StatusNotification {
                status: notification
                    .get_str(extras::STATUS)
                    .unwrap_or(super::vocabulary::defaults::UNKNOWN_STATUS)
                    .to_string(),
            },
            Some(notification_types::PROFILE_SWITCH) => ClassifiedEvent::ProfileChange {
                profile_name: notification
                    .get_str(extras::PROFILE_NAME)
                    .map(str::to_string),
            },
            Some(notification_types::CONFIGURATION_UPDATE) => ClassifiedEvent::ConfigUpdate,
            other => ClassifiedEvent::Unrecognized(UnrecognizedReason::UnknownNotificationType(
                other.map(str::to_string),
            )),
        }
    }
}
