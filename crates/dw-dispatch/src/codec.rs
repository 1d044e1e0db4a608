//! Payload codec.
//!
//! Converts between bus [`Bundle`]s and the typed records of this crate.
//! Encoding covers what the dispatcher sends (commands) and, for simulators
//! and tests, what DataWedge sends back (results, scans, notifications).
//!
//! Missing optional fields decode to documented defaults:
//!
//! | Field | Default |
//! |-------|---------|
//! | `COMMAND` | `UNKNOWN_COMMAND` |
//! | `RESULT` | `UNKNOWN_RESULT` |
//! | `COMMAND_IDENTIFIER` | empty token |
//! | `data_string` | empty string |
//! | `label_type` | [`LabelType::Unknown`] |
//! | `decode_data` | no segments (also when not bytes) |
//!
//! A missing or unrecognised scan `source` or `decoded_mode` aborts the
//! event.

use crate::domain::command::{CommandOutcome, OutboundCommand};
use crate::domain::correlation::CorrelationToken;
use crate::domain::vocabulary::{defaults, extras, notification_types, CommandKind};
use crate::error::CommandError;
use dw_types::{
    Bundle, BundleValue, DecodeError, DecodeMode, LabelType, ScanEvent, ScanSource, ScannerState,
};
use tracing::warn;

/// Build the outbound bundle for `command`.
///
/// Only string and bundle arguments can travel on the bus; any other shape
/// is refused with [`CommandError::UnsupportedPayload`].
pub fn encode_command(
    token: &CorrelationToken,
    command: &OutboundCommand,
) -> Result<Bundle, CommandError> {
    let argument = match &command.payload {
        value @ (BundleValue::String(_) | BundleValue::Bundle(_)) => value.clone(),
        other => {
            return Err(CommandError::UnsupportedPayload {
                command: command.kind.name(),
                found: other.kind(),
            })
        }
    };

    Ok(Bundle::new()
        .with(command.kind.wire_key(), argument)
        .with(extras::SEND_RESULT, "true")
        .with(extras::COMMAND_IDENTIFIER, token.as_str()))
}

/// Inverse of [`encode_command`].
///
/// DataWedge itself never sends this back; responders and echo checks use
/// it to read what the dispatcher published.
pub fn decode_command(bundle: &Bundle) -> Result<(CorrelationToken, OutboundCommand), DecodeError> {
    let token = bundle
        .get_str(extras::COMMAND_IDENTIFIER)
        .ok_or(DecodeError::MissingField(extras::COMMAND_IDENTIFIER))?;

    let (kind, value) = CommandKind::ALL
        .into_iter()
        .find_map(|kind| bundle.get(kind.wire_key()).map(|value| (kind, value)))
        .ok_or(DecodeError::MissingField("command key"))?;

    if !matches!(value, BundleValue::String(_) | BundleValue::Bundle(_)) {
        return Err(DecodeError::WrongFieldType {
            field: kind.wire_key(),
            expected: "string or bundle",
            found: value.kind(),
        });
    }

    Ok((
        CorrelationToken::new(token),
        OutboundCommand::new(kind, value.clone()),
    ))
}

/// Decode a message from the result topic. Never fails; missing fields
/// take their defaults and the whole bundle is kept as the payload.
pub fn decode_command_result(bundle: &Bundle) -> CommandOutcome {
    CommandOutcome {
        command_name: bundle
            .get_str(extras::COMMAND)
            .unwrap_or(defaults::UNKNOWN_COMMAND)
            .to_string(),
        token: CorrelationToken::new(bundle.get_str(extras::COMMAND_IDENTIFIER).unwrap_or_default()),
        raw_result_code: bundle
            .get_str(extras::RESULT)
            .unwrap_or(defaults::UNKNOWN_RESULT)
            .to_string(),
        payload: bundle.clone(),
    }
}

/// Build a result message the way DataWedge reports one.
pub fn encode_command_result(kind: CommandKind, token: &CorrelationToken, code: &str) -> Bundle {
    Bundle::new()
        .with(extras::COMMAND, kind.wire_key())
        .with(extras::COMMAND_IDENTIFIER, token.as_str())
        .with(extras::RESULT, code)
}

/// Decode a message from the scan topic.
pub fn decode_scan_event(bundle: &Bundle) -> Result<ScanEvent, DecodeError> {
    let source = bundle
        .get_str(extras::SCAN_SOURCE)
        .ok_or(DecodeError::MissingField(extras::SCAN_SOURCE))?;
    let source = ScanSource::parse(source)?;

    let decode_mode = bundle
        .get_str(extras::SCAN_DECODE_MODE)
        .ok_or(DecodeError::MissingField(extras::SCAN_DECODE_MODE))?;
    let decode_mode = DecodeMode::parse(decode_mode)?;

    let decode_data = match bundle.get(extras::SCAN_DECODE_DATA) {
        None => Vec::new(),
        Some(value) => bundle
            .get_byte_segments(extras::SCAN_DECODE_DATA)
            .unwrap_or_else(|| {
                warn!(found = value.kind(), "Ignoring scan decode_data that is not bytes");
                Vec::new()
            }),
    };

    Ok(ScanEvent {
        label_type: bundle
            .get_str(extras::SCAN_LABEL_TYPE)
            .map_or(LabelType::Unknown, LabelType::parse),
        source,
        data_string: bundle
            .get_str(extras::SCAN_DATA_STRING)
            .unwrap_or_default()
            .to_string(),
        decode_data,
        decode_mode,
    })
}

/// Build a scan message for `event`.
pub fn encode_scan_event(event: &ScanEvent) -> Bundle {
    Bundle::new()
        .with(extras::SCAN_SOURCE, event.source.as_str())
        .with(extras::SCAN_LABEL_TYPE, event.label_type.vendor_name())
        .with(extras::SCAN_DATA_STRING, event.data_string.as_str())
        .with(extras::SCAN_DECODE_DATA, event.decode_data.clone())
        .with(extras::SCAN_DECODE_MODE, event.decode_mode.as_str())
}

/// Map a raw scanner status onto [`ScannerState`].
pub fn decode_scanner_state(raw: &str) -> Result<ScannerState, DecodeError> {
    ScannerState::parse(raw)
}

/// Build a notification message with the given type and inner fields.
pub fn encode_notification(notification_type: &str, fields: Bundle) -> Bundle {
    let inner = fields.with(extras::NOTIFICATION_TYPE, notification_type);
    Bundle::new().with(extras::NOTIFICATION, inner)
}

/// Build a `SCANNER_STATUS` notification.
pub fn encode_status_notification(status: &str) -> Bundle {
    encode_notification(
        notification_types::SCANNER_STATUS,
        Bundle::new().with(extras::STATUS, status),
    )
}

/// JSON rendering of a bundle for log fields.
#[must_use]
pub fn describe(bundle: &Bundle) -> String {
    bundle.describe()
}
