//! # Scanner Entities
//!
//! Immutable value records produced by decoding unsolicited scanner traffic.

use crate::errors::DecodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input plugin that produced a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanSource {
    Msr,
    Scanner,
    SimulScan,
    Serial,
    Voice,
    Rfid,
}

impl ScanSource {
    /// Map the raw `com.symbol.datawedge.source` value.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        match raw {
            "msr" => Ok(Self::Msr),
            "scanner" => Ok(Self::Scanner),
            "simulscan" => Ok(Self::SimulScan),
            "serial" => Ok(Self::Serial),
            "voice" => Ok(Self::Voice),
            "rfid" => Ok(Self::Rfid),
            other => Err(DecodeError::UnknownSource(other.to_string())),
        }
    }

    /// Vendor spelling of the source.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Msr => "msr",
            Self::Scanner => "scanner",
            Self::SimulScan => "simulscan",
            Self::Serial => "serial",
            Self::Voice => "voice",
            Self::Rfid => "rfid",
        }
    }
}

/// Whether the scan decoded one symbol or several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecodeMode {
    Single,
    Multiple,
}

impl DecodeMode {
    /// Map the raw `com.symbol.datawedge.decoded_mode` value.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        match raw {
            "single_decode" => Ok(Self::Single),
            "multiple_decode" => Ok(Self::Multiple),
            other => Err(DecodeError::UnknownDecodeMode(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single_decode",
            Self::Multiple => "multiple_decode",
        }
    }
}

/// Barcode symbology reported with a scan.
///
/// The label type is informational: an unfamiliar symbology maps to
/// [`LabelType::Unknown`] instead of failing the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelType {
    Aztec,
    Codabar,
    Code128,
    Code39,
    Code93,
    DataMatrix,
    Ean128,
    Ean13,
    Ean8,
    Gs1Databar,
    Interleaved2of5,
    MaxiCode,
    MicroPdf,
    MicroQr,
    Pdf417,
    QrCode,
    UpcA,
    UpcE0,
    UpcE1,
    Unknown,
}

impl LabelType {
    const VENDOR_PREFIX: &'static str = "LABEL-TYPE-";

    /// Map a raw label type, accepting both `LABEL-TYPE-CODE128` and `CODE128`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let name = raw.strip_prefix(Self::VENDOR_PREFIX).unwrap_or(raw);
        match name {
            "AZTEC" => Self::Aztec,
            "CODABAR" => Self::Codabar,
            "CODE128" => Self::Code128,
            "CODE39" => Self::Code39,
            "CODE93" => Self::Code93,
            "DATAMATRIX" => Self::DataMatrix,
            "EAN128" => Self::Ean128,
            "EAN13" => Self::Ean13,
            "EAN8" => Self::Ean8,
            "GS1_DATABAR" => Self::Gs1Databar,
            "I2OF5" => Self::Interleaved2of5,
            "MAXICODE" => Self::MaxiCode,
            "MICROPDF" => Self::MicroPdf,
            "MICROQR" => Self::MicroQr,
            "PDF417" => Self::Pdf417,
            "QRCODE" => Self::QrCode,
            "UPCA" => Self::UpcA,
            "UPCE0" => Self::UpcE0,
            "UPCE1" => Self::UpcE1,
            _ => Self::Unknown,
        }
    }

    /// Vendor spelling, including the `LABEL-TYPE-` prefix.
    #[must_use]
    pub fn vendor_name(&self) -> String {
        let name = match self {
            Self::Aztec => "AZTEC",
            Self::Codabar => "CODABAR",
            Self::Code128 => "CODE128",
            Self::Code39 => "CODE39",
            Self::Code93 => "CODE93",
            Self::DataMatrix => "DATAMATRIX",
            Self::Ean128 => "EAN128",
            Self::Ean13 => "EAN13",
            Self::Ean8 => "EAN8",
            Self::Gs1Databar => "GS1_DATABAR",
            Self::Interleaved2of5 => "I2OF5",
            Self::MaxiCode => "MAXICODE",
            Self::MicroPdf => "MICROPDF",
            Self::MicroQr => "MICROQR",
            Self::Pdf417 => "PDF417",
            Self::QrCode => "QRCODE",
            Self::UpcA => "UPCA",
            Self::UpcE0 => "UPCE0",
            Self::UpcE1 => "UPCE1",
            Self::Unknown => "UNKNOWN",
        };
        format!("{}{}", Self::VENDOR_PREFIX, name)
    }
}

/// Scanner state carried by a `SCANNER_STATUS` notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScannerState {
    Waiting,
    Disabled,
    Scanning,
    Idle,
    Connected,
    Disconnected,
}

impl ScannerState {
    /// Map a raw status string. Unknown strings are a decode failure, never
    /// a new state.
    pub fn parse(raw: &str) -> Result<Self, DecodeError> {
        match raw {
            "WAITING" => Ok(Self::Waiting),
            "DISABLED" => Ok(Self::Disabled),
            "SCANNING" => Ok(Self::Scanning),
            "IDLE" => Ok(Self::Idle),
            "CONNECTED" => Ok(Self::Connected),
            "DISCONNECTED" => Ok(Self::Disconnected),
            other => Err(DecodeError::UnknownScannerState(other.to_string())),
        }
    }

    /// Vendor spelling of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Disabled => "DISABLED",
            Self::Scanning => "SCANNING",
            Self::Idle => "IDLE",
            Self::Connected => "CONNECTED",
            Self::Disconnected => "DISCONNECTED",
        }
    }
}

impl fmt::Display for ScannerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded barcode (or other input plugin) read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub label_type: LabelType,
    pub source: ScanSource,
    /// Decoded data as a string; empty when the vendor omitted it.
    pub data_string: String,
    /// Raw decoded bytes, one entry per segment.
    pub decode_data: Vec<Vec<u8>>,
    pub decode_mode: DecodeMode,
}

/// Scanner state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeEvent {
    pub new_state: ScannerState,
}
