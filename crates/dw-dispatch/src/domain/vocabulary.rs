//! Command vocabulary
//!
//! Static wire names of the DataWedge intent API: topics, extra keys,
//! command kinds and the result codes each host operation treats as failure.

use std::fmt;

/// Intent actions (bus topics).
pub mod topics {
    /// Outbound command topic.
    pub const ACTION: &str = "com.symbol.datawedge.api.ACTION";
    /// Command results.
    pub const RESULT_ACTION: &str = "com.symbol.datawedge.api.RESULT_ACTION";
    /// Status / profile / configuration notifications.
    pub const NOTIFICATION_ACTION: &str = "com.symbol.datawedge.api.NOTIFICATION_ACTION";
    /// Suffix appended to the host package name for scan delivery.
    pub const SCAN_EVENT_SUFFIX: &str = ".SCAN_EVENT";

    /// Scan topic for a host package.
    #[must_use]
    pub fn scan_event(package_name: &str) -> String {
        format!("{package_name}{SCAN_EVENT_SUFFIX}")
    }
}

/// Extra keys.
pub mod extras {
    pub const SEND_RESULT: &str = "SEND_RESULT";
    pub const COMMAND_IDENTIFIER: &str = "COMMAND_IDENTIFIER";
    pub const COMMAND: &str = "COMMAND";
    pub const RESULT: &str = "RESULT";
    pub const RESULT_INFO: &str = "RESULT_INFO";

    pub const NOTIFICATION: &str = "com.symbol.datawedge.api.NOTIFICATION";
    pub const NOTIFICATION_TYPE: &str = "NOTIFICATION_TYPE";
    pub const STATUS: &str = "STATUS";
    pub const PROFILE_NAME: &str = "PROFILE_NAME";

    pub const API_APPLICATION_NAME: &str = "com.symbol.datawedge.api.APPLICATION_NAME";
    pub const API_NOTIFICATION_TYPE: &str = "com.symbol.datawedge.api.NOTIFICATION_TYPE";

    pub const SCAN_SOURCE: &str = "com.symbol.datawedge.source";
    pub const SCAN_DATA_STRING: &str = "com.symbol.datawedge.data_string";
    pub const SCAN_LABEL_TYPE: &str = "com.symbol.datawedge.label_type";
    pub const SCAN_DECODE_DATA: &str = "com.symbol.datawedge.decode_data";
    pub const SCAN_DECODE_MODE: &str = "com.symbol.datawedge.decoded_mode";
}

/// `NOTIFICATION_TYPE` values.
pub mod notification_types {
    pub const SCANNER_STATUS: &str = "SCANNER_STATUS";
    pub const PROFILE_SWITCH: &str = "PROFILE_SWITCH";
    pub const CONFIGURATION_UPDATE: &str = "CONFIGURATION_UPDATE";
}

/// Defaults substituted for missing result fields.
pub mod defaults {
    pub const UNKNOWN_RESULT: &str = "UNKNOWN_RESULT";
    pub const UNKNOWN_COMMAND: &str = "UNKNOWN_COMMAND";
    pub const UNKNOWN_STATUS: &str = "UNKNOWN_STATUS";
}

pub const RESULT_SUCCESS: &str = "SUCCESS";

/// A DataWedge API command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    CreateProfile,
    SetConfig,
    ScannerInputPlugin,
    RegisterForNotification,
    UnregisterForNotification,
    SoftScanTrigger,
}

impl CommandKind {
    pub const ALL: [Self; 6] = [
        Self::CreateProfile,
        Self::SetConfig,
        Self::ScannerInputPlugin,
        Self::RegisterForNotification,
        Self::UnregisterForNotification,
        Self::SoftScanTrigger,
    ];

    /// Extra key under which the command argument travels.
    #[must_use]
    pub fn wire_key(&self) -> &'static str {
        match self {
            Self::CreateProfile => "com.symbol.datawedge.api.CREATE_PROFILE",
            Self::SetConfig => "com.symbol.datawedge.api.SET_CONFIG",
            Self::ScannerInputPlugin => "com.symbol.datawedge.api.SCANNER_INPUT_PLUGIN",
            Self::RegisterForNotification => "com.symbol.datawedge.api.REGISTER_FOR_NOTIFICATION",
            Self::UnregisterForNotification => {
                "com.symbol.datawedge.api.UNREGISTER_FOR_NOTIFICATION"
            }
            Self::SoftScanTrigger => "com.symbol.datawedge.api.SOFT_SCAN_TRIGGER",
        }
    }

    /// Reverse lookup of [`CommandKind::wire_key`].
    #[must_use]
    pub fn from_wire_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.wire_key() == key)
    }

    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateProfile => "CREATE_PROFILE",
            Self::SetConfig => "SET_CONFIG",
            Self::ScannerInputPlugin => "SCANNER_INPUT_PLUGIN",
            Self::RegisterForNotification => "REGISTER_FOR_NOTIFICATION",
            Self::UnregisterForNotification => "UNREGISTER_FOR_NOTIFICATION",
            Self::SoftScanTrigger => "SOFT_SCAN_TRIGGER",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a host operation interprets the vendor result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPolicy {
    /// Only `SUCCESS` is a success.
    RequireSuccess,
    /// The listed codes are failures; anything else is a success.
    RejectCodes(&'static [&'static str]),
}

impl ResultPolicy {
    /// Whether `code` counts as success under this policy.
    #[must_use]
    pub fn accepts(&self, code: &str) -> bool {
        match self {
            Self::RequireSuccess => code == RESULT_SUCCESS,
            Self::RejectCodes(rejected) => !rejected.iter().any(|r| *r == code),
        }
    }
}

/// Arguments of the `SCANNER_INPUT_PLUGIN` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginAction {
    Suspend,
    Resume,
    Enable,
    Disable,
}

impl PluginAction {
    /// Command argument.
    #[must_use]
    pub fn argument(&self) -> &'static str {
        match self {
            Self::Suspend => "SUSPEND_PLUGIN",
            Self::Resume => "RESUME_PLUGIN",
            Self::Enable => "ENABLE_PLUGIN",
            Self::Disable => "DISABLE_PLUGIN",
        }
    }

    /// Result codes reported as failure.
    #[must_use]
    pub fn policy(&self) -> ResultPolicy {
        match self {
            Self::Suspend => ResultPolicy::RejectCodes(&[
                "SCANNER_SUSPEND_FAILED",
                "SCANNER_ALREADY_SUSPENDED",
                "PLUGIN_DISABLED",
            ]),
            Self::Resume => ResultPolicy::RejectCodes(&[
                "SCANNER_RESUME_FAILED",
                "SCANNER_ALREADY_RESUMED",
                "PLUGIN_DISABLED",
            ]),
            Self::Enable => {
                ResultPolicy::RejectCodes(&["SCANNER_ALREADY_ENABLED", "SCANNER_ENABLE_FAILED"])
            }
            Self::Disable => {
                ResultPolicy::RejectCodes(&["SCANNER_ALREADY_DISABLED", "SCANNER_DISABLE_FAILED"])
            }
        }
    }
}

/// Soft trigger arguments.
pub mod soft_scan {
    use super::ResultPolicy;

    pub const START: &str = "START_SCANNING";
    pub const STOP: &str = "STOP_SCANNING";

    pub const POLICY: ResultPolicy =
        ResultPolicy::RejectCodes(&["SCANNER_ALREADY_DISABLED", "SCANNER_DISABLE_FAILED"]);
}
