//! Typed `SET_CONFIG` arguments.
//!
//! DataWedge profiles are configured with a nested bundle whose layout is
//! fixed by the vendor. The builders here validate their input at
//! construction and render that layout with `to_bundle()`. Booleans travel
//! as the strings `"true"` / `"false"`.

use crate::error::ProfileError;
use dw_types::Bundle;
use std::fmt;

mod keys {
    pub const PROFILE_NAME: &str = "PROFILE_NAME";
    pub const PROFILE_ENABLED: &str = "PROFILE_ENABLED";
    pub const CONFIG_MODE: &str = "CONFIG_MODE";
    pub const APP_LIST: &str = "APP_LIST";
    pub const PACKAGE_NAME: &str = "PACKAGE_NAME";
    pub const ACTIVITY_LIST: &str = "ACTIVITY_LIST";
    pub const PLUGIN_CONFIG: &str = "PLUGIN_CONFIG";
    pub const PLUGIN_NAME: &str = "PLUGIN_NAME";
    pub const PARAM_LIST: &str = "PARAM_LIST";

    pub const INTENT_PLUGIN: &str = "INTENT";
    pub const INTENT_OUTPUT_ENABLED: &str = "intent_output_enabled";
    pub const INTENT_ACTION: &str = "intent_action";
    pub const INTENT_CATEGORY: &str = "intent_category";
    pub const INTENT_DELIVERY: &str = "intent_delivery";

    pub const BARCODE_PLUGIN: &str = "BARCODE";
    pub const SCANNER_INPUT_ENABLED: &str = "scanner_input_enabled";
    pub const SCANNER_SELECTION: &str = "scanner_selection_by_identifier";
}

/// `intent_delivery` value for broadcast delivery.
pub const INTENT_DELIVERY_BROADCAST: &str = "2";

/// Default `scanner_selection_by_identifier`.
pub const SCANNER_SELECTION_AUTO: &str = "AUTO";

/// Wildcard activity list entry.
pub const ALL_ACTIVITIES: &str = "*";

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// How DataWedge applies a `SET_CONFIG` to an existing profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigMode {
    CreateIfNotExist,
    #[default]
    Update,
    Overwrite,
}

impl ConfigMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateIfNotExist => "CREATE_IF_NOT_EXIST",
            Self::Update => "UPDATE",
            Self::Overwrite => "OVERWRITE",
        }
    }
}

/// Barcode symbology that can be toggled per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoder {
    Aztec,
    Codabar,
    Code128,
    Code39,
    Code93,
    DataMatrix,
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
}

impl Decoder {
    /// Barcode plugin parameter that enables this decoder.
    #[must_use]
    pub fn param_name(&self) -> &'static str {
        match self {
            Self::Aztec => "decoder_aztec",
            Self::Codabar => "decoder_codabar",
            Self::Code128 => "decoder_code128",
            Self::Code39 => "decoder_code39",
            Self::Code93 => "decoder_code93",
            Self::DataMatrix => "decoder_datamatrix",
            Self::Ean13 => "decoder_ean13",
            Self::Ean8 => "decoder_ean8",
            Self::Gs1Databar => "decoder_gs1_databar",
            Self::Interleaved2of5 => "decoder_i2of5",
            Self::MaxiCode => "decoder_maxicode",
            Self::MicroPdf => "decoder_micropdf",
            Self::MicroQr => "decoder_microqr",
            Self::Pdf417 => "decoder_pdf417",
            Self::QrCode => "decoder_qrcode",
            Self::UpcA => "decoder_upca",
            Self::UpcE0 => "decoder_upce0",
            Self::UpcE1 => "decoder_upce1",
        }
    }
}

impl fmt::Display for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.param_name())
    }
}

/// Application (and activities) a profile is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    package_name: String,
    activities: Vec<String>,
}

impl AppEntry {
    /// Bind every activity of `package_name`.
    pub fn new(package_name: impl Into<String>) -> Result<Self, ProfileError> {
        let package_name = package_name.into();
        if package_name.trim().is_empty() {
            return Err(ProfileError::EmptyPackageName);
        }
        Ok(Self {
            package_name,
            activities: vec![ALL_ACTIVITIES.to_string()],
        })
    }

    /// Restrict the binding to the listed activities.
    #[must_use]
    pub fn with_activities<I, S>(mut self, activities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activities = activities.into_iter().map(Into::into).collect();
        if self.activities.is_empty() {
            self.activities.push(ALL_ACTIVITIES.to_string());
        }
        self
    }

    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    fn to_bundle(&self) -> Bundle {
        Bundle::new()
            .with(keys::PACKAGE_NAME, self.package_name.as_str())
            .with(keys::ACTIVITY_LIST, self.activities.clone())
    }
}

/// Intent output plugin settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentParameters {
    pub enabled: bool,
    action: String,
    pub category: Option<String>,
}

impl IntentParameters {
    /// Broadcast scans under `action`.
    pub fn new(action: impl Into<String>) -> Result<Self, ProfileError> {
        let action = action.into();
        if action.trim().is_empty() {
            return Err(ProfileError::EmptyIntentAction);
        }
        Ok(Self {
            enabled: true,
            action,
            category: None,
        })
    }

    /// Scan delivery matching the dispatcher's scan topic for a package.
    pub fn for_package(package_name: &str) -> Result<Self, ProfileError> {
        Self::new(super::vocabulary::topics::scan_event(package_name))
    }

    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    fn to_bundle(&self) -> Bundle {
        let mut params = Bundle::new()
            .with(keys::INTENT_OUTPUT_ENABLED, flag(self.enabled))
            .with(keys::INTENT_ACTION, self.action.as_str())
            .with(keys::INTENT_DELIVERY, INTENT_DELIVERY_BROADCAST);
        if let Some(category) = &self.category {
            params.insert(keys::INTENT_CATEGORY, category.as_str());
        }

        Bundle::new()
            .with(keys::PLUGIN_NAME, keys::INTENT_PLUGIN)
            .with(keys::PARAM_LIST, params)
    }
}

/// Barcode input plugin settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarcodeParameters {
    /// `None` leaves `scanner_input_enabled` untouched.
    pub enabled: Option<bool>,
    pub scanner_selection: String,
    decoders: Vec<(Decoder, bool)>,
}

impl Default for BarcodeParameters {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            scanner_selection: SCANNER_SELECTION_AUTO.to_string(),
            decoders: Vec::new(),
        }
    }
}

impl BarcodeParameters {
    /// Parameters that only touch one decoder.
    #[must_use]
    pub fn single_decoder(decoder: Decoder, enabled: bool) -> Self {
        Self {
            enabled: None,
            ..Self::default()
        }
        .with_decoder(decoder, enabled)
    }

    /// Enable or disable a decoder. A later call for the same decoder wins.
    #[must_use]
    pub fn with_decoder(mut self, decoder: Decoder, enabled: bool) -> Self {
        self.decoders.retain(|(existing, _)| *existing != decoder);
        self.decoders.push((decoder, enabled));
        self
    }

    #[must_use]
    pub fn decoders(&self) -> &[(Decoder, bool)] {
        &self.decoders
    }

    fn to_bundle(&self) -> Bundle {
        let mut params = Bundle::new().with(keys::SCANNER_SELECTION, self.scanner_selection.as_str());
        if let Some(enabled) = self.enabled {
            params.insert(keys::SCANNER_INPUT_ENABLED, flag(enabled));
        }
        for (decoder, enabled) in &self.decoders {
            params.insert(decoder.param_name(), flag(*enabled));
        }

        Bundle::new()
            .with(keys::PLUGIN_NAME, keys::BARCODE_PLUGIN)
            .with(keys::PARAM_LIST, params)
    }
}

/// Full `SET_CONFIG` argument for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    name: String,
    pub enabled: bool,
    pub mode: ConfigMode,
    pub apps: Vec<AppEntry>,
    pub intent: Option<IntentParameters>,
    pub barcode: Option<BarcodeParameters>,
}

impl ProfileConfig {
    pub fn new(name: impl Into<String>) -> Result<Self, ProfileError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProfileError::EmptyProfileName);
        }
        Ok(Self {
            name,
            enabled: true,
            mode: ConfigMode::default(),
            apps: Vec::new(),
            intent: None,
            barcode: None,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn with_mode(mut self, mode: ConfigMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_app(mut self, app: AppEntry) -> Self {
        self.apps.push(app);
        self
    }

    #[must_use]
    pub fn with_intent(mut self, intent: IntentParameters) -> Self {
        self.intent = Some(intent);
        self
    }

    #[must_use]
    pub fn with_barcode(mut self, barcode: BarcodeParameters) -> Self {
        self.barcode = Some(barcode);
        self
    }

    /// Vendor bundle layout.
    ///
    /// `APP_LIST` is omitted when no app is bound; `PLUGIN_CONFIG` is always
    /// present, possibly empty.
    #[must_use]
    pub fn to_bundle(&self) -> Bundle {
        let mut bundle = Bundle::new()
            .with(keys::PROFILE_NAME, self.name.as_str())
            .with(keys::PROFILE_ENABLED, flag(self.enabled))
            .with(keys::CONFIG_MODE, self.mode.as_str());

        if !self.apps.is_empty() {
            let apps: Vec<Bundle> = self.apps.iter().map(AppEntry::to_bundle).collect();
            bundle.insert(keys::APP_LIST, apps);
        }

        let plugins: Vec<Bundle> = self
            .intent
            .iter()
            .map(IntentParameters::to_bundle)
            .chain(self.barcode.iter().map(BarcodeParameters::to_bundle))
            .collect();
        bundle.insert(keys::PLUGIN_CONFIG, plugins);

        bundle
    }

    /// The `UPDATE` argument that toggles one decoder in `profile_name`.
    ///
    /// Unlike [`ProfileConfig::to_bundle`] this leaves `PROFILE_ENABLED`
    /// out so the profile's enabled state is not touched.
    pub fn decoder_update(
        profile_name: impl Into<String>,
        decoder: Decoder,
        enabled: bool,
    ) -> Result<Bundle, ProfileError> {
        let config = Self::new(profile_name)?
            .with_barcode(BarcodeParameters::single_decoder(decoder, enabled));
        let mut bundle = config.to_bundle();
        bundle.remove(keys::PROFILE_ENABLED);
        Ok(bundle)
    }
}
