//! Scanner API
//!
//! Typed host operations on top of [`DispatchFacade`]. Each operation picks
//! a command kind and argument from the vocabulary, sends it, and applies
//! that operation's result policy. A failure keeps the vendor's raw result
//! code in [`CommandError::Vendor`].

use std::sync::Arc;

use dw_types::Bundle;
use tracing::debug;

use crate::domain::vocabulary::{extras, notification_types, soft_scan, PluginAction};
use crate::domain::{
    CommandKind, CommandOutcome, Decoder, OutboundCommand, ProfileConfig, ResultPolicy,
};
use crate::error::CommandError;
use crate::service::DispatchFacade;

/// DataWedge operations for one host application.
#[derive(Clone)]
pub struct ScannerApi {
    facade: Arc<DispatchFacade>,
}

impl ScannerApi {
    pub fn new(facade: Arc<DispatchFacade>) -> Self {
        Self { facade }
    }

    #[must_use]
    pub fn facade(&self) -> &Arc<DispatchFacade> {
        &self.facade
    }

    async fn execute(
        &self,
        command: OutboundCommand,
        policy: ResultPolicy,
    ) -> Result<CommandOutcome, CommandError> {
        let name = command.kind.name();
        let outcome = self.facade.send_command(command).await?;

        if policy.accepts(&outcome.raw_result_code) {
            Ok(outcome)
        } else {
            debug!(command = name, result = %outcome.raw_result_code, "Command rejected");
            Err(CommandError::Vendor {
                command: name.to_string(),
                code: outcome.raw_result_code,
            })
        }
    }

    /// Create an empty profile named `name`.
    pub async fn create_profile(&self, name: &str) -> Result<(), CommandError> {
        self.execute(
            OutboundCommand::text(CommandKind::CreateProfile, name),
            ResultPolicy::RequireSuccess,
        )
        .await
        .map(drop)
    }

    async fn plugin(&self, action: PluginAction) -> Result<(), CommandError> {
        self.execute(
            OutboundCommand::text(CommandKind::ScannerInputPlugin, action.argument()),
            action.policy(),
        )
        .await
        .map(drop)
    }

    pub async fn suspend_plugin(&self) -> Result<(), CommandError> {
        self.plugin(PluginAction::Suspend).await
    }

    pub async fn resume_plugin(&self) -> Result<(), CommandError> {
        self.plugin(PluginAction::Resume).await
    }

    pub async fn enable_plugin(&self) -> Result<(), CommandError> {
        self.plugin(PluginAction::Enable).await
    }

    pub async fn disable_plugin(&self) -> Result<(), CommandError> {
        self.plugin(PluginAction::Disable).await
    }

    /// Start (`true`) or stop (`false`) a software-triggered scan.
    pub async fn soft_scan_trigger(&self, on: bool) -> Result<(), CommandError> {
        let argument = if on { soft_scan::START } else { soft_scan::STOP };
        self.execute(
            OutboundCommand::text(CommandKind::SoftScanTrigger, argument),
            soft_scan::POLICY,
        )
        .await
        .map(drop)
    }

    fn notification_argument(&self, notification_type: &str) -> Bundle {
        Bundle::new()
            .with(
                extras::API_APPLICATION_NAME,
                self.facade.config().package_name.as_str(),
            )
            .with(extras::API_NOTIFICATION_TYPE, notification_type)
    }

    /// Send a command DataWedge never answers.
    ///
    /// Only failures that happen before the command reaches the bus are
    /// reported; the pending entry is left to the expiry sweep.
    fn fire_and_forget(&self, command: OutboundCommand) -> Result<(), CommandError> {
        let mut handle = self.facade.send_command(command);
        match handle.try_outcome() {
            Some(Err(err)) => Err(err),
            _ => Ok(()),
        }
    }

    /// Subscribe to scanner status notifications.
    pub fn register_for_notifications(&self) -> Result<(), CommandError> {
        self.register_for(notification_types::SCANNER_STATUS)
    }

    /// Subscribe to one notification type (`SCANNER_STATUS`,
    /// `PROFILE_SWITCH`, `CONFIGURATION_UPDATE`).
    pub fn register_for(&self, notification_type: &str) -> Result<(), CommandError> {
        self.fire_and_forget(OutboundCommand::structured(
            CommandKind::RegisterForNotification,
            self.notification_argument(notification_type),
        ))
    }

    /// Cancel the scanner status subscription.
    pub fn unregister_for_notifications(&self) -> Result<(), CommandError> {
        self.unregister_for(notification_types::SCANNER_STATUS)
    }

    pub fn unregister_for(&self, notification_type: &str) -> Result<(), CommandError> {
        self.fire_and_forget(OutboundCommand::structured(
            CommandKind::UnregisterForNotification,
            self.notification_argument(notification_type),
        ))
    }

    /// Enable or disable one decoder in `profile_name`.
    pub async fn set_decoder(
        &self,
        decoder: Decoder,
        enabled: bool,
        profile_name: &str,
    ) -> Result<(), CommandError> {
        let argument = ProfileConfig::decoder_update(profile_name, decoder, enabled)?;
        self.execute(
            OutboundCommand::structured(CommandKind::SetConfig, argument),
            ResultPolicy::RequireSuccess,
        )
        .await
        .map(drop)
    }

    /// Apply a full profile configuration.
    pub async fn set_profile_config(&self, config: &ProfileConfig) -> Result<(), CommandError> {
        self.execute(
            OutboundCommand::structured(CommandKind::SetConfig, config.to_bundle()),
            ResultPolicy::RequireSuccess,
        )
        .await
        .map(drop)
    }
}
