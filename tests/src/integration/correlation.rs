//! # Command Correlation Flows
//!
//! Commands travel to the simulator over the bus and results come back on
//! the result topic; each caller must get exactly its own result.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dw_dispatch::codec;
    use dw_dispatch::{
        AppEntry, BarcodeParameters, CommandError, CommandKind, ConfigMode, CorrelationToken,
        Decoder, IntentParameters, OutboundCommand, ProfileConfig,
    };
    use dw_types::{Bundle, BundleValue};
    use tokio::time::timeout;

    use crate::simulator::{eventually, Bridge};

    // =============================================================================
    // BASIC ROUND TRIP
    // =============================================================================

    #[tokio::test]
    async fn test_create_profile_round_trip() {
        let bridge = Bridge::start().unwrap();

        bridge.api.create_profile("Inventory").await.unwrap();

        let received = bridge.datawedge.received();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].1.kind, CommandKind::CreateProfile);
        assert_eq!(received[0].1.payload, BundleValue::String("Inventory".into()));
        assert_eq!(received[0].0.as_str().len(), 10);

        let stats = bridge.facade.stats();
        assert_eq!(stats.sent, 1);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.pending, 0);
    }

    #[tokio::test]
    async fn test_vendor_failure_code_preserved() {
        let bridge = Bridge::start().unwrap();
        bridge
            .datawedge
            .respond_with(CommandKind::SetConfig, "PROFILE_NOT_FOUND");

        let err = bridge
            .api
            .set_decoder(Decoder::Pdf417, true, "Missing")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CommandError::Vendor {
                command: "SET_CONFIG".into(),
                code: "PROFILE_NOT_FOUND".into(),
            }
        );
    }

    // =============================================================================
    // NO CROSS-WIRING
    // =============================================================================

    #[tokio::test]
    async fn test_out_of_order_results_reach_their_own_callers() {
        let bridge = Bridge::start().unwrap();
        bridge.datawedge.hold_responses();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                bridge.facade.send_command(OutboundCommand::text(
                    CommandKind::CreateProfile,
                    format!("Profile{i}"),
                ))
            })
            .collect();

        assert!(eventually(|| bridge.datawedge.received_count() == 20).await);
        assert_eq!(bridge.datawedge.release_reversed(), 20);

        for handle in handles {
            let expected = handle.token().cloned().unwrap();
            let outcome = timeout(Duration::from_secs(2), handle)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(outcome.token, expected);
        }
        assert_eq!(bridge.facade.stats().unmatched, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_operations_keep_their_result_codes() {
        let bridge = Bridge::start().unwrap();
        bridge.datawedge.hold_responses();
        bridge
            .datawedge
            .respond_with(CommandKind::CreateProfile, "PROFILE_ALREADY_EXISTS");
        bridge
            .datawedge
            .respond_with(CommandKind::SoftScanTrigger, "SCANNER_ALREADY_DISABLED");
        bridge
            .datawedge
            .respond_with(CommandKind::ScannerInputPlugin, "SCANNER_ALREADY_ENABLED");

        let api = bridge.api.clone();
        let create = tokio::spawn({
            let api = api.clone();
            async move { api.create_profile("Inventory").await }
        });
        let trigger = tokio::spawn({
            let api = api.clone();
            async move { api.soft_scan_trigger(true).await }
        });
        let enable = tokio::spawn({
            let api = api.clone();
            async move { api.enable_plugin().await }
        });
        let suspend = tokio::spawn(async move { api.suspend_plugin().await });

        assert!(eventually(|| bridge.datawedge.received_count() == 4).await);
        bridge.datawedge.release_reversed();

        let create = create.await.unwrap().unwrap_err();
        let trigger = trigger.await.unwrap().unwrap_err();
        let enable = enable.await.unwrap().unwrap_err();

        assert_eq!(create.vendor_code(), Some("PROFILE_ALREADY_EXISTS"));
        assert_eq!(trigger.vendor_code(), Some("SCANNER_ALREADY_DISABLED"));
        assert_eq!(enable.vendor_code(), Some("SCANNER_ALREADY_ENABLED"));
        // SCANNER_ALREADY_ENABLED is not a suspend failure code.
        assert!(suspend.await.unwrap().is_ok());
    }

    // =============================================================================
    // UNMATCHED RESULTS
    // =============================================================================

    #[tokio::test]
    async fn test_unknown_token_result_is_ignored() {
        let bridge = Bridge::start().unwrap();
        bridge.datawedge.hold_responses();

        let mut handle = bridge
            .facade
            .send_command(OutboundCommand::text(CommandKind::CreateProfile, "A"));
        assert!(eventually(|| bridge.datawedge.received_count() == 1).await);

        bridge.datawedge.send_result(codec::encode_command_result(
            CommandKind::CreateProfile,
            &CorrelationToken::new("zzzzzzzzzz"),
            "SUCCESS",
        ));
        bridge
            .datawedge
            .send_result(Bundle::new().with("RESULT", "SUCCESS"));

        assert!(eventually(|| bridge.facade.stats().unmatched == 2).await);
        assert!(handle.try_outcome().is_none());
        assert_eq!(bridge.facade.pending_count(), 1);

        bridge.datawedge.release_reversed();
        let outcome = timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_repeated_result_resolves_once() {
        let bridge = Bridge::start().unwrap();

        let handle = bridge
            .facade
            .send_command(OutboundCommand::text(CommandKind::CreateProfile, "A"));
        let token = handle.token().cloned().unwrap();
        let outcome = timeout(Duration::from_secs(2), handle)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(outcome.raw_result_code, "SUCCESS");

        bridge.datawedge.send_result(codec::encode_command_result(
            CommandKind::CreateProfile,
            &token,
            "SECOND",
        ));
        assert!(eventually(|| bridge.facade.stats().unmatched == 1).await);
        assert_eq!(bridge.facade.stats().resolved, 1);
    }

    // =============================================================================
    // STRUCTURED PAYLOADS
    // =============================================================================

    #[tokio::test]
    async fn test_profile_config_arrives_intact() {
        let bridge = Bridge::start().unwrap();
        let config = ProfileConfig::new("Inventory")
            .unwrap()
            .with_mode(ConfigMode::Overwrite)
            .with_app(
                AppEntry::new(Bridge::PACKAGE)
                    .unwrap()
                    .with_activities(["MainActivity", "ScanActivity"]),
            )
            .with_intent(IntentParameters::for_package(Bridge::PACKAGE).unwrap())
            .with_barcode(
                BarcodeParameters::default()
                    .with_decoder(Decoder::Code128, true)
                    .with_decoder(Decoder::QrCode, false),
            );

        bridge.api.set_profile_config(&config).await.unwrap();

        let received = bridge.datawedge.received();
        assert_eq!(received[0].1.kind, CommandKind::SetConfig);
        assert_eq!(received[0].1.payload, BundleValue::Bundle(config.to_bundle()));
    }
}
