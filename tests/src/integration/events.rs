//! # Unsolicited Event Flows
//!
//! Scans and notifications published by the simulator must reach the
//! host's event channel decoded, debounced and de-duplicated.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use dw_dispatch::UnsolicitedEvent;
    use dw_types::{
        Bundle, DecodeMode, LabelType, ScanEvent, ScanSource, ScannerState, StatusChangeEvent,
    };

    use crate::simulator::{eventually, Bridge};

    fn status(state: ScannerState) -> UnsolicitedEvent {
        UnsolicitedEvent::StatusChange(StatusChangeEvent { new_state: state })
    }

    // =============================================================================
    // SCANS
    // =============================================================================

    #[tokio::test]
    async fn test_scan_payload_decoded() {
        let mut bridge = Bridge::start().unwrap();

        bridge.datawedge.emit_scan_bundle(
            Bundle::new()
                .with("com.symbol.datawedge.source", "scanner")
                .with("com.symbol.datawedge.decode_data", vec![vec![0x41u8, 0x42]])
                .with("com.symbol.datawedge.decoded_mode", "single_decode")
                .with("com.symbol.datawedge.label_type", "CODE128"),
        );

        match bridge.next_event().await {
            Some(UnsolicitedEvent::Scan(scan)) => {
                assert_eq!(scan.source, ScanSource::Scanner);
                assert_eq!(scan.decode_mode, DecodeMode::Single);
                assert_eq!(scan.label_type, LabelType::Code128);
                assert_eq!(scan.decode_data, vec![vec![0x41, 0x42]]);
            }
            other => panic!("expected scan, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_source_dropped_without_side_effects() {
        let mut bridge = Bridge::start().unwrap();

        bridge.datawedge.emit_scan_bundle(
            Bundle::new()
                .with("com.symbol.datawedge.source", "unknown_source")
                .with("com.symbol.datawedge.decoded_mode", "single_decode"),
        );
        assert!(eventually(|| bridge.facade.stats().dropped == 1).await);

        // The pipeline keeps working after the bad message.
        let good = ScanEvent {
            label_type: LabelType::Ean13,
            source: ScanSource::Scanner,
            data_string: "4006381333931".into(),
            decode_data: vec![b"4006381333931".to_vec()],
            decode_mode: DecodeMode::Single,
        };
        bridge.datawedge.emit_scan(&good);

        assert_eq!(bridge.next_event().await, Some(UnsolicitedEvent::Scan(good)));
        assert_eq!(bridge.facade.stats().scan_events, 1);
    }

    #[tokio::test]
    async fn test_scans_are_not_debounced() {
        let mut bridge = Bridge::start().unwrap();
        let scan = ScanEvent {
            label_type: LabelType::QrCode,
            source: ScanSource::Scanner,
            data_string: "A".into(),
            decode_data: vec![b"A".to_vec()],
            decode_mode: DecodeMode::Single,
        };

        bridge.datawedge.emit_scan(&scan);
        bridge.datawedge.emit_scan(&scan);

        assert!(bridge.next_event().await.is_some());
        assert!(bridge.next_event().await.is_some());
    }

    // =============================================================================
    // STATUS DEBOUNCE / DEDUP
    // =============================================================================

    #[tokio::test]
    async fn test_identical_status_one_second_apart_is_debounced() {
        let mut bridge = Bridge::start().unwrap();

        bridge.datawedge.emit_status("IDLE");
        assert_eq!(bridge.next_event().await, Some(status(ScannerState::Idle)));

        bridge.clock.advance(Duration::from_secs(1));
        bridge.datawedge.emit_status("IDLE");
        assert!(eventually(|| bridge.facade.stats().debounced == 1).await);
        assert!(bridge.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_statuses_outside_window_filtered_by_value() {
        let mut bridge = Bridge::start().unwrap();

        bridge.datawedge.emit_status("SCANNING");
        assert_eq!(bridge.next_event().await, Some(status(ScannerState::Scanning)));

        bridge.clock.advance(Duration::from_secs(25));
        bridge.datawedge.emit_status("IDLE");
        assert_eq!(bridge.next_event().await, Some(status(ScannerState::Idle)));

        bridge.clock.advance(Duration::from_secs(25));
        bridge.datawedge.emit_status("IDLE");
        assert!(eventually(|| bridge.facade.stats().deduplicated == 1).await);
        assert!(bridge.events.try_recv().is_err());
        assert_eq!(bridge.facade.stats().debounced, 0);
    }

    #[tokio::test]
    async fn test_notification_window_is_shared_across_types() {
        let mut bridge = Bridge::start().unwrap();

        bridge.datawedge.emit_notification(
            "PROFILE_SWITCH",
            Bundle::new().with("PROFILE_NAME", "Inventory"),
        );
        assert_eq!(
            bridge.next_event().await,
            Some(UnsolicitedEvent::ProfileChanged {
                profile_name: Some("Inventory".into())
            })
        );

        bridge.clock.advance(Duration::from_secs(5));
        bridge.datawedge.emit_status("SCANNING");
        assert!(eventually(|| bridge.facade.stats().debounced == 1).await);

        bridge.clock.advance(Duration::from_secs(20));
        bridge
            .datawedge
            .emit_notification("CONFIGURATION_UPDATE", Bundle::new());
        assert_eq!(bridge.next_event().await, Some(UnsolicitedEvent::ConfigUpdated));
    }

    #[tokio::test]
    async fn test_unknown_status_value_dropped() {
        let mut bridge = Bridge::start().unwrap();

        bridge.datawedge.emit_status("WARMING_UP");
        assert!(eventually(|| bridge.facade.stats().dropped == 1).await);
        assert!(bridge.events.try_recv().is_err());
    }
}
