//! Wolfx JMA early-warning feed (string `type` discriminator).

use quake_core::{
    Accuracy, AreaArrival, Depth, EarlyWarning, EewCancellation, Hypocenter, QuakeEvent,
    RawIntensity, ReportHeader,
};
use serde_json::Value;

use crate::extract::{array, at, flag, integer, number, text};
use crate::router::{FeedSchema, Routed, DEFAULT_SOURCE_LABEL};

/// The only record type this feed publishes notifications for.
pub const TYPE_JMA_EEW: &str = "jma_eew";

/// Schema of the Wolfx `jma_eew` websocket feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WolfxEew;

impl FeedSchema for WolfxEew {
    fn name() -> &'static str {
        "wolfx"
    }

    fn normalize(record: &Value) -> Routed {
        match text(record, &["type"]) {
            Some(t) if t == TYPE_JMA_EEW => {}
            Some(t) => return Routed::Ignored(format!("type {}", t)),
            None => return Routed::Ignored("record without type".to_string()),
        }

        let serial = text(record, &["Serial"]);
        if flag(record, &["isCancel"]) {
            return Routed::Cancel(EewCancellation {
                source_label: DEFAULT_SOURCE_LABEL.to_string(),
                serial,
            });
        }

        // The upstream field name is misspelled; accept the correct one too.
        let magnitude = number(record, &["Magunitude"]).or_else(|| number(record, &["Magnitude"]));

        let accuracy = at(record, &["Accuracy"])
            .filter(|a| a.is_object())
            .map(|a| Accuracy {
                epicenter: text(a, &["Epicenter"]),
                depth: text(a, &["Depth"]),
                magnitude: text(a, &["Magnitude"]),
            });

        let areas = array(record, &["WarnArea"])
            .iter()
            .filter_map(|a| {
                Some(AreaArrival {
                    location: text(a, &["Chiiki"])?,
                    arrival_time: text(a, &["Time"]),
                    extra: text(a, &["Type"]),
                })
            })
            .collect();

        Routed::Event(QuakeEvent::EarlyWarning(EarlyWarning {
            header: ReportHeader {
                source_label: DEFAULT_SOURCE_LABEL.to_string(),
                occurrence_time: text(record, &["OriginTime"]),
            },
            serial,
            is_warning: flag(record, &["isWarn"]),
            is_final: flag(record, &["isFinal"]),
            is_assumption: flag(record, &["isAssumption"]),
            hypocenter: Hypocenter {
                name: text(record, &["Hypocenter"]),
                magnitude: magnitude.filter(|m| *m >= 0.0),
                depth: integer(record, &["Depth"]).map_or(Depth::Unknown, Depth::from_km),
            },
            max_intensity: text(record, &["MaxIntensity"])
                .map_or(RawIntensity::Unknown, RawIntensity::forecast),
            accuracy,
            areas,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_core::IntensityBand;
    use serde_json::json;

    fn warning(record: Value) -> EarlyWarning {
        match WolfxEew::normalize(&record) {
            Routed::Event(QuakeEvent::EarlyWarning(w)) => w,
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_other_types_ignored() {
        assert!(matches!(
            WolfxEew::normalize(&json!({"type": "heartbeat", "ver": "1"})),
            Routed::Ignored(_)
        ));
        assert!(matches!(
            WolfxEew::normalize(&json!({"type": "cenc_eew"})),
            Routed::Ignored(_)
        ));
        assert!(matches!(WolfxEew::normalize(&json!({})), Routed::Ignored(_)));
    }

    #[test]
    fn test_full_record() {
        let w = warning(json!({
            "type": "jma_eew",
            "Serial": 4,
            "isWarn": false,
            "isFinal": true,
            "isAssumption": false,
            "Hypocenter": "千葉県北西部",
            "Magunitude": 5.3,
            "Depth": 70,
            "MaxIntensity": "5弱",
            "OriginTime": "2024/01/01 00:00:00",
            "Accuracy": {"Epicenter": "A", "Depth": "B", "Magnitude": "C"},
            "WarnArea": [{"Chiiki": "千葉県北西部", "Shindo1": "5弱", "Time": "00:00:10", "Type": "予報"}]
        }));
        assert_eq!(w.serial.as_deref(), Some("4"));
        assert!(!w.is_warning && w.is_final);
        assert_eq!(w.hypocenter.depth, Depth::Km(70));
        assert_eq!(w.max_intensity.classify().band, IntensityBand::FiveLower);
        assert_eq!(w.accuracy.unwrap().magnitude.as_deref(), Some("C"));
        assert_eq!(w.areas[0].location, "千葉県北西部");
        assert_eq!(w.areas[0].extra.as_deref(), Some("予報"));
    }

    #[test]
    fn test_sparse_record() {
        let w = warning(json!({"type": "jma_eew"}));
        assert_eq!(w.serial, None);
        assert_eq!(w.hypocenter, Hypocenter::unknown());
        assert_eq!(w.max_intensity, RawIntensity::Unknown);
        assert_eq!(w.accuracy, None);
        assert!(w.areas.is_empty());
        assert!(!w.is_warning);
    }

    #[test]
    fn test_string_numbers() {
        let w = warning(json!({"type": "jma_eew", "Depth": "200", "Magunitude": "6.0", "MaxIntensity": "3"}));
        assert_eq!(w.hypocenter.depth, Depth::Km(200));
        assert_eq!(w.hypocenter.magnitude, Some(6.0));
        assert_eq!(w.max_intensity.classify().band, IntensityBand::Three);
    }

    #[test]
    fn test_cancel_short_circuits() {
        let routed = WolfxEew::normalize(&json!({
            "type": "jma_eew", "Serial": "5", "isCancel": true, "MaxIntensity": "7"
        }));
        let Routed::Cancel(c) = routed else {
            panic!("expected cancel");
        };
        assert_eq!(c.serial.as_deref(), Some("5"));
    }
}
