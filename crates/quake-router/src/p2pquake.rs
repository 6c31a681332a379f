//! P2PQuake JSON feed (numeric `code` discriminator).

use quake_core::{
    AreaArrival, Depth, EarlyWarning, EewCancellation, EruptionReport, Hypocenter,
    IntensityPoint, IntensityReport, QuakeEvent, QuakeReport, RawIntensity, ReportHeader,
    TsunamiArea, TsunamiGrade, TsunamiReport, TsunamiStatus,
};
use serde_json::Value;

use crate::extract::{array, at, flag, integer, number, text};
use crate::router::{FeedSchema, Routed, DEFAULT_SOURCE_LABEL};

/// Earthquake information (intensity, hypocenter, foreign, other).
pub const CODE_QUAKE: i64 = 551;
/// Tsunami forecast.
pub const CODE_TSUNAMI: i64 = 552;
/// Earthquake early warning.
pub const CODE_EEW: i64 = 556;

/// Hypocenter condition marking the assumed-hypocenter method.
const ASSUMED_CONDITION: &str = "仮定震源要素";

/// Keyword in a foreign report's free-form comment that marks an eruption.
const ERUPTION_KEYWORD: &str = "噴火";

/// Schema of the P2PQuake websocket feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct P2pQuake;

impl FeedSchema for P2pQuake {
    fn name() -> &'static str {
        "p2pquake"
    }

    fn normalize(record: &Value) -> Routed {
        match integer(record, &["code"]) {
            Some(CODE_QUAKE) => Routed::Event(quake(record)),
            Some(CODE_TSUNAMI) => Routed::Event(tsunami(record)),
            Some(CODE_EEW) => early_warning(record),
            Some(code) => Routed::Ignored(format!("code {}", code)),
            None => Routed::Ignored("record without code".to_string()),
        }
    }
}

fn header(record: &Value, time_path: &[&str]) -> ReportHeader {
    ReportHeader {
        source_label: text(record, &["issue", "source"])
            .unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string()),
        occurrence_time: text(record, time_path),
    }
}

/// Negative magnitude and depth values mean "not yet determined".
fn hypocenter(record: &Value, path: &[&str]) -> Hypocenter {
    let Some(h) = at(record, path) else {
        return Hypocenter::unknown();
    };
    Hypocenter {
        name: text(h, &["name"]),
        magnitude: number(h, &["magnitude"]).filter(|m| *m >= 0.0),
        depth: integer(h, &["depth"]).map_or(Depth::Unknown, Depth::from_km),
    }
}

fn observed(value: Option<i64>) -> RawIntensity {
    value.map_or(RawIntensity::Unknown, RawIntensity::Observed)
}

fn quake(record: &Value) -> QuakeEvent {
    let header = header(record, &["earthquake", "time"]);
    let max_intensity = observed(integer(record, &["earthquake", "maxScale"]));
    let tsunami = text(record, &["earthquake", "domesticTsunami"])
        .and_then(|s| TsunamiStatus::parse(&s));

    let issue_type = text(record, &["issue", "type"]).unwrap_or_default();
    if issue_type == "ScalePrompt" {
        let points = array(record, &["points"])
            .iter()
            .filter_map(|p| {
                Some(IntensityPoint {
                    location: text(p, &["addr"])?,
                    intensity: observed(integer(p, &["scale"])),
                })
            })
            .collect();
        return QuakeEvent::IntensityReport(IntensityReport {
            header,
            max_intensity,
            tsunami,
            points,
        });
    }

    let report = QuakeReport {
        header,
        hypocenter: hypocenter(record, &["earthquake", "hypocenter"]),
        max_intensity,
        tsunami,
    };

    match issue_type.as_str() {
        "Destination" => QuakeEvent::SourceInfo(report),
        "ScaleAndDestination" | "DetailScale" => QuakeEvent::DetailedInfo(report),
        "Foreign" => {
            let comment = text(record, &["comments", "freeFormComment"]);
            if is_eruption(&report, comment.as_deref()) {
                QuakeEvent::ForeignEruption(EruptionReport {
                    header: report.header,
                    comment,
                })
            } else {
                QuakeEvent::ForeignQuake(report)
            }
        }
        _ => QuakeEvent::Other(report),
    }
}

/// A foreign report without a hypocenter name whose comment mentions an
/// eruption describes a volcanic event rather than an earthquake.
fn is_eruption(report: &QuakeReport, comment: Option<&str>) -> bool {
    report.hypocenter.name.is_none() && comment.is_some_and(|c| c.contains(ERUPTION_KEYWORD))
}

fn tsunami(record: &Value) -> QuakeEvent {
    let header = header(record, &["issue", "time"]);
    let areas = array(record, &["areas"])
        .iter()
        .filter_map(|a| {
            let condition = text(a, &["firstHeight", "condition"]);
            let height = text(a, &["maxHeight", "description"]).map(|h| format!("予想高さ {}", h));
            let extra = match (condition, height) {
                (Some(c), Some(h)) => Some(format!("{} {}", c, h)),
                (c, h) => c.or(h),
            };
            Some(TsunamiArea {
                grade: TsunamiGrade::parse(&text(a, &["grade"]).unwrap_or_default()),
                immediate: flag(a, &["immediate"]),
                arrival: AreaArrival {
                    location: text(a, &["name"])?,
                    arrival_time: text(a, &["firstHeight", "arrivalTime"]),
                    extra,
                },
            })
        })
        .collect();

    let report = TsunamiReport { header, areas };
    if flag(record, &["cancelled"]) {
        QuakeEvent::TsunamiCancel(report)
    } else {
        QuakeEvent::TsunamiAdvisory(report)
    }
}

/// The feed only relays early warnings of the warning class.
fn early_warning(record: &Value) -> Routed {
    let serial = text(record, &["issue", "serial"]);
    if flag(record, &["cancelled"]) {
        return Routed::Cancel(EewCancellation {
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            serial,
        });
    }

    let areas = array(record, &["areas"]);
    let max_scale = areas.iter().filter_map(|a| integer(a, &["scaleFrom"])).max();
    let warned = areas
        .iter()
        .filter_map(|a| {
            Some(AreaArrival {
                location: text(a, &["name"])?,
                arrival_time: text(a, &["arrivalTime"]),
                extra: None,
            })
        })
        .collect();

    Routed::Event(QuakeEvent::EarlyWarning(EarlyWarning {
        header: ReportHeader {
            source_label: DEFAULT_SOURCE_LABEL.to_string(),
            occurrence_time: text(record, &["earthquake", "originTime"]),
        },
        serial,
        is_warning: true,
        is_final: false,
        is_assumption: text(record, &["earthquake", "condition"]).as_deref()
            == Some(ASSUMED_CONDITION),
        hypocenter: hypocenter(record, &["earthquake", "hypocenter"]),
        max_intensity: observed(max_scale),
        accuracy: None,
        areas: warned,
    }))
}
