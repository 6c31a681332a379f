//! Normalized seismic events.
//!
//! Every event is built once by a router from a single feed record and then
//! handed to the formatter. Missing upstream values are carried as `None`
//! (or [`Depth::Unknown`] / [`RawIntensity::Unknown`]) and render as `不明`.

use std::fmt;

use crate::intensity::RawIntensity;
use crate::tsunami::{TsunamiGrade, TsunamiStatus};

/// Placeholder rendered for any value the feed did not provide.
pub const UNKNOWN: &str = "不明";

/// Hypocenter depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    Unknown,
    /// Reported as 0 km.
    VeryShallow,
    Km(u32),
}

impl Depth {
    /// Interpret a depth in kilometres. Negative values mean unknown.
    pub fn from_km(km: i64) -> Self {
        match km {
            0 => Depth::VeryShallow,
            n if n < 0 => Depth::Unknown,
            n => Depth::Km(u32::try_from(n).unwrap_or(u32::MAX)),
        }
    }

    /// Depth in kilometres, if known.
    pub fn km(&self) -> Option<u32> {
        match self {
            Depth::Unknown => None,
            Depth::VeryShallow => Some(0),
            Depth::Km(n) => Some(*n),
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Unknown => f.write_str(UNKNOWN),
            Depth::VeryShallow => f.write_str("ごく浅い"),
            Depth::Km(n) => write!(f, "{}km", n),
        }
    }
}

/// Origin point and size of an earthquake.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypocenter {
    pub name: Option<String>,
    pub magnitude: Option<f64>,
    pub depth: Depth,
}

impl Hypocenter {
    pub fn unknown() -> Self {
        Self {
            name: None,
            magnitude: None,
            depth: Depth::Unknown,
        }
    }

    pub fn name_or_unknown(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }

    /// Magnitude as `M6.0`, or `不明`.
    pub fn magnitude_text(&self) -> String {
        match self.magnitude {
            Some(m) => format!("M{:.1}", m),
            None => UNKNOWN.to_string(),
        }
    }
}

/// Fields shared by every report issued by an authority.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportHeader {
    /// Issuing authority, shown in the footer.
    pub source_label: String,
    pub occurrence_time: Option<String>,
}

impl ReportHeader {
    pub fn time_or_unknown(&self) -> &str {
        self.occurrence_time.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Observed intensity at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityPoint {
    pub location: String,
    pub intensity: RawIntensity,
}

/// Expected arrival at one forecast area.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaArrival {
    pub location: String,
    pub arrival_time: Option<String>,
    pub extra: Option<String>,
}

/// Intensity flash report: where shaking was observed, before the hypocenter is known.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityReport {
    pub header: ReportHeader,
    pub max_intensity: RawIntensity,
    pub tsunami: Option<TsunamiStatus>,
    pub points: Vec<IntensityPoint>,
}

/// Report with a hypocenter (source info, detailed info, foreign and other reports).
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeReport {
    pub header: ReportHeader,
    pub hypocenter: Hypocenter,
    pub max_intensity: RawIntensity,
    pub tsunami: Option<TsunamiStatus>,
}

/// Overseas volcanic eruption notice.
#[derive(Debug, Clone, PartialEq)]
pub struct EruptionReport {
    pub header: ReportHeader,
    pub comment: Option<String>,
}

/// Accuracy descriptors attached to an early warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Accuracy {
    pub epicenter: Option<String>,
    pub depth: Option<String>,
    pub magnitude: Option<String>,
}

/// Early warning issued before strong shaking arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct EarlyWarning {
    pub header: ReportHeader,
    pub serial: Option<String>,
    /// Warning (`警報`) rather than forecast (`予報`).
    pub is_warning: bool,
    pub is_final: bool,
    /// Hypocenter was estimated with the assumed-hypocenter method.
    pub is_assumption: bool,
    pub hypocenter: Hypocenter,
    pub max_intensity: RawIntensity,
    pub accuracy: Option<Accuracy>,
    pub areas: Vec<AreaArrival>,
}

/// Tsunami forecast area entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TsunamiArea {
    pub grade: TsunamiGrade,
    pub immediate: bool,
    pub arrival: AreaArrival,
}

/// Tsunami advisory or its cancellation.
#[derive(Debug, Clone, PartialEq)]
pub struct TsunamiReport {
    pub header: ReportHeader,
    pub areas: Vec<TsunamiArea>,
}

impl TsunamiReport {
    /// Strongest grade across all areas.
    pub fn highest_grade(&self) -> TsunamiGrade {
        self.areas
            .iter()
            .map(|a| a.grade)
            .max()
            .unwrap_or(TsunamiGrade::Unknown)
    }
}

/// Cancellation of a previously issued early warning.
#[derive(Debug, Clone, PartialEq)]
pub struct EewCancellation {
    pub source_label: String,
    pub serial: Option<String>,
}

/// Field-less kind of a [`QuakeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    IntensityReport,
    SourceInfo,
    DetailedInfo,
    ForeignQuake,
    ForeignEruption,
    EarlyWarning,
    TsunamiAdvisory,
    TsunamiCancel,
    Other,
}

/// One normalized seismic information update.
#[derive(Debug, Clone, PartialEq)]
pub enum QuakeEvent {
    IntensityReport(IntensityReport),
    SourceInfo(QuakeReport),
    DetailedInfo(QuakeReport),
    ForeignQuake(QuakeReport),
    ForeignEruption(EruptionReport),
    EarlyWarning(EarlyWarning),
    TsunamiAdvisory(TsunamiReport),
    TsunamiCancel(TsunamiReport),
    Other(QuakeReport),
}

impl QuakeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            QuakeEvent::IntensityReport(_) => EventKind::IntensityReport,
            QuakeEvent::SourceInfo(_) => EventKind::SourceInfo,
            QuakeEvent::DetailedInfo(_) => EventKind::DetailedInfo,
            QuakeEvent::ForeignQuake(_) => EventKind::ForeignQuake,
            QuakeEvent::ForeignEruption(_) => EventKind::ForeignEruption,
            QuakeEvent::EarlyWarning(_) => EventKind::EarlyWarning,
            QuakeEvent::TsunamiAdvisory(_) => EventKind::TsunamiAdvisory,
            QuakeEvent::TsunamiCancel(_) => EventKind::TsunamiCancel,
            QuakeEvent::Other(_) => EventKind::Other,
        }
    }

    pub fn header(&self) -> &ReportHeader {
        match self {
            QuakeEvent::IntensityReport(r) => &r.header,
            QuakeEvent::SourceInfo(r)
            | QuakeEvent::DetailedInfo(r)
            | QuakeEvent::ForeignQuake(r)
            | QuakeEvent::Other(r) => &r.header,
            QuakeEvent::ForeignEruption(r) => &r.header,
            QuakeEvent::EarlyWarning(w) => &w.header,
            QuakeEvent::TsunamiAdvisory(r) | QuakeEvent::TsunamiCancel(r) => &r.header,
        }
    }

    /// Maximum intensity carried by the event, `Unknown` for kinds without one.
    pub fn max_intensity(&self) -> RawIntensity {
        match self {
            QuakeEvent::IntensityReport(r) => r.max_intensity.clone(),
            QuakeEvent::SourceInfo(r)
            | QuakeEvent::DetailedInfo(r)
            | QuakeEvent::ForeignQuake(r)
            | QuakeEvent::Other(r) => r.max_intensity.clone(),
            QuakeEvent::EarlyWarning(w) => w.max_intensity.clone(),
            QuakeEvent::ForeignEruption(_)
            | QuakeEvent::TsunamiAdvisory(_)
            | QuakeEvent::TsunamiCancel(_) => RawIntensity::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_from_km() {
        assert_eq!(Depth::from_km(0), Depth::VeryShallow);
        assert_eq!(Depth::from_km(-1), Depth::Unknown);
        assert_eq!(Depth::from_km(10), Depth::Km(10));
        assert_eq!(Depth::from_km(10).to_string(), "10km");
        assert_eq!(Depth::VeryShallow.to_string(), "ごく浅い");
        assert_eq!(Depth::Unknown.to_string(), "不明");
    }

    #[test]
    fn test_magnitude_text() {
        let mut hypo = Hypocenter::unknown();
        assert_eq!(hypo.magnitude_text(), "不明");
        hypo.magnitude = Some(5.0);
        assert_eq!(hypo.magnitude_text(), "M5.0");
    }

    #[test]
    fn test_highest_tsunami_grade() {
        let area = |grade| TsunamiArea {
            grade,
            immediate: false,
            arrival: AreaArrival {
                location: "x".to_string(),
                arrival_time: None,
                extra: None,
            },
        };
        let report = TsunamiReport {
            header: ReportHeader {
                source_label: "気象庁".to_string(),
                occurrence_time: None,
            },
            areas: vec![area(TsunamiGrade::Watch), area(TsunamiGrade::Warning)],
        };
        assert_eq!(report.highest_grade(), TsunamiGrade::Warning);
    }
}
