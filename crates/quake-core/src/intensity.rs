//! Seismic intensity classification.
//!
//! The two upstream feeds report maximum intensity on different scales:
//!
//! - the observation feed uses an integer scale multiplied by ten
//!   (`45` is 5弱, `50` is 5強, `70` is 7),
//! - the early-warning feed uses the symbolic JMA classes (`"5弱"`, `"6強"`).
//!
//! Both are kept as separate variants of [`RawIntensity`] and classified by
//! their own rules. There is no conversion between them.

use serde::Serialize;

/// Raw maximum-intensity value as it arrived from a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawIntensity {
    /// Observed intensity, integer scale ×10.
    Observed(i64),
    /// Forecast intensity class symbol.
    Forecast(String),
    /// The feed did not carry a usable value.
    Unknown,
}

impl RawIntensity {
    /// Create a forecast intensity from a feed symbol.
    pub fn forecast(symbol: impl Into<String>) -> Self {
        Self::Forecast(symbol.into())
    }

    /// Classify this value into an intensity band.
    pub fn classify(&self) -> Classification {
        classify(self)
    }
}

/// Discretized shaking-severity category, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum IntensityBand {
    Unknown,
    One,
    Two,
    Three,
    Four,
    FiveLower,
    FiveUpper,
    SixLower,
    SixUpper,
    Seven,
}

/// All bands in ascending order.
pub const BANDS: [IntensityBand; 10] = [
    IntensityBand::Unknown,
    IntensityBand::One,
    IntensityBand::Two,
    IntensityBand::Three,
    IntensityBand::Four,
    IntensityBand::FiveLower,
    IntensityBand::FiveUpper,
    IntensityBand::SixLower,
    IntensityBand::SixUpper,
    IntensityBand::Seven,
];

/// Observed-scale thresholds, strongest first.
const OBSERVED_LADDER: [(i64, IntensityBand); 9] = [
    (70, IntensityBand::Seven),
    (60, IntensityBand::SixUpper),
    (55, IntensityBand::SixLower),
    (50, IntensityBand::FiveUpper),
    (45, IntensityBand::FiveLower),
    (40, IntensityBand::Four),
    (30, IntensityBand::Three),
    (20, IntensityBand::Two),
    (10, IntensityBand::One),
];

impl IntensityBand {
    /// Band for an observed value on the ×10 scale.
    pub fn from_observed(value: i64) -> Self {
        OBSERVED_LADDER
            .iter()
            .find(|(threshold, _)| value >= *threshold)
            .map(|(_, band)| *band)
            .unwrap_or(IntensityBand::Unknown)
    }

    /// Band for a forecast class symbol. Only exact symbols match.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            "1" => IntensityBand::One,
            "2" => IntensityBand::Two,
            "3" => IntensityBand::Three,
            "4" => IntensityBand::Four,
            "5弱" => IntensityBand::FiveLower,
            "5強" => IntensityBand::FiveUpper,
            "6弱" => IntensityBand::SixLower,
            "6強" => IntensityBand::SixUpper,
            "7" => IntensityBand::Seven,
            _ => IntensityBand::Unknown,
        }
    }

    /// Display label, e.g. `5強`.
    pub fn label(&self) -> &'static str {
        match self {
            IntensityBand::Unknown => "不明",
            IntensityBand::One => "1",
            IntensityBand::Two => "2",
            IntensityBand::Three => "3",
            IntensityBand::Four => "4",
            IntensityBand::FiveLower => "5弱",
            IntensityBand::FiveUpper => "5強",
            IntensityBand::SixLower => "6弱",
            IntensityBand::SixUpper => "6強",
            IntensityBand::Seven => "7",
        }
    }

    /// Embed color for the band.
    pub fn color(&self) -> u32 {
        match self {
            IntensityBand::Seven => 0x9e00ff,
            IntensityBand::SixUpper => 0xff0000,
            IntensityBand::SixLower => 0xe52020,
            IntensityBand::FiveUpper => 0xe58a20,
            IntensityBand::FiveLower => 0xe3a631,
            IntensityBand::Four => 0xe6d53c,
            IntensityBand::Three => 0x41ab45,
            IntensityBand::Two => 0x4178ab,
            IntensityBand::One | IntensityBand::Unknown => 0x515b63,
        }
    }

    /// Image tag (attachment file name) for the band.
    pub fn image_tag(&self) -> &'static str {
        match self {
            IntensityBand::Seven => "shindo7.png",
            IntensityBand::SixUpper => "shindo6.png",
            IntensityBand::SixLower => "shindo55.png",
            IntensityBand::FiveUpper => "shindo5.png",
            IntensityBand::FiveLower => "shindo45.png",
            IntensityBand::Four => "shindo4.png",
            IntensityBand::Three => "shindo3.png",
            IntensityBand::Two => "shindo2.png",
            IntensityBand::One => "shindo1.png",
            IntensityBand::Unknown => "unknown.png",
        }
    }

    /// True for 6弱 and above.
    pub fn is_severe(&self) -> bool {
        *self >= IntensityBand::SixLower
    }
}

/// Result of classifying a raw intensity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub band: IntensityBand,
    pub label: &'static str,
    pub color: u32,
    pub image_tag: &'static str,
}

impl From<IntensityBand> for Classification {
    fn from(band: IntensityBand) -> Self {
        Self {
            band,
            label: band.label(),
            color: band.color(),
            image_tag: band.image_tag(),
        }
    }
}

/// Classify a raw intensity value. Total: every input has an output.
pub fn classify(raw: &RawIntensity) -> Classification {
    let band = match raw {
        RawIntensity::Observed(value) => IntensityBand::from_observed(*value),
        RawIntensity::Forecast(symbol) => IntensityBand::from_symbol(symbol),
        RawIntensity::Unknown => IntensityBand::Unknown,
    };
    Classification::from(band)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_below_one_is_unknown() {
        for value in [-1, 0, 5, 9] {
            assert_eq!(IntensityBand::from_observed(value), IntensityBand::Unknown);
        }
    }

    #[test]
    fn test_observed_ladder_is_monotonic() {
        let mut previous = IntensityBand::Unknown;
        for value in -10..=120 {
            let band = IntensityBand::from_observed(value);
            assert!(band >= previous, "band dropped at {}", value);
            previous = band;
        }
        assert_eq!(previous, IntensityBand::Seven);
    }

    #[test]
    fn test_observed_thresholds() {
        assert_eq!(IntensityBand::from_observed(10).label(), "1");
        assert_eq!(IntensityBand::from_observed(40).label(), "4");
        assert_eq!(IntensityBand::from_observed(45).label(), "5弱");
        assert_eq!(IntensityBand::from_observed(46).label(), "5弱");
        assert_eq!(IntensityBand::from_observed(50).label(), "5強");
        assert_eq!(IntensityBand::from_observed(55).label(), "6弱");
        assert_eq!(IntensityBand::from_observed(60).label(), "6強");
        assert_eq!(IntensityBand::from_observed(70).label(), "7");
    }

    #[test]
    fn test_forecast_symbols_exact_match() {
        let expected = [
            ("1", IntensityBand::One),
            ("2", IntensityBand::Two),
            ("3", IntensityBand::Three),
            ("4", IntensityBand::Four),
            ("5弱", IntensityBand::FiveLower),
            ("5強", IntensityBand::FiveUpper),
            ("6弱", IntensityBand::SixLower),
            ("6強", IntensityBand::SixUpper),
            ("7", IntensityBand::Seven),
        ];
        for (symbol, band) in expected {
            assert_eq!(classify(&RawIntensity::forecast(symbol)).band, band);
        }
    }

    #[test]
    fn test_forecast_rejects_non_symbols() {
        for symbol in ["0", "5", "6", "4.5", "5-", "不明", "", "50"] {
            assert_eq!(
                classify(&RawIntensity::forecast(symbol)).band,
                IntensityBand::Unknown,
                "{} should not match",
                symbol
            );
        }
    }

    #[test]
    fn test_unknown_maps_to_gray() {
        let c = classify(&RawIntensity::Unknown);
        assert_eq!(c.label, "不明");
        assert_eq!(c.color, 0x515b63);
        assert_eq!(c.image_tag, "unknown.png");
    }

    #[test]
    fn test_severe_bands() {
        let severe: Vec<_> = BANDS.iter().filter(|b| b.is_severe()).collect();
        assert_eq!(
            severe,
            vec![
                &IntensityBand::SixLower,
                &IntensityBand::SixUpper,
                &IntensityBand::Seven
            ]
        );
    }
}
