//! Early-warning filter.

use std::str::FromStr;

use crate::error::RouterError;

/// Which early warnings are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EewFilter {
    /// Publish every early warning.
    #[default]
    All,
    /// Publish none.
    None,
    /// Only warnings (`isWarn = true`).
    WarningOnly,
    /// Only forecasts (`isWarn = false`).
    ForecastOnly,
}

impl EewFilter {
    /// Parse an optional setting; unset or blank means [`EewFilter::All`].
    pub fn from_setting(value: Option<&str>) -> Result<Self, RouterError> {
        match value.map(str::trim) {
            None | Some("") => Ok(EewFilter::All),
            Some(v) => v.parse(),
        }
    }

    /// Whether an early warning with the given warning flag passes.
    pub fn allows(&self, is_warning: bool) -> bool {
        match self {
            EewFilter::All => true,
            EewFilter::None => false,
            EewFilter::WarningOnly => is_warning,
            EewFilter::ForecastOnly => !is_warning,
        }
    }

    /// Whether cancellation notices pass. Only `None` suppresses them.
    pub fn allows_cancellation(&self) -> bool {
        *self != EewFilter::None
    }
}

impl FromStr for EewFilter {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(EewFilter::All),
            "none" => Ok(EewFilter::None),
            "warning" => Ok(EewFilter::WarningOnly),
            "forecast" => Ok(EewFilter::ForecastOnly),
            _ => Err(RouterError::InvalidFilter(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_setting() {
        assert_eq!(EewFilter::from_setting(None).unwrap(), EewFilter::All);
        assert_eq!(EewFilter::from_setting(Some(" ")).unwrap(), EewFilter::All);
        assert_eq!(EewFilter::from_setting(Some("None")).unwrap(), EewFilter::None);
        assert_eq!(
            EewFilter::from_setting(Some("Warning")).unwrap(),
            EewFilter::WarningOnly
        );
        assert_eq!(
            EewFilter::from_setting(Some("forecast")).unwrap(),
            EewFilter::ForecastOnly
        );
        assert!(EewFilter::from_setting(Some("loud")).is_err());
    }

    #[test]
    fn test_allows() {
        assert!(EewFilter::All.allows(true) && EewFilter::All.allows(false));
        assert!(!EewFilter::None.allows(true) && !EewFilter::None.allows(false));
        assert!(EewFilter::WarningOnly.allows(true));
        assert!(!EewFilter::WarningOnly.allows(false));
        assert!(EewFilter::ForecastOnly.allows(false));
        assert!(!EewFilter::ForecastOnly.allows(true));
    }

    #[test]
    fn test_cancellation() {
        assert!(!EewFilter::None.allows_cancellation());
        assert!(EewFilter::WarningOnly.allows_cancellation());
    }
}
