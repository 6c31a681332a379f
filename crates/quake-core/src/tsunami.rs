//! Tsunami status and grade tables.

use serde::Serialize;

/// Domestic tsunami status attached to an earthquake report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TsunamiStatus {
    None,
    Unknown,
    Checking,
    NonEffective,
    Watch,
    Warning,
}

impl TsunamiStatus {
    /// Parse the feed value. Unrecognized values mean the status is unset.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "None" => Some(Self::None),
            "Unknown" => Some(Self::Unknown),
            "Checking" => Some(Self::Checking),
            "NonEffective" => Some(Self::NonEffective),
            "Watch" => Some(Self::Watch),
            "Warning" => Some(Self::Warning),
            _ => None,
        }
    }

    /// Advisory sentence appended to a report body.
    pub fn clause(&self) -> &'static str {
        match self {
            Self::None => "この地震による津波の心配はありません。",
            Self::Unknown => "津波の有無は不明です。",
            Self::Checking => "津波の有無については、現在調査中です。",
            Self::NonEffective => "若干の海面変動が予想されますが、被害の心配はありません。",
            Self::Watch => "現在、この地震による津波注意報を発表中です。",
            Self::Warning => "現在、この地震による津波警報等を発表中です。",
        }
    }
}

/// Grade of a tsunami forecast area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum TsunamiGrade {
    Unknown,
    Watch,
    Warning,
    MajorWarning,
}

impl TsunamiGrade {
    /// Parse the feed value, falling back to `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "MajorWarning" => Self::MajorWarning,
            "Warning" => Self::Warning,
            "Watch" => Self::Watch,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MajorWarning => "大津波警報",
            Self::Warning => "津波警報",
            Self::Watch => "津波注意報",
            Self::Unknown => "不明",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            Self::MajorWarning => 0x9e00ff,
            Self::Warning => 0xff0000,
            Self::Watch => 0xe6d53c,
            Self::Unknown => 0x515b63,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(TsunamiStatus::parse("None"), Some(TsunamiStatus::None));
        assert_eq!(TsunamiStatus::parse("Checking"), Some(TsunamiStatus::Checking));
        assert_eq!(TsunamiStatus::parse(""), None);
        assert_eq!(TsunamiStatus::parse("none"), None);
    }

    #[test]
    fn test_status_clauses_are_distinct() {
        let all = [
            TsunamiStatus::None,
            TsunamiStatus::Unknown,
            TsunamiStatus::Checking,
            TsunamiStatus::NonEffective,
            TsunamiStatus::Watch,
            TsunamiStatus::Warning,
        ];
        let mut clauses: Vec<_> = all.iter().map(|s| s.clause()).collect();
        clauses.sort();
        clauses.dedup();
        assert_eq!(clauses.len(), 6);
    }

    #[test]
    fn test_grade_ordering() {
        assert!(TsunamiGrade::MajorWarning > TsunamiGrade::Warning);
        assert!(TsunamiGrade::Warning > TsunamiGrade::Watch);
        assert_eq!(TsunamiGrade::parse("Bogus"), TsunamiGrade::Unknown);
    }
}
