//! Notification rendering for normalized events.
//!
//! Output depends only on the event, its classification and the active
//! [`FormatOptions`].

use crate::event::{
    AreaArrival, EarlyWarning, EewCancellation, EruptionReport, IntensityPoint, IntensityReport,
    QuakeEvent, QuakeReport, TsunamiReport, UNKNOWN,
};
use crate::intensity::Classification;
use crate::notification::{EmbedField, RenderedNotification};
use crate::tsunami::{TsunamiGrade, TsunamiStatus};

/// Appended when the expected or observed intensity is 6弱 or stronger.
pub const SPECIAL_WARNING_CLAUSE: &str =
    "非常に強い揺れが予想されます。身の安全を確保し、落ち着いて行動してください。";

/// Appended to early warnings at least [`DEEP_FOCUS_THRESHOLD_KM`] deep.
pub const DEEP_FOCUS_CLAUSE: &str =
    "震源が深いため、震央から離れた広い範囲で揺れが大きくなる可能性があります。";

/// Appended to early warnings estimated with the assumed-hypocenter method.
pub const ASSUMED_HYPOCENTER_CLAUSE: &str =
    "この情報は仮定震源要素によるもので、震源や規模の精度が低い可能性があります。";

/// First body line of every notification rendered from replayed data.
pub const TEST_DATA_BANNER: &str = "※これは実際の地震ではありません（テストデータ）。";

pub const TEST_DATA_TITLE_PREFIX: &str = "【テストデータ】";

pub const DEEP_FOCUS_THRESHOLD_KM: u32 = 150;

/// Maximum length of a field value accepted by the destination.
pub const FIELD_VALUE_LIMIT: usize = 1024;

const WARNING_COLOR: u32 = 0xff0000;
const FORECAST_COLOR: u32 = 0xffd700;
const NEUTRAL_COLOR: u32 = 0x515b63;

/// Formatter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Name shown in the footer.
    pub bot_name: String,
    /// Version shown in the footer.
    pub version: String,
    /// Include accuracy fields in early warnings.
    pub show_accuracy: bool,
    /// Mark output as test data.
    pub test_data: bool,
}

impl FormatOptions {
    pub fn new(bot_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            bot_name: bot_name.into(),
            version: version.into(),
            show_accuracy: false,
            test_data: false,
        }
    }

    pub fn with_accuracy(mut self, show_accuracy: bool) -> Self {
        self.show_accuracy = show_accuracy;
        self
    }

    /// Copy of these options for the replay path.
    pub fn for_test_data(&self) -> Self {
        Self {
            test_data: true,
            ..self.clone()
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new("QuakeBot", "0.0.0")
    }
}

/// Intermediate rendering before footer and banner are applied.
struct Draft {
    title: String,
    lines: Vec<String>,
    fields: Vec<EmbedField>,
    color: u32,
    image: Option<String>,
    silent: bool,
}

impl Draft {
    fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            fields: Vec::new(),
            color,
            image: None,
            silent: false,
        }
    }

    fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn tsunami(&mut self, status: Option<TsunamiStatus>) {
        if let Some(status) = status {
            self.line(status.clause());
        }
    }
}

/// Renders events into notifications.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Classify the event's maximum intensity and render it.
    pub fn render(&self, event: &QuakeEvent) -> RenderedNotification {
        let classification = event.max_intensity().classify();
        self.format(event, &classification)
    }

    /// Render an event with a precomputed classification.
    pub fn format(
        &self,
        event: &QuakeEvent,
        classification: &Classification,
    ) -> RenderedNotification {
        let mut draft = match event {
            QuakeEvent::IntensityReport(r) => self.intensity_report(r, classification),
            QuakeEvent::SourceInfo(r) => self.source_info(r, classification),
            QuakeEvent::DetailedInfo(r) => self.detailed_info(r, classification),
            QuakeEvent::ForeignQuake(r) => self.foreign_quake(r, classification),
            QuakeEvent::ForeignEruption(r) => self.foreign_eruption(r),
            QuakeEvent::EarlyWarning(w) => self.early_warning(w, classification),
            QuakeEvent::TsunamiAdvisory(r) => self.tsunami_advisory(r),
            QuakeEvent::TsunamiCancel(r) => self.tsunami_cancel(r),
            QuakeEvent::Other(r) => self.other(r, classification),
        };

        if classification.band.is_severe() {
            draft.line(SPECIAL_WARNING_CLAUSE);
        }

        self.finish(draft, &event.header().source_label)
    }

    /// Render the notice sent when an early warning is withdrawn.
    pub fn format_cancellation(&self, cancel: &EewCancellation) -> RenderedNotification {
        let mut draft = Draft::new(
            format!(
                "緊急地震速報 第{}報【取消】",
                cancel.serial.as_deref().unwrap_or(UNKNOWN)
            ),
            NEUTRAL_COLOR,
        );
        draft.line("先ほどの緊急地震速報は取り消されました。");
        draft.silent = true;
        self.finish(draft, &cancel.source_label)
    }

    /// Notice published before a replay run starts.
    pub fn test_banner(&self) -> RenderedNotification {
        RenderedNotification {
            title: "実際の地震ではありません".to_string(),
            body: "テストデータの送信を開始します。".to_string(),
            fields: Vec::new(),
            color: FORECAST_COLOR,
            image: None,
            footer: self.footer("テスト"),
            silent: true,
        }
    }

    fn finish(&self, mut draft: Draft, source_label: &str) -> RenderedNotification {
        if self.options.test_data {
            draft.title = format!("{}{}", TEST_DATA_TITLE_PREFIX, draft.title);
            draft.lines.insert(0, TEST_DATA_BANNER.to_string());
            draft.silent = true;
        }

        RenderedNotification {
            title: draft.title,
            body: draft.lines.join("\n"),
            fields: draft.fields,
            color: draft.color,
            image: draft.image,
            footer: self.footer(source_label),
            silent: draft.silent,
        }
    }

    fn footer(&self, source_label: &str) -> String {
        format!(
            "{}・{} | Version {}",
            self.options.bot_name, source_label, self.options.version
        )
    }

    fn intensity_report(&self, r: &IntensityReport, c: &Classification) -> Draft {
        let mut draft = Draft::new("🌍 震度速報", c.color);
        draft.image = Some(c.image_tag.to_string());
        draft.line(format!("{}ごろ、", r.header.time_or_unknown()));
        draft.line(format!("最大震度{}を観測する地震が発生しました。", c.label));
        draft.tsunami(r.tsunami);
        draft.line("今後の情報に注意してください。");
        draft
            .fields
            .push(EmbedField::block("震度情報", points_text(&r.points)));
        draft
    }

    fn source_info(&self, r: &QuakeReport, c: &Classification) -> Draft {
        let mut draft = Draft::new("🌍 震源情報", c.color);
        draft.image = Some(c.image_tag.to_string());
        draft.line(format!("{}ごろ、地震がありました。", r.header.time_or_unknown()));
        draft.tsunami(r.tsunami);
        draft.fields = hypocenter_fields("震源", r);
        draft
    }

    fn detailed_info(&self, r: &QuakeReport, c: &Classification) -> Draft {
        let mut draft = Draft::new("🌍 地震情報", c.color);
        draft.image = Some(c.image_tag.to_string());
        draft.line(format!("{}ごろ、", r.header.time_or_unknown()));
        draft.line(format!(
            "{}で最大震度{}の地震がありました。",
            r.hypocenter.name_or_unknown(),
            c.label
        ));
        draft.tsunami(r.tsunami);
        draft.fields = hypocenter_fields("震央", r);
        draft
    }

    fn foreign_quake(&self, r: &QuakeReport, c: &Classification) -> Draft {
        let mut draft = Draft::new("🌍 遠地地震情報", c.color);
        draft.image = Some(c.image_tag.to_string());
        draft.line(format!("{}ごろ、", r.header.time_or_unknown()));
        draft.line("遠地で地震がありました。");
        draft.tsunami(r.tsunami);
        draft.fields = hypocenter_fields("震央", r);
        draft
    }

    fn foreign_eruption(&self, r: &EruptionReport) -> Draft {
        let mut draft = Draft::new("🌋 遠地噴火情報", NEUTRAL_COLOR);
        draft.line(format!("{}ごろ、", r.header.time_or_unknown()));
        draft.line("海外で大規模な噴火がありました。");
        if let Some(comment) = r.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            draft
                .fields
                .push(EmbedField::block("情報", truncate(comment, FIELD_VALUE_LIMIT)));
        }
        draft
    }

    fn other(&self, r: &QuakeReport, c: &Classification) -> Draft {
        let mut draft = Draft::new("🌍 地震情報", c.color);
        draft.image = Some(c.image_tag.to_string());
        draft.line(format!("{}ごろ、", r.header.time_or_unknown()));
        draft.line("地震がありました。");
        draft.tsunami(r.tsunami);
        draft
    }

    fn early_warning(&self, w: &EarlyWarning, c: &Classification) -> Draft {
        let mut title = format!(
            "緊急地震速報（{}）第{}報",
            if w.is_warning { "警報" } else { "予報" },
            w.serial.as_deref().unwrap_or(UNKNOWN)
        );
        if w.is_final {
            title.push_str("【最終報】");
        }

        let color = if w.is_warning {
            WARNING_COLOR
        } else {
            FORECAST_COLOR
        };
        let mut draft = Draft::new(title, color);
        draft.image = Some(c.image_tag.to_string());

        draft.line(format!(
            "{}ごろ、{}で地震が発生しました。",
            w.header.time_or_unknown(),
            w.hypocenter.name_or_unknown()
        ));
        draft.line(format!("予想最大震度は{}です。", c.label));
        if w.is_assumption {
            draft.line(ASSUMED_HYPOCENTER_CLAUSE);
        }
        if is_deep_focus(w) {
            draft.line(DEEP_FOCUS_CLAUSE);
        }

        draft.fields.push(EmbedField::inline(
            "推定震源地",
            w.hypocenter.name_or_unknown(),
        ));
        draft
            .fields
            .push(EmbedField::inline("マグニチュード", w.hypocenter.magnitude_text()));
        draft
            .fields
            .push(EmbedField::inline("深さ", w.hypocenter.depth.to_string()));

        if self.options.show_accuracy {
            let accuracy = w.accuracy.as_ref();
            draft.fields.push(EmbedField::inline(
                "震源の精度",
                or_unknown(accuracy.and_then(|a| a.epicenter.as_deref())),
            ));
            draft.fields.push(EmbedField::inline(
                "深さの精度",
                or_unknown(accuracy.and_then(|a| a.depth.as_deref())),
            ));
            draft.fields.push(EmbedField::inline(
                "マグニチュードの精度",
                or_unknown(accuracy.and_then(|a| a.magnitude.as_deref())),
            ));
        }

        draft
            .fields
            .push(EmbedField::block("警報区域", warned_areas_text(&w.areas)));
        draft
    }

    fn tsunami_advisory(&self, r: &TsunamiReport) -> Draft {
        let highest = r.highest_grade();
        let mut draft = Draft::new("🌊 津波情報", highest.color());

        let mut grades: Vec<TsunamiGrade> = r
            .areas
            .iter()
            .map(|a| a.grade)
            .filter(|g| *g != TsunamiGrade::Unknown)
            .collect();
        grades.sort_by(|a, b| b.cmp(a));
        grades.dedup();

        draft.line(format!("{}発表", r.header.time_or_unknown()));
        if grades.is_empty() {
            draft.line("津波予報を発表しています。");
        } else {
            let labels: Vec<&str> = grades.iter().map(|g| g.label()).collect();
            draft.line(format!("{}を発表しています。", labels.join("・")));
        }
        if r.areas.iter().any(|a| a.immediate) {
            draft.line("ただちに津波が来襲すると予想される区域があります。");
        }
        if highest >= TsunamiGrade::Warning {
            draft.line("海岸や川の河口付近から離れ、高台などの安全な場所へ避難してください。");
        }

        let lines: Vec<String> = r
            .areas
            .iter()
            .map(|area| {
                let mut line = format!("{}: {}", area.arrival.location, area.grade.label());
                if area.immediate {
                    line.push_str("（ただちに来襲）");
                } else if let Some(time) = &area.arrival.arrival_time {
                    line.push_str(&format!(" 到達予想 {}", time));
                }
                if let Some(extra) = &area.arrival.extra {
                    line.push_str(&format!(" {}", extra));
                }
                line
            })
            .collect();
        draft.fields.push(EmbedField::block(
            "津波予報区",
            join_limited(&lines, FIELD_VALUE_LIMIT, "区域"),
        ));
        draft
    }

    fn tsunami_cancel(&self, r: &TsunamiReport) -> Draft {
        let mut draft = Draft::new("🌊 津波情報（解除）", NEUTRAL_COLOR);
        draft.line(format!("{}発表", r.header.time_or_unknown()));
        draft.line("津波予報等はすべて解除されました。");
        draft.silent = true;
        draft
    }
}

/// True when an early warning's hypocenter is at least 150 km deep.
pub fn is_deep_focus(warning: &EarlyWarning) -> bool {
    warning
        .hypocenter
        .depth
        .km()
        .is_some_and(|km| km >= DEEP_FOCUS_THRESHOLD_KM)
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

fn hypocenter_fields(place_label: &str, r: &QuakeReport) -> Vec<EmbedField> {
    vec![
        EmbedField::inline(place_label, r.hypocenter.name_or_unknown()),
        EmbedField::inline("マグニチュード", r.hypocenter.magnitude_text()),
        EmbedField::inline("深さ", r.hypocenter.depth.to_string()),
    ]
}

fn points_text(points: &[IntensityPoint]) -> String {
    if points.is_empty() {
        return "発表なし".to_string();
    }
    let lines: Vec<String> = points
        .iter()
        .map(|p| format!("{}: 震度{}", p.location, p.intensity.classify().label))
        .collect();
    join_limited(&lines, FIELD_VALUE_LIMIT, "地点")
}

fn warned_areas_text(areas: &[AreaArrival]) -> String {
    if areas.is_empty() {
        return "発表なし".to_string();
    }
    let names: Vec<&str> = areas.iter().map(|a| a.location.as_str()).collect();
    truncate(&names.join(", "), FIELD_VALUE_LIMIT)
}

/// Join lines with newlines, dropping trailing lines that do not fit.
fn join_limited(lines: &[String], limit: usize, unit: &str) -> String {
    let mut out = String::new();
    let mut used = 0;
    for (i, line) in lines.iter().enumerate() {
        let remaining = lines.len() - i;
        let suffix = format!("\n…他{}{}", remaining, unit);
        let sep = if out.is_empty() { 0 } else { 1 };
        let len = line.chars().count() + sep;
        let reserve = if remaining > 1 { suffix.chars().count() } else { 0 };
        if used + len + reserve > limit {
            if out.is_empty() {
                // Always show at least the head of the first entry
                out.push_str(&truncate(line, limit.saturating_sub(reserve).max(1)));
                if remaining > 1 {
                    out.push_str(&format!("\n…他{}{}", remaining - 1, unit));
                }
            } else {
                out.push_str(&suffix);
            }
            return out;
        }
        if sep == 1 {
            out.push('\n');
        }
        out.push_str(line);
        used += len;
    }
    out
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit - 1).collect();
    out.push('…');
    out
}
