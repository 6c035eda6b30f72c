use clap::ValueEnum;
use crate::report::Report;
use crate::ui::{report_tables, report_text, Theme};
use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Table,
    Json,
}

impl OutputFormat {
    /// Status lines and banners are only printed for human formats, so that
    /// JSON output stays parseable
    pub fn is_human(&self) -> bool {
        !matches!(self, OutputFormat::Json)
    }
}

/// Render a report in `format`. `theme` only affects the text format.
pub fn render_report(report: &Report, format: OutputFormat, theme: &Theme) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => report_text(report, theme),
        OutputFormat::Table => report_tables(report),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(report)?;
            json.push('\n');
            json
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RarityMix, RarityTier};
    use crate::storage::{CategoryCount, CompositionYield};

    fn sample_report() -> Report {
        Report {
            by_rarity: vec![CategoryCount { name: "Mythical".into(), count: 2 }],
            by_group: vec![CategoryCount { name: "Fire".into(), count: 2 }],
            top_compositions: vec![CompositionYield {
                composition: RarityMix::new(40.0, 30.0, 20.0, 10.0),
                tier: RarityTier::Mythical,
                yield_pct: 12.5,
            }],
            tier: RarityTier::Mythical,
        }
    }

    #[test]
    fn test_json_output_parses() {
        let out = render_report(&sample_report(), OutputFormat::Json, &Theme::colored()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["by_rarity"][0]["name"], "Mythical");
        assert_eq!(value["by_rarity"][0]["count"], 2);
        assert_eq!(value["top_compositions"][0]["yield_pct"], 12.5);
        assert_eq!(value["tier"], "mythical");
    }

    #[test]
    fn test_only_json_suppresses_status() {
        assert!(OutputFormat::Text.is_human());
        assert!(OutputFormat::Table.is_human());
        assert!(!OutputFormat::Json.is_human());
    }

    #[test]
    fn test_text_output_is_report_layout() {
        let report = sample_report();
        let out = render_report(&report, OutputFormat::Text, &Theme::plain()).unwrap();
        assert_eq!(out, report.to_string());
    }
}
