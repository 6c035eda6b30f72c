use crate::output::is_quiet;
use crate::report::Report;
use crate::ui::{theme, Icons, Theme};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::GEM, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn summary_row(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Plain-text report with rarity names styled by `theme`
pub fn report_text(report: &Report, theme: &Theme) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = report.write_text(&mut out, |name| name.style(theme.rarity(name)).to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RarityMix, RarityTier};
    use crate::storage::{CategoryCount, CompositionYield};

    fn sample_report() -> Report {
        Report {
            by_rarity: vec![
                CategoryCount { name: "Mythical".into(), count: 2 },
                CategoryCount { name: "Rare".into(), count: 1 },
            ],
            by_group: vec![CategoryCount { name: "Fire".into(), count: 3 }],
            top_compositions: vec![CompositionYield {
                composition: RarityMix::new(40.0, 30.0, 20.0, 10.0),
                tier: RarityTier::Mythical,
                yield_pct: 12.5,
            }],
            tier: RarityTier::Mythical,
        }
    }

    #[test]
    fn test_plain_report_text_matches_display() {
        let report = sample_report();
        let text = report_text(&report, &Theme::plain());
        assert_eq!(text, report.to_string());
        assert!(text.contains("  Mythical: 2\n"));
        assert!(text.contains("R:40% E:30% L:20% M:10% -> Mythical: 12.5%"));
    }

    #[test]
    fn test_colored_report_text_styles_rarities() {
        let report = sample_report();
        let theme = Theme::colored();
        let text = report_text(&report, &theme);

        let mythical = "Mythical".style(theme.rarity("Mythical")).to_string();
        assert_ne!(mythical, "Mythical");
        assert!(text.contains(&format!("  {}: 2\n", mythical)));
        assert!(text.contains(&format!("compositions for {} drops", mythical)));
        // Groups are not rarities and stay unstyled
        assert!(text.contains("  Fire: 3\n"));
    }
}
