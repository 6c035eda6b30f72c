use tabled::{settings::Style, Table, Tabled};
use crate::report::Report;
use crate::storage::{CategoryCount, CompositionYield};

#[derive(Tabled)]
pub struct CountRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Relics")]
    pub count: usize,
}

#[derive(Tabled)]
pub struct CompositionRow {
    #[tabled(rename = "Rare %")]
    pub rare: i64,
    #[tabled(rename = "Epic %")]
    pub epic: i64,
    #[tabled(rename = "Legendary %")]
    pub legendary: i64,
    #[tabled(rename = "Mythical %")]
    pub mythical: i64,
    #[tabled(rename = "Yield %")]
    pub yield_pct: f64,
}

pub fn count_table(counts: &[CategoryCount]) -> String {
    if counts.is_empty() {
        return String::new();
    }

    let rows: Vec<CountRow> = counts
        .iter()
        .map(|c| CountRow { name: c.name.clone(), count: c.count })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

pub fn composition_table(compositions: &[CompositionYield]) -> String {
    if compositions.is_empty() {
        return String::new();
    }

    // Input shares truncated, same as the plain-text report
    let rows: Vec<CompositionRow> = compositions
        .iter()
        .map(|c| CompositionRow {
            rare: c.composition.rare as i64,
            epic: c.composition.epic as i64,
            legendary: c.composition.legendary as i64,
            mythical: c.composition.mythical as i64,
            yield_pct: c.yield_pct,
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

/// Human-facing rendering of a report, one table per section
pub fn report_tables(report: &Report) -> String {
    let mut out = String::new();
    let sections = [
        ("Relics by rarity".to_string(), count_table(&report.by_rarity)),
        ("Relics by group".to_string(), count_table(&report.by_group)),
        (
            format!(
                "Top {} compositions for {} drops",
                report.top_compositions.len(),
                report.tier.label()
            ),
            composition_table(&report.top_compositions),
        ),
    ];

    for (title, table) in sections {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&title);
        out.push('\n');
        if table.is_empty() {
            out.push_str("  (none)\n");
        } else {
            out.push_str(&table);
            out.push('\n');
        }
    }
    out
}
