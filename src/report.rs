//! Reporter - read-only aggregate statistics over a loaded store

use std::fmt;
use serde::Serialize;
use crate::model::RarityTier;
use crate::storage::{CategoryCount, CompositionYield, RelicStore};
use crate::Result;

/// Number of compositions listed in the top-yield section
pub const TOP_COMPOSITIONS: usize = 5;

/// Example SQL printed after an import, as (description, query) pairs
pub const EXAMPLE_QUERIES: &[(&str, &str)] = &[
    ("Get all Mythical relics", "SELECT * FROM relics WHERE rarity = 'Mythical'"),
    (
        "Find best composition for Legendary drops",
        "SELECT * FROM relic_craft_results ORDER BY result_legendary DESC LIMIT 1",
    ),
    ("Count relics by group", r#"SELECT "group", COUNT(*) FROM relics GROUP BY "group""#),
];

/// Aggregate view of a relic store
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub by_rarity: Vec<CategoryCount>,
    pub by_group: Vec<CategoryCount>,
    /// Best compositions for `tier`, highest yield first
    pub top_compositions: Vec<CompositionYield>,
    pub tier: RarityTier,
}

/// Build the standard report: counts by rarity and group, then the five
/// best compositions for Mythical drops
pub fn report(store: &RelicStore) -> Result<Report> {
    report_for_tier(store, RarityTier::Mythical, TOP_COMPOSITIONS)
}

/// Same as [`report`], ranking compositions by the yield of `tier`
pub fn report_for_tier(store: &RelicStore, tier: RarityTier, limit: usize) -> Result<Report> {
    Ok(Report {
        by_rarity: store.count_by_rarity()?,
        by_group: store.count_by_group()?,
        top_compositions: store.top_compositions(tier, limit)?,
        tier,
    })
}

impl Report {
    /// Write the plain-text layout. `paint` decorates rarity names (relic
    /// rarities and the ranked tier); everything else is written as-is.
    pub fn write_text<W, P>(&self, out: &mut W, paint: P) -> fmt::Result
    where
        W: fmt::Write,
        P: Fn(&str) -> String,
    {
        writeln!(out, "Relics by rarity:")?;
        for entry in &self.by_rarity {
            writeln!(out, "  {}: {}", paint(&entry.name), entry.count)?;
        }

        writeln!(out)?;
        writeln!(out, "Relics by group:")?;
        for entry in &self.by_group {
            writeln!(out, "  {}: {}", entry.name, entry.count)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Top {} compositions for {} drops:",
            self.top_compositions.len(),
            paint(self.tier.label())
        )?;
        for row in &self.top_compositions {
            writeln!(out, "  {}", row)?;
        }
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f, str::to_string)
    }
}
