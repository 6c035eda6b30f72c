//! Database schema definitions

/// SQL to create the relic_craft_results table
pub const CREATE_CRAFT_RESULTS_TABLE: &str = r#"
CREATE TABLE relic_craft_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    comp_rare REAL NOT NULL,
    comp_epic REAL NOT NULL,
    comp_legendary REAL NOT NULL,
    comp_mythical REAL NOT NULL,
    result_rare REAL NOT NULL,
    result_epic REAL NOT NULL,
    result_legendary REAL NOT NULL,
    result_mythical REAL NOT NULL
)
"#;

/// SQL to create the relics table
/// `group` is a keyword and must stay quoted
pub const CREATE_RELICS_TABLE: &str = r#"
CREATE TABLE relics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    "group" TEXT NOT NULL,
    rarity TEXT NOT NULL,
    image TEXT NOT NULL,
    description TEXT
)
"#;

/// SQL to create indexes. Built after the bulk insert.
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX idx_relics_rarity ON relics(rarity)",
    r#"CREATE INDEX idx_relics_group ON relics("group")"#,
    "CREATE INDEX idx_craft_comp ON relic_craft_results(comp_rare, comp_epic, comp_legendary, comp_mythical)",
];

/// Table creation statements, in order
pub fn table_statements() -> [&'static str; 2] {
    [CREATE_CRAFT_RESULTS_TABLE, CREATE_RELICS_TABLE]
}
