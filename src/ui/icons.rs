pub struct Icons;

impl Icons {
    pub const GEM: &str = "💎";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const DEL: &str = "🗑️";
    pub const SEARCH: &str = "🔍";
}
