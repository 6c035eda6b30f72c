use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Decorative status output is suppressed when `RELICDB_QUIET` is set.
/// Report text is always printed.
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("RELICDB_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
