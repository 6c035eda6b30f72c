pub mod format;
pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use format::{render_report, OutputFormat};
pub use icons::Icons;
pub use output::{error, header, info, report_text, section, success, summary_row, warn};
pub use table::{composition_table, count_table, report_tables};
pub use theme::{theme, Theme};
