use owo_colors::Style;
use std::sync::OnceLock;
use crate::model::RarityTier;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    /// Indexed by `RarityTier` order: rare, epic, legendary, mythical
    pub tiers: [Style; 4],
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            tiers: [
                Style::new().blue(),
                Style::new().purple(),
                Style::new().yellow(),
                Style::new().red().bold(),
            ],
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            tiers: [Style::new(), Style::new(), Style::new(), Style::new()],
        }
    }

    /// Style for a rarity label; unknown labels are left unstyled
    pub fn rarity(&self, label: &str) -> Style {
        match label.parse::<RarityTier>() {
            Ok(tier) => self.tiers[tier as usize].clone(),
            Err(_) => Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_rarity_style_lookup() {
        let theme = Theme::colored();
        let styled = |style: Style| "x".style(style).to_string();
        assert_eq!(styled(theme.rarity("Mythical")), styled(theme.tiers[3].clone()));
        assert_eq!(styled(theme.rarity("common")), styled(Style::new()));
    }
}
