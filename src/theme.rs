use ratatui::style::Color;

/// Colors used by the menu and the viewer
#[derive(Debug, Clone)]
pub struct Theme {
    // Header
    pub title: Color,
    pub search_text: Color,

    // Rows
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub group: Color,
    pub profile: Color,
    pub index_number: Color,
    pub empty_notice: Color,

    // Viewer
    pub viewer_border: Color,
    pub viewer_text: Color,

    // Footer
    pub help_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Yellow,
            search_text: Color::Cyan,

            selected_bg: Color::White,
            selected_fg: Color::Black,
            group: Color::Blue,
            profile: Color::Reset,
            index_number: Color::DarkGray,
            empty_notice: Color::Gray,

            viewer_border: Color::Yellow,
            viewer_text: Color::Reset,

            help_text: Color::Gray,
        }
    }
}

impl Theme {
    /// Monochrome theme for terminals where `NO_COLOR` is set
    pub fn monochrome() -> Self {
        Self {
            title: Color::Reset,
            search_text: Color::Reset,
            selected_bg: Color::Reset,
            selected_fg: Color::Reset,
            group: Color::Reset,
            profile: Color::Reset,
            index_number: Color::Reset,
            empty_notice: Color::Reset,
            viewer_border: Color::Reset,
            viewer_text: Color::Reset,
            help_text: Color::Reset,
        }
    }
}

/// Get the theme for the current environment
pub fn get_theme() -> Theme {
    if std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()) {
        Theme::monochrome()
    } else {
        Theme::default()
    }
}
