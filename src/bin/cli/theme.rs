use ratatui::style::Color;
use tutor_pad::theme::ThemeMode;

#[derive(Clone)]
pub struct Theme {
    pub name: &'static str,
    pub accent: Color,
    pub bg: Color,
    pub header_bg: Color,
    pub status_bg: Color,
    pub input_bg: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
}

pub const LIGHT: Theme = Theme {
    name: "Light",
    accent: Color::Rgb(0, 90, 180),
    bg: Color::Rgb(245, 245, 245),
    header_bg: Color::Rgb(225, 230, 240),
    status_bg: Color::Rgb(235, 235, 235),
    input_bg: Color::Rgb(255, 255, 255),
    text: Color::Rgb(20, 20, 20),
    muted: Color::Rgb(110, 110, 110),
    error: Color::Rgb(190, 30, 30),
    success: Color::Rgb(20, 130, 60),
};

pub const DARK: Theme = Theme {
    name: "Dark",
    accent: Color::Rgb(92, 136, 255),
    bg: Color::Rgb(20, 20, 20),
    header_bg: Color::Rgb(40, 60, 110),
    status_bg: Color::Rgb(20, 20, 20),
    input_bg: Color::Rgb(30, 30, 30),
    text: Color::White,
    muted: Color::Rgb(150, 150, 150),
    error: Color::Rgb(240, 120, 120),
    success: Color::Rgb(120, 200, 120),
};

pub fn palette(mode: ThemeMode) -> &'static Theme {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
    }
}
