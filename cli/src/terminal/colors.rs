use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const SECONDARY: Color = Color::TrueColor { r: 180, g: 140, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };
pub const IPV4_ADDR: Color = Color::TrueColor { r: 110, g: 230, b: 160 };
pub const OPEN: Color = Color::Green;
pub const CLOSED: Color = Color::Red;
pub const UNKNOWN: Color = Color::Yellow;
pub const MISSING: Color = Color::BrightBlack;
