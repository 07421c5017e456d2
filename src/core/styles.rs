//! Style roles mapping logical output elements to `colored::Color`.
//!
//! Each role is a variant of `StyleRole`. Colouring only happens when the
//! `enabled` flag passed to `paint()` is true, so no global colour state is kept.
//!
//! ```
//! use plugdispatch::core::styles::StyleRole;
//! assert_eq!(StyleRole::Event.paint("user_login", false), "user_login");
//! assert!(StyleRole::Event.paint("user_login", true).starts_with("\x1b["));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => $color:expr ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }
        }
    };
}

style! {
    Header   => Some(Color::Yellow),
    Event    => Some(Color::Cyan),
    Plugin   => Some(Color::BrightGreen),
    Priority => Some(Color::Blue),
    Accepted => Some(Color::Green),
    Vetoed   => Some(Color::Red),
    Error    => Some(Color::BrightRed),
    Key      => Some(Color::BrightGreen),
    Value    => None,
    Dim      => Some(Color::BrightBlack),
}

impl StyleRole {
    pub fn ansi_code(self) -> Option<String> {
        self.color().map(ansi_code)
    }

    pub fn paint(self, text: &str, enabled: bool) -> String {
        match self.ansi_code() {
            Some(code) if enabled => format!("\x1b[{}m{}\x1b[0m", code, text),
            _ => text.to_string(),
        }
    }

    /// Foreground colour in prettytable `style_spec` notation, e.g. `Fy`
    pub fn to_prettytable_spec(self) -> Option<String> {
        let spec = match self.color()? {
            Color::Black => "k",
            Color::Red => "r",
            Color::Green => "g",
            Color::Yellow => "y",
            Color::Blue => "b",
            Color::Magenta => "m",
            Color::Cyan => "c",
            Color::White => "w",
            Color::BrightBlack => "K",
            Color::BrightRed => "R",
            Color::BrightGreen => "G",
            Color::BrightYellow => "Y",
            Color::BrightBlue => "B",
            Color::BrightMagenta => "M",
            Color::BrightCyan => "C",
            Color::BrightWhite => "W",
            _ => return None,
        };
        Some(format!("F{}", spec))
    }
}

// SGR foreground parameters, e.g. "33" or "38;2;255;128;64"
fn ansi_code(color: Color) -> String {
    color.to_fg_str().into_owned()
}

fn clap_color(color: Color) -> Option<AnsiColor> {
    Some(match color {
        Color::Red => AnsiColor::Red,
        Color::Green => AnsiColor::Green,
        Color::Yellow => AnsiColor::Yellow,
        Color::Blue => AnsiColor::Blue,
        Color::Cyan => AnsiColor::Cyan,
        Color::BrightBlack => AnsiColor::BrightBlack,
        Color::BrightRed => AnsiColor::BrightRed,
        Color::BrightGreen => AnsiColor::BrightGreen,
        _ => return None,
    })
}

/// clap help styles built from the same roles
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole, bold: bool| {
        let mut s = Style::new();
        if let Some(col) = role.color().and_then(clap_color) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if bold {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header, true))
        .usage(style(StyleRole::Header, true))
        .literal(style(StyleRole::Event, false))
        .placeholder(style(StyleRole::Plugin, false))
        .error(style(StyleRole::Error, true))
}
