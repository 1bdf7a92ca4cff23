/// ANSI text styling.
///
/// Every decoration goes through a `Styler`, whose `enabled` flag turns
/// the whole thing into a no-op (plain strings in, plain strings out).

use std::sync::OnceLock;

use regex::Regex;

const ESC: &str = "\u{1b}";

/// Opening and closing escape sequence of one style.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct StyleCode {
    pub open: String,
    pub close: String,
}

impl StyleCode {
    fn new(open: &str, close: &str) -> Self {
        StyleCode { open: open.to_string(), close: close.to_string() }
    }

    pub fn bold() -> Self { Self::new("\u{1b}[1m", "\u{1b}[22m") }
    pub fn underline() -> Self { Self::new("\u{1b}[4m", "\u{1b}[24m") }
    pub fn reset() -> Self { Self::new("\u{1b}[0m", "") }
}

/// A 256-color palette index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Color256(pub u8);

impl Color256 {
    #[allow(dead_code)]
    pub const BLACK: Color256 = Color256(0);
    pub const RED: Color256 = Color256(1);
    #[allow(dead_code)]
    pub const GREEN: Color256 = Color256(2);
    #[allow(dead_code)]
    pub const YELLOW: Color256 = Color256(3);

    pub fn foreground(self) -> StyleCode {
        StyleCode {
            open: format!("{ESC}[38;5;{}m", self.0),
            close: StyleCode::reset().open,
        }
    }

    pub fn background(self) -> StyleCode {
        StyleCode {
            open: format!("{ESC}[48;5;{}m", self.0),
            close: StyleCode::reset().open,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Styler {
    pub enabled: bool,
}

impl Styler {
    pub fn new(enabled: bool) -> Self {
        Styler { enabled }
    }

    pub fn bold(&self, s: &str) -> String {
        self.apply(s, &StyleCode::bold())
    }

    pub fn underline(&self, s: &str) -> String {
        self.apply(s, &StyleCode::underline())
    }

    pub fn fg(&self, s: &str, color: Color256) -> String {
        self.apply(s, &color.foreground())
    }

    #[allow(dead_code)]
    pub fn bg(&self, s: &str, color: Color256) -> String {
        self.apply(s, &color.background())
    }

    /// Prefix a full reset.
    #[allow(dead_code)]
    pub fn reset(&self, s: &str) -> String {
        if !self.enabled {
            return s.to_string();
        }
        format!("{}{s}", StyleCode::reset().open)
    }

    fn apply(&self, s: &str, code: &StyleCode) -> String {
        if !self.enabled {
            return s.to_string();
        }
        // Re-open after any inner reset so nested styles keep this one
        let reset = StyleCode::reset().open;
        let inner = s.replace(&reset, &format!("{reset}{}", code.open));
        format!("{}{inner}{}", code.open, code.close)
    }
}

/// Strip every SGR escape sequence.
pub fn uncolorized(s: &str) -> String {
    static SGR: OnceLock<Regex> = OnceLock::new();
    let re = SGR.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("static regex"));
    re.replace_all(s, "").into_owned()
}
