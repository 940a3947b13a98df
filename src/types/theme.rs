use super::Color;

/// Named colors the widgets draw with. Like bare HTML defaults - the
/// built-in theme just ensures content is readable on a dark terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    /// Row background for selected table rows.
    pub highlight: Color,
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            background: Color::oklch(0.15, 0.01, 250.0),
            surface: Color::oklch(0.22, 0.02, 250.0),
            border: Color::oklch(0.45, 0.02, 250.0),
            text: Color::oklch(0.92, 0.01, 250.0),
            muted: Color::oklch(0.6, 0.01, 250.0),
            accent: Color::oklch(0.7, 0.12, 230.0),
            error: Color::oklch(0.62, 0.19, 25.0),
            highlight: Color::oklch(0.3, 0.06, 230.0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
