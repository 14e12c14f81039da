use eframe::egui::{self, Color32};
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Colour scales
// ---------------------------------------------------------------------------

/// An ordered list of colour stops, used both as a discrete sequence and as a
/// continuous gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    pub name: &'static str,
    stops: &'static [Color32],
}

impl ColorScale {
    pub const fn new(name: &'static str, stops: &'static [Color32]) -> Self {
        Self { name, stops }
    }

    /// The `i`-th colour of the sequence, wrapping around.
    pub fn discrete(&self, i: usize) -> Color32 {
        match self.stops.len() {
            0 => Color32::GRAY,
            n => self.stops[i % n],
        }
    }

    /// Colour at position `t ∈ [0, 1]`, interpolated in linear RGB.
    pub fn sample(&self, t: f32) -> Color32 {
        let n = self.stops.len();
        if n == 0 {
            return Color32::GRAY;
        }
        if n == 1 || !t.is_finite() {
            return self.stops[0];
        }
        let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
        let lo = (pos.floor() as usize).min(n - 2);
        let frac = pos - lo as f32;

        let mixed = to_linear(self.stops[lo]).mix(to_linear(self.stops[lo + 1]), frac);
        let rgb: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
        Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Map `value` within `[min, max]` onto the gradient. A collapsed range
    /// maps to the middle of the scale.
    pub fn map_value(&self, value: f64, min: f64, max: f64) -> Color32 {
        if max > min {
            self.sample(((value - min) / (max - min)) as f32)
        } else {
            self.sample(0.5)
        }
    }
}

fn to_linear(c: Color32) -> LinSrgb {
    Srgb::new(c.r(), c.g(), c.b()).into_format::<f32>().into_linear()
}

const fn rgb(r: u8, g: u8, b: u8) -> Color32 {
    Color32::from_rgb(r, g, b)
}

pub const RD_BU: ColorScale = ColorScale::new(
    "RdBu",
    &[
        rgb(103, 0, 31),
        rgb(178, 24, 43),
        rgb(214, 96, 77),
        rgb(244, 165, 130),
        rgb(253, 219, 199),
        rgb(247, 247, 247),
        rgb(209, 229, 240),
        rgb(146, 197, 222),
        rgb(67, 147, 195),
        rgb(33, 102, 172),
        rgb(5, 48, 97),
    ],
);

pub const PLASMA: ColorScale = ColorScale::new(
    "Plasma",
    &[
        rgb(13, 8, 135),
        rgb(70, 3, 159),
        rgb(114, 1, 168),
        rgb(156, 23, 158),
        rgb(189, 55, 134),
        rgb(216, 87, 107),
        rgb(237, 121, 83),
        rgb(251, 159, 58),
        rgb(253, 202, 38),
        rgb(240, 249, 33),
    ],
);

pub const RD_YL_GN: ColorScale = ColorScale::new(
    "RdYlGn",
    &[
        rgb(165, 0, 38),
        rgb(215, 48, 39),
        rgb(244, 109, 67),
        rgb(253, 174, 97),
        rgb(254, 224, 139),
        rgb(255, 255, 191),
        rgb(217, 239, 139),
        rgb(166, 217, 106),
        rgb(102, 189, 99),
        rgb(26, 152, 80),
        rgb(0, 104, 55),
    ],
);

// ---------------------------------------------------------------------------
// Theme → palette lookup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Label of the button that switches away from this theme.
    pub fn toggle_label(self) -> String {
        format!("{} mode", self.toggled().name())
    }

    pub fn palette(self) -> &'static ThemePalette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

/// Every theme-dependent styling choice, in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    /// Single-series bars (role ranking, histogram).
    pub accent: Color32,
    /// Donut slices, taken in order.
    pub categorical: ColorScale,
    /// Choropleth gradient.
    pub continuous: ColorScale,
    pub plot_background: Color32,
    dark: bool,
}

impl ThemePalette {
    pub fn visuals(&self) -> egui::Visuals {
        if self.dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        }
    }
}

const LIGHT: ThemePalette = ThemePalette {
    accent: rgb(0x1f, 0x77, 0xb4),
    categorical: RD_BU,
    continuous: RD_YL_GN,
    plot_background: Color32::TRANSPARENT,
    dark: false,
};

const DARK: ThemePalette = ThemePalette {
    accent: rgb(0x00, 0xcc, 0x96),
    categorical: PLASMA,
    continuous: PLASMA,
    // 5 % white, premultiplied.
    plot_background: Color32::from_rgba_premultiplied(13, 13, 13, 13),
    dark: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_labels_target() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggle_label(), "Dark mode");
        assert_eq!(Theme::Dark.toggle_label(), "Light mode");
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn palettes_differ_per_theme() {
        let light = Theme::Light.palette();
        let dark = Theme::Dark.palette();
        assert_eq!(light.accent, Color32::from_rgb(0x1f, 0x77, 0xb4));
        assert_eq!(dark.accent, Color32::from_rgb(0x00, 0xcc, 0x96));
        assert_eq!(light.categorical.name, "RdBu");
        assert_eq!(dark.categorical.name, "Plasma");
        assert_eq!(light.continuous.name, "RdYlGn");
        assert!(!light.visuals().dark_mode);
        assert!(dark.visuals().dark_mode);
    }

    #[test]
    fn sample_hits_end_stops() {
        assert_eq!(PLASMA.sample(0.0), rgb(13, 8, 135));
        assert_eq!(PLASMA.sample(1.0), rgb(240, 249, 33));
        assert_eq!(PLASMA.sample(-3.0), PLASMA.sample(0.0));
        assert_eq!(PLASMA.sample(f32::NAN), PLASMA.sample(0.0));
    }

    #[test]
    fn sample_between_stops_is_between() {
        let mid = RD_YL_GN.sample(0.05);
        let (a, b) = (rgb(165, 0, 38), rgb(215, 48, 39));
        assert!(mid.r() >= a.r() && mid.r() <= b.r());
        assert!(mid.g() >= a.g() && mid.g() <= b.g());
    }

    #[test]
    fn discrete_wraps() {
        assert_eq!(PLASMA.discrete(0), PLASMA.discrete(10));
        assert_ne!(PLASMA.discrete(0), PLASMA.discrete(1));
    }

    #[test]
    fn collapsed_range_maps_to_middle() {
        assert_eq!(RD_BU.map_value(5.0, 5.0, 5.0), RD_BU.sample(0.5));
        assert_eq!(RD_BU.map_value(10.0, 0.0, 10.0), RD_BU.sample(1.0));
    }
}
