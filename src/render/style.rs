//! Visual styling for orbit rings and bodies.
//!
//! Colors come from explicit per-row overrides when they parse, otherwise
//! from type/name heuristics and a round-robin palette.

use bevy::prelude::*;

use crate::hierarchy::{Body, Orbit};

/// Fallback star color when the dataset supplies none.
pub const DEFAULT_STAR_COLOR: &str = "#ffd27f";

/// Tone used for asteroids without an explicit color.
pub const ASTEROID_BODY_COLOR: &str = "#a8a29e";

/// Colors handed out to bodies without an explicit color.
pub const BODY_PALETTE: [&str; 8] = [
    "#60a5fa", "#f97316", "#34d399", "#f472b6", "#facc15", "#a78bfa", "#22d3ee", "#fb7185",
];

/// Orbit colors picked by type/name keywords, checked in order.
const ORBIT_KEYWORD_COLORS: [(&str, &str); 4] = [
    ("habitable", "#4ade80"),
    ("asteroid", "#9ca3af"),
    ("inner", "#60a5fa"),
    ("outer", "#a78bfa"),
];

const DEFAULT_ORBIT_COLOR: &str = "#cbd5e1";

/// Tunables for scene construction.
#[derive(Resource, Clone, Debug)]
pub struct SceneSettings {
    /// Scene units spanned by the outermost orbit.
    pub base_orbit_scale: f32,
    /// Width of the ring ribbon in scene units.
    pub ring_width: f32,
    /// Number of segments around a full ring.
    pub ring_segments: u32,
    /// Dash length along the ring, in scene units.
    pub dash_length: f32,
    /// Gap length between dashes, in scene units.
    pub gap_length: f32,
    /// Radius multiplier of the outer glow ring.
    pub glow_scale: f32,
    /// Opacity of the glow ring relative to its base ring.
    pub glow_opacity: f32,
    /// Opacity of the selected orbit.
    pub selected_opacity: f32,
    /// Opacity of unselected dashed orbits.
    pub dashed_opacity: f32,
    /// Opacity of unselected solid and glow orbits.
    pub solid_opacity: f32,
    /// Min/max sphere radius for asteroids.
    pub asteroid_size: (f32, f32),
    /// Min/max sphere radius for every other body type.
    pub body_size: (f32, f32),
    /// Extra height of a body label above its sphere.
    pub label_lift: f32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            base_orbit_scale: crate::types::BASE_ORBIT_SCALE,
            ring_width: 0.05,
            ring_segments: 256,
            dash_length: 0.4,
            gap_length: 0.25,
            glow_scale: 1.02,
            glow_opacity: 0.35,
            selected_opacity: 1.0,
            dashed_opacity: 0.7,
            solid_opacity: 0.6,
            asteroid_size: (0.08, 0.18),
            body_size: (0.2, 0.6),
            label_lift: 0.35,
        }
    }
}

/// How an orbit ring is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    /// Dash/gap pattern, typical for belts.
    Dashed,
    /// Solid ring plus a larger, additively blended translucent ring.
    Glow,
}

impl LineStyle {
    /// Parse an orbit style field, case-insensitively.
    pub fn parse(style: &str) -> Self {
        match style.trim().to_ascii_lowercase().as_str() {
            "dashed" => Self::Dashed,
            "glow" => Self::Glow,
            _ => Self::Solid,
        }
    }
}

/// CSS named colors accepted in color fields.
const NAMED_COLORS: [(&str, [u8; 3]); 62] = [
    ("aqua", [0, 255, 255]),
    ("beige", [245, 245, 220]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("brown", [165, 42, 42]),
    ("chocolate", [210, 105, 30]),
    ("coral", [255, 127, 80]),
    ("cornflowerblue", [100, 149, 237]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkorange", [255, 140, 0]),
    ("darkred", [139, 0, 0]),
    ("deepskyblue", [0, 191, 255]),
    ("dodgerblue", [30, 144, 255]),
    ("firebrick", [178, 34, 34]),
    ("forestgreen", [34, 139, 34]),
    ("fuchsia", [255, 0, 255]),
    ("gold", [255, 215, 0]),
    ("goldenrod", [218, 165, 32]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("hotpink", [255, 105, 180]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lightblue", [173, 216, 230]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lime", [0, 255, 0]),
    ("limegreen", [50, 205, 50]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("orange", [255, 165, 0]),
    ("orangered", [255, 69, 0]),
    ("orchid", [218, 112, 214]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("royalblue", [65, 105, 225]),
    ("salmon", [250, 128, 114]),
    ("seagreen", [46, 139, 87]),
    ("sienna", [160, 82, 45]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("slategray", [112, 128, 144]),
    ("steelblue", [70, 130, 180]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("white", [255, 255, 255]),
];

fn named_color(name: &str) -> Option<Srgba> {
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, [r, g, b])| Srgba::rgb_u8(*r, *g, *b))
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)`, channels in 0..=255 and alpha in
/// 0..=1. Space separated channels and `/ alpha` are accepted too.
fn functional_color(raw: &str) -> Option<Srgba> {
    let args = raw
        .strip_prefix("rgba(")
        .or_else(|| raw.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let parts: Vec<f32> = args
        .split([',', '/', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f32>().ok().filter(|v| v.is_finite()))
        .collect::<Option<_>>()?;
    let channel = |v: f32| (v / 255.0).clamp(0.0, 1.0);
    match parts.as_slice() {
        [r, g, b] => Some(Srgba::new(channel(*r), channel(*g), channel(*b), 1.0)),
        [r, g, b, a] => Some(Srgba::new(
            channel(*r),
            channel(*g),
            channel(*b),
            a.clamp(0.0, 1.0),
        )),
        _ => None,
    }
}

/// Parse a color field: a CSS color name, `rgb(...)`/`rgba(...)`, or hex
/// (`#rgb`, `#rrggbb`, `#rrggbbaa`, with or without `#`).
pub fn parse_color(raw: &str) -> Option<Color> {
    let raw = raw.trim().to_ascii_lowercase();
    if raw.is_empty() {
        return None;
    }
    named_color(&raw)
        .or_else(|| functional_color(&raw))
        .or_else(|| Srgba::hex(&raw).ok())
        .map(Color::from)
}

fn hex(raw: &str) -> Color {
    parse_color(raw).unwrap_or(Color::WHITE)
}

/// Whether a body type names an asteroid.
pub fn is_asteroid(kind: &str) -> bool {
    kind.to_ascii_lowercase().contains("asteroid")
}

/// Resolve an orbit's ring color: override, then keyword heuristic.
pub fn orbit_color(orbit: &Orbit) -> Color {
    if let Some(color) = parse_color(&orbit.color) {
        return color;
    }
    let haystack = format!("{} {}", orbit.kind, orbit.name).to_ascii_lowercase();
    let keyword = ORBIT_KEYWORD_COLORS
        .iter()
        .find(|(keyword, _)| haystack.contains(keyword))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_ORBIT_COLOR);
    hex(keyword)
}

/// Star color, falling back to [`DEFAULT_STAR_COLOR`].
pub fn star_color(raw: &str) -> Color {
    parse_color(raw).unwrap_or_else(|| hex(DEFAULT_STAR_COLOR))
}

/// Ring opacity for a style and selection state.
pub fn ring_opacity(style: LineStyle, selected: bool, settings: &SceneSettings) -> f32 {
    match (selected, style) {
        (true, _) => settings.selected_opacity,
        (false, LineStyle::Dashed) => settings.dashed_opacity,
        (false, _) => settings.solid_opacity,
    }
}

/// Sphere radius for a body from its normalized raw radius `t`.
///
/// Interpolates on `sqrt(t)` so sphere area, not radius, tracks the data.
pub fn body_size(kind: &str, t: f32, settings: &SceneSettings) -> f32 {
    let (min, max) = if is_asteroid(kind) {
        settings.asteroid_size
    } else {
        settings.body_size
    };
    min + (max - min) * t.clamp(0.0, 1.0).sqrt()
}

/// Round-robin body colors, shared across every orbit of one star.
#[derive(Clone, Debug, Default)]
pub struct BodyPalette {
    next: usize,
}

impl BodyPalette {
    /// Color for `body`. Only non-asteroid bodies without an explicit color
    /// advance the palette.
    pub fn color_for(&mut self, body: &Body) -> Color {
        if let Some(color) = parse_color(&body.color) {
            return color;
        }
        if is_asteroid(&body.kind) {
            return hex(ASTEROID_BODY_COLOR);
        }
        let color = hex(BODY_PALETTE[self.next % BODY_PALETTE.len()]);
        self.next += 1;
        color
    }
}
