//! MIDI visualizer configuration
//!
//! Two independent update paths write the widget's `config` property:
//!
//! - Selecting a visualization type applies that type's fixed [`preset`],
//!   ignoring wherever the sliders currently sit.
//! - Moving a slider rebuilds the config with [`from_sliders`] from both
//!   slider positions plus the selected type's extra keys, without touching
//!   the selected type.
//!
//! The config object is always replaced as a whole, never merged.

use serde::Serialize;
use tracing::debug;

/// Lowest and highest MIDI pitch shown by the waterfall view (A0..C8)
pub const WATERFALL_MIN_PITCH: u8 = 21;
pub const WATERFALL_MAX_PITCH: u8 = 108;

/// Horizontal spacing between notes in the staff view
pub const STAFF_NOTE_SPACING: u32 = 1;

/// Visualization modes offered by the radio group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationType {
    #[default]
    PianoRoll,
    Waterfall,
    Staff,
}

impl VisualizationType {
    /// Map a radio value to a mode; unrecognised values select the piano roll
    pub fn from_value(value: &str) -> Self {
        match value {
            "waterfall" => VisualizationType::Waterfall,
            "staff" => VisualizationType::Staff,
            _ => VisualizationType::PianoRoll,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationType::PianoRoll => "piano-roll",
            VisualizationType::Waterfall => "waterfall",
            VisualizationType::Staff => "staff",
        }
    }
}

/// Value of the visualizer widget's `config` property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizerConfig {
    pub note_height: i32,
    pub pixels_per_time_step: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_pitch: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pitch: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_spacing: Option<u32>,
}

impl VisualizerConfig {
    /// Base keys plus the extra keys `kind` requires
    fn with_type_keys(kind: VisualizationType, note_height: i32, pixels_per_time_step: i32) -> Self {
        let mut config = Self {
            note_height,
            pixels_per_time_step,
            min_pitch: None,
            max_pitch: None,
            note_spacing: None,
        };
        match kind {
            VisualizationType::Waterfall => {
                config.min_pitch = Some(WATERFALL_MIN_PITCH);
                config.max_pitch = Some(WATERFALL_MAX_PITCH);
            }
            VisualizationType::Staff => config.note_spacing = Some(STAFF_NOTE_SPACING),
            VisualizationType::PianoRoll => {}
        }
        config
    }
}

/// Fixed config applied when `kind` is selected
pub fn preset(kind: VisualizationType) -> VisualizerConfig {
    match kind {
        VisualizationType::Waterfall => VisualizerConfig::with_type_keys(kind, 6, 60),
        VisualizationType::Staff => VisualizerConfig::with_type_keys(kind, 4, 30),
        VisualizationType::PianoRoll => VisualizerConfig::with_type_keys(kind, 3, 50),
    }
}

/// Integer slider positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderValues {
    pub note_height: i32,
    pub pixels_per_time_step: i32,
}

impl SliderValues {
    /// Parse raw slider values with `parseInt` semantics, substituting the
    /// preset value of `kind` for anything without a leading integer
    pub fn parse(kind: VisualizationType, note_height: &str, speed: &str) -> Self {
        let fallback = preset(kind);
        Self {
            note_height: leading_integer(note_height).unwrap_or(fallback.note_height),
            pixels_per_time_step: leading_integer(speed).unwrap_or(fallback.pixels_per_time_step),
        }
    }
}

/// Optional sign followed by the leading decimal digits, ignoring whatever
/// trails them (`"8.5"` is 8, `"-2px"` is -2); saturates at the `i32` bounds
fn leading_integer(raw: &str) -> Option<i32> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: Vec<i32> = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .map(|digit| i32::from(digit - b'0'))
        .collect();
    if digits.is_empty() {
        return None;
    }

    let value = digits.into_iter().fold(0i32, |acc, digit| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(digit)
        } else {
            acc.saturating_add(digit)
        }
    });
    Some(value)
}

/// Config built from the slider positions for the selected `kind`
pub fn from_sliders(kind: VisualizationType, sliders: SliderValues) -> VisualizerConfig {
    VisualizerConfig::with_type_keys(kind, sliders.note_height, sliders.pixels_per_time_step)
}

/// The visualizer custom element
pub trait VisualizerWidget {
    /// Assign the `type` property
    fn set_type(&self, value: &str);

    /// Assign the `config` property, replacing the previous object
    fn set_config(&self, config: &VisualizerConfig);
}

/// Range sliders, their value labels, and the type radio group
pub trait SliderPanel {
    /// Value of the checked visualization-type radio
    fn selected_type(&self) -> Option<String>;

    fn note_height(&self) -> String;

    fn note_speed(&self) -> String;

    fn show_note_height(&self, value: &str);

    fn show_note_speed(&self, value: &str);
}

/// Visualization configurator; never touches the network
pub struct VisualizerController<W, P> {
    widget: W,
    sliders: P,
}

impl<W: VisualizerWidget, P: SliderPanel> VisualizerController<W, P> {
    pub fn new(widget: W, sliders: P) -> Self {
        Self { widget, sliders }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn sliders(&self) -> &P {
        &self.sliders
    }

    /// A visualization-type radio changed to `value`
    pub fn select_type(&self, value: &str) -> VisualizerConfig {
        let kind = VisualizationType::from_value(value);
        let config = preset(kind);
        debug!(kind = kind.as_str(), "Applying visualizer preset");
        self.widget.set_type(value);
        self.widget.set_config(&config);
        config
    }

    /// Either slider moved
    pub fn slider_moved(&self) -> VisualizerConfig {
        let kind = self
            .sliders
            .selected_type()
            .map(|value| VisualizationType::from_value(&value))
            .unwrap_or_default();
        let note_height = self.sliders.note_height();
        let note_speed = self.sliders.note_speed();
        self.sliders.show_note_height(&note_height);
        self.sliders.show_note_speed(&note_speed);

        let config = from_sliders(kind, SliderValues::parse(kind, &note_height, &note_speed));
        debug!(kind = kind.as_str(), ?config, "Applying slider config");
        self.widget.set_config(&config);
        config
    }
}
