//! Architectural style options offered by the form

use serde::{Serialize, Serializer};

/// Form value that switches the style picker to free text
pub const CUSTOM_STYLE: &str = "custom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchStyle {
    Romanesque,
    Gothic,
    Renaissance,
    Baroque,
    Georgian,
    Neoclassical,
    GothicRevival,
    Victorian,
    BeauxArts,
    ArtNouveau,
    ArtDeco,
    Modernist,
    Brutalist,
    Postmodern,
    HighTech,
    Contemporary,
}

impl ArchStyle {
    pub const ALL: [ArchStyle; 16] = [
        ArchStyle::Romanesque,
        ArchStyle::Gothic,
        ArchStyle::Renaissance,
        ArchStyle::Baroque,
        ArchStyle::Georgian,
        ArchStyle::Neoclassical,
        ArchStyle::GothicRevival,
        ArchStyle::Victorian,
        ArchStyle::BeauxArts,
        ArchStyle::ArtNouveau,
        ArchStyle::ArtDeco,
        ArchStyle::Modernist,
        ArchStyle::Brutalist,
        ArchStyle::Postmodern,
        ArchStyle::HighTech,
        ArchStyle::Contemporary,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ArchStyle::Romanesque => "Romanesque",
            ArchStyle::Gothic => "Gothic",
            ArchStyle::Renaissance => "Renaissance",
            ArchStyle::Baroque => "Baroque",
            ArchStyle::Georgian => "Georgian",
            ArchStyle::Neoclassical => "Neoclassical",
            ArchStyle::GothicRevival => "Gothic Revival",
            ArchStyle::Victorian => "Victorian",
            ArchStyle::BeauxArts => "Beaux-Arts",
            ArchStyle::ArtNouveau => "Art Nouveau",
            ArchStyle::ArtDeco => "Art Deco",
            ArchStyle::Modernist => "Modernist",
            ArchStyle::Brutalist => "Brutalist",
            ArchStyle::Postmodern => "Postmodern",
            ArchStyle::HighTech => "High-Tech",
            ArchStyle::Contemporary => "Contemporary",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.label().eq_ignore_ascii_case(wanted))
    }
}

/// The picker's current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleChoice {
    #[default]
    Unset,
    Preset(ArchStyle),
    Custom,
}

impl StyleChoice {
    /// Parse a picker value: empty, `custom`, or one of the preset labels
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            Some(StyleChoice::Unset)
        } else if value.eq_ignore_ascii_case(CUSTOM_STYLE) {
            Some(StyleChoice::Custom)
        } else {
            ArchStyle::from_label(value).map(StyleChoice::Preset)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleChoice::Unset => "",
            StyleChoice::Preset(style) => style.label(),
            StyleChoice::Custom => CUSTOM_STYLE,
        }
    }
}

impl Serialize for StyleChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Serialize, Debug)]
pub struct StyleOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Picker options in display order, ending with the custom escape hatch
pub fn style_options() -> Vec<StyleOption> {
    ArchStyle::ALL
        .iter()
        .map(|s| StyleOption {
            value: s.label(),
            label: s.label(),
        })
        .chain(std::iter::once(StyleOption {
            value: CUSTOM_STYLE,
            label: "Other (custom)",
        }))
        .collect()
}
