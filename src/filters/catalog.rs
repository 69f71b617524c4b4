//! The closed catalog of filters a layer can carry.
//!
//! Every filter is identified by a [`FilterName`]. Its external string form is the
//! name used in collage files and session commands.

use crate::core::error::{ModelError, ModelResult};
use crate::filters::builtin::{
    BrightenDarken, ChannelIsolate, Difference, Direction, Measure, Multiply, Normal, Screen,
};
use crate::filters::{Channel, OneFilter, TwoFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static NORMAL: Normal = Normal;
static RED: ChannelIsolate = ChannelIsolate(Channel::Red);
static GREEN: ChannelIsolate = ChannelIsolate(Channel::Green);
static BLUE: ChannelIsolate = ChannelIsolate(Channel::Blue);
static BRIGHTEN_INTENSITY: BrightenDarken =
    BrightenDarken::new(Measure::Intensity, Direction::Brighten);
static DARKEN_INTENSITY: BrightenDarken =
    BrightenDarken::new(Measure::Intensity, Direction::Darken);
static BRIGHTEN_LUMA: BrightenDarken = BrightenDarken::new(Measure::Luma, Direction::Brighten);
static DARKEN_LUMA: BrightenDarken = BrightenDarken::new(Measure::Luma, Direction::Darken);
static BRIGHTEN_MAX: BrightenDarken = BrightenDarken::new(Measure::Max, Direction::Brighten);
static DARKEN_MAX: BrightenDarken = BrightenDarken::new(Measure::Max, Direction::Darken);
static MULTIPLY: Multiply = Multiply;
static SCREEN: Screen = Screen;
static DIFFERENCE: Difference = Difference;

/// Whether a filter needs a lower reference image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCategory {
    /// Operates on the layer alone.
    Single,
    /// Blends the layer with the composite of the layers below it.
    Dual,
}

impl FilterCategory {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterCategory::Single => "Single image",
            FilterCategory::Dual => "Dual image",
        }
    }
}

/// Every filter known to the collage engine, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterName {
    /// Leaves pixels unchanged.
    #[default]
    Normal,
    /// Keeps only the red channel.
    RedFilter,
    /// Keeps only the blue channel.
    BlueFilter,
    /// Keeps only the green channel.
    GreenFilter,
    /// Adds the channel average.
    BrightenIntensity,
    /// Subtracts the channel average.
    DarkenIntensity,
    /// Adds the weighted luma.
    BrightenLuma,
    /// Subtracts the weighted luma.
    DarkenLuma,
    /// Adds the largest channel.
    BrightenMax,
    /// Subtracts the largest channel.
    DarkenMax,
    /// Multiplies lightness with the layers below.
    DarkenMultiply,
    /// Screens lightness with the layers below.
    BrightenScreen,
    /// Absolute difference with the layers below.
    InversionDifference,
}

impl FilterName {
    /// All filters in catalog order.
    pub const ALL: [FilterName; 13] = [
        FilterName::Normal,
        FilterName::RedFilter,
        FilterName::BlueFilter,
        FilterName::GreenFilter,
        FilterName::BrightenIntensity,
        FilterName::DarkenIntensity,
        FilterName::BrightenLuma,
        FilterName::DarkenLuma,
        FilterName::BrightenMax,
        FilterName::DarkenMax,
        FilterName::DarkenMultiply,
        FilterName::BrightenScreen,
        FilterName::InversionDifference,
    ];

    /// Iterate over every filter in catalog order.
    pub fn all() -> impl Iterator<Item = FilterName> {
        Self::ALL.into_iter()
    }

    /// Look up a filter by its external name. Matching is exact.
    pub fn from_name(name: &str) -> ModelResult<Self> {
        Self::all()
            .find(|filter| filter.name() == name)
            .ok_or_else(|| ModelError::UnknownFilter(name.to_string()))
    }

    /// External name of the filter.
    pub fn name(&self) -> &'static str {
        match self {
            FilterName::Normal => "normal",
            FilterName::RedFilter => "red_filter",
            FilterName::BlueFilter => "blue_filter",
            FilterName::GreenFilter => "green_filter",
            FilterName::BrightenIntensity => "brighten_intensity",
            FilterName::DarkenIntensity => "darken_intensity",
            FilterName::BrightenLuma => "brighten_luma",
            FilterName::DarkenLuma => "darken_luma",
            FilterName::BrightenMax => "brighten_max",
            FilterName::DarkenMax => "darken_max",
            FilterName::DarkenMultiply => "darken_multiply",
            FilterName::BrightenScreen => "brighten_screen",
            FilterName::InversionDifference => "inversion_difference",
        }
    }

    /// Whether the filter works on one image or blends with a lower reference.
    pub fn category(&self) -> FilterCategory {
        match self {
            FilterName::DarkenMultiply
            | FilterName::BrightenScreen
            | FilterName::InversionDifference => FilterCategory::Dual,
            _ => FilterCategory::Single,
        }
    }

    /// Check if this is a dual-image filter.
    pub fn is_dual(&self) -> bool {
        self.category() == FilterCategory::Dual
    }

    /// One-line description for help output.
    pub fn description(&self) -> &'static str {
        match self {
            FilterName::Normal => "Leave the layer unchanged",
            FilterName::RedFilter => "Keep only the red channel",
            FilterName::BlueFilter => "Keep only the blue channel",
            FilterName::GreenFilter => "Keep only the green channel",
            FilterName::BrightenIntensity => "Brighten by the average of the channels",
            FilterName::DarkenIntensity => "Darken by the average of the channels",
            FilterName::BrightenLuma => "Brighten by the weighted luma",
            FilterName::DarkenLuma => "Darken by the weighted luma",
            FilterName::BrightenMax => "Brighten by the largest channel",
            FilterName::DarkenMax => "Darken by the largest channel",
            FilterName::DarkenMultiply => "Multiply lightness with the layers below",
            FilterName::BrightenScreen => "Screen lightness with the layers below",
            FilterName::InversionDifference => "Difference with the layers below",
        }
    }

    /// Serializable summary of this filter.
    pub fn info(&self) -> FilterInfo {
        FilterInfo {
            name: self.name().to_string(),
            category: self.category(),
            description: self.description().to_string(),
        }
    }

    /// The filter as a single-image transform.
    ///
    /// Dual-image filters use [`Pixel::BLANK`](crate::core::pixel::Pixel::BLANK) as the
    /// lower reference in this form.
    pub fn as_one_filter(&self) -> &'static dyn OneFilter {
        match self {
            FilterName::Normal => &NORMAL,
            FilterName::RedFilter => &RED,
            FilterName::BlueFilter => &BLUE,
            FilterName::GreenFilter => &GREEN,
            FilterName::BrightenIntensity => &BRIGHTEN_INTENSITY,
            FilterName::DarkenIntensity => &DARKEN_INTENSITY,
            FilterName::BrightenLuma => &BRIGHTEN_LUMA,
            FilterName::DarkenLuma => &DARKEN_LUMA,
            FilterName::BrightenMax => &BRIGHTEN_MAX,
            FilterName::DarkenMax => &DARKEN_MAX,
            FilterName::DarkenMultiply => &MULTIPLY,
            FilterName::BrightenScreen => &SCREEN,
            FilterName::InversionDifference => &DIFFERENCE,
        }
    }

    /// The filter as a dual-image transform, if it is one.
    pub fn as_two_filter(&self) -> Option<&'static dyn TwoFilter> {
        match self {
            FilterName::DarkenMultiply => Some(&MULTIPLY),
            FilterName::BrightenScreen => Some(&SCREEN),
            FilterName::InversionDifference => Some(&DIFFERENCE),
            _ => None,
        }
    }

    /// Search filters by a case-insensitive substring of their name or description.
    pub fn search(query: &str) -> Vec<FilterName> {
        let query = query.to_lowercase();
        Self::all()
            .filter(|filter| {
                filter.name().contains(&query)
                    || filter.description().to_lowercase().contains(&query)
            })
            .collect()
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for FilterName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Metadata describing one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInfo {
    /// External name.
    pub name: String,
    /// Single or dual image.
    pub category: FilterCategory,
    /// Human readable description.
    pub description: String,
}
