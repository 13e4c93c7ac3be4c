use crate::models::{AggregateSummary, Category, DatasetVariant};

pub const YES: &str = "#4CAF50";
pub const NO: &str = "#F44336";
pub const BOTH: &str = "#FFC107";
pub const NOT_REPORTED: &str = "#9E9E9E";

const HEAT_MIN_ALPHA: f64 = 0.3;
const HEAT_SPAN: f64 = 0.7;

pub fn flat_color(category: Category) -> &'static str {
    match category {
        Category::Yes => YES,
        Category::No => NO,
        Category::Both => BOTH,
        Category::Nr => NOT_REPORTED,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPolicy {
    /// Render a computed "yes" majority as gray instead of green.
    pub mute_yes_majority: bool,
}

impl ColorPolicy {
    pub fn for_variant(variant: DatasetVariant) -> Self {
        match variant {
            DatasetVariant::Counts => Self { mute_yes_majority: true },
            DatasetVariant::Percentages => Self { mute_yes_majority: false },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shade {
    NoData,
    Flat(&'static str),
    Heat { alpha: f64 },
}

impl Shade {
    pub fn css(&self) -> String {
        match self {
            Shade::NoData => NOT_REPORTED.to_string(),
            Shade::Flat(color) => (*color).to_string(),
            Shade::Heat { alpha } => format!("rgba(244,67,54,{alpha:.2})"),
        }
    }
}

pub fn heat_alpha(no: u32, base: u32) -> f64 {
    let intensity = if base == 0 {
        0.0
    } else {
        (f64::from(no) / f64::from(base)).clamp(0.0, 1.0)
    };
    HEAT_MIN_ALPHA + intensity * HEAT_SPAN
}

pub fn cell_shade(policy: ColorPolicy, summary: &AggregateSummary, heatmap: bool) -> Shade {
    if summary.totals.is_empty() {
        return Shade::NoData;
    }

    match summary.majority {
        Category::Yes if policy.mute_yes_majority => Shade::Flat(NOT_REPORTED),
        Category::No if heatmap => Shade::Heat {
            alpha: heat_alpha(summary.totals.no, summary.totals.base),
        },
        majority => Shade::Flat(flat_color(majority)),
    }
}
