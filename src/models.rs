use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Yes,
    No,
    Both,
    Nr,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Yes, Category::No, Category::Both, Category::Nr];

    pub fn label(self) -> &'static str {
        match self {
            Category::Yes => "Yes",
            Category::No => "No",
            Category::Both => "Both",
            Category::Nr => "Not reported",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetVariant {
    #[default]
    Counts,
    Percentages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyCounts {
    pub yes: u32,
    pub no: u32,
    pub both: u32,
    pub reported: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DailyPercentages {
    pub yes: u32,
    pub no: u32,
    pub both: u32,
    pub nr: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CategoryTotals {
    pub yes: u32,
    pub no: u32,
    pub both: u32,
    pub nr: u32,
    // schools reported for counts, 100 for percentages
    pub base: u32,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> u32 {
        match category {
            Category::Yes => self.yes,
            Category::No => self.no,
            Category::Both => self.both,
            Category::Nr => self.nr,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.yes == 0 && self.no == 0 && self.both == 0 && self.nr == 0 && self.base == 0
    }
}

impl From<DailyCounts> for CategoryTotals {
    fn from(day: DailyCounts) -> Self {
        Self {
            yes: day.yes,
            no: day.no,
            both: day.both,
            nr: day.reported.saturating_sub(day.yes + day.no + day.both),
            base: day.reported,
        }
    }
}

impl From<DailyPercentages> for CategoryTotals {
    fn from(day: DailyPercentages) -> Self {
        let any = day.yes + day.no + day.both + day.nr > 0;
        Self {
            yes: day.yes,
            no: day.no,
            both: day.both,
            nr: day.nr,
            base: if any { 100 } else { 0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub totals: CategoryTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieSlice {
    pub category: Category,
    pub label: &'static str,
    pub percent: i32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub totals: CategoryTotals,
    pub majority: Category,
    pub breakdown: Vec<PieSlice>,
}

#[derive(Debug, Serialize)]
pub struct GridCell {
    pub key: String,
    pub label: String,
    pub dates: Vec<String>,
    pub color: String,
    pub majority: Category,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct DetailPanel {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub reporting_note: String,
    pub totals: CategoryTotals,
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub variant: DatasetVariant,
    pub weekly: bool,
    pub heatmap: bool,
    pub selected: String,
    pub cells: Vec<GridCell>,
    pub detail: DetailPanel,
}

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    pub variant: Option<DatasetVariant>,
    pub date: Option<String>,
    #[serde(default)]
    pub weekly: bool,
    #[serde(default)]
    pub heatmap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    #[serde(rename = "9")]
    Ninth,
    #[serde(rename = "10")]
    Tenth,
    #[serde(rename = "11")]
    Eleventh,
    #[serde(rename = "12")]
    Twelfth,
    #[serde(rename = "other")]
    Other,
}

impl Grade {
    pub const ALL: [Grade; 5] = [
        Grade::Ninth,
        Grade::Tenth,
        Grade::Eleventh,
        Grade::Twelfth,
        Grade::Other,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Grade::Ninth => "9",
            Grade::Tenth => "10",
            Grade::Eleventh => "11",
            Grade::Twelfth => "12",
            Grade::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::Ninth => "9th grade",
            Grade::Tenth => "10th grade",
            Grade::Eleventh => "11th grade",
            Grade::Twelfth => "12th grade",
            Grade::Other => "Other / prefer not to say",
        }
    }
}

/// Form fields as posted by the browser. Unchecked checkboxes are absent.
#[derive(Debug, Deserialize, Default)]
pub struct ReportFormFields {
    #[serde(default)]
    pub grade: Grade,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub principal_email: String,
    pub anonymous: Option<String>,
    #[serde(default)]
    pub your_name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub grade: Grade,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub principal_email: String,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub your_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Sent,
    Invalid,
    Failed,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub outcome: SubmissionOutcome,
    pub message: String,
    pub route: Option<String>,
    pub grade: Grade,
    pub school: String,
    pub principal_email: String,
    pub anonymous: bool,
    pub your_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
