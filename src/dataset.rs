use crate::models::{CategoryTotals, DailyCounts, DailyPercentages, DailyReport, DatasetVariant};
use chrono::{Duration, NaiveDate};

pub const RANGE_START: (i32, u32, u32) = (2023, 10, 21);
pub const RANGE_END: (i32, u32, u32) = (2023, 11, 15);

const fn counts(yes: u32, no: u32, both: u32, reported: u32) -> DailyCounts {
    DailyCounts { yes, no, both, reported }
}

const fn pct(yes: u32, no: u32, both: u32, nr: u32) -> DailyPercentages {
    DailyPercentages { yes, no, both, nr }
}

const COUNT_TABLE: &[(&str, DailyCounts)] = &[
    ("2023-10-21", counts(1, 13, 0, 14)),
    ("2023-10-22", counts(1, 9, 1, 11)),
    ("2023-10-23", counts(0, 10, 0, 10)),
    ("2023-10-24", counts(0, 12, 0, 12)),
    ("2023-10-25", counts(0, 12, 0, 12)),
    ("2023-10-28", counts(1, 9, 0, 10)),
    ("2023-10-29", counts(0, 6, 0, 6)),
    ("2023-10-30", counts(0, 12, 0, 12)),
    ("2023-10-31", counts(1, 10, 0, 11)),
    ("2023-11-01", counts(0, 12, 0, 12)),
    ("2023-11-04", counts(0, 12, 0, 12)),
    ("2023-11-05", counts(0, 12, 0, 12)),
    ("2023-11-06", counts(0, 12, 0, 12)),
    ("2023-11-07", counts(0, 12, 0, 12)),
    ("2023-11-08", counts(0, 12, 0, 12)),
    ("2023-11-11", counts(0, 12, 0, 12)),
    ("2023-11-12", counts(0, 12, 0, 12)),
    ("2023-11-13", counts(0, 12, 0, 12)),
    ("2023-11-14", counts(0, 12, 0, 12)),
    ("2023-11-15", counts(0, 12, 0, 12)),
];

// Shares of the 22 district high schools.
const PERCENT_TABLE: &[(&str, DailyPercentages)] = &[
    ("2023-10-21", pct(5, 59, 0, 36)),
    ("2023-10-22", pct(5, 41, 4, 50)),
    ("2023-10-23", pct(0, 45, 0, 55)),
    ("2023-10-24", pct(0, 55, 0, 45)),
    ("2023-10-25", pct(0, 55, 0, 45)),
    ("2023-10-28", pct(5, 41, 0, 54)),
    ("2023-10-29", pct(0, 27, 0, 73)),
    ("2023-10-30", pct(0, 55, 0, 45)),
    ("2023-10-31", pct(5, 45, 0, 50)),
    ("2023-11-01", pct(0, 55, 0, 45)),
    ("2023-11-04", pct(0, 55, 0, 45)),
    ("2023-11-05", pct(0, 55, 0, 45)),
    ("2023-11-06", pct(0, 55, 0, 45)),
    ("2023-11-07", pct(0, 55, 0, 45)),
    ("2023-11-08", pct(0, 55, 0, 45)),
    ("2023-11-11", pct(0, 55, 0, 45)),
    ("2023-11-12", pct(0, 55, 0, 45)),
    ("2023-11-13", pct(0, 55, 0, 45)),
    ("2023-11-14", pct(0, 55, 0, 45)),
    ("2023-11-15", pct(0, 55, 0, 45)),
];

pub fn range_start() -> NaiveDate {
    let (y, m, d) = RANGE_START;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn range_end() -> NaiveDate {
    let (y, m, d) = RANGE_END;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn dates() -> Vec<NaiveDate> {
    let start = range_start();
    let days = (range_end() - start).num_days();
    (0..=days).map(|offset| start + Duration::days(offset)).collect()
}

// Missing days are filled with zeros.
pub fn rows(variant: DatasetVariant) -> Vec<DailyReport> {
    dates()
        .into_iter()
        .map(|date| DailyReport {
            date,
            totals: lookup(variant, date),
        })
        .collect()
}

pub fn lookup(variant: DatasetVariant, date: NaiveDate) -> CategoryTotals {
    let key = date_key(date);
    match variant {
        DatasetVariant::Counts => COUNT_TABLE
            .iter()
            .find(|(day, _)| *day == key)
            .map(|(_, row)| CategoryTotals::from(*row))
            .unwrap_or_default(),
        DatasetVariant::Percentages => PERCENT_TABLE
            .iter()
            .find(|(day, _)| *day == key)
            .map(|(_, row)| CategoryTotals::from(*row))
            .unwrap_or_default(),
    }
}

pub fn contains(date: NaiveDate) -> bool {
    date >= range_start() && date <= range_end()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
