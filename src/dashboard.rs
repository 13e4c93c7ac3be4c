use crate::dataset;
use crate::errors::AppError;
use crate::models::{
    CategoryTotals, DailyReport, DashboardQuery, DashboardView, DatasetVariant, DetailPanel,
    GridCell,
};
use crate::palette::{ColorPolicy, cell_shade};
use crate::stats::{summarize, weekly_blocks};
use chrono::NaiveDate;

pub fn build_dashboard(query: &DashboardQuery) -> Result<DashboardView, AppError> {
    let variant = query.variant.unwrap_or_default();
    let selected = match query.date.as_deref().map(str::trim) {
        None | Some("") => dataset::range_start(),
        Some(raw) => parse_selected(raw)?,
    };
    Ok(build_dashboard_at(variant, selected, query.weekly, query.heatmap))
}

pub fn build_dashboard_at(
    variant: DatasetVariant,
    selected: NaiveDate,
    weekly: bool,
    heatmap: bool,
) -> DashboardView {
    let rows = dataset::rows(variant);
    let policy = ColorPolicy::for_variant(variant);

    let groups: Vec<&[DailyReport]> = if weekly {
        weekly_blocks(&rows)
    } else {
        rows.chunks(1).collect()
    };

    let mut detail = None;
    let mut cells = Vec::with_capacity(groups.len());
    for group in groups {
        let summary = summarize(variant, group);
        let is_selected = group.iter().any(|row| row.date == selected);
        let label = group_label(group, weekly);

        if is_selected {
            detail = Some(DetailPanel {
                title: format!("{} summary: {label}", if weekly { "Weekly" } else { "Daily" }),
                reporting_note: reporting_note(variant, &summary.totals, weekly),
                slices: summary.breakdown.clone(),
                totals: summary.totals,
            });
        }

        cells.push(GridCell {
            key: group
                .first()
                .map(|row| dataset::date_key(row.date))
                .unwrap_or_default(),
            label,
            dates: group.iter().map(|row| dataset::date_key(row.date)).collect(),
            color: cell_shade(policy, &summary, heatmap).css(),
            majority: summary.majority,
            selected: is_selected,
        });
    }

    let detail = detail.unwrap_or_else(|| DetailPanel {
        title: format!("Daily summary: {}", short_label(selected)),
        slices: Vec::new(),
        reporting_note: reporting_note(variant, &CategoryTotals::default(), false),
        totals: CategoryTotals::default(),
    });

    DashboardView {
        variant,
        weekly,
        heatmap,
        selected: dataset::date_key(selected),
        cells,
        detail,
    }
}

fn parse_selected(raw: &str) -> Result<NaiveDate, AppError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request("date must be formatted as YYYY-MM-DD"))?;
    if !dataset::contains(date) {
        return Err(AppError::bad_request(format!(
            "date must be between {} and {}",
            dataset::range_start(),
            dataset::range_end()
        )));
    }
    Ok(date)
}

fn reporting_note(variant: DatasetVariant, totals: &CategoryTotals, weekly: bool) -> String {
    let span = if weekly { "during this week" } else { "on this date" };
    match variant {
        _ if totals.base == 0 => format!("No schools reported {span}."),
        DatasetVariant::Counts => format!("{} schools reported {span}.", totals.base),
        DatasetVariant::Percentages => format!(
            "About {}% of district high schools reported {span}.",
            totals.base.saturating_sub(totals.nr)
        ),
    }
}

fn group_label(group: &[DailyReport], weekly: bool) -> String {
    match (group.first(), group.last()) {
        (Some(first), Some(last)) if weekly && first.date != last.date => {
            format!("{} to {}", short_label(first.date), short_label(last.date))
        }
        (Some(first), _) => short_label(first.date),
        _ => String::new(),
    }
}

pub fn short_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, m, d).unwrap()
    }

    #[test]
    fn daily_grid_has_one_cell_per_day() {
        let view = build_dashboard_at(DatasetVariant::Counts, day(10, 21), false, false);
        assert_eq!(view.cells.len(), 26);
        assert_eq!(view.cells.iter().filter(|c| c.selected).count(), 1);
        assert_eq!(view.cells[0].label, "Oct 21");
        assert_eq!(view.detail.title, "Daily summary: Oct 21");
        assert_eq!(view.detail.reporting_note, "14 schools reported on this date.");
    }

    #[test]
    fn weekly_grid_groups_by_seven_days() {
        let view = build_dashboard_at(DatasetVariant::Counts, day(10, 30), true, false);
        assert_eq!(view.cells.len(), 4);
        assert_eq!(view.cells[0].dates.len(), 7);
        assert_eq!(view.cells[3].dates.len(), 5);
        assert!(view.cells[1].selected);
        assert_eq!(view.cells[1].label, "Oct 28 to Nov 3");
        assert_eq!(view.detail.title, "Weekly summary: Oct 28 to Nov 3");
    }

    #[test]
    fn missing_day_reports_nothing() {
        let view = build_dashboard_at(DatasetVariant::Counts, day(10, 26), false, false);
        assert!(view.detail.slices.is_empty());
        assert_eq!(view.detail.reporting_note, "No schools reported on this date.");
        let cell = view.cells.iter().find(|c| c.selected).unwrap();
        assert_eq!(cell.color, "#9E9E9E");
    }

    #[test]
    fn heatmap_darkens_no_majority_cells() {
        let view = build_dashboard_at(DatasetVariant::Counts, day(10, 21), false, true);
        let first = &view.cells[0];
        assert_eq!(first.majority, Category::No);
        assert!(first.color.starts_with("rgba(244,67,54,"));
    }

    #[test]
    fn percentage_variant_charts_not_reported() {
        let view = build_dashboard_at(DatasetVariant::Percentages, day(10, 29), false, false);
        let cell = view.cells.iter().find(|c| c.selected).unwrap();
        assert_eq!(cell.majority, Category::Nr);
        assert!(view.detail.slices.iter().any(|s| s.category == Category::Nr));
        assert_eq!(view.detail.slices.iter().map(|s| s.percent).sum::<i32>(), 100);
    }

    #[test]
    fn percentage_note_shows_reported_share() {
        let view = build_dashboard_at(DatasetVariant::Percentages, day(10, 21), false, false);
        assert_eq!(
            view.detail.reporting_note,
            "About 64% of district high schools reported on this date."
        );

        let view = build_dashboard_at(DatasetVariant::Percentages, day(10, 23), true, false);
        assert_eq!(view.detail.totals.nr, 46);
        assert_eq!(
            view.detail.reporting_note,
            "About 54% of district high schools reported during this week."
        );

        let view = build_dashboard_at(DatasetVariant::Percentages, day(10, 26), false, false);
        assert_eq!(view.detail.reporting_note, "No schools reported on this date.");
    }

    #[test]
    fn query_rejects_out_of_range_dates() {
        let query = DashboardQuery {
            date: Some("2024-01-01".into()),
            ..Default::default()
        };
        assert!(build_dashboard(&query).is_err());

        let query = DashboardQuery {
            date: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(build_dashboard(&query).is_err());

        let view = build_dashboard(&DashboardQuery::default()).unwrap();
        assert_eq!(view.selected, "2023-10-21");
    }
}
