use crate::models::{
    AggregateSummary, Category, CategoryTotals, DailyReport, DatasetVariant, PieSlice,
};
use crate::palette::flat_color;

pub fn sum_totals(rows: &[DailyReport]) -> CategoryTotals {
    rows.iter().fold(CategoryTotals::default(), |mut acc, row| {
        acc.yes = acc.yes.saturating_add(row.totals.yes);
        acc.no = acc.no.saturating_add(row.totals.no);
        acc.both = acc.both.saturating_add(row.totals.both);
        acc.nr = acc.nr.saturating_add(row.totals.nr);
        acc.base = acc.base.saturating_add(row.totals.base);
        acc
    })
}

pub fn average_totals(rows: &[DailyReport]) -> CategoryTotals {
    if rows.is_empty() {
        return CategoryTotals::default();
    }
    let sum = sum_totals(rows);
    let denom = rows.len() as f64;
    let mean = |value: u32| (f64::from(value) / denom).round() as u32;

    CategoryTotals {
        yes: mean(sum.yes),
        no: mean(sum.no),
        both: mean(sum.both),
        nr: mean(sum.nr),
        base: mean(sum.base),
    }
}

/// Ties go to the earlier candidate.
pub fn majority(candidates: &[(Category, u32)]) -> Category {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted.first().map(|(category, _)| *category).unwrap_or(Category::Yes)
}

/// Sums to exactly 100, or is empty when every part is zero.
pub fn normalize_percentages(parts: &[(Category, u32)]) -> Vec<PieSlice> {
    let total: u64 = parts.iter().map(|(_, value)| u64::from(*value)).sum();
    if total == 0 {
        return Vec::new();
    }

    let surviving: Vec<_> = parts.iter().filter(|(_, value)| *value > 0).collect();
    let last = surviving.len() - 1;
    let mut percents: Vec<i32> = surviving
        .iter()
        .take(last)
        .map(|(_, value)| (f64::from(*value) / total as f64 * 100.0).round() as i32)
        .collect();
    let mut residual = 100 - percents.iter().sum::<i32>();

    // Rounding up can overshoot 100; take the excess back from the largest
    // earlier shares so no slice goes negative.
    while residual < 0 {
        let Some(largest) = (0..percents.len()).max_by(|a, b| {
            percents[*a].cmp(&percents[*b]).then(b.cmp(a))
        }) else {
            break;
        };
        percents[largest] -= 1;
        residual += 1;
    }
    percents.push(residual);

    surviving
        .into_iter()
        .zip(percents)
        .map(|((category, _), percent)| PieSlice {
            category: *category,
            label: category.label(),
            percent,
            color: flat_color(*category),
        })
        .collect()
}

pub fn weekly_blocks(rows: &[DailyReport]) -> Vec<&[DailyReport]> {
    rows.chunks(7).collect()
}

// Counts leave "not reported" out of both ranking and chart.
pub fn candidates(variant: DatasetVariant, totals: &CategoryTotals) -> Vec<(Category, u32)> {
    let categories: &[Category] = match variant {
        DatasetVariant::Counts => &Category::ALL[..3],
        DatasetVariant::Percentages => &Category::ALL,
    };
    categories
        .iter()
        .map(|category| (*category, totals.get(*category)))
        .collect()
}

pub fn summarize(variant: DatasetVariant, rows: &[DailyReport]) -> AggregateSummary {
    let totals = match variant {
        DatasetVariant::Counts => sum_totals(rows),
        DatasetVariant::Percentages => {
            let reported: Vec<DailyReport> = rows
                .iter()
                .filter(|row| !row.totals.is_empty())
                .copied()
                .collect();
            let mut totals = average_totals(&reported);
            let any = totals.yes + totals.no + totals.both + totals.nr > 0;
            totals.base = if any { 100 } else { 0 };
            totals
        }
    };
    let parts = candidates(variant, &totals);

    AggregateSummary {
        totals,
        majority: majority(&parts),
        breakdown: normalize_percentages(&parts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn row(offset: i64, yes: u32, no: u32, both: u32, nr: u32, base: u32) -> DailyReport {
        DailyReport {
            date: NaiveDate::from_ymd_opt(2023, 10, 21).unwrap() + Duration::days(offset),
            totals: CategoryTotals { yes, no, both, nr, base },
        }
    }

    fn zero_rows(n: usize) -> Vec<DailyReport> {
        (0..n).map(|i| row(i as i64, 0, 0, 0, 0, 0)).collect()
    }

    #[test]
    fn sum_adds_every_field() {
        let rows = vec![row(0, 1, 13, 0, 0, 14), row(1, 1, 9, 1, 0, 11)];
        let totals = sum_totals(&rows);
        assert_eq!(totals, CategoryTotals { yes: 2, no: 22, both: 1, nr: 0, base: 25 });
    }

    #[test]
    fn average_rounds_to_nearest() {
        let rows = vec![row(0, 5, 59, 0, 36, 100), row(1, 0, 45, 0, 55, 100)];
        let totals = average_totals(&rows);
        assert_eq!(totals.yes, 3);
        assert_eq!(totals.no, 52);
        assert_eq!(totals.nr, 46);
        assert_eq!(totals.base, 100);
    }

    #[test]
    fn majority_prefers_declared_order_on_ties() {
        let tied = [
            (Category::Yes, 4),
            (Category::No, 4),
            (Category::Both, 4),
            (Category::Nr, 4),
        ];
        assert_eq!(majority(&tied), Category::Yes);

        let no_both = [
            (Category::Yes, 1),
            (Category::No, 7),
            (Category::Both, 7),
            (Category::Nr, 2),
        ];
        assert_eq!(majority(&no_both), Category::No);

        let both_nr = [
            (Category::Yes, 0),
            (Category::No, 0),
            (Category::Both, 3),
            (Category::Nr, 3),
        ];
        assert_eq!(majority(&both_nr), Category::Both);
    }

    #[test]
    fn majority_of_all_zero_is_yes() {
        let zero = [(Category::Yes, 0), (Category::No, 0), (Category::Both, 0)];
        assert_eq!(majority(&zero), Category::Yes);
    }

    #[test]
    fn breakdown_sums_to_one_hundred() {
        let samples: &[[u32; 4]] = &[
            [1, 1, 1, 0],
            [1, 13, 0, 0],
            [2, 3, 5, 7],
            [33, 33, 33, 1],
            [0, 0, 0, 9],
            [1, 9, 1, 0],
            [17, 0, 4, 80],
        ];
        for values in samples {
            let parts: Vec<_> = Category::ALL.iter().copied().zip(values.iter().copied()).collect();
            let slices = normalize_percentages(&parts);
            assert_eq!(slices.iter().map(|s| s.percent).sum::<i32>(), 100, "{values:?}");
        }
    }

    #[test]
    fn breakdown_drops_zero_parts_and_uses_residual() {
        let parts = [(Category::Yes, 1), (Category::No, 1), (Category::Both, 1)];
        let slices = normalize_percentages(&parts);
        let percents: Vec<_> = slices.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![33, 33, 34]);

        let parts = [(Category::Yes, 0), (Category::No, 12), (Category::Both, 0)];
        let slices = normalize_percentages(&parts);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].category, Category::No);
        assert_eq!(slices[0].percent, 100);
    }

    #[test]
    fn breakdown_never_goes_negative_when_rounding_overshoots() {
        let parts = [
            (Category::Yes, 335),
            (Category::No, 335),
            (Category::Both, 329),
            (Category::Nr, 1),
        ];
        let slices = normalize_percentages(&parts);
        let percents: Vec<_> = slices.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![33, 34, 33, 0]);
        assert!(percents.iter().all(|p| *p >= 0));
    }

    #[test]
    fn breakdown_is_empty_without_data() {
        let parts = [(Category::Yes, 0), (Category::No, 0)];
        assert!(normalize_percentages(&parts).is_empty());
        assert!(normalize_percentages(&[]).is_empty());
    }

    #[test]
    fn weekly_blocks_cover_range_without_overlap() {
        for n in 0..=30 {
            let rows = zero_rows(n);
            let blocks = weekly_blocks(&rows);
            assert_eq!(blocks.len(), n.div_ceil(7));
            for block in blocks.iter().take(blocks.len().saturating_sub(1)) {
                assert_eq!(block.len(), 7);
            }
            let flattened: Vec<_> = blocks.iter().flat_map(|b| b.iter().map(|r| r.date)).collect();
            let original: Vec<_> = rows.iter().map(|r| r.date).collect();
            assert_eq!(flattened, original);
        }
    }

    #[test]
    fn count_summary_ignores_unreported_share() {
        let rows = vec![row(0, 1, 9, 1, 3, 14)];
        let summary = summarize(DatasetVariant::Counts, &rows);
        assert_eq!(summary.majority, Category::No);
        assert!(summary.breakdown.iter().all(|s| s.category != Category::Nr));
        assert_eq!(summary.breakdown.iter().map(|s| s.percent).sum::<i32>(), 100);
    }

    #[test]
    fn percentage_summary_can_pick_not_reported() {
        let rows = vec![row(0, 0, 27, 0, 73, 100), row(1, 0, 0, 0, 0, 0)];
        let summary = summarize(DatasetVariant::Percentages, &rows);
        assert_eq!(summary.majority, Category::Nr);
        assert_eq!(summary.totals.base, 100);
    }

    #[test]
    fn percentage_average_skips_days_without_data() {
        let rows = vec![
            row(0, 10, 60, 0, 30, 100),
            row(1, 0, 0, 0, 0, 0),
            row(2, 20, 40, 10, 30, 100),
        ];
        let summary = summarize(DatasetVariant::Percentages, &rows);
        assert_eq!(summary.totals.yes, 15);
        assert_eq!(summary.totals.no, 50);
        assert_eq!(summary.totals.both, 5);
        assert_eq!(summary.totals.nr, 30);
        assert_eq!(summary.breakdown.iter().map(|s| s.percent).sum::<i32>(), 100);

        let empty = summarize(DatasetVariant::Percentages, &rows[1..2]);
        assert!(empty.breakdown.is_empty());
        assert_eq!(empty.totals.base, 0);
    }
}
