//! Plain-text rendering of simulation results.
//!
//! Used by the command-line binary. Amounts are rounded to whole units and
//! grouped in thousands; rates are shown as percentages.

mod format;

use std::fmt::Write;

pub use format::{format_amount, format_percent, format_signed_amount};

use crate::models::{BudgetSummary, SimulationResult};

/// Renders the budget summary as three labelled lines.
///
/// # Examples
///
/// ```
/// use raise_engine::models::BudgetSummary;
/// use raise_engine::report::render_summary;
/// use rust_decimal::Decimal;
///
/// let summary = BudgetSummary::new(Decimal::new(500_000, 0), Decimal::new(550_000, 0));
/// let text = render_summary(&summary);
/// assert!(text.contains("Remaining budget:  -50,000 (over budget)"));
/// ```
pub fn render_summary(summary: &BudgetSummary) -> String {
    let status = if summary.is_over_budget() {
        "over budget"
    } else {
        "within budget"
    };
    format!(
        "Total budget:      {}\nTotal cost:        {}\nRemaining budget:  {} ({})\n",
        format_amount(summary.total_budget),
        format_amount(summary.total_cost),
        format_amount(summary.remaining_budget),
        status
    )
}

/// Renders the enriched rows as an aligned text table.
///
/// `name` and `band_position` columns appear only when some row has them;
/// monthly columns appear only when the run computed them.
pub fn render_table(result: &SimulationResult) -> String {
    let rows = &result.employees;
    let has_name = rows.iter().any(|r| r.employee.name.is_some());
    let has_band = rows.iter().any(|r| r.employee.band_position.is_some());
    let has_monthly = rows.iter().any(|r| r.monthly.is_some());

    let mut header = Vec::new();
    if has_name {
        header.push("name");
    }
    header.push("rating");
    if has_band {
        header.push("band_position");
    }
    header.extend(["raise_rate", "salary", "new_salary", "increase_amount"]);
    if has_monthly {
        header.extend([
            "monthly_salary_current",
            "monthly_salary_new",
            "monthly_increase",
        ]);
    }

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(header.len());
            if has_name {
                cells.push(row.employee.name.clone().unwrap_or_default());
            }
            cells.push(row.employee.rating.clone());
            if has_band {
                cells.push(row.employee.band_position.clone().unwrap_or_default());
            }
            cells.push(format_percent(row.raise_rate));
            cells.push(format_amount(row.employee.salary));
            cells.push(format_amount(row.new_salary));
            cells.push(format_signed_amount(row.increase_amount));
            if has_monthly {
                match &row.monthly {
                    Some(m) => cells.extend([
                        format_amount(m.monthly_salary_current),
                        format_amount(m.monthly_salary_new),
                        format_signed_amount(m.monthly_increase),
                    ]),
                    None => cells.extend(std::iter::repeat_n(String::new(), 3)),
                }
            }
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(&mut out, rule.iter().map(String::as_str), &widths);
    for cells in &body {
        write_line(&mut out, cells.iter().map(String::as_str), &widths);
    }
    out
}

fn write_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", " ".repeat(pad), cell)
        })
        .collect();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{}", line.join("  "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{RateResolver, simulate};
    use crate::config::RateTable;
    use crate::models::Rating;
    use crate::roster::read_csv;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_render_summary_within_budget() {
        let summary = BudgetSummary::new(dec("1000000"), dec("300000"));
        let text = render_summary(&summary);

        assert!(text.contains("Total budget:      1,000,000"));
        assert!(text.contains("Total cost:        300,000"));
        assert!(text.contains("Remaining budget:  700,000 (within budget)"));
    }

    #[test]
    fn test_render_table_columns_and_values() {
        let roster = read_csv("name,salary,rating\nA,6000000,S\nB,5000000,Z\n".as_bytes()).unwrap();
        let resolver = RateResolver::new(RateTable::flat([(Rating::S, dec("0.05"))]));
        let result = simulate(&roster, &resolver, dec("1000000"), true).unwrap();

        let table = render_table(&result);
        let mut lines = table.lines();
        let header = lines.next().unwrap();

        assert!(header.contains("name"));
        assert!(!header.contains("band_position"));
        assert!(header.contains("monthly_increase"));
        assert!(lines.next().unwrap().starts_with('-'));

        let first = lines.next().unwrap();
        assert!(first.contains("5.00%"));
        assert!(first.contains("6,300,000"));
        assert!(first.contains("+300,000"));
        assert!(first.contains("+25,000"));

        let second = lines.next().unwrap();
        assert!(second.contains("0.00%"));
        assert!(second.contains("+0"));
    }

    #[test]
    fn test_render_table_empty_result() {
        let roster = read_csv("salary,rating\n".as_bytes()).unwrap();
        let resolver = RateResolver::new(RateTable::flat([(Rating::S, dec("0.05"))]));
        let result = simulate(&roster, &resolver, dec("0"), false).unwrap();

        assert_eq!(render_table(&result).lines().count(), 2);
    }
}
