//! Enriched roster output.

use std::io::Write;

use crate::error::{EngineError, EngineResult};
use crate::models::{EnrichedEmployee, SimulationResult};

use super::table::Roster;

const DERIVED_COLUMNS: [&str; 3] = ["raise_rate", "increase_amount", "new_salary"];
const MONTHLY_COLUMNS: [&str; 3] = [
    "monthly_salary_current",
    "monthly_salary_new",
    "monthly_increase",
];

/// Writes the enriched roster as CSV.
///
/// Every original column is written first, in source order, followed by the
/// derived columns. An original column that shares a name with a derived
/// column is replaced by the derived value. Values are unformatted so the
/// output can be re-read by other tools.
///
/// `result` must come from simulating `roster`; rows are paired by position.
pub fn write_enriched_csv<W: Write>(
    roster: &Roster,
    result: &SimulationResult,
    sink: W,
) -> EngineResult<()> {
    if roster.len() != result.employees.len() {
        return Err(EngineError::OutputError {
            message: format!(
                "roster has {} rows but the result has {}",
                roster.len(),
                result.employees.len()
            ),
        });
    }

    let include_monthly = result.employees.iter().any(|e| e.monthly.is_some());
    let derived: Vec<&str> = if include_monthly {
        DERIVED_COLUMNS.iter().chain(MONTHLY_COLUMNS.iter()).copied().collect()
    } else {
        DERIVED_COLUMNS.to_vec()
    };

    let kept: Vec<usize> = roster
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| !derived.contains(&name.as_str()))
        .map(|(idx, _)| idx)
        .collect();

    let mut writer = csv::Writer::from_writer(sink);

    let header = kept
        .iter()
        .map(|&idx| roster.columns()[idx].as_str())
        .chain(derived.iter().copied());
    writer.write_record(header).map_err(output_error)?;

    for (row, enriched) in roster.rows().iter().zip(&result.employees) {
        let original = kept.iter().map(|&idx| row.get(idx).unwrap_or_default().to_string());
        let record: Vec<String> = original
            .chain(derived_values(enriched, include_monthly))
            .collect();
        writer.write_record(&record).map_err(output_error)?;
    }

    writer.flush().map_err(output_error)
}

fn output_error(error: impl std::fmt::Display) -> EngineError {
    EngineError::OutputError {
        message: error.to_string(),
    }
}

fn derived_values(row: &EnrichedEmployee, include_monthly: bool) -> Vec<String> {
    let mut values = vec![
        row.raise_rate.normalize().to_string(),
        row.increase_amount.to_string(),
        row.new_salary.to_string(),
    ];
    if include_monthly {
        match &row.monthly {
            Some(m) => values.extend([
                m.monthly_salary_current.to_string(),
                m.monthly_salary_new.to_string(),
                m.monthly_increase.to_string(),
            ]),
            None => values.extend(std::iter::repeat_n(String::new(), 3)),
        }
    }
    values
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

    fn render(csv: &str, include_monthly: bool) -> String {
        let roster = read_csv(csv.as_bytes()).unwrap();
        let resolver = RateResolver::new(RateTable::flat([(Rating::S, dec("0.05"))]));
        let result = simulate(&roster, &resolver, dec("1000000"), include_monthly).unwrap();

        let mut out = Vec::new();
        write_enriched_csv(&roster, &result, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_original_columns_precede_derived() {
        let out = render("dept,name,salary,rating\nops,A,6000000,S\n", false);
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("dept,name,salary,rating,raise_rate,increase_amount,new_salary")
        );
        assert_eq!(lines.next(), Some("ops,A,6000000,S,0.05,300000,6300000"));
    }

    #[test]
    fn test_monthly_columns_appended() {
        let out = render("salary,rating\n6000000,S\n", true);
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some(
                "salary,rating,raise_rate,increase_amount,new_salary,\
                 monthly_salary_current,monthly_salary_new,monthly_increase"
            )
        );
        assert_eq!(
            lines.next(),
            Some("6000000,S,0.05,300000,6300000,500000,525000,25000")
        );
    }

    #[test]
    fn test_colliding_column_is_replaced() {
        let out = render("salary,rating,new_salary\n6000000,S,stale\n", false);
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("salary,rating,raise_rate,increase_amount,new_salary")
        );
        assert_eq!(lines.next(), Some("6000000,S,0.05,300000,6300000"));
    }

    #[test]
    fn test_mismatched_result_is_rejected() {
        let roster = read_csv("salary,rating\n100,S\n".as_bytes()).unwrap();
        let other = read_csv("salary,rating\n100,S\n200,A\n".as_bytes()).unwrap();
        let resolver = RateResolver::new(RateTable::flat([(Rating::S, dec("0.05"))]));
        let result = simulate(&other, &resolver, Decimal::ZERO, false).unwrap();

        let mut out = Vec::new();
        assert!(write_enriched_csv(&roster, &result, &mut out).is_err());
    }
}
