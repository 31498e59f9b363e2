//! The raw tabular roster.

use serde::{Deserialize, Serialize};

use crate::models::Employee;

/// A roster as uploaded: column names plus string cells.
///
/// Nothing is interpreted at this stage. Column names are normalised (trimmed,
/// lower-cased, BOM stripped) so schema checks are not defeated by spreadsheet
/// export quirks; cell values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    columns: Vec<String>,
    rows: Vec<RosterRow>,
}

/// One data row of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// 1-based line number in the source (the header is line 1).
    pub line: usize,
    /// Cell values, aligned with [`Roster::columns`].
    pub values: Vec<String>,
}

impl RosterRow {
    /// Returns the cell at `index`, if the row has one.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }
}

impl Roster {
    /// Creates a roster, normalising the column names.
    pub fn new<S: AsRef<str>>(columns: impl IntoIterator<Item = S>, rows: Vec<RosterRow>) -> Self {
        Self {
            columns: columns
                .into_iter()
                .map(|c| normalize_column_name(c.as_ref()))
                .collect(),
            rows,
        }
    }

    /// Builds a roster from typed employee records.
    ///
    /// `name` and `band_position` columns are only emitted when at least one
    /// record carries a value for them. An empty roster always gets a
    /// `band_position` column, so it passes the matrix schema check.
    pub fn from_employees(employees: &[Employee]) -> Self {
        let has_name = employees.iter().any(|e| e.name.is_some());
        let has_band =
            employees.is_empty() || employees.iter().any(|e| e.band_position.is_some());

        let mut columns = Vec::with_capacity(4);
        if has_name {
            columns.push("name");
        }
        columns.extend(["salary", "rating"]);
        if has_band {
            columns.push("band_position");
        }

        let rows = employees
            .iter()
            .enumerate()
            .map(|(idx, employee)| {
                let mut values = Vec::with_capacity(columns.len());
                if has_name {
                    values.push(employee.name.clone().unwrap_or_default());
                }
                values.push(employee.salary.to_string());
                values.push(employee.rating.clone());
                if has_band {
                    values.push(employee.band_position.clone().unwrap_or_default());
                }
                RosterRow {
                    line: idx + 2,
                    values,
                }
            })
            .collect();

        Self::new(columns, rows)
    }

    /// The normalised column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The data rows, in source order.
    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    /// Returns the position of a column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = normalize_column_name(name);
        self.columns.iter().position(|c| *c == name)
    }

    /// Returns true if the roster has the named column.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the roster has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_column_name(name: &str) -> String {
    // Excel writes UTF-8 CSVs with a BOM on the first header.
    name.trim_start_matches('\u{feff}').trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn employee(name: Option<&str>, rating: &str, band: Option<&str>) -> Employee {
        Employee {
            name: name.map(str::to_string),
            salary: Decimal::new(5_000_000, 0),
            rating: rating.to_string(),
            band_position: band.map(str::to_string),
        }
    }

    #[test]
    fn test_columns_are_normalised() {
        let roster = Roster::new(["\u{feff}Name", " SALARY ", "rating"], vec![]);
        assert_eq!(roster.columns(), ["name", "salary", "rating"]);
    }

    #[test]
    fn test_column_index_is_case_insensitive() {
        let roster = Roster::new(["name", "salary", "rating"], vec![]);
        assert_eq!(roster.column_index("Salary"), Some(1));
        assert!(!roster.has_column("band_position"));
    }

    #[test]
    fn test_from_employees_minimal_columns() {
        let roster = Roster::from_employees(&[employee(None, "S", None)]);

        assert_eq!(roster.columns(), ["salary", "rating"]);
        assert_eq!(roster.rows()[0].values, vec!["5000000", "S"]);
        assert_eq!(roster.rows()[0].line, 2);
    }

    #[test]
    fn test_from_employees_empty_has_band_column() {
        let roster = Roster::from_employees(&[]);

        assert_eq!(roster.columns(), ["salary", "rating", "band_position"]);
        assert!(roster.is_empty());
    }

    #[test]
    fn test_from_employees_fills_missing_optionals() {
        let roster = Roster::from_employees(&[
            employee(Some("A"), "S", Some("low")),
            employee(None, "B", None),
        ]);

        assert_eq!(roster.columns(), ["name", "salary", "rating", "band_position"]);
        assert_eq!(roster.rows()[1].values, vec!["", "5000000", "B", ""]);
        assert_eq!(roster.rows()[1].line, 3);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_row_get_out_of_range() {
        let row = RosterRow {
            line: 2,
            values: vec!["x".to_string()],
        };
        assert_eq!(row.get(0), Some("x"));
        assert_eq!(row.get(1), None);
    }
}
