//! Employee model and the closed key sets used for rate lookup.
//!
//! Roster values arrive as free-form strings. [`Rating`] and [`BandPosition`]
//! are the only values the rate table understands; anything else is kept on
//! the [`Employee`] verbatim and resolves to no raise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A performance rating, from S (highest) to D (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    /// Outstanding.
    S,
    /// Exceeds expectations.
    A,
    /// Meets expectations.
    B,
    /// Partially meets expectations.
    C,
    /// Below expectations; typically no raise.
    D,
}

impl Rating {
    /// Every rating, highest first.
    pub const ALL: [Rating; 5] = [Rating::S, Rating::A, Rating::B, Rating::C, Rating::D];

    /// Parses a roster label into a rating.
    ///
    /// Only the exact labels `S`, `A`, `B`, `C` and `D` are recognised;
    /// anything else, including `s` or ` S `, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use raise_engine::models::Rating;
    ///
    /// assert_eq!(Rating::from_label("A"), Some(Rating::A));
    /// assert_eq!(Rating::from_label("a"), None);
    /// assert_eq!(Rating::from_label("Z"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "S" => Some(Rating::S),
            "A" => Some(Rating::A),
            "B" => Some(Rating::B),
            "C" => Some(Rating::C),
            "D" => Some(Rating::D),
            _ => None,
        }
    }

    /// The canonical single-letter label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::S => "S",
            Rating::A => "A",
            Rating::B => "B",
            Rating::C => "C",
            Rating::D => "D",
        }
    }
}

/// Position of an employee's salary within their band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    /// Bottom third of the band.
    Low,
    /// Middle third of the band.
    Mid,
    /// Top third of the band.
    High,
}

impl BandPosition {
    /// Every band position, lowest first.
    pub const ALL: [BandPosition; 3] = [BandPosition::Low, BandPosition::Mid, BandPosition::High];

    /// Parses a roster label into a band position.
    ///
    /// Accepts exactly `low`, `mid` and `high`, and the Japanese labels
    /// `下位`/`低位`, `中位` and `上位`.
    ///
    /// # Examples
    ///
    /// ```
    /// use raise_engine::models::BandPosition;
    ///
    /// assert_eq!(BandPosition::from_label("mid"), Some(BandPosition::Mid));
    /// assert_eq!(BandPosition::from_label("上位"), Some(BandPosition::High));
    /// assert_eq!(BandPosition::from_label("Mid"), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "low" | "下位" | "低位" => Some(BandPosition::Low),
            "mid" | "中位" => Some(BandPosition::Mid),
            "high" | "上位" => Some(BandPosition::High),
            _ => None,
        }
    }

    /// The canonical snake_case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            BandPosition::Low => "low",
            BandPosition::Mid => "mid",
            BandPosition::High => "high",
        }
    }
}

/// One row of the roster, as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Display name, if the roster has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current annual salary. Never negative.
    pub salary: Decimal,
    /// The rating label exactly as it appeared in the roster.
    pub rating: String,
    /// The band position label exactly as it appeared in the roster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_position: Option<String>,
}

impl Employee {
    /// Returns the recognised rating, or `None` if the label is unknown.
    pub fn rating(&self) -> Option<Rating> {
        Rating::from_label(&self.rating)
    }

    /// Returns the recognised band position, or `None` if absent or unknown.
    pub fn band_position(&self) -> Option<BandPosition> {
        self.band_position.as_deref().and_then(BandPosition::from_label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee(rating: &str, band_position: Option<&str>) -> Employee {
        Employee {
            name: Some("Sato".to_string()),
            salary: Decimal::new(6_000_000, 0),
            rating: rating.to_string(),
            band_position: band_position.map(str::to_string),
        }
    }

    #[test]
    fn test_rating_from_label_accepts_all_grades() {
        for rating in Rating::ALL {
            assert_eq!(Rating::from_label(rating.as_str()), Some(rating));
        }
    }

    #[test]
    fn test_rating_from_label_is_exact() {
        assert_eq!(Rating::from_label("s"), None);
        assert_eq!(Rating::from_label(" S "), None);
        assert_eq!(Rating::from_label("b\t"), None);
    }

    #[test]
    fn test_rating_from_label_rejects_unknown() {
        assert_eq!(Rating::from_label("Z"), None);
        assert_eq!(Rating::from_label(""), None);
        assert_eq!(Rating::from_label("SS"), None);
    }

    #[test]
    fn test_band_position_japanese_labels() {
        assert_eq!(BandPosition::from_label("下位"), Some(BandPosition::Low));
        assert_eq!(BandPosition::from_label("低位"), Some(BandPosition::Low));
        assert_eq!(BandPosition::from_label("中位"), Some(BandPosition::Mid));
        assert_eq!(BandPosition::from_label("上位"), Some(BandPosition::High));
    }

    #[test]
    fn test_band_position_english_labels() {
        assert_eq!(BandPosition::from_label("low"), Some(BandPosition::Low));
        assert_eq!(BandPosition::from_label("mid"), Some(BandPosition::Mid));
        assert_eq!(BandPosition::from_label("high"), Some(BandPosition::High));
    }

    #[test]
    fn test_band_position_labels_are_exact() {
        assert_eq!(BandPosition::from_label("LOW"), None);
        assert_eq!(BandPosition::from_label("middle"), None);
        assert_eq!(BandPosition::from_label(" high "), None);
        assert_eq!(BandPosition::from_label("top"), None);
    }

    #[test]
    fn test_employee_recognised_keys() {
        let employee = create_test_employee("A", Some("中位"));
        assert_eq!(employee.rating(), Some(Rating::A));
        assert_eq!(employee.band_position(), Some(BandPosition::Mid));
    }

    #[test]
    fn test_employee_unknown_keys_are_none() {
        let employee = create_test_employee("Z", Some("unknown"));
        assert_eq!(employee.rating(), None);
        assert_eq!(employee.band_position(), None);

        let employee = create_test_employee("A", None);
        assert_eq!(employee.band_position(), None);
    }

    #[test]
    fn test_deserialize_employee_without_optional_fields() {
        let json = r#"{ "salary": "5000000", "rating": "B" }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.name, None);
        assert_eq!(employee.salary, Decimal::new(5_000_000, 0));
        assert_eq!(employee.rating, "B");
        assert_eq!(employee.band_position, None);
    }

    #[test]
    fn test_deserialize_employee_with_numeric_salary() {
        let json = r#"{ "name": "Ito", "salary": 8000000, "rating": "A", "band_position": "mid" }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.salary, Decimal::new(8_000_000, 0));
        assert_eq!(employee.band_position(), Some(BandPosition::Mid));
    }

    #[test]
    fn test_serialize_skips_absent_optionals() {
        let employee = Employee {
            name: None,
            salary: Decimal::new(100, 0),
            rating: "C".to_string(),
            band_position: None,
        };
        let json = serde_json::to_string(&employee).unwrap();
        assert!(!json.contains("name"));
        assert!(!json.contains("band_position"));
    }

    #[test]
    fn test_key_serialization() {
        assert_eq!(serde_json::to_string(&Rating::S).unwrap(), "\"S\"");
        assert_eq!(serde_json::to_string(&BandPosition::Mid).unwrap(), "\"mid\"");
    }
}
