//! Call-duration parsing.
//!
//! Call blocks carry a label such as `Längd: 90 sekunder` or
//! `Duration: 2 minutes`: a label, a number and a unit word.

use std::sync::LazyLock;

use regex::Regex;

/// Label, numeric value and optional unit of a call-duration region.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<label>.*?)\s*(?P<value>\d+(?:[.,]\d+)?)\s*(?P<unit>\p{L}+)?")
        .expect("valid regex")
});

/// Named fields of a parsed call-duration region.
#[derive(Debug, Clone, PartialEq)]
pub struct CallDuration {
    /// Text before the number, e.g. `Längd:`.
    pub label: String,
    /// The numeric value as written.
    pub value: f64,
    /// Unit word after the number, if any.
    pub unit: Option<String>,
}

impl CallDuration {
    /// Parses `label value unit` text.
    ///
    /// When the label ends in `:` the value is the first number after it.
    /// Returns `None` when there is no such number.
    ///
    /// ```rust
    /// use chatstats::parsing::duration::CallDuration;
    ///
    /// let call = CallDuration::parse("Längd: 90 sekunder").unwrap();
    /// assert_eq!(call.value, 90.0);
    /// assert_eq!(call.unit.as_deref(), Some("sekunder"));
    /// assert!(CallDuration::parse("Längd: okänd").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        // A label ending in `:` may carry digits of its own.
        let (prefix, rest) = match text.split_once(':') {
            Some((head, tail)) => (format!("{head}:"), tail.trim()),
            None => (String::new(), text),
        };
        let caps = DURATION_RE.captures(rest)?;
        let value = caps["value"].replace(',', ".").parse().ok()?;
        let label = format!("{prefix} {}", caps["label"].trim());
        Some(Self {
            label: label.trim().to_string(),
            value,
            unit: caps.name("unit").map(|m| m.as_str().to_string()),
        })
    }

    /// Returns `true` if the unit contains one of `seconds_units`
    /// (case-insensitive).
    pub fn is_seconds<S: AsRef<str>>(&self, seconds_units: &[S]) -> bool {
        let Some(unit) = &self.unit else {
            return false;
        };
        let unit = unit.to_lowercase();
        seconds_units
            .iter()
            .any(|s| unit.contains(&s.as_ref().to_lowercase()))
    }

    /// Returns the duration in minutes.
    ///
    /// Second-valued durations are divided by 60; anything else, including a
    /// missing unit, is already minutes.
    pub fn minutes<S: AsRef<str>>(&self, seconds_units: &[S]) -> f64 {
        if self.is_seconds(seconds_units) {
            self.value / 60.0
        } else {
            self.value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: &[&str] = &["sec", "sek"];

    #[test]
    fn test_seconds_are_converted() {
        let call = CallDuration::parse("Duration: 90 sec").unwrap();
        assert!((call.minutes(UNITS) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_swedish_seconds_synonym() {
        let call = CallDuration::parse("Längd: 30 sekunder").unwrap();
        assert_eq!(call.label, "Längd:");
        assert!((call.minutes(UNITS) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_minutes_stay_minutes() {
        let call = CallDuration::parse("Längd: 2 min").unwrap();
        assert_eq!(call.minutes(UNITS), 2.0);

        let call = CallDuration::parse("Duration: 7 minutes").unwrap();
        assert_eq!(call.minutes(UNITS), 7.0);
    }

    #[test]
    fn test_unit_case_insensitive() {
        let call = CallDuration::parse("Duration 120 SECONDS").unwrap();
        assert_eq!(call.minutes(UNITS), 2.0);
    }

    #[test]
    fn test_missing_unit_is_minutes() {
        let call = CallDuration::parse("Längd: 4").unwrap();
        assert_eq!(call.unit, None);
        assert_eq!(call.minutes(UNITS), 4.0);
    }

    #[test]
    fn test_decimal_comma() {
        let call = CallDuration::parse("Längd: 1,5 min").unwrap();
        assert_eq!(call.value, 1.5);
    }

    #[test]
    fn test_number_in_label_ignored() {
        let call = CallDuration::parse("Samtal 2: 90 sek").unwrap();
        assert_eq!(call.label, "Samtal 2:");
        assert_eq!(call.value, 90.0);
        assert!((call.minutes(UNITS) - 1.5).abs() < f64::EPSILON);

        assert!(CallDuration::parse("Samtal 2: okänd").is_none());
    }

    #[test]
    fn test_missing_number() {
        assert!(CallDuration::parse("Längd: sekunder").is_none());
        assert!(CallDuration::parse("").is_none());
    }

    #[test]
    fn test_custom_units() {
        let call = CallDuration::parse("Dauer: 60 s").unwrap();
        assert_eq!(call.minutes(&["s"]), 1.0);
        assert_eq!(call.minutes(UNITS), 60.0);
    }
}
