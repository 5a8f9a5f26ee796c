//! Wage display strings ("$25/hour", "$30-35/hour") and their parsed numeric bounds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WageUnit {
    #[default]
    #[serde(alias = "hourly")]
    Hour,
    #[serde(alias = "daily")]
    Day,
    #[serde(alias = "weekly")]
    Week,
    Project,
}

impl WageUnit {
    fn suffix(&self) -> &'static str {
        match self {
            WageUnit::Hour => "hour",
            WageUnit::Day => "day",
            WageUnit::Week => "week",
            WageUnit::Project => "project",
        }
    }

    fn from_suffix(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "hour" | "hr" | "h" => Some(WageUnit::Hour),
            "day" => Some(WageUnit::Day),
            "week" | "wk" => Some(WageUnit::Week),
            "project" => Some(WageUnit::Project),
            _ => None,
        }
    }
}

/// A wage as shown to users, plus the bounds parsed out of it.
/// `min`/`max` are `None` when the display string carries no usable number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wage {
    pub display: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit: WageUnit,
}

impl Wage {
    /// Parses a display string. Never fails: unparseable input keeps the
    /// display text and leaves the bounds empty.
    pub fn parse(display: &str) -> Self {
        let (amount, unit) = match display.split_once('/') {
            Some((amount, suffix)) => (amount, WageUnit::from_suffix(suffix)),
            None => (display, Some(WageUnit::Hour)),
        };

        let bounds = unit.and_then(|_| parse_amount(amount));
        Self {
            display: display.to_string(),
            min: bounds.map(|(lo, _)| lo),
            max: bounds.map(|(_, hi)| hi),
            unit: unit.unwrap_or_default(),
        }
    }

    /// Builds a wage from a form amount ("25" or "25-30") and unit.
    pub fn from_amount(amount: &str, unit: WageUnit) -> Option<Self> {
        let (lo, hi) = parse_amount(amount)?;
        let display = if lo == hi {
            format!("${}/{}", format_amount(lo), unit.suffix())
        } else {
            format!(
                "${}-{}/{}",
                format_amount(lo),
                format_amount(hi),
                unit.suffix()
            )
        };
        Some(Self {
            display,
            min: Some(lo),
            max: Some(hi),
            unit,
        })
    }

    /// Value used by wage sorts: the hourly minimum. Day, week and project
    /// rates are not comparable with hourly ones and have no sort value.
    pub fn sort_value(&self) -> Option<f64> {
        self.hourly_range().map(|(lo, _)| lo)
    }

    pub fn hourly_range(&self) -> Option<(f64, f64)> {
        if self.unit != WageUnit::Hour {
            return None;
        }
        Some((self.min?, self.max?))
    }
}

/// Largest amount accepted in any unit.
pub const MAX_WAGE_AMOUNT: f64 = 1_000_000.0;

fn parse_amount(raw: &str) -> Option<(f64, f64)> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();

    let (lo, hi) = match cleaned.split_once('-') {
        Some((lo, hi)) => (parse_number(lo)?, parse_number(hi)?),
        None => {
            let v = parse_number(&cleaned)?;
            (v, v)
        }
    };

    if lo > hi {
        return None;
    }
    Some((lo, hi))
}

/// Plain decimal only ("25", "22.5"), rounded half-up to cents and capped at
/// [`MAX_WAGE_AMOUNT`]. The rounded value is what gets stored and displayed.
fn parse_number(raw: &str) -> Option<f64> {
    let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || whole.len() > 12 || !digits_only(whole) || !digits_only(fraction) {
        return None;
    }

    let digit = |i: usize| u64::from(fraction.as_bytes().get(i).map_or(0, |b| b - b'0'));
    let round_up = u64::from(digit(2) >= 5);
    let cents = whole.parse::<u64>().ok()? * 100 + digit(0) * 10 + digit(1) + round_up;

    let v = cents as f64 / 100.0;
    (v <= MAX_WAGE_AMOUNT).then_some(v)
}

fn format_amount(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hourly_wage() {
        let wage = Wage::parse("$25/hour");
        assert_eq!(wage.min, Some(25.0));
        assert_eq!(wage.max, Some(25.0));
        assert_eq!(wage.unit, WageUnit::Hour);
    }

    #[test]
    fn test_range_wage() {
        let wage = Wage::parse("$30-35/hour");
        assert_eq!(wage.min, Some(30.0));
        assert_eq!(wage.max, Some(35.0));
        assert_eq!(wage.sort_value(), Some(30.0));
    }

    #[test]
    fn test_thousands_separator_and_project_unit() {
        let wage = Wage::parse("$1,500/project");
        assert_eq!(wage.min, Some(1500.0));
        assert_eq!(wage.unit, WageUnit::Project);
        assert_eq!(wage.hourly_range(), None);
        assert_eq!(wage.sort_value(), None);
    }

    #[test]
    fn test_unparseable_wage_keeps_display() {
        let wage = Wage::parse("Negotiable");
        assert_eq!(wage.display, "Negotiable");
        assert_eq!(wage.sort_value(), None);
    }

    #[test]
    fn test_unknown_unit_has_no_bounds() {
        let wage = Wage::parse("$25/fortnight");
        assert_eq!(wage.min, None);
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        assert!(Wage::from_amount("35-30", WageUnit::Hour).is_none());
    }

    #[test]
    fn test_from_amount_builds_display() {
        let wage = Wage::from_amount("25-30", WageUnit::Day).unwrap();
        assert_eq!(wage.display, "$25-30/day");
        assert_eq!(Wage::parse(&wage.display), wage);

        let single = Wage::from_amount("22.5", WageUnit::Hour).unwrap();
        assert_eq!(single.display, "$22.50/hour");
    }

    #[test]
    fn test_exponents_and_oversized_amounts_are_rejected() {
        assert!(Wage::from_amount("1e20", WageUnit::Hour).is_none());
        assert!(Wage::from_amount("2E3", WageUnit::Hour).is_none());
        assert!(Wage::from_amount("1000001", WageUnit::Project).is_none());
        assert!(Wage::from_amount("25-1e9", WageUnit::Hour).is_none());
        assert!(Wage::from_amount(".5", WageUnit::Hour).is_none());
        assert_eq!(Wage::parse("$1e20/hour").min, None);
    }

    #[test]
    fn test_display_and_bounds_agree() {
        for amount in ["25", "22.5", "25.555", "18.999-22.001", "1,000000", "0.01"] {
            let wage = Wage::from_amount(amount, WageUnit::Hour).unwrap();
            assert_eq!(Wage::parse(&wage.display), wage, "{amount}");
        }

        let rounded = Wage::from_amount("25.555", WageUnit::Hour).unwrap();
        assert_eq!(rounded.display, "$25.56/hour");
        assert_eq!(rounded.min, Some(25.56));

        let top = Wage::from_amount("1000000", WageUnit::Project).unwrap();
        assert_eq!(top.display, "$1000000/project");
    }

    #[test]
    fn test_form_unit_aliases() {
        let unit: WageUnit = serde_json::from_str(r#""hourly""#).unwrap();
        assert_eq!(unit, WageUnit::Hour);
        let unit: WageUnit = serde_json::from_str(r#""weekly""#).unwrap();
        assert_eq!(unit, WageUnit::Week);
    }
}
