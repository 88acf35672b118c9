use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Currency tag carried by every monetary amount. Amounts of different
/// currencies are never summed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Php,
    Usd,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Php, Currency::Usd];

    /// Decode a currency tag, treating anything that isn't "USD" as PHP
    /// (source exports leave the tag blank on legacy rows).
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("usd") {
            Currency::Usd
        } else {
            Currency::Php
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Php => "PHP",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(Currency::Php, Currency::from_tag))
    }
}

/// A pair of per-currency amounts. This is the accumulator shape for every
/// total the aggregator produces; keeping the two legs as named fields (rather
/// than a string-keyed map) makes cross-currency summing unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerCurrency {
    pub php: f64,
    pub usd: f64,
}

impl PerCurrency {
    pub fn add(&mut self, currency: Currency, amount: f64) {
        match currency {
            Currency::Php => self.php += amount,
            Currency::Usd => self.usd += amount,
        }
    }

    pub fn get(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Php => self.php,
            Currency::Usd => self.usd,
        }
    }

    pub fn set(&mut self, currency: Currency, amount: f64) {
        match currency {
            Currency::Php => self.php = amount,
            Currency::Usd => self.usd = amount,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.php == 0.0 && self.usd == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_blank_tags_default_to_php() {
        assert_eq!(Currency::from_tag("USD"), Currency::Usd);
        assert_eq!(Currency::from_tag("usd"), Currency::Usd);
        assert_eq!(Currency::from_tag("PHP"), Currency::Php);
        assert_eq!(Currency::from_tag(""), Currency::Php);
        assert_eq!(Currency::from_tag("EUR"), Currency::Php);
    }

    #[test]
    fn null_currency_decodes_as_php() {
        let c: Currency = serde_json::from_str("null").unwrap();
        assert_eq!(c, Currency::Php);
    }

    #[test]
    fn per_currency_legs_stay_separate() {
        let mut totals = PerCurrency::default();
        totals.add(Currency::Php, 50_000.0);
        totals.add(Currency::Usd, 1_000.0);
        assert_eq!(totals.php, 50_000.0);
        assert_eq!(totals.usd, 1_000.0);
    }
}
