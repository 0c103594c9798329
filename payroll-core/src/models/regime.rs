use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PayrollError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "MX")]
    Mexico,
    #[serde(rename = "US")]
    UnitedStates,
}

impl Country {
    pub fn all() -> &'static [Country] {
        &[Country::Mexico, Country::UnitedStates]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mexico => "MX",
            Self::UnitedStates => "US",
        }
    }

    /// Parses a stored country code. Surrounding whitespace and case are ignored.
    pub fn parse(s: &str) -> Result<Self, PayrollError> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MX" => Ok(Self::Mexico),
            "US" => Ok(Self::UnitedStates),
            _ => Err(PayrollError::UnknownCountry(s.to_string())),
        }
    }

    /// The regime profile for this country.
    pub fn profile(&self) -> &'static RegimeProfile {
        match self {
            Self::Mexico => &REGIMES[0],
            Self::UnitedStates => &REGIMES[1],
        }
    }

    pub fn currency(&self) -> Currency {
        self.profile().currency
    }
}

impl fmt::Display for Country {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "MXN")]
    Mxn,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mxn => "MXN",
            Self::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pay-period cadence. How many occurrences make up a month or a year is
/// regime-specific and lives with each calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    Weekly,
    Biweekly,
    Monthly,
}

impl PayPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses the canonical label produced by [`PayPeriod::as_str`].
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Self::Weekly),
            "biweekly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Parses a stored pay-period label, accepting only the labels the
    /// country's regime recognizes.
    ///
    /// ```
    /// use payroll_core::{Country, PayPeriod};
    ///
    /// assert_eq!(
    ///     PayPeriod::parse_for(Country::Mexico, "quincenal"),
    ///     Ok(PayPeriod::Biweekly)
    /// );
    /// assert!(PayPeriod::parse_for(Country::UnitedStates, "quincenal").is_err());
    /// ```
    pub fn parse_for(
        country: Country,
        label: &str,
    ) -> Result<Self, PayrollError> {
        let normalized = label.trim().to_ascii_lowercase();
        country
            .profile()
            .pay_periods
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, period)| *period)
            .ok_or_else(|| PayrollError::UnsupportedPayPeriod {
                country,
                period: label.to_string(),
            })
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that varies by country outside of the tax math itself.
#[derive(Debug)]
pub struct RegimeProfile {
    pub country: Country,
    pub currency: Currency,
    pub regime_label: &'static str,
    /// Accepted storage labels, lowercase, mapped to their cadence.
    pub pay_periods: &'static [(&'static str, PayPeriod)],
}

pub static REGIMES: [RegimeProfile; 2] = [
    RegimeProfile {
        country: Country::Mexico,
        currency: Currency::Mxn,
        regime_label: "SAT MX",
        pay_periods: &[
            ("semanal", PayPeriod::Weekly),
            ("weekly", PayPeriod::Weekly),
            ("quincenal", PayPeriod::Biweekly),
            ("biweekly", PayPeriod::Biweekly),
            ("mensual", PayPeriod::Monthly),
            ("monthly", PayPeriod::Monthly),
        ],
    },
    RegimeProfile {
        country: Country::UnitedStates,
        currency: Currency::Usd,
        regime_label: "IRS+CA",
        pay_periods: &[
            ("weekly", PayPeriod::Weekly),
            ("biweekly", PayPeriod::Biweekly),
            ("monthly", PayPeriod::Monthly),
        ],
    },
];
