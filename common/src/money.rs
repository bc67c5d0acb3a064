//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a zero [`Money`] amount in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Indicates whether this [`Money`] amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiplies this [`Money`] amount by the provided `factor`, keeping
    /// its [`Currency`].
    ///
    /// [`None`] is returned on overflow.
    #[must_use]
    pub fn checked_mul(self, factor: Decimal) -> Option<Self> {
        Some(Self {
            amount: self.amount.checked_mul(factor)?.normalize(),
            currency: self.currency,
        })
    }

    /// Adds the `other` [`Money`] amount to this one.
    ///
    /// # Errors
    ///
    /// If the amounts are in different [`Currency`]s or the sum overflows.
    pub fn checked_add(self, other: Self) -> Result<Self, ArithmeticError> {
        if self.currency != other.currency {
            return Err(ArithmeticError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self {
                amount: amount.normalize(),
                currency: self.currency,
            })
            .ok_or(ArithmeticError::Overflow)
    }
}

/// Error of an arithmetic operation over [`Money`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ArithmeticError {
    /// Operands are in different [`Currency`]s.
    #[display("cannot combine `{left}` with `{right}`")]
    CurrencyMismatch {
        /// [`Currency`] of the left operand.
        left: Currency,

        /// [`Currency`] of the right operand.
        right: Currency,
    },

    /// Result doesn't fit into a [`Decimal`].
    #[display("`Money` overflow")]
    Overflow,
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        if let Some(int) = amount.is_integer().then(|| amount.to_i128()).flatten() {
            write!(f, "{int}{currency}")
        } else {
            write!(f, "{}{currency}", amount.normalize())
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Iranian Rial."]
        Irr = 1,

        #[doc = "US Dollar."]
        Usd = 2,

        #[doc = "Euro."]
        Eur = 3,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code (`IRR`, `USD`, `EUR`).
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{ArithmeticError, Currency, Money};

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45IRR").unwrap(),
            Money {
                amount: "123.45".parse().unwrap(),
                currency: Currency::Irr,
            },
        );
        assert_eq!(money("10EUR").currency, Currency::Eur);

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
        assert!(Money::from_str("12ریال").is_err());

        assert!(Money::from_str("123.00USD").is_ok());
        assert!(Money::from_str("123USD").is_ok());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("123.45USD").to_string(), "123.45USD");
        assert_eq!(money("123.00IRR").to_string(), "123IRR");
        assert_eq!(money("123.50EUR").to_string(), "123.5EUR");
    }

    #[test]
    fn multiplies_keeping_currency() {
        assert_eq!(
            money("1000IRR").checked_mul(Decimal::new(12, 1)).unwrap(),
            money("1200IRR"),
        );
        assert_eq!(
            money("9.99USD").checked_mul(Decimal::TWO).unwrap(),
            money("19.98USD"),
        );
    }

    #[test]
    fn adds_same_currency_only() {
        assert_eq!(
            money("1200IRR").checked_add(money("50IRR")).unwrap(),
            money("1250IRR"),
        );
        assert_eq!(
            money("1USD").checked_add(money("1EUR")),
            Err(ArithmeticError::CurrencyMismatch {
                left: Currency::Usd,
                right: Currency::Eur,
            }),
        );
    }

    #[test]
    fn detects_negative_amounts() {
        assert!(money("-1IRR").is_negative());
        assert!(!money("0IRR").is_negative());
        assert!(!Money::zero(Currency::Usd).is_negative());
    }
}
