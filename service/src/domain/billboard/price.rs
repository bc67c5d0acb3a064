//! [`FinalPrice`] definitions.

#[cfg(doc)]
use common::money::Currency;
use common::{money::ArithmeticError, Money, Percent};
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::domain::Billboard;
use crate::domain::{billboard, user::Role};

/// Customer-facing price of a [`Billboard`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FinalPrice {
    /// ID of the [`Billboard`] this [`FinalPrice`] belongs to.
    pub billboard_id: billboard::Id,

    /// Price shown to customers.
    pub price: Money,

    /// Additive amount configured by a reseller on top of the commission.
    pub surcharge: Money,
}

impl FinalPrice {
    /// Creates a new [`FinalPrice`] of a [`Billboard`], initializing both
    /// its price and surcharge.
    ///
    /// # Errors
    ///
    /// See [`Pricing::compute()`].
    pub fn new(
        billboard_id: billboard::Id,
        base: Money,
        owner: Role,
        surcharge: Option<Money>,
        pricing: &Pricing,
    ) -> Result<Self, ArithmeticError> {
        let surcharge = surcharge.unwrap_or(Money::zero(base.currency));
        Ok(Self {
            billboard_id,
            price: pricing.compute(base, owner, surcharge)?,
            surcharge,
        })
    }

    /// Recomputes this [`FinalPrice`] after its [`Billboard`] was edited.
    ///
    /// Provided `surcharge` replaces the stored one, [`None`] keeps it
    /// unless the `base` price moved to another currency, in which case the
    /// surcharge is reset to zero.
    /// Returns whether anything has changed.
    ///
    /// # Errors
    ///
    /// See [`Pricing::compute()`].
    pub fn reprice(
        &mut self,
        base: Money,
        owner: Role,
        surcharge: Option<Money>,
        pricing: &Pricing,
    ) -> Result<bool, ArithmeticError> {
        let surcharge = surcharge.unwrap_or(
            if self.surcharge.currency == base.currency {
                self.surcharge
            } else {
                Money::zero(base.currency)
            },
        );
        let price = pricing.compute(base, owner, surcharge)?;

        let changed = self.price != price || self.surcharge != surcharge;
        self.price = price;
        self.surcharge = surcharge;
        Ok(changed)
    }
}

/// Pricing rule deriving a [`FinalPrice`] from a base price.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Pricing {
    /// Commission added on top of the base price of reseller-owned
    /// [`Billboard`]s.
    #[default(Percent::saturating_from_int(20))]
    pub commission: Percent,
}

impl Pricing {
    /// Computes the final price out of the `base` price for a [`Billboard`]
    /// owned by a user with the provided [`Role`].
    ///
    /// Admin-owned [`Billboard`]s are sold at the `base` price as is, with
    /// the `surcharge` ignored, while reseller-owned ones get the commission
    /// and the `surcharge` added.
    ///
    /// # Errors
    ///
    /// If the `surcharge` of a reseller-owned [`Billboard`] is in a
    /// [`Currency`] different from the `base` one, or the result overflows.
    pub fn compute(
        &self,
        base: Money,
        owner: Role,
        surcharge: Money,
    ) -> Result<Money, ArithmeticError> {
        match owner {
            Role::Admin => Ok(base),
            Role::Reseller => {
                if base.currency != surcharge.currency {
                    return Err(ArithmeticError::CurrencyMismatch {
                        left: base.currency,
                        right: surcharge.currency,
                    });
                }
                base.checked_mul(self.commission.markup_factor())
                    .ok_or(ArithmeticError::Overflow)?
                    .checked_add(surcharge)
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use common::{money::ArithmeticError, Money, Percent};

    use crate::domain::{billboard, user::Role};

    use super::{FinalPrice, Pricing};

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn admin_gets_base_price() {
        let pricing = Pricing::default();

        for surcharge in ["0IRR", "50IRR", "1000000IRR"] {
            assert_eq!(
                pricing
                    .compute(money("1000IRR"), Role::Admin, money(surcharge))
                    .unwrap(),
                money("1000IRR"),
            );
        }
    }

    #[test]
    fn reseller_gets_commission_and_surcharge() {
        let pricing = Pricing::default();

        assert_eq!(
            pricing
                .compute(money("1000IRR"), Role::Reseller, money("50IRR"))
                .unwrap(),
            money("1250IRR"),
        );
        assert_eq!(
            pricing
                .compute(money("99.5USD"), Role::Reseller, money("0USD"))
                .unwrap(),
            money("119.4USD"),
        );
    }

    #[test]
    fn uses_configured_commission() {
        let pricing = Pricing {
            commission: "50".parse::<Percent>().unwrap(),
        };

        assert_eq!(
            pricing
                .compute(money("1000IRR"), Role::Reseller, money("10IRR"))
                .unwrap(),
            money("1510IRR"),
        );
    }

    #[test]
    fn rejects_currency_mismatch_of_reseller() {
        let err = Pricing::default()
            .compute(money("1000IRR"), Role::Reseller, money("50USD"))
            .unwrap_err();

        assert!(matches!(err, ArithmeticError::CurrencyMismatch { .. }));
    }

    #[test]
    fn admin_ignores_surcharge_currency() {
        assert_eq!(
            Pricing::default()
                .compute(money("1000IRR"), Role::Admin, money("50USD"))
                .unwrap(),
            money("1000IRR"),
        );
    }

    #[test]
    fn resets_kept_surcharge_on_currency_change() {
        let pricing = Pricing::default();
        for owner in [Role::Reseller, Role::Admin] {
            let mut price = FinalPrice::new(
                billboard::Id::new(),
                money("1000IRR"),
                owner,
                Some(money("50IRR")),
                &pricing,
            )
            .unwrap();

            let changed =
                price.reprice(money("100USD"), owner, None, &pricing).unwrap();

            assert!(changed);
            assert_eq!(price.surcharge, money("0USD"));
            assert_eq!(
                price.price,
                if owner.is_admin() { money("100USD") } else { money("120USD") },
            );
        }
    }

    #[test]
    fn creates_with_zero_surcharge_by_default() {
        let price = FinalPrice::new(
            billboard::Id::new(),
            money("1000IRR"),
            Role::Reseller,
            None,
            &Pricing::default(),
        )
        .unwrap();

        assert_eq!(price.price, money("1200IRR"));
        assert_eq!(price.surcharge, money("0IRR"));
    }

    #[test]
    fn reprices_on_edit() {
        let pricing = Pricing::default();
        let mut price = FinalPrice::new(
            billboard::Id::new(),
            money("1000IRR"),
            Role::Reseller,
            Some(money("50IRR")),
            &pricing,
        )
        .unwrap();

        let changed = price
            .reprice(money("1000IRR"), Role::Reseller, None, &pricing)
            .unwrap();
        assert!(!changed);
        assert_eq!(price.price, money("1250IRR"));

        let changed = price
            .reprice(money("2000IRR"), Role::Reseller, None, &pricing)
            .unwrap();
        assert!(changed);
        assert_eq!(price.price, money("2450IRR"));

        let changed = price
            .reprice(money("2000IRR"), Role::Admin, Some(money("0IRR")), &pricing)
            .unwrap();
        assert!(changed);
        assert_eq!(price.price, money("2000IRR"));
        assert_eq!(price.surcharge, money("0IRR"));
    }
}
