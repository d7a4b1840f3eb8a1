//! Checkout
//!
//! Totals, form validation and the submission state machine.

use std::fmt;

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::shipping::{Address, PostalCode, ShippingQuote};

/// Errors raised while totalling a checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// Cashback amounts are in a currency other than the subtotal's.
    #[error("cashback must be in the order currency")]
    CurrencyMismatch,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Amounts payable at checkout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals<'a> {
    /// Items subtotal
    pub subtotal: Money<'a, Currency>,

    /// Price of the chosen shipping option, zero when none
    pub shipping_cost: Money<'a, Currency>,

    /// Subtotal plus shipping
    pub total_before_cashback: Money<'a, Currency>,

    /// Cashback deducted
    pub applied_cashback: Money<'a, Currency>,

    /// Amount payable
    pub final_total: Money<'a, Currency>,
}

/// Combine subtotal, shipping and a cashback request into payable totals.
///
/// Applied cashback is the request clamped to `0..=min(balance, total_before_cashback)`,
/// so the final total is never negative and never draws more than the balance.
///
/// # Errors
///
/// - [`CheckoutError::CurrencyMismatch`]: cashback is in another currency.
/// - [`CheckoutError::Money`]: the shipping quote is in another currency.
pub fn totalize<'a>(
    subtotal: Money<'a, Currency>,
    quote: Option<&ShippingQuote<'a>>,
    cashback_requested: Money<'a, Currency>,
    cashback_balance: Money<'a, Currency>,
) -> Result<CheckoutTotals<'a>, CheckoutError> {
    let currency = subtotal.currency();

    if cashback_requested.currency() != currency || cashback_balance.currency() != currency {
        return Err(CheckoutError::CurrencyMismatch);
    }

    let shipping_cost = quote.map_or_else(|| Money::from_minor(0, currency), |quote| quote.price);
    let total_before_cashback = subtotal.add(shipping_cost)?;

    let cap = cashback_balance
        .to_minor_units()
        .min(total_before_cashback.to_minor_units())
        .max(0);

    let applied_cashback = Money::from_minor(
        cashback_requested.to_minor_units().clamp(0, cap),
        currency,
    );
    let final_total = total_before_cashback.sub(applied_cashback)?;

    Ok(CheckoutTotals {
        subtotal,
        shipping_cost,
        total_before_cashback,
        applied_cashback,
        final_total,
    })
}

/// Fields of the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    /// Full name
    FullName,
    /// E-mail
    Email,
    /// Tax document
    Document,
    /// Postal code
    PostalCode,
    /// Street
    Street,
    /// Street number
    Number,
    /// Neighborhood
    Neighborhood,
    /// City
    City,
    /// State
    State,
    /// Shipping option
    Shipping,
}

impl CheckoutField {
    /// Field name as used in request payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Document => "document",
            Self::PostalCode => "postal_code",
            Self::Street => "street",
            Self::Number => "number",
            Self::Neighborhood => "neighborhood",
            Self::City => "city",
            Self::State => "state",
            Self::Shipping => "shipping",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkout form validation failures, naming the offending field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutValidationError {
    /// A required field is blank.
    #[error("{0} is required")]
    Missing(CheckoutField),

    /// A field is present but malformed.
    #[error("{0} is invalid")]
    Invalid(CheckoutField),
}

/// Checkout form as submitted by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    /// Full name
    pub full_name: String,

    /// E-mail
    pub email: String,

    /// Tax document number
    pub document: String,

    /// Phone
    pub phone: Option<String>,

    /// Postal code
    pub postal_code: String,

    /// Street
    pub street: String,

    /// Street number
    pub number: String,

    /// Complement
    pub complement: Option<String>,

    /// Neighborhood
    pub neighborhood: String,

    /// City
    pub city: String,

    /// State
    pub state: String,
}

/// A validated checkout form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Full name
    pub full_name: String,

    /// E-mail
    pub email: String,

    /// Tax document number
    pub document: String,

    /// Phone
    pub phone: Option<String>,

    /// Delivery address
    pub address: Address,
}

impl CheckoutForm {
    /// Validate the form together with the chosen shipping option, reporting
    /// the first offending field.
    ///
    /// # Errors
    ///
    /// - [`CheckoutValidationError::Missing`]: a required field is blank or no option is chosen.
    /// - [`CheckoutValidationError::Invalid`]: the e-mail or postal code is malformed.
    pub fn validate(
        &self,
        shipping: Option<&ShippingQuote<'_>>,
    ) -> Result<Customer, CheckoutValidationError> {
        let required = [
            (CheckoutField::FullName, &self.full_name),
            (CheckoutField::Email, &self.email),
            (CheckoutField::Document, &self.document),
            (CheckoutField::PostalCode, &self.postal_code),
            (CheckoutField::Street, &self.street),
            (CheckoutField::Number, &self.number),
            (CheckoutField::Neighborhood, &self.neighborhood),
            (CheckoutField::City, &self.city),
            (CheckoutField::State, &self.state),
        ];

        if let Some((field, _value)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CheckoutValidationError::Missing(*field));
        }

        if shipping.is_none() {
            return Err(CheckoutValidationError::Missing(CheckoutField::Shipping));
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(CheckoutValidationError::Invalid(CheckoutField::Email));
        }

        let postal_code = PostalCode::parse(&self.postal_code)
            .map_err(|_invalid| CheckoutValidationError::Invalid(CheckoutField::PostalCode))?;

        Ok(Customer {
            full_name: self.full_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            document: self.document.trim().to_owned(),
            phone: non_blank(self.phone.as_deref()),
            address: Address {
                postal_code,
                street: self.street.trim().to_owned(),
                number: self.number.trim().to_owned(),
                complement: non_blank(self.complement.as_deref()),
                neighborhood: self.neighborhood.trim().to_owned(),
                city: self.city.trim().to_owned(),
                state: self.state.trim().to_owned(),
            },
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Card via the payment processor's hosted checkout
    Card,

    /// Cash on delivery
    PayOnDelivery,
}

impl PaymentMethod {
    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayOnDelivery => "pay_on_delivery",
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "card" => Ok(Self::Card),
            "pay_on_delivery" => Ok(Self::PayOnDelivery),
            other => Err(UnknownPaymentMethod(other.to_owned())),
        }
    }
}

/// Unrecognised payment method.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// Checkout submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutState {
    /// Collecting address and shipping
    Draft,

    /// Address valid and shipping chosen
    Ready,

    /// Order created, waiting on the payment processor
    PaymentPending,

    /// Payment confirmed by the processor
    Paid,

    /// Order or payment session creation failed; the cart is intact
    Failed,

    /// Pay-on-delivery order created
    AwaitingDelivery,
}

/// Events driving [`CheckoutState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEvent {
    /// Form validated and shipping chosen
    Completed,

    /// Form edited back into an incomplete state
    Edited,

    /// Shopper submitted with a payment method
    Submitted(PaymentMethod),

    /// Payment confirmed
    PaymentConfirmed,

    /// A call failed
    Failed,

    /// Shopper retries after a failure
    Retry,
}

/// Rejected checkout transition.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot apply {event:?} in state {state:?}")]
pub struct CheckoutFlowError {
    /// State at the time
    pub state: CheckoutState,

    /// Rejected event
    pub event: CheckoutEvent,
}

impl CheckoutState {
    /// Apply an event.
    ///
    /// Pay-on-delivery submissions skip [`CheckoutState::PaymentPending`].
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutFlowError`] when the event is not valid in this state.
    pub fn apply(self, event: CheckoutEvent) -> Result<Self, CheckoutFlowError> {
        use CheckoutEvent as E;
        use CheckoutState as S;

        match (self, event) {
            (S::Draft | S::Ready, E::Completed) => Ok(S::Ready),
            (S::Draft | S::Ready, E::Edited) => Ok(S::Draft),
            (S::Ready, E::Submitted(PaymentMethod::Card)) => Ok(S::PaymentPending),
            (S::Ready, E::Submitted(PaymentMethod::PayOnDelivery)) => Ok(S::AwaitingDelivery),
            (S::PaymentPending, E::PaymentConfirmed) => Ok(S::Paid),
            (S::Ready | S::PaymentPending, E::Failed) => Ok(S::Failed),
            (S::Failed, E::Retry) => Ok(S::Ready),
            (state, event) => Err(CheckoutFlowError { state, event }),
        }
    }

    /// Whether the submission has finished.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Paid | Self::AwaitingDelivery)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{BRL, USD};
    use testresult::TestResult;

    use super::*;

    fn brl(minor: i64) -> Money<'static, Currency> {
        Money::from_minor(minor, BRL)
    }

    fn quote(price: i64) -> ShippingQuote<'static> {
        ShippingQuote {
            price: brl(price),
            id: 1,
            ..ShippingQuote::free_shipping(BRL)
        }
    }

    fn form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Ana Souza".to_owned(),
            email: "ana@example.com".to_owned(),
            document: "123.456.789-09".to_owned(),
            phone: Some(" ".to_owned()),
            postal_code: "01310-100".to_owned(),
            street: "Av. Paulista".to_owned(),
            number: "1000".to_owned(),
            complement: Some("Apto 12".to_owned()),
            neighborhood: "Bela Vista".to_owned(),
            city: "São Paulo".to_owned(),
            state: "SP".to_owned(),
        }
    }

    #[test]
    fn cashback_capped_by_order_total() -> TestResult {
        let totals = totalize(brl(200_00), Some(&quote(20_00)), brl(1_000_00), brl(500_00))?;

        assert_eq!(totals.shipping_cost, brl(20_00));
        assert_eq!(totals.total_before_cashback, brl(220_00));
        assert_eq!(totals.applied_cashback, brl(220_00));
        assert_eq!(totals.final_total, brl(0));

        Ok(())
    }

    #[test]
    fn cashback_capped_by_balance() -> TestResult {
        let totals = totalize(brl(200_00), Some(&quote(20_00)), brl(100_00), brl(30_00))?;

        assert_eq!(totals.applied_cashback, brl(30_00));
        assert_eq!(totals.final_total, brl(190_00));

        Ok(())
    }

    #[test]
    fn negative_cashback_request_applies_nothing() -> TestResult {
        let totals = totalize(brl(50_00), None, brl(-10_00), brl(30_00))?;

        assert_eq!(totals.shipping_cost, brl(0));
        assert_eq!(totals.applied_cashback, brl(0));
        assert_eq!(totals.final_total, brl(50_00));

        Ok(())
    }

    #[test]
    fn applied_cashback_never_exceeds_bounds() -> TestResult {
        for subtotal in [0, 1, 99_99, 250_00] {
            for shipping in [0, 15_00] {
                for requested in [-1, 0, 10_00, 1_000_00] {
                    for balance in [-5_00, 0, 12_34, 10_000_00] {
                        let totals = totalize(
                            brl(subtotal),
                            Some(&quote(shipping)),
                            brl(requested),
                            brl(balance),
                        )?;

                        let cap = balance.max(0).min(subtotal + shipping);

                        assert!(totals.applied_cashback.to_minor_units() <= cap);
                        assert!(totals.applied_cashback.to_minor_units() >= 0);
                        assert!(totals.final_total.to_minor_units() >= 0);
                    }
                }
            }
        }

        Ok(())
    }

    #[test]
    fn mixed_currency_is_rejected() {
        let result = totalize(brl(10_00), None, Money::from_minor(1_00, USD), brl(5_00));

        assert_eq!(result, Err(CheckoutError::CurrencyMismatch));
    }

    #[test]
    fn valid_form_produces_customer() -> TestResult {
        let customer = form().validate(Some(&quote(10_00)))?;

        assert_eq!(customer.address.postal_code.as_str(), "01310100");
        assert_eq!(customer.phone, None);
        assert_eq!(customer.address.complement.as_deref(), Some("Apto 12"));

        Ok(())
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut form = form();

        form.document = "  ".to_owned();
        form.city = String::new();

        assert_eq!(
            form.validate(Some(&quote(10_00))),
            Err(CheckoutValidationError::Missing(CheckoutField::Document))
        );
    }

    #[test]
    fn shipping_option_is_required() {
        assert_eq!(
            form().validate(None),
            Err(CheckoutValidationError::Missing(CheckoutField::Shipping))
        );
    }

    #[test]
    fn malformed_email_and_postal_code_are_invalid() {
        let mut bad_email = form();

        bad_email.email = "ana.example.com".to_owned();

        assert_eq!(
            bad_email.validate(Some(&quote(0))),
            Err(CheckoutValidationError::Invalid(CheckoutField::Email))
        );

        let mut bad_postal = form();

        bad_postal.postal_code = "0131".to_owned();

        assert_eq!(
            bad_postal.validate(Some(&quote(0))),
            Err(CheckoutValidationError::Invalid(CheckoutField::PostalCode))
        );
    }

    #[test]
    fn card_submission_waits_for_payment() -> TestResult {
        let state = CheckoutState::Draft
            .apply(CheckoutEvent::Completed)?
            .apply(CheckoutEvent::Submitted(PaymentMethod::Card))?;

        assert_eq!(state, CheckoutState::PaymentPending);
        assert_eq!(state.apply(CheckoutEvent::PaymentConfirmed)?, CheckoutState::Paid);

        Ok(())
    }

    #[test]
    fn pay_on_delivery_skips_payment_pending() -> TestResult {
        let state =
            CheckoutState::Ready.apply(CheckoutEvent::Submitted(PaymentMethod::PayOnDelivery))?;

        assert_eq!(state, CheckoutState::AwaitingDelivery);
        assert!(state.is_final());
        assert!(state.apply(CheckoutEvent::PaymentConfirmed).is_err());

        Ok(())
    }

    #[test]
    fn draft_cannot_submit() {
        assert_eq!(
            CheckoutState::Draft.apply(CheckoutEvent::Submitted(PaymentMethod::Card)),
            Err(CheckoutFlowError {
                state: CheckoutState::Draft,
                event: CheckoutEvent::Submitted(PaymentMethod::Card),
            })
        );
    }

    #[test]
    fn failure_allows_retry() -> TestResult {
        let state = CheckoutState::PaymentPending.apply(CheckoutEvent::Failed)?;

        assert_eq!(state, CheckoutState::Failed);
        assert_eq!(state.apply(CheckoutEvent::Retry)?, CheckoutState::Ready);

        Ok(())
    }

    #[test]
    fn payment_method_round_trips_storage_names() -> TestResult {
        assert_eq!("card".parse::<PaymentMethod>()?, PaymentMethod::Card);
        assert_eq!(
            PaymentMethod::PayOnDelivery.as_str().parse::<PaymentMethod>()?,
            PaymentMethod::PayOnDelivery
        );
        assert!("cheque".parse::<PaymentMethod>().is_err());

        Ok(())
    }
}
