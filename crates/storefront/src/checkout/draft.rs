//! The in-progress checkout form.
//!
//! A draft is created fresh per checkout visit, pre-filled at most once from
//! a resolved address profile, validated with every required field evaluated
//! together (the shopper sees all missing fields at once, not just the
//! first), and submitted to create a persisted shipping address before the
//! handoff to the payment stage.

use core::fmt;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::api::{ApiError, CommerceApi};
use crate::checkout::address::{NewShippingAddress, ShippingAddress};
use crate::lifecycle::LifetimeHandle;
use crate::session::CurrentUser;
use crate::shell::{NavigationTarget, Notification, ShellSignal, SignalQueue};

/// Payment providers offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Razorpay.
    Razorpay,
    /// PhonePe.
    PhonePe,
}

impl PaymentMethod {
    /// Form value for this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Razorpay => "razorpay",
            Self::PhonePe => "phonepe",
        }
    }
}

/// Error for an unrecognized payment-method form value.
#[derive(Debug, Clone, Error)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(String);

impl std::str::FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "razorpay" => Ok(Self::Razorpay),
            "phonepe" => Ok(Self::PhonePe),
            other => Err(UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// A checkout form field. Each required field has an independent error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Email address (required).
    Email,
    /// Contact phone (required).
    Phone,
    /// Street address (required).
    Address,
    /// Apartment, suite, etc. (optional, never validated).
    Apartment,
    /// City (required).
    City,
    /// State (required).
    State,
    /// PIN code (required).
    PinCode,
    /// Shipping method (optional, never validated).
    ShippingMethod,
    /// Payment method (required).
    PaymentMethod,
}

impl Field {
    /// The message shown when a required field is missing; `None` for
    /// optional fields.
    #[must_use]
    pub const fn required_message(self) -> Option<&'static str> {
        match self {
            Self::Email => Some("Email is required"),
            Self::Phone => Some("Phone is required"),
            Self::Address => Some("Address is required"),
            Self::City => Some("City is required"),
            Self::State => Some("State is required"),
            Self::PinCode => Some("PIN Code is required"),
            Self::PaymentMethod => Some("Payment method is required"),
            Self::Apartment | Self::ShippingMethod => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Apartment => "apartment",
            Self::City => "city",
            Self::State => "state",
            Self::PinCode => "pin_code",
            Self::ShippingMethod => "shipping_method",
            Self::PaymentMethod => "payment_method",
        };
        f.write_str(name)
    }
}

/// The set of required fields that failed validation.
///
/// All required fields are evaluated together on a submit attempt; this
/// carries one error slot per missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    missing: BTreeSet<Field>,
}

impl ValidationErrors {
    /// Whether `field` failed validation.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.missing.contains(&field)
    }

    /// The missing fields, in a stable order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.missing.iter().copied()
    }

    /// The message for `field`, if it failed validation.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.missing
            .contains(&field)
            .then(|| field.required_message())
            .flatten()
    }

    /// Number of missing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.missing.len()
    }

    /// Whether validation passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in &self.missing {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}")?;
            first = false;
        }
        Ok(())
    }
}

/// Why a submission did not complete.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// No authenticated user; refused locally, no network call made.
    #[error("checkout submitted without an authenticated user")]
    NotAuthenticated,

    /// Required fields are missing; no network call made.
    #[error("required fields missing: {0}")]
    Validation(ValidationErrors),

    /// The consuming view was disposed while the call was in flight; the
    /// result was discarded.
    #[error("view disposed before the submission completed")]
    ViewDisposed,

    /// The address service rejected the call. The draft is kept intact and
    /// the shopper may retry.
    #[error("address service failure: {0}")]
    Service(#[source] ApiError),
}

/// One-way pre-fill state: a draft is pre-filled at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PrefillState {
    Unfilled,
    Prefilled,
}

/// The mutable checkout form state.
///
/// Shopper edits go through the `set_*` methods so the draft can tell an
/// edited field from an untouched one; [`CheckoutDraft::prefill`] never
/// overwrites an edited field.
#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    email: String,
    phone: String,
    address: String,
    apartment: String,
    city: String,
    state: String,
    pin_code: String,
    shipping_method: String,
    payment_method: Option<PaymentMethod>,
    email_offers: bool,
    save_info: bool,
    touched: BTreeSet<Field>,
    prefill_state: PrefillState,
}

impl Default for CheckoutDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutDraft {
    /// A fresh, empty draft for a new checkout visit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            apartment: String::new(),
            city: String::new(),
            state: String::new(),
            pin_code: String::new(),
            shipping_method: String::new(),
            payment_method: None,
            email_offers: false,
            save_info: false,
            touched: BTreeSet::new(),
            prefill_state: PrefillState::Unfilled,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Field access
    // ─────────────────────────────────────────────────────────────────────

    /// Email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Apartment, suite, etc.
    #[must_use]
    pub fn apartment(&self) -> &str {
        &self.apartment
    }

    /// City.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// PIN code.
    #[must_use]
    pub fn pin_code(&self) -> &str {
        &self.pin_code
    }

    /// Shipping method free-text.
    #[must_use]
    pub fn shipping_method(&self) -> &str {
        &self.shipping_method
    }

    /// Selected payment method, if any.
    #[must_use]
    pub const fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Marketing opt-in.
    #[must_use]
    pub const fn email_offers(&self) -> bool {
        self.email_offers
    }

    /// Save-info preference.
    #[must_use]
    pub const fn save_info(&self) -> bool {
        self.save_info
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shopper edits
    // ─────────────────────────────────────────────────────────────────────

    /// Set the email field.
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.email = value.into();
        self.touched.insert(Field::Email);
    }

    /// Set the phone field.
    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.phone = value.into();
        self.touched.insert(Field::Phone);
    }

    /// Set the street-address field.
    pub fn set_address(&mut self, value: impl Into<String>) {
        self.address = value.into();
        self.touched.insert(Field::Address);
    }

    /// Set the apartment field.
    pub fn set_apartment(&mut self, value: impl Into<String>) {
        self.apartment = value.into();
        self.touched.insert(Field::Apartment);
    }

    /// Set the city field.
    pub fn set_city(&mut self, value: impl Into<String>) {
        self.city = value.into();
        self.touched.insert(Field::City);
    }

    /// Set the state field.
    pub fn set_state(&mut self, value: impl Into<String>) {
        self.state = value.into();
        self.touched.insert(Field::State);
    }

    /// Set the PIN-code field.
    pub fn set_pin_code(&mut self, value: impl Into<String>) {
        self.pin_code = value.into();
        self.touched.insert(Field::PinCode);
    }

    /// Set the shipping-method field.
    pub fn set_shipping_method(&mut self, value: impl Into<String>) {
        self.shipping_method = value.into();
        self.touched.insert(Field::ShippingMethod);
    }

    /// Select a payment method (`None` clears the selection).
    pub fn set_payment_method(&mut self, value: Option<PaymentMethod>) {
        self.payment_method = value;
        self.touched.insert(Field::PaymentMethod);
    }

    /// Set the marketing opt-in.
    pub const fn set_email_offers(&mut self, value: bool) {
        self.email_offers = value;
    }

    /// Set the save-info preference.
    pub const fn set_save_info(&mut self, value: bool) {
        self.save_info = value;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Pre-fill
    // ─────────────────────────────────────────────────────────────────────

    /// Pre-fill address fields and phone from a resolved profile.
    ///
    /// One-shot per draft: once a draft has been pre-filled, re-invocation is
    /// a no-op (returns `false`). Fields the shopper already edited are never
    /// overwritten, even on the first pre-fill.
    pub fn prefill(&mut self, profile: &ShippingAddress, user_phone: &str) -> bool {
        if self.prefill_state == PrefillState::Prefilled {
            return false;
        }

        if !self.touched.contains(&Field::Address) {
            self.address = profile.address_line_1.clone();
        }
        if !self.touched.contains(&Field::Apartment) {
            self.apartment = profile.address_line_2.clone().unwrap_or_default();
        }
        if !self.touched.contains(&Field::City) {
            self.city = profile.city.clone();
        }
        if !self.touched.contains(&Field::State) {
            self.state = profile.state.clone();
        }
        if !self.touched.contains(&Field::PinCode) {
            self.pin_code = profile.zip_code.clone();
        }
        if !self.touched.contains(&Field::Phone) {
            self.phone = user_phone.to_string();
        }

        self.prefill_state = PrefillState::Prefilled;
        true
    }

    // ─────────────────────────────────────────────────────────────────────
    // Validation & submission
    // ─────────────────────────────────────────────────────────────────────

    /// Check required-field presence.
    ///
    /// All required fields are evaluated; nothing short-circuits, so the
    /// shopper sees every missing field at once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] naming every missing required field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut missing = BTreeSet::new();

        if self.email.trim().is_empty() {
            missing.insert(Field::Email);
        }
        if self.phone.trim().is_empty() {
            missing.insert(Field::Phone);
        }
        if self.address.trim().is_empty() {
            missing.insert(Field::Address);
        }
        if self.city.trim().is_empty() {
            missing.insert(Field::City);
        }
        if self.state.trim().is_empty() {
            missing.insert(Field::State);
        }
        if self.pin_code.trim().is_empty() {
            missing.insert(Field::PinCode);
        }
        if self.payment_method.is_none() {
            missing.insert(Field::PaymentMethod);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { missing })
        }
    }

    /// Submit the draft: create a persisted shipping address, then signal
    /// navigation to the payment stage.
    ///
    /// Anonymous submission is refused locally, before any network call.
    /// Validation failure also makes no network call. A service failure is
    /// logged, surfaced as an error notification, and leaves the draft
    /// intact so the shopper can retry. A result arriving after `view` is
    /// disposed is discarded.
    ///
    /// `country` is a fixed configured default; it is not shopper-editable
    /// in the current scope.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError`] describing why the submission did not reach
    /// the payment stage.
    #[instrument(skip(self, api, user, view, signals))]
    pub async fn submit<C: CommerceApi>(
        &self,
        api: &C,
        user: Option<&CurrentUser>,
        country: &str,
        view: &LifetimeHandle,
        signals: &mut SignalQueue,
    ) -> Result<ShippingAddress, SubmitError> {
        let Some(user) = user else {
            tracing::error!("Checkout submitted without an authenticated user");
            return Err(SubmitError::NotAuthenticated);
        };

        self.validate().map_err(SubmitError::Validation)?;

        let request = NewShippingAddress {
            user_id: user.id,
            address_line_1: self.address.clone(),
            address_line_2: if self.apartment.is_empty() {
                None
            } else {
                Some(self.apartment.clone())
            },
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.pin_code.clone(),
            country: country.to_string(),
        };

        let result = api.create_address(request).await;

        if !view.is_live() {
            tracing::debug!("Discarding shipping-address result; checkout view is gone");
            return Err(SubmitError::ViewDisposed);
        }

        match result {
            Ok(created) => {
                tracing::debug!(address_id = %created.id, "Shipping address created");
                signals.push(ShellSignal::Navigate(NavigationTarget::Payment));
                Ok(created)
            }
            Err(e) => {
                tracing::error!("Failed to create shipping address: {e}");
                signals.push(ShellSignal::Notify(Notification::error(
                    "Could not save your shipping address. Please try again.",
                )));
                Err(SubmitError::Service(e))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use onyx_core::{AddressId, Email, UserId};

    use super::*;
    use crate::catalog::Product;
    use crate::lifecycle::ViewLifetime;

    struct FakeAddressService {
        created: Mutex<Vec<NewShippingAddress>>,
        fail: bool,
    }

    impl FakeAddressService {
        fn new() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn created(&self) -> Vec<NewShippingAddress> {
            self.created.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommerceApi for FakeAddressService {
        async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError> {
            Ok(Vec::new())
        }

        async fn create_address(
            &self,
            request: NewShippingAddress,
        ) -> Result<ShippingAddress, ApiError> {
            if self.fail {
                return Err(ApiError::Service("address service down".to_string()));
            }
            self.created.lock().unwrap().push(request.clone());
            Ok(ShippingAddress {
                id: AddressId::new(1),
                user_id: request.user_id,
                address_line_1: request.address_line_1,
                address_line_2: request.address_line_2,
                city: request.city,
                state: request.state,
                zip_code: request.zip_code,
                country: request.country,
            })
        }
    }

    fn shopper() -> CurrentUser {
        CurrentUser {
            id: UserId::new(3),
            email: Email::parse("shopper@example.com").unwrap(),
            phone: "9876543210".to_string(),
        }
    }

    fn profile() -> ShippingAddress {
        ShippingAddress {
            id: AddressId::new(2),
            user_id: UserId::new(3),
            address_line_1: "12 Park Rd".to_string(),
            address_line_2: Some("Flat 4B".to_string()),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            zip_code: "411001".to_string(),
            country: "India".to_string(),
        }
    }

    fn complete_draft() -> CheckoutDraft {
        let mut draft = CheckoutDraft::new();
        draft.set_email("shopper@example.com");
        draft.set_phone("9876543210");
        draft.set_address("12 Park Rd");
        draft.set_city("Pune");
        draft.set_state("MH");
        draft.set_pin_code("411001");
        draft.set_payment_method(Some(PaymentMethod::Razorpay));
        draft
    }

    #[test]
    fn test_validate_empty_draft_reports_exactly_required_fields() {
        let errors = CheckoutDraft::new().validate().unwrap_err();

        let fields: Vec<Field> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                Field::Email,
                Field::Phone,
                Field::Address,
                Field::City,
                Field::State,
                Field::PinCode,
                Field::PaymentMethod,
            ]
        );
        assert_eq!(errors.message_for(Field::Email), Some("Email is required"));
        assert_eq!(
            errors.message_for(Field::PinCode),
            Some("PIN Code is required")
        );
    }

    #[test]
    fn test_validate_reports_all_missing_fields_at_once() {
        let mut draft = complete_draft();
        draft.set_email("");
        draft.set_city("  ");

        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::City));
        assert!(!errors.contains(Field::Address));
    }

    #[test]
    fn test_validate_ignores_optional_fields() {
        let draft = complete_draft();
        assert!(draft.validate().is_ok());
        assert!(draft.apartment().is_empty());
        assert!(draft.shipping_method().is_empty());
    }

    #[test]
    fn test_prefill_sets_address_fields_and_phone() {
        let mut draft = CheckoutDraft::new();
        assert!(draft.prefill(&profile(), "9876543210"));

        assert_eq!(draft.address(), "12 Park Rd");
        assert_eq!(draft.apartment(), "Flat 4B");
        assert_eq!(draft.city(), "Pune");
        assert_eq!(draft.state(), "MH");
        assert_eq!(draft.pin_code(), "411001");
        assert_eq!(draft.phone(), "9876543210");
        assert!(draft.email().is_empty());
    }

    #[test]
    fn test_prefill_is_one_shot() {
        let mut draft = CheckoutDraft::new();
        assert!(draft.prefill(&profile(), "9876543210"));

        let mut other = profile();
        other.city = "Nashik".to_string();
        assert!(!draft.prefill(&other, "0000000000"));

        assert_eq!(draft.city(), "Pune");
        assert_eq!(draft.phone(), "9876543210");
    }

    #[test]
    fn test_prefill_never_overwrites_edited_fields() {
        let mut draft = CheckoutDraft::new();
        draft.set_city("Mumbai");

        assert!(draft.prefill(&profile(), "9876543210"));
        assert_eq!(draft.city(), "Mumbai");
        assert_eq!(draft.state(), "MH");
    }

    #[test]
    fn test_edits_after_prefill_stick() {
        let mut draft = CheckoutDraft::new();
        draft.prefill(&profile(), "9876543210");
        draft.set_city("Mumbai");

        assert_eq!(draft.city(), "Mumbai");
    }

    #[tokio::test]
    async fn test_submit_refuses_anonymous_before_any_network_call() {
        let api = FakeAddressService::new();
        let view = ViewLifetime::new();
        let mut signals = SignalQueue::new();

        let result = complete_draft()
            .submit(&api, None, "India", &view.handle(), &mut signals)
            .await;

        assert!(matches!(result, Err(SubmitError::NotAuthenticated)));
        assert!(api.created().is_empty());
        assert!(signals.is_empty());
    }

    #[tokio::test]
    async fn test_submit_blocked_by_validation_before_any_network_call() {
        let api = FakeAddressService::new();
        let view = ViewLifetime::new();
        let mut signals = SignalQueue::new();
        let user = shopper();

        let result = CheckoutDraft::new()
            .submit(&api, Some(&user), "India", &view.handle(), &mut signals)
            .await;

        match result {
            Err(SubmitError::Validation(errors)) => assert_eq!(errors.len(), 7),
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(api.created().is_empty());
        assert!(signals.is_empty());
    }

    #[tokio::test]
    async fn test_submit_creates_address_and_navigates_to_payment() {
        let api = FakeAddressService::new();
        let view = ViewLifetime::new();
        let mut signals = SignalQueue::new();
        let user = shopper();

        let mut draft = complete_draft();
        draft.set_apartment("Flat 4B");
        let created = draft
            .submit(&api, Some(&user), "India", &view.handle(), &mut signals)
            .await
            .unwrap();

        assert_eq!(created.city, "Pune");
        assert_eq!(created.country, "India");
        assert_eq!(created.address_line_2.as_deref(), Some("Flat 4B"));

        let requests = api.created();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_id, UserId::new(3));

        assert_eq!(
            signals.drain(),
            vec![ShellSignal::Navigate(NavigationTarget::Payment)]
        );
    }

    #[tokio::test]
    async fn test_submit_service_failure_keeps_draft_and_notifies() {
        let api = FakeAddressService::failing();
        let view = ViewLifetime::new();
        let mut signals = SignalQueue::new();
        let user = shopper();
        let draft = complete_draft();

        let result = draft
            .submit(&api, Some(&user), "India", &view.handle(), &mut signals)
            .await;

        assert!(matches!(result, Err(SubmitError::Service(_))));
        // Draft intact for retry
        assert_eq!(draft.city(), "Pune");

        let drained = signals.drain();
        assert_eq!(drained.len(), 1);
        assert!(matches!(
            drained.first(),
            Some(ShellSignal::Notify(Notification {
                kind: crate::shell::NotificationKind::Error,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_submit_result_discarded_after_view_disposal() {
        let api = FakeAddressService::new();
        let view = ViewLifetime::new();
        let handle = view.handle();
        let mut signals = SignalQueue::new();
        let user = shopper();

        view.dispose();
        let result = complete_draft()
            .submit(&api, Some(&user), "India", &handle, &mut signals)
            .await;

        assert!(matches!(result, Err(SubmitError::ViewDisposed)));
        assert!(signals.is_empty());
    }
}
