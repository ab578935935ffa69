//! Integration tests for Onyx Apparel.
//!
//! The tests under `tests/` exercise whole shopper flows - browse, size
//! selection, cart, checkout pre-fill, submission - against
//! [`InMemoryCommerceApi`], an in-memory stand-in for the backend commerce
//! service. No network or running server is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use onyx_core::{AddressId, Email, Price, ProductId, UserId};
use onyx_storefront::api::{ApiError, CommerceApi};
use onyx_storefront::catalog::Product;
use onyx_storefront::checkout::{NewShippingAddress, ShippingAddress};
use onyx_storefront::session::CurrentUser;

/// In-memory commerce service double.
///
/// Serves a fixed catalog and address book, records every address creation,
/// and can be switched into a failing mode to simulate a service outage.
#[derive(Default)]
pub struct InMemoryCommerceApi {
    products: Vec<Product>,
    addresses: Mutex<Vec<ShippingAddress>>,
    created: Mutex<Vec<NewShippingAddress>>,
    failing: AtomicBool,
    next_address_id: Mutex<i32>,
}

impl InMemoryCommerceApi {
    /// A service with the given catalog and saved addresses.
    #[must_use]
    pub fn new(products: Vec<Product>, addresses: Vec<ShippingAddress>) -> Self {
        Self {
            products,
            addresses: Mutex::new(addresses),
            created: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            next_address_id: Mutex::new(100),
        }
    }

    /// Toggle the simulated outage.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every creation request the service accepted, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn created(&self) -> Vec<NewShippingAddress> {
        self.created.lock().expect("lock poisoned").clone()
    }

    fn check_available(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Service("service unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CommerceApi for InMemoryCommerceApi {
    async fn fetch_catalog(&self) -> Result<Vec<Product>, ApiError> {
        self.check_available()?;
        Ok(self.products.clone())
    }

    async fn fetch_addresses(&self) -> Result<Vec<ShippingAddress>, ApiError> {
        self.check_available()?;
        Ok(self.addresses.lock().expect("lock poisoned").clone())
    }

    async fn create_address(
        &self,
        request: NewShippingAddress,
    ) -> Result<ShippingAddress, ApiError> {
        self.check_available()?;
        self.created
            .lock()
            .expect("lock poisoned")
            .push(request.clone());

        let id = {
            let mut next = self.next_address_id.lock().expect("lock poisoned");
            *next += 1;
            AddressId::new(*next)
        };
        let address = ShippingAddress {
            id,
            user_id: request.user_id,
            address_line_1: request.address_line_1,
            address_line_2: request.address_line_2,
            city: request.city,
            state: request.state,
            zip_code: request.zip_code,
            country: request.country,
        };
        self.addresses
            .lock()
            .expect("lock poisoned")
            .push(address.clone());
        Ok(address)
    }
}

/// Catalog fixture.
#[must_use]
pub fn product(id: i32, name: &str, price: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_rupees(price),
        images: vec![format!("https://cdn.onyxapparel.in/products/{id}.jpg")],
    }
}

/// Saved-address fixture.
#[must_use]
pub fn saved_address(id: i32, user_id: i32) -> ShippingAddress {
    ShippingAddress {
        id: AddressId::new(id),
        user_id: UserId::new(user_id),
        address_line_1: "12 Park Rd".to_string(),
        address_line_2: None,
        city: "Pune".to_string(),
        state: "MH".to_string(),
        zip_code: "411001".to_string(),
        country: "India".to_string(),
    }
}

/// Authenticated-shopper fixture.
///
/// # Panics
///
/// Panics if the fixture email fails to parse, which it does not.
#[must_use]
pub fn shopper(id: i32) -> CurrentUser {
    CurrentUser {
        id: UserId::new(id),
        email: Email::parse("shopper@example.com").expect("fixture email is valid"),
        phone: "9876543210".to_string(),
    }
}
