//! Onyx Storefront - cart and checkout domain layer.
//!
//! This crate is the commerce state model behind the Onyx Apparel storefront.
//! It owns the shopper's cart, the "currently featured" product used by the
//! buy-now path, order summary derivation, shipping-address pre-fill, and the
//! checkout draft that is validated and submitted before handoff to the
//! payment stage.
//!
//! # Architecture
//!
//! Rendering, routing, and the network backend are collaborators, not part of
//! this crate:
//!
//! - The presentation layer consumes [`checkout::OrderSummary`] and the
//!   [`shell::ShellSignal`]s drained from the session's queue.
//! - The backend catalog/address service sits behind the [`api::CommerceApi`]
//!   trait; [`api::RestCommerceClient`] is the production implementation.
//! - Navigation is a signal ([`shell::NavigationTarget`]), never performed
//!   here.
//!
//! All session state ([`session::StorefrontSession`]) is explicitly owned and
//! injected by the caller - there are no globals. Async results are guarded by
//! a [`lifecycle::ViewLifetime`] so a response arriving after the consuming
//! view is gone is discarded instead of applied to stale state.
//!
//! # Modules
//!
//! - [`catalog`] - The `Product` entity as read from the catalog service
//! - [`cart`] - `CartStore` with (product, size) line merging
//! - [`purchase`] - The size-selection / add-to-cart / buy-now protocol
//! - [`checkout`] - Featured slot, order summary, address profile, draft
//! - [`api`] - Collaborator contract and REST client
//! - [`session`] - Session-scoped owned state and the current user
//! - [`shell`] - Navigation and notification intents for the UI
//! - [`lifecycle`] - View lifetime guard for late async results
//! - [`config`] - Environment-based configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod lifecycle;
pub mod purchase;
pub mod session;
pub mod shell;
