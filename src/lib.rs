//! Menu Cart
//!
//! Shopping cart for a restaurant ordering page: menu items go into an in-memory cart, the
//! running total is kept in exact minor units, and checkout turns the cart into a
//! pre-formatted message sent through a messaging deep link.
//!
//! The [`controller::CartController`] owns the cart and drives an injected
//! [`presentation::Presenter`]; time comes from a [`hours::Clock`] and orders leave through an
//! [`order::OrderChannel`].

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod controller;
pub mod hours;
pub mod items;
pub mod order;
pub mod prelude;
pub mod presentation;
pub mod pricing;
pub mod terminal;
