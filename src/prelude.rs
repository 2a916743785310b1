//! Menu Cart prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    catalog::{AddIntent, CatalogError, Menu, MenuEntry, MenuError},
    checkout::{CheckoutError, check_submission},
    config::{ConfigError, StoreConfig},
    controller::{AddError, CartController, SubmittedOrder},
    hours::{Clock, FixedClock, OpeningHours, SystemClock},
    items::LineItem,
    order::{DeepLink, Order, OrderChannel, OrderError, OrderLabels},
    presentation::{CartView, Presenter, PresenterEvent, RecordingPresenter},
    pricing::{PricingError, format_amount, parse_price},
    terminal::{TerminalChannel, TerminalPresenter},
};
