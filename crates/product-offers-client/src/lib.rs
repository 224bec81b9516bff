//! Product Offers Client
//!
//! Headless form controllers for a product-and-offers GraphQL API. Each form
//! owns its field values, validates them before dispatching exactly one
//! GraphQL operation, projects the response into a [`FormView`] and reports
//! the outcome through a [`Notifier`].
//!
//! Every submission is stamped with a sequence number; a response that
//! arrives after a newer submission was issued is discarded.
//!
//! # Example
//!
//! ```rust,no_run
//! use product_offers_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::load(None)?;
//!     let transport = ReqwestTransport::from_config(&config)?;
//!     let notifications = NotificationCenter::new();
//!
//!     let mut form = FindOffersForDateForm::new();
//!     form.set_field(fields::DATE, "2024-12-31");
//!     form.submit(&transport, &notifications).await?;
//!
//!     print!("{}", form.view());
//!     Ok(())
//! }
//! ```
//!
//! [`FormView`]: entities::FormView
//! [`Notifier`]: use_cases::ports::Notifier

mod adapters;
pub mod config;
pub mod entities;
pub mod error;
pub mod use_cases;

pub use adapters::NotificationCenter;
pub use config::ClientConfig;
pub use error::{ConfigError, Fault, SubmitError, ValidationError};

#[cfg(feature = "reqwest")]
pub use adapters::gateways::ReqwestTransport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ClientConfig;
    pub use crate::entities::{
        Card, FormState, FormView, GraphQLRequest, GraphQLResponse, NewProduct, Notification,
        NotificationKind, Offer, Product, ProductType, RequestStatus, Section, SectionBody,
    };
    pub use crate::error::{ConfigError, Fault, SubmitError, ValidationError};
    pub use crate::use_cases::forms::{
        fields, CreateProduct, CreateProductForm, FindAvailableProducts,
        FindAvailableProductsForm, FindOffersAndProducts, FindOffersAndProductsForm,
        FindOffersForDate, FindOffersForDateForm, OffersAndProducts,
    };
    pub use crate::use_cases::ports::{GraphQLTransport, Notifier};
    pub use crate::use_cases::{Delivery, FormController, FormKind, Ticket};
    pub use crate::NotificationCenter;

    #[cfg(feature = "reqwest")]
    pub use crate::ReqwestTransport;
}
