//! Subrail Client Library
//!
//! A typed client for the Subrail subscription-billing HTTP/XML API:
//! subscriber management, plan lookup, complimentary subscriptions, free
//! trials, one-off fees, invoices, and card payments, plus builders for
//! the hosted payment-page URLs.
//!
//! # Overview
//!
//! All operations go through [`SubrailClient`], which owns a [`SiteConfig`]
//! (site name plus API token) and a transport. Failures split into exactly
//! two kinds, modeled by [`BillingError`]:
//!
//! - [`Retry`](BillingError::Retry): the caller can fix the input or wait
//!   and resubmit (card validation failures, gateway timeouts).
//! - [`Fatal`](BillingError::Fatal): resubmitting the same request will
//!   not help.
//!
//! Lookups ([`find_subscriber`](SubrailClient::find_subscriber),
//! [`find_plan`](SubrailClient::find_plan)) report a missing record as
//! `Ok(None)`; mutating calls report it as an error.
//!
//! # Examples
//!
//! ```no_run
//! use subrail_client::{SiteConfig, SubrailClient};
//!
//! # async fn example() -> subrail_client::Result<()> {
//! let config = SiteConfig::new("my-site", "api-token")?;
//! let client = SubrailClient::new(config);
//!
//! let plans = client.list_plans().await?;
//! let subscriber = client
//!     .create_subscriber("joe", Some("joe@example.com"), None, Default::default())
//!     .await?;
//!
//! // Send the subscriber to the hosted payment page for the first plan.
//! let checkout = client.subscribe_url(&subscriber.customer_id, plans[0].id, None);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod transport;
pub mod urls;
pub mod xml;

pub use client::SubrailClient;
pub use config::SiteConfig;
pub use error::{BillingError, Result};
pub use resources::{
    CreditCard, Invoice, InvoiceSubscriber, LineItem, SubscriptionPlan, Subscriber,
};
