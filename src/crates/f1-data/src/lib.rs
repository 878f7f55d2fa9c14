//! Read-only client for the OpenF1 motorsport data API.
//!
//! This crate exposes the three lookups the assistant needs:
//! - **sessions** - race weekend events filtered by year, type, name and country
//! - **drivers** - the entry list of one session
//! - **laps** - timed laps of one session, optionally for a single driver
//!
//! Records are deserialized into typed entities ([`Session`], [`Driver`],
//! [`Lap`]). A record missing a required field fails the whole call with
//! [`ProviderError::MalformedRecord`]; a non-2xx response fails with
//! [`ProviderError::ProviderUnavailable`]. Nothing is retried here.
//!
//! # Example
//!
//! ```rust,ignore
//! use f1_data::{F1DataProvider, OpenF1Client, ProviderConfig, SessionKey, SessionQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenF1Client::new(ProviderConfig::default())?;
//!
//!     let races = client
//!         .fetch_sessions(&SessionQuery::new(2024).with_session_type("Race"))
//!         .await?;
//!     println!("{} races", races.len());
//!
//!     let drivers = client.fetch_drivers(&SessionKey::Latest).await?;
//!     for driver in drivers {
//!         println!("{}", driver);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod provider;
pub mod types;

pub use client::{OpenF1Client, ProviderConfig, DEFAULT_BASE_URL};
pub use error::{ProviderError, Result};
pub use provider::{F1DataProvider, SessionKey, SessionQuery};
pub use types::{Driver, Lap, Session};
