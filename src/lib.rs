//! # profile-flow
//!
//! Logic core of a booking app's profile-edit screen.
//!
//! - **Form** - field values and errors, conditional validation, focus order → [`form`]
//! - **Submission** - validate, send the minimal update, report an [`profile::Outcome`]
//! - **Avatar** - modal state machine driving camera/library capture and upload → [`profile::avatar`]
//! - **Session** - single owner of the signed-in user, with change events → [`session`]
//! - **Local backend** - account actor serving the update/upload collaborators → [`clients::AccountClient`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use profile_flow::app_system::ProfileSystem;
//! # use profile_flow::clients::ScriptedCapture;
//! # use profile_flow::config::ProfileConfig;
//! # use profile_flow::domain::{AccountCreate, CaptureResult, CaptureSource, Field};
//! # use profile_flow::profile::ProfileScreen;
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProfileConfig::default();
//! let system = ProfileSystem::start(&config, AccountCreate::new("Ana", "ana@x.com", "secret")).await?;
//! let collaborators = system.collaborators(
//!     Arc::new(ScriptedCapture::new(CaptureSource::Camera, [CaptureResult::Cancelled])),
//!     Arc::new(ScriptedCapture::new(CaptureSource::Library, [CaptureResult::Cancelled])),
//! );
//!
//! let mut screen = ProfileScreen::open(collaborators, &config).await?;
//! screen.set_value(Field::Name, "Ana Maria");
//! let _outcome = screen.submit().await;
//! # Ok(())
//! # }
//! ```

pub mod account_actor;
pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod form;
pub mod profile;
pub mod session;

#[cfg(test)]
mod mock_framework;
