//! launch-dash - SpaceX launch records dashboard
//!
//! Loads the launch table once at startup and serves a single page with a
//! launch-site dropdown, a payload range slider and two charts. Moving a
//! control posts an event; the controller re-runs every view that depends on
//! that control and the page swaps in the new figures.
//!
//! # Modules
//!
//! - [`data`]: launch records, loading, site/payload filtering
//! - [`ui`]: page layout and the pie / scatter views
//! - [`controller`]: control → view subscriptions and event dispatch
//! - [`serve`]: HTTP surface

pub mod app;
pub mod chart;
pub mod color;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod serve;
pub mod state;
pub mod ui;
