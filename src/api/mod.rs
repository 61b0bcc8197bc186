pub mod auth;
pub mod events;
pub mod faqs;
pub mod health;
pub mod metrics;
pub mod navigation;
pub mod questions;
pub mod swagger;
