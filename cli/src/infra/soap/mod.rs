//! SOAP-over-HTTP access to the analytics web services.

pub mod client;
pub mod envelope;

pub use client::{Service, SoapClient};
