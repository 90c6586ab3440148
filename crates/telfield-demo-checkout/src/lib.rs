#![forbid(unsafe_code)]

//! Interactive checkout form demo for telfield.
//!
//! A two-field form (customer name, mobile phone) that exercises the whole
//! stack: the [`telfield::PhoneInput`] widget for live editing feedback and
//! a [`telfield::SubmissionGuard`] standing in for the server-side check
//! that runs when the order is placed.

pub mod app;
pub mod cli;
pub mod ui;
