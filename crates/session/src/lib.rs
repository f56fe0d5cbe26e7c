//! `regform-session` -- drives the registration validator from UI events.
//!
//! The presentation layer reports each control change to a
//! [`session::FormSession`] and renders the returned
//! [`session::FieldUpdate`]. Reference data and form configuration are
//! read from JSON files by [`loader`], falling back to the built-in
//! datasets when a file is missing or unusable.

pub mod error;
pub mod loader;
pub mod session;
