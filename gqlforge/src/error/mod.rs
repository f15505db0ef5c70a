//! Error types for the gqlforge runtime.
//!
//! - [`FetchError`] - GraphQL fetcher failures (transport, decoding, GraphQL `errors`)
//!
//! Cache facade operations define no errors of their own; they return the
//! cache client's `Error` type unchanged.

mod fetch_error;

pub use fetch_error::FetchError;
