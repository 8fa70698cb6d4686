/// Astronomy Picture of the Day API access
///
/// - Fetcher trait and HTTP implementation (client.rs)
/// - Response body and record conversion (payload.rs)
/// - Fetch error taxonomy (error.rs)

pub mod client;
pub mod error;
pub mod payload;
