// =============================================================================
// Upstream market-data adapter
// =============================================================================
//
// Everything that knows about the third-party API's payload shapes lives
// here. The rest of the crate only ever sees normalized `Bar` series; raw
// payload keys never leak past this module.

pub mod client;
pub mod parse;

pub use client::UpstreamClient;
