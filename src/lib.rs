//! Signed media reverse proxy: resolves an opaque media id against the
//! upstream media API and streams (or redirects to) the best rendition.

pub mod common;
pub mod configs;
pub mod selector;
pub mod server;
pub mod signing;
pub mod transport;
pub mod upstream;
