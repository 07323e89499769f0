pub mod base;
pub mod server;
pub mod upstream;

pub use base::*;
pub use server::*;
pub use upstream::*;
