//! Username lookup

mod resolver;

pub use resolver::RobloxUserResolver;
