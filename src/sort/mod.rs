pub mod bucket;
pub mod driver;
pub mod key;

#[cfg(test)]
mod tests;

pub use self::bucket::*;
pub use self::driver::*;
pub use self::key::*;
