pub mod ast;
pub mod decimal;
pub mod error;
pub mod token;
pub mod value;

#[cfg(test)]
mod proptests;

pub use ast::*;
pub use decimal::Decimal;
pub use error::*;
pub use token::*;
pub use value::Value;
