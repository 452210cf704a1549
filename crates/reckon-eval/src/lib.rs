//! Reckon evaluation: the full evaluator, the deterministic reducer and the
//! standard function library.
//!
//! Everything runs against an explicitly constructed [`Interpreter`], which
//! carries the function registry, the transformer chain and the variable
//! store. Parsing text goes through [`Interpreter::parse_expression`]:
//!
//! ```rust
//! use reckon_eval::Interpreter;
//! use reckon_syntax::Value;
//!
//! let mut interp = Interpreter::new();
//! interp.set_variable("hp", 12).unwrap();
//! let expr = interp.parse_expression("hp + random(1, 1)").unwrap();
//! assert_eq!(expr.evaluate(&mut interp).unwrap(), Value::from(13));
//! assert!(!expr.is_deterministic(&mut interp).unwrap());
//! assert_eq!(expr.deterministic_expression(&mut interp).unwrap().format().unwrap(), "12 + 1");
//! ```

pub mod evaluator;
pub mod expression;
pub mod function;
pub mod interpreter;
pub mod reducer;
pub mod registry;
pub mod stdlib;
pub mod variables;

pub use expression::Expression;
pub use function::{Function, Params};
pub use interpreter::{EvalStats, Interpreter, Transformer};
pub use registry::FunctionRegistry;
pub use reckon_syntax::error::Arity;
pub use variables::{MapVariableResolver, VariableResolver};
