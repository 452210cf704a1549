//! Function descriptors and the uniform invocation contract.

use std::fmt;
use std::rc::Rc;

use reckon_syntax::error::{error, Arity, ErrorKind, Result};
use reckon_syntax::Value;

use crate::interpreter::Interpreter;

/// Evaluation rule of a function: `(interpreter, name as called, arguments)`.
pub type Rule = Rc<dyn Fn(&mut Interpreter, &str, &[Value]) -> Result<Value>>;

/// Argument type check run after the arity check and before the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Params {
    #[default]
    Any,
    /// Every argument must be a number.
    Numbers,
    /// Every argument must be a string.
    Strings,
}

impl Params {
    fn expected(self) -> Option<&'static str> {
        match self {
            Params::Any => None,
            Params::Numbers => Some("number"),
            Params::Strings => Some("string"),
        }
    }
}

/// An immutable function descriptor.
///
/// ```rust
/// use reckon_eval::{Arity, Function, Interpreter};
/// use reckon_syntax::Value;
///
/// let twice = Function::new(&["twice"], Arity::exactly(1), |_, _, args| {
///     Ok(Value::Str(format!("{0}{0}", args[0])))
/// });
/// let mut interp = Interpreter::bare();
/// interp.register(twice);
/// assert_eq!(interp.eval_str("TWICE('ab')").unwrap(), Value::from("abab"));
/// ```
#[derive(Clone)]
pub struct Function {
    aliases: Vec<String>,
    arity: Arity,
    deterministic: bool,
    params: Params,
    rule: Rule,
}

impl Function {
    /// A deterministic function accepting any argument types.
    pub fn new<F>(aliases: &[&str], arity: Arity, rule: F) -> Self
    where
        F: Fn(&mut Interpreter, &str, &[Value]) -> Result<Value> + 'static,
    {
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            arity,
            deterministic: true,
            params: Params::Any,
            rule: Rc::new(rule),
        }
    }

    /// Marks the function as having effects or varying output.
    #[must_use]
    pub fn non_deterministic(mut self) -> Self {
        self.deterministic = false;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Primary name: the first alias.
    pub fn name(&self) -> &str {
        self.aliases.first().map(String::as_str).unwrap_or("")
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    pub fn params(&self) -> Params {
        self.params
    }

    /// Checks arity, then parameter types, then runs the rule.
    pub fn evaluate(&self, interp: &mut Interpreter, name: &str, args: &[Value]) -> Result<Value> {
        if !self.arity.accepts(args.len()) {
            return error(ErrorKind::Arity {
                name: name.to_string(),
                got: args.len(),
                expected: self.arity,
            });
        }
        self.check_parameters(name, args)?;
        (self.rule)(interp, name, args)
    }

    /// Positions in parameter errors are 1-based.
    pub fn check_parameters(&self, name: &str, args: &[Value]) -> Result<()> {
        let Some(expected) = self.params.expected() else {
            return Ok(());
        };
        for (i, arg) in args.iter().enumerate() {
            if arg.type_name() != expected {
                return error(ErrorKind::ParameterType {
                    name: name.to_string(),
                    index: i + 1,
                    expected: expected.to_string(),
                    actual: arg.type_name().to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("aliases", &self.aliases)
            .field("arity", &self.arity)
            .field("deterministic", &self.deterministic)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
