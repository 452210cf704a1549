//! The host context: function registry, transformer chain, variable store
//! and evaluation counters.

use std::collections::BTreeSet;

use reckon_lexer::Lexer;
use reckon_parser::Parser;
use reckon_syntax::ast::{Node, VariableModifier};
use reckon_syntax::error::Result;
use reckon_syntax::Value;

use crate::evaluator;
use crate::expression::Expression;
use crate::function::Function;
use crate::reducer;
use crate::registry::FunctionRegistry;
use crate::stdlib;
use crate::variables::{MapVariableResolver, VariableResolver};

/// Counters kept for observability, reported by the REPL and the bench tool.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalStats {
    /// Functions and operators invoked by the evaluator
    pub function_calls: usize,
    /// Successful variable reads, during evaluation or reduction
    pub variable_reads: usize,
    /// Deterministic reductions computed
    pub reductions: usize,
    /// Nodes replaced by literals during reduction
    pub frozen_nodes: usize,
}

/// Text rewrite applied to raw input before lexing.
pub trait Transformer {
    fn transform(&self, input: &str) -> String;
}

impl<F> Transformer for F
where
    F: Fn(&str) -> String,
{
    fn transform(&self, input: &str) -> String {
        self(input)
    }
}

pub struct Interpreter {
    functions: FunctionRegistry,
    transformers: Vec<Box<dyn Transformer>>,
    variables: Box<dyn VariableResolver>,
    pub(crate) stats: EvalStats,
}

impl Default for Interpreter {
    fn default() -> Self { Self::new() }
}

impl Interpreter {
    /// An interpreter with the standard library and an empty in-memory store.
    pub fn new() -> Self {
        Self::with_resolver(MapVariableResolver::new())
    }

    /// An interpreter with the standard library and a host variable store.
    pub fn with_resolver(resolver: impl VariableResolver + 'static) -> Self {
        let mut interp = Self::bare();
        interp.variables = Box::new(resolver);
        stdlib::register_all(&mut interp.functions);
        interp
    }

    /// No functions at all; hosts register exactly what they allow.
    pub fn bare() -> Self {
        Self {
            functions: FunctionRegistry::new(),
            transformers: Vec::new(),
            variables: Box::new(MapVariableResolver::new()),
            stats: EvalStats::default(),
        }
    }

    pub fn functions(&self) -> &FunctionRegistry { &self.functions }

    pub fn functions_mut(&mut self) -> &mut FunctionRegistry { &mut self.functions }

    pub fn register(&mut self, function: Function) {
        self.functions.register(function);
    }

    pub fn function_names(&self) -> Vec<String> { self.functions.names() }

    /// Transformers run in the order they were added.
    pub fn add_transformer(&mut self, transformer: impl Transformer + 'static) {
        self.transformers.push(Box::new(transformer));
    }

    pub fn variables(&self) -> &dyn VariableResolver { &*self.variables }

    pub fn variables_mut(&mut self) -> &mut dyn VariableResolver { &mut *self.variables }

    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        self.variables.set_variable(name, VariableModifier::Plain, value.into())
    }

    pub fn get_variable(&mut self, name: &str) -> Result<Value> {
        self.variables.get_variable(name, VariableModifier::Plain)
    }

    pub fn variable_names(&self) -> BTreeSet<String> { self.variables.variable_names() }

    pub fn stats(&self) -> EvalStats { self.stats }

    pub fn reset_stats(&mut self) {
        self.stats = EvalStats::default();
    }

    /// Applies the transformer chain to `text`.
    pub fn transform(&self, text: &str) -> String {
        self.transformers
            .iter()
            .fold(text.to_string(), |acc, t| t.transform(&acc))
    }

    /// Transforms, lexes and parses `text` into a tree.
    pub fn parse_node(&self, text: &str) -> Result<Node> {
        let source = self.transform(text);
        let tokens = Lexer::new(&source).tokenize()?;
        Parser::new(tokens).parse_expression()
    }

    pub fn parse_expression(&self, text: &str) -> Result<Expression> {
        Ok(Expression::new(self.parse_node(text)?))
    }

    pub fn evaluate(&mut self, node: &Node) -> Result<Value> {
        evaluator::evaluate(self, node)
    }

    /// Deterministic form of `node`; the input is never modified.
    pub fn reduce(&mut self, node: &Node) -> Result<Node> {
        self.stats.reductions += 1;
        reducer::reduce(self, node)
    }

    /// Parses and evaluates `text` in one step.
    pub fn eval_str(&mut self, text: &str) -> Result<Value> {
        let node = self.parse_node(text)?;
        self.evaluate(&node)
    }
}
