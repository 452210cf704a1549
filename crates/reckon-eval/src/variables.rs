//! Variable storage behind the [`VariableResolver`] capability.

use std::collections::{BTreeSet, HashMap};

use reckon_syntax::ast::VariableModifier;
use reckon_syntax::error::{error, ErrorKind, Result};
use reckon_syntax::Value;

/// Named value storage consulted by evaluation and reduction.
///
/// `contains_variable` and `get_variable` are separate operations: callers
/// check first, and `get_variable` on an absent name is an error.
pub trait VariableResolver {
    fn contains_variable(&mut self, name: &str, modifier: VariableModifier) -> Result<bool>;
    fn get_variable(&mut self, name: &str, modifier: VariableModifier) -> Result<Value>;
    fn set_variable(&mut self, name: &str, modifier: VariableModifier, value: Value) -> Result<()>;
    fn variable_names(&self) -> BTreeSet<String>;
}

/// Host callback supplying a value for an unset `?name` variable.
pub type PromptHook = Box<dyn FnMut(&str) -> Option<Value>>;

/// In-memory, case-insensitive variable store.
///
/// The modifier does not partition storage: `x` and `?x` name the same
/// variable. Only prompt lookups of an unset name consult the prompt hook,
/// and a value it supplies is stored so the hook runs once per name.
#[derive(Default)]
pub struct MapVariableResolver {
    /// Lowercased name -> (spelling of the last write, value)
    vars: HashMap<String, (String, Value)>,
    prompt: Option<PromptHook>,
}

impl MapVariableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prompt<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&str) -> Option<Value> + 'static,
    {
        self.prompt = Some(Box::new(hook));
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.vars.insert(name.to_lowercase(), (name.to_string(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    fn prompt_for(&mut self, name: &str) -> bool {
        let Some(hook) = self.prompt.as_mut() else {
            return false;
        };
        match hook(name) {
            Some(value) => {
                self.insert(name, value);
                true
            }
            None => false,
        }
    }
}

impl VariableResolver for MapVariableResolver {
    fn contains_variable(&mut self, name: &str, modifier: VariableModifier) -> Result<bool> {
        if self.vars.contains_key(&name.to_lowercase()) {
            return Ok(true);
        }
        Ok(modifier == VariableModifier::Prompt && self.prompt_for(name))
    }

    fn get_variable(&mut self, name: &str, modifier: VariableModifier) -> Result<Value> {
        if !self.contains_variable(name, modifier)? {
            return error(ErrorKind::UndefinedVariable(name.to_string()));
        }
        match self.vars.get(&name.to_lowercase()) {
            Some((_, value)) => Ok(value.clone()),
            None => error(ErrorKind::UndefinedVariable(name.to_string())),
        }
    }

    fn set_variable(&mut self, name: &str, _modifier: VariableModifier, value: Value) -> Result<()> {
        self.insert(name, value);
        Ok(())
    }

    fn variable_names(&self) -> BTreeSet<String> {
        self.vars.values().map(|(name, _)| name.clone()).collect()
    }
}
