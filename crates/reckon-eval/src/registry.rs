//! Case-insensitive name to function dispatch table.

use std::collections::HashMap;
use std::rc::Rc;

use crate::function::Function;

#[derive(Default, Clone, Debug)]
pub struct FunctionRegistry {
    /// Keyed by lowercased alias
    functions: HashMap<String, Rc<Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `function` under every alias. A later registration for the
    /// same alias replaces the earlier one.
    pub fn register(&mut self, function: Function) -> Rc<Function> {
        let function = Rc::new(function);
        for alias in function.aliases() {
            self.functions.insert(alias.to_lowercase(), Rc::clone(&function));
        }
        function
    }

    pub fn register_all(&mut self, functions: impl IntoIterator<Item = Function>) {
        for f in functions {
            self.register(f);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<Function>> {
        self.functions.get(&name.to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    /// Every distinct registered function, ordered by primary name.
    pub fn list_all(&self) -> Vec<Rc<Function>> {
        let mut all: Vec<Rc<Function>> = Vec::new();
        for f in self.functions.values() {
            if !all.iter().any(|seen| Rc::ptr_eq(seen, f)) {
                all.push(Rc::clone(f));
            }
        }
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }

    /// Sorted list of every registered alias.
    pub fn names(&self) -> Vec<String> {
        let mut v: Vec<String> = self.functions.keys().cloned().collect();
        v.sort();
        v
    }

    /// Number of distinct functions.
    pub fn len(&self) -> usize {
        self.list_all().len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn clear(&mut self) {
        self.functions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_syntax::error::Arity;
    use reckon_syntax::Value;

    fn constant(aliases: &[&str], n: i64) -> Function {
        Function::new(aliases, Arity::exactly(0), move |_, _, _| Ok(Value::from(n)))
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let mut r = FunctionRegistry::new();
        r.register(constant(&["Answer"], 42));
        assert!(r.lookup("answer").is_some());
        assert!(r.lookup("ANSWER").is_some());
        assert!(r.lookup("question").is_none());
    }

    #[test]
    fn aliases_share_one_function() {
        let mut r = FunctionRegistry::new();
        r.register(constant(&["ceil", "ceiling"], 1));
        let a = r.lookup("ceil").unwrap();
        let b = r.lookup("Ceiling").unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(r.len(), 1);
        assert_eq!(r.names(), vec!["ceil".to_string(), "ceiling".to_string()]);
    }

    #[test]
    fn later_registration_replaces_alias() {
        let mut r = FunctionRegistry::new();
        r.register(constant(&["f", "g"], 1));
        r.register(constant(&["f"], 2));
        assert_eq!(r.lookup("f").unwrap().aliases(), ["f".to_string()]);
        assert_eq!(r.lookup("g").unwrap().aliases().len(), 2);
        assert_eq!(r.list_all().len(), 2);
    }
}
