use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::NameError;
use crate::value::Value;

/// One lexical scope. The link to the enclosing scope is a plain borrow, so a
/// child can never outlive the scope it was opened in.
#[derive(Debug, Default)]
pub struct Environment<'a> {
    store: RefCell<HashMap<Rc<str>, Value>>,
    outer: Option<&'a Environment<'a>>,
}

impl<'a> Environment<'a> {
    pub fn new() -> Self {
        Environment {
            store: RefCell::new(HashMap::new()),
            outer: None,
        }
    }

    pub fn new_enclosed(outer: &'a Environment<'a>) -> Self {
        Environment {
            store: RefCell::new(HashMap::new()),
            outer: Some(outer),
        }
    }

    pub fn define(&self, name: Rc<str>, value: Value) -> Result<(), NameError> {
        match self.store.borrow_mut().entry(name) {
            Entry::Occupied(entry) => Err(NameError::Redeclaration(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Result<Value, NameError> {
        if let Some(value) = self.store.borrow().get(name) {
            return Ok(value.clone());
        }
        match self.outer {
            Some(outer) => outer.get(name),
            None => Err(NameError::UndefinedVariable(name.into())),
        }
    }

    pub fn assign(&self, name: &str, value: Value) -> Result<(), NameError> {
        if let Some(slot) = self.store.borrow_mut().get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match self.outer {
            Some(outer) => outer.assign(name, value),
            None => Err(NameError::UndefinedVariable(name.into())),
        }
    }
}
