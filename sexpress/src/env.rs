use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{Error, value::Value};

#[derive(Debug)]
pub struct Environment {
    parent: Option<EnvRef>,
    map: HashMap<Arc<str>, Value>,
}

pub type EnvRef = Arc<Mutex<Environment>>;

impl Environment {
    pub fn new() -> Self {
        Self { parent: None, map: HashMap::new() }
    }

    pub fn wrap(self) -> EnvRef {
        Arc::new(Mutex::new(self))
    }

    pub fn extend(parent: EnvRef) -> Self {
        Self { parent: Some(parent), map: HashMap::new() }
    }

    /// Resolve a name, walking outward through enclosing scopes. An
    /// unbound name is always an error, never a default.
    pub fn lookup(&self, name: &str) -> Result<Value, Error> {
        match self.map.get(name) {
            Some(v) => Ok(*v),
            None => match self.parent {
                Some(ref p) => p.lock().lookup(name),
                None => Err(Error::UndefinedVariable { name: Arc::from(name) }),
            }
        }
    }

    /// Insert or rebind. Redefining an existing name simply replaces
    /// the previous binding.
    pub fn define(&mut self, name: Arc<str>, value: Value) {
        self.map.insert(name, value);
    }

    /// A copy of the local bindings, detached from the live environment.
    pub fn snapshot(&self) -> HashMap<Arc<str>, Value> {
        self.map.clone()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
