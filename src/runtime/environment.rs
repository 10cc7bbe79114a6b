use std::rc::Rc;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::runtime::{Value, Function, DefaultBuildHasher};
use crate::runtime::strings::StringSymbol;
use crate::runtime::errors::{ExecResult, RuntimeError};


pub type Namespace = HashMap<StringSymbol, Value, DefaultBuildHasher>;

pub fn new_namespace() -> Namespace {
    Namespace::with_hasher(DefaultBuildHasher::default())
}


/// A single lexical scope. Environments are shared through `Rc` handles,
/// so a scope captured by a closure lives as long as the closure does.
///
/// A function declared in a scope is also stored in that scope, which makes an
/// `Rc` cycle. [`Environment::release`] breaks that cycle when a scope is exited,
/// but only if nothing outside the scope can still reach it. Cycles that run
/// through a nested scope are not detected and stay alive.
#[derive(Debug)]
pub struct Environment {
    parent: Option<Rc<Environment>>,
    namespace: RefCell<Namespace>,
}

impl Environment {
    /// Create a global Environment, which terminates every name lookup.
    pub fn new_root() -> Rc<Self> {
        Rc::new(Environment {
            parent: None,
            namespace: RefCell::new(new_namespace()),
        })
    }
    
    /// Create a new local Environment with the given one as it's parent.
    pub fn new_local(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            parent: Some(parent.clone()),
            namespace: RefCell::new(new_namespace()),
        })
    }
    
    pub fn parent(&self) -> Option<&Rc<Environment>> { self.parent.as_ref() }
    
    /// Check if the name exists in this Environment
    pub fn has_name(&self, name: StringSymbol) -> bool {
        self.namespace.borrow().contains_key(&name)
    }
    
    /// Find the innermost Environment that has the given name, or None
    pub fn find_name(&self, name: StringSymbol) -> Option<&Environment> {
        let mut next_env = Some(self);
        while let Some(env) = next_env {
            if env.has_name(name) {
                return next_env
            }
            next_env = env.parent.as_deref();
        }
        None
    }
    
    /// Lookup a value for the given name in this Environment only
    pub fn lookup_value(&self, name: StringSymbol) -> Option<Value> {
        self.namespace.borrow().get(&name).cloned()
    }
    
    /// Insert or overwrite a binding in this Environment, shadowing any outer binding.
    pub fn define(&self, name: StringSymbol, value: Value) -> Option<Value> {
        self.namespace.borrow_mut().insert(name, value)
    }
    
    /// Lookup a value in the innermost Environment in which it can be found.
    pub fn get(&self, name: StringSymbol) -> ExecResult<Value> {
        self.find_name(name)
            .and_then(|env| env.lookup_value(name))
            .ok_or_else(|| RuntimeError::name_not_defined(name))
    }
    
    /// Update an existing binding. Never creates a new one.
    pub fn assign(&self, name: StringSymbol, value: Value) -> ExecResult<()> {
        let env = self.find_name(name)
            .ok_or_else(|| RuntimeError::name_not_defined(name))?;
        
        env.define(name, value);
        Ok(())
    }
    
    /// Release a scope that is being exited. If the only remaining references to 
    /// it come from functions declared in it, and those functions are themselves 
    /// only held by the scope, the bindings are cleared so the cycle can be freed.
    pub fn release(env: Rc<Environment>) {
        let unreachable = {
            let namespace = env.namespace.borrow();
            
            // distinct functions that captured this scope
            let mut captures: Vec<&Rc<Function>> = Vec::new();
            for value in namespace.values() {
                if let Value::Function(fun) = value {
                    let seen = captures.iter().any(|other| Rc::ptr_eq(other, fun));
                    if !seen && Rc::ptr_eq(fun.closure(), &env) {
                        captures.push(fun);
                    }
                }
            }
            
            let held_only_here = captures.iter().all(|fun| {
                let bindings = namespace.values()
                    .filter(|value| matches!(value, Value::Function(other) if Rc::ptr_eq(other, fun)))
                    .count();
                Rc::strong_count(fun) == bindings
            });
            
            !captures.is_empty() && held_only_here 
                && Rc::strong_count(&env) == 1 + captures.len()
        };
        
        if unreachable {
            log::trace!("releasing scope with captured bindings");
            env.namespace.borrow_mut().clear();
        }
    }
}
