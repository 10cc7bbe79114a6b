use std::rc::Rc;
use crate::runtime::Environment;

mod prelude;

pub use prelude::{define_prelude, define_native};


/// Create a global Environment containing the native builtins.
pub fn create_globals() -> Rc<Environment> {
    let env = Environment::new_root();
    define_prelude(&env);
    env
}
