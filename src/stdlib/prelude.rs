use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};
use crate::runtime::{Environment, Value, NativeFunction, Invoke, RuntimeError};


pub fn define_prelude(env: &Environment) {
    // Seconds since the Unix epoch, with sub-second precision.
    let clock = native_function!(clock => {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH)
            .map_err(|error| RuntimeError::native_error("clock", error.to_string()))?;
        Ok(Value::Number(elapsed.as_secs_f64()))
    });
    
    define_native(env, clock);
}

pub fn define_native(env: &Environment, native: NativeFunction) {
    let native = Rc::new(native);
    log::trace!("define native {}", native.name());
    env.define(native.name(), Value::NativeFunction(native));
}
