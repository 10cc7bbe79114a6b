/// Helper macros for creating native functions
#[doc(hidden)]
#[macro_export]
macro_rules! __bind_args {
    ( $func_name:tt, $args:expr, ) => { };
    
    ( $func_name:tt, $args:expr, $( $param:ident ),+ ) => {
        let _rest: &[$crate::runtime::Value] = $args;
        $(
            let ($param, _rest) = match _rest.split_first() {
                Some(split) => split,
                None => return Err($crate::runtime::RuntimeError::native_error(
                    stringify!($func_name), concat!("missing argument '", stringify!($param), "'")
                )),
            };
        )+
    };
}

/// Creates a `NativeFunction`. Each parameter is bound to a `&Value` inside the body, 
/// which must evaluate to an `ExecResult<Value>`. The body is a `move` closure so it may own state.
///
/// ```ignore
/// let add = native_function!(add, params(a, b) => { ... });
/// ```
#[macro_export]
macro_rules! native_function {
    ( $func_name:ident $( , params( $( $param:ident ),* ) )? => $body:expr ) => {
        {
            let signature = $crate::runtime::Signature::new(
                stringify!($func_name),
                vec![ $( $( $crate::runtime::StringSymbol::intern(stringify!($param)) ),* )? ],
            );
            
            let body = move |_self_fun: &$crate::runtime::NativeFunction, _args: &[$crate::runtime::Value]| 
                -> $crate::runtime::ExecResult<$crate::runtime::Value> 
            {
                $crate::__bind_args!( $func_name, _args, $( $( $param ),* )? );
                $body
            };
            
            $crate::runtime::NativeFunction::new(signature, Box::new(body))
        }
    };
}
