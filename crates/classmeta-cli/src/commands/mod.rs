pub mod class;
pub mod loader;
pub mod module;

#[cfg(test)]
mod loader_tests;
#[cfg(test)]
mod module_tests;

use std::error::Error;

/// `err` followed by each of its sources, joined with ": ".
pub fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
