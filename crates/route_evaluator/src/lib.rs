pub mod carpooling;
pub mod error;
pub mod evaluator;
pub mod problem;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
