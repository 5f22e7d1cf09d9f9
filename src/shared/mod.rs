pub mod constants;
pub mod hal;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
