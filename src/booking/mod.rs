pub mod attempt;
pub mod browser;
pub mod constants;
#[cfg(test)]
pub mod fake;
pub mod session;
pub mod webdriver;
