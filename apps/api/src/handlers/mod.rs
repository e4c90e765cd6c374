pub mod audit;
pub mod dashboard;
pub mod health;
pub mod live_logs;
pub mod terminal;

#[cfg(test)]
mod tests;
