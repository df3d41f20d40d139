pub mod classifier;
pub mod config;
pub mod error;
pub mod routes;
pub mod upload;

#[cfg(test)]
mod test_support;
