pub mod config;
pub mod ingest;
pub mod layout;
pub mod metrics;
pub mod topo;
pub mod viz;

#[cfg(test)]
mod test;
