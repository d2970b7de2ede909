pub mod db;
pub mod store;

#[cfg(test)]
pub mod testing;
