pub mod errors;
pub mod db;
pub mod producto;

#[cfg(test)]
mod tests;
