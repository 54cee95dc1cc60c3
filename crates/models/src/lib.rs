pub mod errors;
pub mod db;
pub mod pal;

#[cfg(test)]
mod tests;
