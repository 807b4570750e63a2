//! End-to-end tests of the Javelin syntax tree core.

#[cfg(test)]
mod utils;


#[cfg(test)]
mod pretty;
