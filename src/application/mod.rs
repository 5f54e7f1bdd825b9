//! Application layer - command/query handlers orchestrating ports + domain.

pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;
