pub mod fs_util;
pub mod log;
pub(crate) mod rand;
#[cfg(test)]
pub(crate) mod test_util;
