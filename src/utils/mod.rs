pub mod logging;
pub mod scroll;
pub mod test_utils;
