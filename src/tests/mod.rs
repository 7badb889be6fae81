
pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
