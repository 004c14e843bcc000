
/// Routes the tree's `log` output through the test harness so failing cases show their
/// rotations. Only the first call installs the logger.
pub(crate) fn init_logging() {
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Trace, simplelog::Config::default());
}
