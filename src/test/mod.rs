pub(crate) mod point_set;


/// Install a fmt subscriber writing through the test harness. Set `RUST_LOG=planar_kdtree=trace`
/// to see per-query events.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
