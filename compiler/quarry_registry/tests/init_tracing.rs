//! Tracing setup inside a host that already owns the global subscriber.
//!
//! Kept in its own test binary: the global default is per process.

use tracing::subscriber::{set_global_default, NoSubscriber};

#[test]
fn init_tracing_keeps_host_subscriber() {
    assert!(
        set_global_default(NoSubscriber::default()).is_ok(),
        "no subscriber should be installed yet"
    );
    std::env::set_var("RUST_LOG", "quarry_registry=debug");

    quarry_registry::init_tracing();
    quarry_registry::init_tracing();

    // The host's subscriber is still the one receiving events.
    tracing::dispatcher::get_default(|dispatch| {
        assert!(dispatch.is::<NoSubscriber>());
    });
}
