// crates/tally-sim/tests/end_to_end.rs
//
// Full-stack scenario over the simulated host and proxy. The wire is
// drained explicitly between steps so the test is deterministic.

use std::sync::Arc;

use tokio::sync::mpsc;

use tally_core::{Config, CountTracker};
use tally_sim::host::SimHost;
use tally_sim::proxy::SimProxy;
use tally_sim::types::WireRx;

fn pump(proxy: &SimProxy, wire_rx: &mut WireRx, host: &SimHost, tracker: &CountTracker) {
    while let Ok(frame) = wire_rx.try_recv() {
        for reply in proxy.handle_frame(&frame.payload) {
            host.deliver_inbound(tracker, &frame.channel, &reply);
        }
    }
}

#[tokio::test]
async fn full_stack_join_refresh_query() {
    let (wire_tx, mut wire_rx) = mpsc::unbounded_channel();
    let host = Arc::new(SimHost::new(wire_tx));
    let tracker = CountTracker::new(host.clone(), Config::default());
    let mut proxy = SimProxy::new([("lobby".to_string(), 3u32), ("skywars".to_string(), 12)]);

    tracker.activate();
    assert!(host.connectivity_registered());

    // First join discovers the roster; counts start at 0.
    let first = host.connect_carrier();
    tracker.on_carrier_joined();
    pump(&proxy, &mut wire_rx, &host, &tracker);
    assert_eq!(tracker.cache().len(), 2);
    assert_eq!(tracker.query("total"), "0");

    // Second join sweeps the known servers for real counts.
    let second = host.connect_carrier();
    tracker.on_carrier_joined();
    pump(&proxy, &mut wire_rx, &host, &tracker);
    assert_eq!(tracker.query("lobby"), "3");
    assert_eq!(tracker.query("skywars"), "12");
    assert_eq!(tracker.query("all"), "15");

    // A count changes upstream; the next leave refreshes it.
    proxy.set_count("skywars", 9);
    host.disconnect_carrier(second);
    tracker.on_carrier_left();
    pump(&proxy, &mut wire_rx, &host, &tracker);
    assert_eq!(tracker.query("skywars"), "9");
    assert_eq!(tracker.query("total"), "12");

    // Last carrier gone: the sweep has no way to send and changes
    // nothing.
    host.disconnect_carrier(first);
    tracker.on_carrier_left();
    pump(&proxy, &mut wire_rx, &host, &tracker);
    assert_eq!(tracker.query("total"), "12");

    tracker.deactivate();
    assert_eq!(tracker.query("total"), "0");
    assert!(!host.connectivity_registered());
}

#[tokio::test]
async fn unsubscribed_channels_do_not_reach_the_tracker() {
    let (wire_tx, _wire_rx) = mpsc::unbounded_channel();
    let host = Arc::new(SimHost::new(wire_tx));
    let tracker = CountTracker::new(host.clone(), Config::default());

    // Never activated: no listener is registered, so the host's
    // dispatch drops the frame before the tracker sees it.
    let mut frame = Vec::new();
    tally_protocol::codec::encode_response(
        &tally_protocol::Response::player_count("lobby", 4),
        &mut frame,
    )
    .unwrap();
    host.deliver_inbound(&tracker, tally_protocol::MESSAGE_CHANNEL, &frame);

    assert!(tracker.cache().is_empty());
}
