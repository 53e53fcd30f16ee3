// crates/tally-protocol/tests/wire_frames.rs
//
// Golden-frame tests against the exact byte layout the proxy peer
// speaks: u16 BE length-prefixed UTF-8 strings, i32 BE counts.

use tally_protocol::{codec, ProtocolError, Request, Response};

/// A length-prefixed UTF-8 field, as the proxy writes it.
fn utf(s: &str) -> Vec<u8> {
    let mut field = (s.len() as u16).to_be_bytes().to_vec();
    field.extend_from_slice(s.as_bytes());
    field
}

#[test]
fn get_servers_request_frame_layout() {
    let mut frame = Vec::new();
    codec::encode_request(&Request::ServerList, &mut frame).unwrap();

    assert_eq!(frame, utf("GetServers"));
}

#[test]
fn player_count_request_frame_layout() {
    let mut frame = Vec::new();
    codec::encode_request(&Request::player_count("skywars"), &mut frame).unwrap();

    let mut expected = utf("PlayerCount");
    expected.extend_from_slice(&utf("skywars"));
    assert_eq!(frame, expected);
}

#[test]
fn player_count_response_decodes() {
    let mut frame = utf("PlayerCount");
    frame.extend_from_slice(&utf("Lobby"));
    frame.extend_from_slice(&17i32.to_be_bytes());

    assert_eq!(
        codec::decode_response(&frame).unwrap(),
        Response::player_count("Lobby", 17)
    );
}

#[test]
fn roster_response_trims_names() {
    let mut frame = utf("GetServers");
    frame.extend_from_slice(&utf(" lobby , SkyWars ,bedwars"));

    assert_eq!(
        codec::decode_response(&frame).unwrap(),
        Response::server_list(["lobby", "SkyWars", "bedwars"])
    );
}

#[test]
fn empty_roster_yields_single_empty_entry() {
    // Splitting an empty list string produces one empty name; the
    // consumer stores it like any other. Locked in here so a change
    // is a conscious one.
    let mut frame = utf("GetServers");
    frame.extend_from_slice(&utf(""));

    assert_eq!(
        codec::decode_response(&frame).unwrap(),
        Response::server_list([""])
    );
}

#[test]
fn truncation_is_detected_at_every_boundary() {
    let mut frame = utf("PlayerCount");
    frame.extend_from_slice(&utf("lobby"));
    frame.extend_from_slice(&3i32.to_be_bytes());

    // Chopping the frame anywhere short of a full message must fail
    // with Truncated, never panic.
    for len in 0..frame.len() {
        assert_eq!(
            codec::decode_response(&frame[..len]),
            Err(ProtocolError::Truncated),
            "prefix of {} bytes",
            len
        );
    }
}

#[test]
fn invalid_utf8_is_rejected() {
    let mut frame = utf("PlayerCount");
    frame.extend_from_slice(&2u16.to_be_bytes());
    frame.extend_from_slice(&[0xFF, 0xFE]);
    frame.extend_from_slice(&1i32.to_be_bytes());

    assert_eq!(
        codec::decode_response(&frame),
        Err(ProtocolError::InvalidUtf8)
    );
}

#[test]
fn unknown_tag_is_reported() {
    // "Forward" is a real sub-channel on the shared channel; we just
    // don't consume it.
    let mut frame = utf("Forward");
    frame.extend_from_slice(&utf("ALL"));

    assert_eq!(
        codec::decode_response(&frame),
        Err(ProtocolError::UnknownSubChannel("Forward".to_string()))
    );
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut frame = utf("PlayerCount");
    frame.extend_from_slice(&utf("lobby"));
    frame.extend_from_slice(&3i32.to_be_bytes());
    frame.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

    assert_eq!(
        codec::decode_response(&frame).unwrap(),
        Response::player_count("lobby", 3)
    );
}

#[test]
fn oversized_name_fails_encode_without_partial_write() {
    let name = "x".repeat(usize::from(u16::MAX) + 1);
    let mut out = Vec::new();

    assert_eq!(
        codec::encode_request(&Request::player_count(name.clone()), &mut out),
        Err(ProtocolError::StringTooLong(name.len()))
    );
    assert!(out.is_empty());
}

#[test]
fn request_frames_decode_on_the_proxy_side() {
    for request in [Request::ServerList, Request::player_count("bedwars")] {
        let mut frame = Vec::new();
        codec::encode_request(&request, &mut frame).unwrap();
        assert_eq!(codec::decode_request(&frame).unwrap(), request);
    }
}

#[test]
fn negative_count_survives_the_wire() {
    // The wire type is signed; interpretation is the consumer's call.
    let mut frame = Vec::new();
    codec::encode_response(&Response::player_count("lobby", -3), &mut frame).unwrap();

    assert_eq!(
        codec::decode_response(&frame).unwrap(),
        Response::player_count("lobby", -3)
    );
}
