#![expect(missing_docs)]

use core::fmt::Write;

use ringslice::{Arg, RingSlice, ScanOptions, scan};
use rstest::rstest;

/// A receive ring the way a UART interrupt leaves it: `response` written
/// starting at `first`, wrapping past the end, with stale bytes around it.
struct Rx {
    ring: [u8; 32],
    first: usize,
    last: usize,
}

impl Rx {
    fn with(response: &[u8], first: usize) -> Self {
        assert!(response.len() < 32);
        let mut ring = [b'~'; 32];
        for (i, &byte) in response.iter().enumerate() {
            ring[(first + i) % 32] = byte;
        }
        Rx {
            ring,
            first,
            last: (first + response.len()) % 32,
        }
    }

    fn slice(&self) -> RingSlice<'_> {
        RingSlice::new(&self.ring, self.first, self.last)
    }
}

/// Splits a receive window into lines ending in `\r\n`.
fn lines(rs: RingSlice<'_>) -> Vec<RingSlice<'_>> {
    let mut out = Vec::new();
    let mut rest = rs;
    loop {
        let line = rest.subslice_with_suffix(0, "\r\n");
        if line.is_empty() {
            break;
        }
        out.push(line.subslice(0, line.len() - 2));
        rest = rest.split_at(line.len()).1;
    }
    out
}

fn render_lines(rs: RingSlice<'_>) -> String {
    let mut out = String::new();
    for line in lines(rs) {
        writeln!(out, "{line:?}").unwrap();
    }
    out
}

#[test]
fn snapshot_lines_of_a_wrapped_window() {
    let rx = Rx::with(b"\r\n+CSQ: 23,99\r\n\r\nOK\r\n", 20);

    insta::assert_snapshot!(render_lines(rx.slice()), @r#"
    RingSlice { first: 20, last: 20, capacity: 32, data: "" }
    RingSlice { first: 22, last: 1, capacity: 32, data: "+CSQ: 23,99" }
    RingSlice { first: 3, last: 3, capacity: 32, data: "" }
    RingSlice { first: 5, last: 7, capacity: 32, data: "OK" }
    "#);
}

#[test]
fn snapshot_debug_of_the_window_itself() {
    let rx = Rx::with(b"+CREG: 1,5\r\n", 26);
    insta::assert_snapshot!(format!("{:?}", rx.slice()), @r#"RingSlice { first: 26, last: 6, capacity: 32, data: "+CREG: 1,5\r\n" }"#);
}

#[rstest]
#[case(0)]
#[case(5)]
#[case(17)]
#[case(24)]
#[case(31)]
fn signal_quality_at_every_wrap_point(#[case] first: usize) {
    let rx = Rx::with(b"\r\n+CSQ: 23,99\r\n\r\nOK\r\n", first);
    let rs = rx.slice();

    assert_eq!(rs.find("+CSQ:"), "+CSQ:");
    let upto = rs.subslice_with_suffix(0, "+CSQ:");
    let reply = rs.split_at(upto.len() - "+CSQ:".len()).1;
    assert!(reply.starts_with("+CSQ: 23,99\r\n"));

    let (mut rssi, mut ber) = (0u32, 0u32);
    assert_eq!(scan!(reply, "+CSQ: %d,%d", &mut rssi, &mut ber), 2);
    assert_eq!((rssi, ber), (23, 99));

    // a leading template space skips the "\r\n" echo terminator
    let (mut rssi, mut ber) = (0u32, 0u32);
    assert_eq!(scan!(rs, " +CSQ: %d,%d", &mut rssi, &mut ber), 2);
    assert_eq!((rssi, ber), (23, 99));

    assert!(!rs.find("\r\nOK\r\n").is_empty());
    assert!(rs.find("ERROR").is_empty());
}

#[rstest]
#[case(b"+CMGR: \"REC UNREAD\",\"+4912345\"", 3)]
#[case(b"+CMGR: \"REC READ\",\"+4912345\"", 3)]
#[case(b"+CMGR: \"STO SENT\",\"\"", 1)]
fn sms_header(#[case] response: &[u8], #[case] assigned: usize) {
    for first in [0, 9, 30] {
        let rx = Rx::with(response, first);
        let mut status = [0u8; 12];
        let mut sign = [0u8; 2];
        let mut number = [0u8; 16];
        let n = scan!(
            rx.slice(),
            "+CMGR: \"%11[A-Z ]\",\"%1[+]%15[0-9]\"",
            &mut status,
            &mut sign,
            &mut number,
        );
        assert_eq!(n, assigned, "first {first}");
        assert!(status.starts_with(b"REC ") || status.starts_with(b"STO SENT\0"));
        if assigned == 3 {
            assert_eq!(&sign, b"+\0");
            assert_eq!(&number[..8], b"4912345\0");
        }
    }
}

#[test]
fn operator_selection_with_suppressed_fields() {
    let rx = Rx::with(b"+COPS: 0,2,\"26201\",7\r\n", 28);
    let mut operator = [0u8; 8];
    let mut act = 0i32;
    assert_eq!(
        scan!(rx.slice(), "+COPS: %*d,%*d,\"%7[0-9]\",%d", &mut operator, &mut act),
        2
    );
    assert_eq!(&operator[..6], b"26201\0");
    assert_eq!(act, 7);
}

#[test]
fn strict_hex_rejects_prefixed_cell_id() {
    let rx = Rx::with(b"+CREG: 2,1,\"0x1A2B\",\"0xCAFE\"", 12);
    let rs = rx.slice();
    let (mut lac, mut cid) = (0u32, 0u32);

    let lenient = scan!(rs, "+CREG: %*d,%*d,\"%x\",\"%x\"", &mut lac, &mut cid);
    assert_eq!(lenient, 2);
    assert_eq!((lac, cid), (0x1A2B, 0xCAFE));

    let (mut lac, mut cid) = (0u32, 0u32);
    let strict = rs.scan_with(
        ScanOptions {
            reject_hex_prefix: true,
            ..ScanOptions::default()
        },
        "+CREG: %*d,%*d,\"%x\",\"%x\"",
        &mut [Arg::from(&mut lac), Arg::from(&mut cid)],
    );
    // "0" converts, then the closing quote fails to match "x1A2B"
    assert_eq!(strict, 1);
    assert_eq!((lac, cid), (0, 0));
}

#[test]
fn display_renders_response_text() {
    let rx = Rx::with(b"+CGMI: Quectel\r\n", 25);
    let line = rx.slice().subslice_with_suffix(0, "\r\n");
    assert_eq!(line.to_string(), "+CGMI: Quectel\r\n");
}
