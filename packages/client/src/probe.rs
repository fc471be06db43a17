//! Best-effort public-address discovery via a single STUN binding request.
//!
//! The result is advisory audit data attached to auth mutations; failure is
//! silent and the probe never blocks a login or registration.

use std::net::IpAddr;
use std::time::Duration;

use rand::Rng;
use tokio::net::UdpSocket;
use tracing::debug;

use crate::config::ProbeConfig;

const STUN_MAGIC_COOKIE: u32 = 0x2112_A442;
const BINDING_REQUEST: u16 = 0x0001;
const BINDING_SUCCESS: u16 = 0x0101;
const ATTR_XOR_MAPPED_ADDRESS: u16 = 0x0020;

/// Resolve the public address, or `None` on any failure or timeout.
pub async fn resolve_public_ip(config: &ProbeConfig) -> Option<IpAddr> {
    let timeout = Duration::from_millis(config.timeout_ms);
    match tokio::time::timeout(timeout, query(&config.stun_server)).await {
        Ok(Ok(ip)) => Some(ip),
        Ok(Err(e)) => {
            debug!(error = %e, "network identity probe failed");
            None
        }
        Err(_) => {
            debug!(timeout_ms = config.timeout_ms, "network identity probe timed out");
            None
        }
    }
}

async fn query(server: &str) -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(server).await?;

    let transaction_id: [u8; 12] = rand::rng().random();
    let mut request = Vec::with_capacity(20);
    request.extend_from_slice(&BINDING_REQUEST.to_be_bytes());
    request.extend_from_slice(&0u16.to_be_bytes());
    request.extend_from_slice(&STUN_MAGIC_COOKIE.to_be_bytes());
    request.extend_from_slice(&transaction_id);
    socket.send(&request).await?;

    let mut buf = [0u8; 512];
    let n = socket.recv(&mut buf).await?;
    parse_binding_response(&buf[..n], &transaction_id)
        .ok_or_else(|| std::io::Error::other("malformed STUN response"))
}

/// Extract the XOR-MAPPED-ADDRESS from a binding success response.
fn parse_binding_response(packet: &[u8], transaction_id: &[u8; 12]) -> Option<IpAddr> {
    if packet.len() < 20 {
        return None;
    }
    let message_type = u16::from_be_bytes([packet[0], packet[1]]);
    let cookie = u32::from_be_bytes([packet[4], packet[5], packet[6], packet[7]]);
    if message_type != BINDING_SUCCESS
        || cookie != STUN_MAGIC_COOKIE
        || &packet[8..20] != transaction_id
    {
        return None;
    }

    let mut rest = &packet[20..];
    while rest.len() >= 4 {
        let attr_type = u16::from_be_bytes([rest[0], rest[1]]);
        let attr_len = u16::from_be_bytes([rest[2], rest[3]]) as usize;
        let value = rest.get(4..4 + attr_len)?;
        if attr_type == ATTR_XOR_MAPPED_ADDRESS {
            return parse_xor_mapped(value);
        }
        // Attributes are padded to 4-byte boundaries.
        let advance = 4 + attr_len.div_ceil(4) * 4;
        rest = rest.get(advance..)?;
    }
    None
}

fn parse_xor_mapped(value: &[u8]) -> Option<IpAddr> {
    let family = *value.get(1)?;
    let cookie = STUN_MAGIC_COOKIE.to_be_bytes();
    match family {
        0x01 => {
            let raw = value.get(4..8)?;
            let mut octets = [0u8; 4];
            for (i, b) in raw.iter().enumerate() {
                octets[i] = b ^ cookie[i];
            }
            Some(IpAddr::from(octets))
        }
        0x02 => {
            // IPv6 XORs with cookie || transaction id; the audit path only
            // needs IPv4, so v6 responses are ignored.
            None
        }
        _ => None,
    }
}
