//! Open Pixel Control packet framing. Pure byte-level encoding and
//! decoding; no I/O.
//!
//! Wire layout, big-endian:
//!
//! ```text
//! byte 0:    channel  (0 = broadcast)
//! byte 1:    command  (0 = set pixel colors)
//! bytes 2-3: payload length in bytes
//! bytes 4..: payload  (command 0: 3 bytes per pixel, RGB order)
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use pixelfx::{Color, Frame};

use crate::{Channel, OpcError};

pub const CMD_SET_PIXEL_COLORS: u8 = 0x00;
pub const CMD_SYSTEM_EXCLUSIVE: u8 = 0xFF;

pub const HEADER_LEN: usize = 4;
pub const MAX_PAYLOAD: usize = u16::MAX as usize;
/// Largest frame that fits a single set-pixel-colors packet.
pub const MAX_PIXELS: usize = MAX_PAYLOAD / 3;

/// Encodes a frame as a single set-pixel-colors packet for the given
/// channel. Frames over [`MAX_PIXELS`] are a caller error and are never
/// split across packets.
pub fn encode(channel: Channel, frame: &Frame) -> Result<Bytes, OpcError> {
    if frame.len() > MAX_PIXELS {
        return Err(OpcError::InvalidFrame {
            bytes: 3 * frame.len(),
        });
    }

    let mut buf = BytesMut::with_capacity(HEADER_LEN + 3 * frame.len());
    buf.put_u8(channel);
    buf.put_u8(CMD_SET_PIXEL_COLORS);
    buf.put_u16((3 * frame.len()) as u16);
    for pixel in frame.pixels_iter() {
        buf.put_u8(pixel.r);
        buf.put_u8(pixel.g);
        buf.put_u8(pixel.b);
    }
    Ok(buf.freeze())
}

/// Generic framing for non-pixel commands, e.g. firmware configuration
/// sent as a system exclusive packet.
pub fn encode_raw(channel: Channel, command: u8, payload: &[u8]) -> Result<Bytes, OpcError> {
    if payload.len() > MAX_PAYLOAD {
        return Err(OpcError::InvalidFrame {
            bytes: payload.len(),
        });
    }

    let mut buf = BytesMut::with_capacity(HEADER_LEN + payload.len());
    buf.put_u8(channel);
    buf.put_u8(command);
    buf.put_u16(payload.len() as u16);
    buf.put_slice(payload);
    Ok(buf.freeze())
}

/// A decoded packet. The client itself never reads from the wire; this
/// exists to verify codec symmetry and for test servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub channel: Channel,
    pub command: u8,
    pub data: Bytes,
}

impl Packet {
    /// Recovers the pixel sequence of a set-pixel-colors packet. Returns
    /// `None` for other commands.
    pub fn pixels(&self) -> Option<Vec<Color>> {
        if self.command != CMD_SET_PIXEL_COLORS {
            return None;
        }
        Some(
            self.data
                .chunks_exact(3)
                .map(|rgb| Color::rgb(rgb[0], rgb[1], rgb[2]))
                .collect(),
        )
    }
}

/// Decodes a single packet occupying the whole buffer.
pub fn decode(buf: &[u8]) -> Result<Packet, OpcError> {
    if buf.len() < HEADER_LEN {
        return Err(OpcError::MalformedPacket {
            reason: format!("{} bytes is too short for a header", buf.len()),
        });
    }

    let mut header = &buf[..HEADER_LEN];
    let channel = header.get_u8();
    let command = header.get_u8();
    let length = header.get_u16() as usize;

    let data = &buf[HEADER_LEN..];
    if data.len() != length {
        return Err(OpcError::MalformedPacket {
            reason: format!("payload is {} bytes, header says {}", data.len(), length),
        });
    }
    if command == CMD_SET_PIXEL_COLORS && length % 3 != 0 {
        return Err(OpcError::MalformedPacket {
            reason: format!("pixel payload of {length} bytes is not a multiple of 3"),
        });
    }

    Ok(Packet {
        channel,
        command,
        data: Bytes::copy_from_slice(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BROADCAST;

    #[test]
    fn single_pixel_packet() {
        let frame = Frame::new(1, Color::gray(40));
        let packet = encode(1, &frame).unwrap();
        assert_eq!(packet.as_ref(), [0x01, 0x00, 0x00, 0x03, 0x28, 0x28, 0x28]);
    }

    #[test]
    fn broadcast_channel_byte_is_zero() {
        let packet = encode(BROADCAST, &Frame::new_black(2)).unwrap();
        assert_eq!(packet[0], 0);
        assert_eq!(packet[1], CMD_SET_PIXEL_COLORS);
    }

    #[test]
    fn length_is_big_endian() {
        let packet = encode(0, &Frame::new_black(300)).unwrap();
        assert_eq!(packet.len(), HEADER_LEN + 900);
        // 900 = 0x0384
        assert_eq!(&packet[2..4], [0x03, 0x84]);
    }

    #[test]
    fn size_boundary() {
        assert!(encode(0, &Frame::new_black(MAX_PIXELS)).is_ok());
        assert_eq!(
            encode(0, &Frame::new_black(MAX_PIXELS + 1)),
            Err(OpcError::InvalidFrame {
                bytes: 3 * (MAX_PIXELS + 1)
            })
        );
    }

    #[test]
    fn round_trip() {
        for len in [0, 1, 7, 240] {
            let frame: Frame = (0..len).map(|i| Color::rgb(i as u8, 0, 255)).collect();
            let decoded = decode(&encode(5, &frame).unwrap()).unwrap();
            assert_eq!(decoded.channel, 5);
            assert_eq!(decoded.command, CMD_SET_PIXEL_COLORS);
            let pixels = decoded.pixels().unwrap();
            assert_eq!(pixels.len(), len);
            assert!(pixels
                .iter()
                .zip(frame.pixels_iter())
                .all(|(a, b)| a.r == b.r && a.g == b.g && a.b == b.b));
        }
    }

    #[test]
    fn raw_framing() {
        let packet = encode_raw(0, CMD_SYSTEM_EXCLUSIVE, &[0xDE, 0xAD]).unwrap();
        assert_eq!(packet.as_ref(), [0x00, 0xFF, 0x00, 0x02, 0xDE, 0xAD]);

        let decoded = decode(&packet).unwrap();
        assert_eq!(decoded.command, CMD_SYSTEM_EXCLUSIVE);
        assert_eq!(decoded.pixels(), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            decode(&[0x00, 0x00]),
            Err(OpcError::MalformedPacket { .. })
        ));
        // header promises 3 bytes, only 2 present
        assert!(matches!(
            decode(&[0x00, 0x00, 0x00, 0x03, 0x28, 0x28]),
            Err(OpcError::MalformedPacket { .. })
        ));
        // trailing garbage past the declared length
        assert!(matches!(
            decode(&[0x00, 0x00, 0x00, 0x00, 0x28]),
            Err(OpcError::MalformedPacket { .. })
        ));
        // pixel payload not divisible by 3
        assert!(matches!(
            decode(&[0x00, 0x00, 0x00, 0x02, 0x28, 0x28]),
            Err(OpcError::MalformedPacket { .. })
        ));
    }
}
