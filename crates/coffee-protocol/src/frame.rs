// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wire format for QUIC stream framing.
//!
//! Each QUIC stream carries exactly one RPC call. Both directions use the
//! same frame layout:
//! - 4 bytes: payload length (big-endian)
//! - 2 bytes: message type
//! - N bytes: protobuf payload

use bytes::{Buf, BufMut, Bytes, BytesMut};
use prost::Message;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum payload size (64 MiB).
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Frame header size: 4 bytes length + 2 bytes type.
pub const HEADER_SIZE: usize = 6;

/// Kind of payload carried by a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum MessageType {
    /// Client to server call.
    Request = 1,
    /// Server reply (may still carry an in-band `RpcError`).
    Response = 2,
    /// Transport-level failure; payload is empty.
    Error = 3,
}

impl TryFrom<u16> for MessageType {
    type Error = FrameError;

    fn try_from(value: u16) -> Result<Self, <Self as TryFrom<u16>>::Error> {
        match value {
            1 => Ok(MessageType::Request),
            2 => Ok(MessageType::Response),
            3 => Ok(MessageType::Error),
            _ => Err(FrameError::InvalidMessageType(value)),
        }
    }
}

/// Errors produced while reading or writing frames.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame too large: {0} bytes (max: {MAX_FRAME_SIZE})")]
    FrameTooLarge(usize),

    #[error("invalid message type: {0}")]
    InvalidMessageType(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("peer reported a transport error")]
    Remote,

    #[error("connection closed")]
    ConnectionClosed,
}

/// A single framed message.
#[derive(Debug, Clone)]
pub struct Frame {
    pub message_type: MessageType,
    pub payload: Bytes,
}

impl Frame {
    pub fn request<M: Message>(msg: &M) -> Result<Self, FrameError> {
        Self::new(MessageType::Request, msg)
    }

    pub fn response<M: Message>(msg: &M) -> Result<Self, FrameError> {
        Self::new(MessageType::Response, msg)
    }

    /// Transport error frame with no payload.
    pub fn transport_error() -> Self {
        Self {
            message_type: MessageType::Error,
            payload: Bytes::new(),
        }
    }

    pub fn new<M: Message>(message_type: MessageType, msg: &M) -> Result<Self, FrameError> {
        let payload = msg.encode_to_vec();
        if payload.len() > MAX_FRAME_SIZE {
            return Err(FrameError::FrameTooLarge(payload.len()));
        }
        Ok(Self {
            message_type,
            payload: Bytes::from(payload),
        })
    }

    /// Decode the payload. An `Error` frame decodes to `FrameError::Remote`.
    pub fn decode<M: Message + Default>(&self) -> Result<M, FrameError> {
        if self.message_type == MessageType::Error {
            return Err(FrameError::Remote);
        }
        Ok(M::decode(self.payload.clone())?)
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE + self.payload.len());
        buf.put_u32(self.payload.len() as u32);
        buf.put_u16(self.message_type as u16);
        buf.put(self.payload.clone());
        buf.freeze()
    }

    pub fn decode_from_bytes(mut bytes: Bytes) -> Result<Self, FrameError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "incomplete frame header",
            )));
        }

        let length = bytes.get_u32() as usize;
        let message_type = MessageType::try_from(bytes.get_u16())?;

        if length > MAX_FRAME_SIZE {
            return Err(FrameError::FrameTooLarge(length));
        }

        if bytes.len() < length {
            return Err(FrameError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "incomplete frame payload",
            )));
        }

        let payload = bytes.split_to(length);
        Ok(Self {
            message_type,
            payload,
        })
    }
}

pub async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    frame: &Frame,
) -> Result<(), FrameError> {
    writer.write_all(&frame.encode()).await?;
    Ok(())
}

pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Frame, FrameError> {
    let mut header = [0u8; HEADER_SIZE];
    match reader.read_exact(&mut header).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
            return Err(FrameError::ConnectionClosed);
        }
        Err(e) => return Err(e.into()),
    }

    let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let message_type = MessageType::try_from(u16::from_be_bytes([header[4], header[5]]))?;

    if length > MAX_FRAME_SIZE {
        return Err(FrameError::FrameTooLarge(length));
    }

    let mut payload = vec![0u8; length];
    reader.read_exact(&mut payload).await?;

    Ok(Frame {
        message_type,
        payload: Bytes::from(payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brew_proto::{OrderRequest, OrderResponse};
    use crate::menu_proto::GetMenuRequest;

    #[test]
    fn test_message_type_values() {
        assert_eq!(MessageType::Request as u16, 1);
        assert_eq!(MessageType::Response as u16, 2);
        assert_eq!(MessageType::Error as u16, 3);
    }

    #[test]
    fn test_message_type_invalid_conversion() {
        assert!(MessageType::try_from(0u16).is_err());
        assert!(MessageType::try_from(4u16).is_err());
        assert!(MessageType::try_from(u16::MAX).is_err());
    }

    #[test]
    fn test_empty_message_encodes_header_only() {
        let frame = Frame::request(&GetMenuRequest {}).unwrap();
        let encoded = frame.encode();
        assert_eq!(encoded.len(), HEADER_SIZE);
        assert_eq!(&encoded[..4], &[0, 0, 0, 0]);
        assert_eq!(&encoded[4..], &[0, 1]);
    }

    #[test]
    fn test_decode_from_bytes_rejects_short_header() {
        let result = Frame::decode_from_bytes(Bytes::from_static(&[0, 0, 0]));
        assert!(matches!(result, Err(FrameError::Io(_))));
    }

    #[test]
    fn test_decode_from_bytes_rejects_truncated_payload() {
        let frame = Frame::request(&OrderRequest {
            menu_item_name: "Latte".to_string(),
        })
        .unwrap();
        let encoded = frame.encode();
        let truncated = encoded.slice(..encoded.len() - 1);
        assert!(Frame::decode_from_bytes(truncated).is_err());
    }

    #[test]
    fn test_decode_from_bytes_rejects_oversized_length() {
        let mut buf = BytesMut::new();
        buf.put_u32((MAX_FRAME_SIZE + 1) as u32);
        buf.put_u16(MessageType::Request as u16);
        let result = Frame::decode_from_bytes(buf.freeze());
        assert!(matches!(result, Err(FrameError::FrameTooLarge(_))));
    }

    #[test]
    fn test_transport_error_frame_decodes_to_remote() {
        let frame = Frame::transport_error();
        let result: Result<OrderResponse, _> = frame.decode();
        assert!(matches!(result, Err(FrameError::Remote)));
    }

    #[tokio::test]
    async fn test_read_write_over_duplex() {
        let (mut client, mut server) = tokio::io::duplex(1024);

        let request = OrderRequest {
            menu_item_name: "Cortado".to_string(),
        };
        write_frame(&mut client, &Frame::request(&request).unwrap())
            .await
            .unwrap();

        let frame = read_frame(&mut server).await.unwrap();
        assert_eq!(frame.message_type, MessageType::Request);
        let decoded: OrderRequest = frame.decode().unwrap();
        assert_eq!(decoded.menu_item_name, "Cortado");
    }

    #[tokio::test]
    async fn test_read_frame_on_closed_stream() {
        let (client, mut server) = tokio::io::duplex(64);
        drop(client);
        let result = read_frame(&mut server).await;
        assert!(matches!(result, Err(FrameError::ConnectionClosed)));
    }
}
