//! # Scan Input
//!
//! Turns a stream of camera frames into a stream of barcodes.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  FrameSource ──► BarcodeDecoder ──► DecodedBarcodes ──► Barcode         │
//! │  (camera,        (ML Kit, zbar,     skips errors                        │
//! │   test vec)       typed text...)    skips blank reads                   │
//! │                                     collapses repeats                   │
//! │                                                                         │
//! │  A barcode held in front of the camera for 30 frames yields ONE value. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core ships only the text backend. Hardware backends implement
//! [`BarcodeDecoder`] in the crate that owns the device.

use thiserror::Error;

use crate::types::Barcode;

// =============================================================================
// Frames
// =============================================================================

/// One captured image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Frame {
            width,
            height,
            data,
        }
    }

    /// A 1-row frame carrying already-decoded text.
    pub fn from_text(text: &str) -> Self {
        let data = text.as_bytes().to_vec();
        Frame {
            width: u32::try_from(data.len()).unwrap_or(u32::MAX),
            height: 1,
            data,
        }
    }
}

/// Yields frames until exhausted.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<Frame>;
}

/// Frame source over an owned list.
#[derive(Debug, Default)]
pub struct VecFrameSource {
    frames: std::vec::IntoIter<Frame>,
}

impl VecFrameSource {
    pub fn new(frames: Vec<Frame>) -> Self {
        VecFrameSource {
            frames: frames.into_iter(),
        }
    }
}

impl FrameSource for VecFrameSource {
    fn next_frame(&mut self) -> Option<Frame> {
        self.frames.next()
    }
}

// =============================================================================
// Decoders
// =============================================================================

/// A single frame could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame is {width}x{height}, decoder needs at least {min_width}x{min_height}")]
    FrameTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },

    #[error("frame data is not valid for this decoder: {0}")]
    Malformed(String),
}

/// Extracts at most one barcode payload from a frame.
///
/// `Ok(None)` means the frame was readable but held no barcode.
pub trait BarcodeDecoder {
    fn decode(&mut self, frame: &Frame) -> Result<Option<String>, DecodeError>;
}

/// Treats frame bytes as already-decoded UTF-8 text.
///
/// Used for keyboard wedge scanners and in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFrameDecoder;

impl BarcodeDecoder for TextFrameDecoder {
    fn decode(&mut self, frame: &Frame) -> Result<Option<String>, DecodeError> {
        let text = std::str::from_utf8(&frame.data)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let text = text.trim();
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}

// =============================================================================
// Decoding Loop
// =============================================================================

/// Starts decoding `source` with `decoder`.
///
/// ## Example
/// ```rust
/// use buyback_core::scan::{start_decoding, Frame, TextFrameDecoder, VecFrameSource};
///
/// let source = VecFrameSource::new(vec![
///     Frame::from_text("0123"),
///     Frame::from_text("0123"),
///     Frame::from_text(""),
///     Frame::from_text("4567"),
/// ]);
///
/// let codes: Vec<String> = start_decoding(TextFrameDecoder, source)
///     .map(|b| b.to_string())
///     .collect();
/// assert_eq!(codes, vec!["0123", "4567"]);
/// ```
pub fn start_decoding<D, S>(decoder: D, source: S) -> DecodedBarcodes<D, S>
where
    D: BarcodeDecoder,
    S: FrameSource,
{
    DecodedBarcodes {
        decoder,
        source,
        last: None,
    }
}

/// Iterator returned by [`start_decoding`].
#[derive(Debug)]
pub struct DecodedBarcodes<D, S> {
    decoder: D,
    source: S,
    last: Option<Barcode>,
}

impl<D, S> DecodedBarcodes<D, S> {
    /// Forgets the last read so the same barcode can be scanned again.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl<D, S> Iterator for DecodedBarcodes<D, S>
where
    D: BarcodeDecoder,
    S: FrameSource,
{
    type Item = Barcode;

    fn next(&mut self) -> Option<Barcode> {
        while let Some(frame) = self.source.next_frame() {
            // Decode failures are routine while the camera refocuses.
            let Ok(Some(raw)) = self.decoder.decode(&frame) else {
                continue;
            };
            let Ok(barcode) = Barcode::parse(&raw) else {
                continue;
            };

            if self.last.as_ref() == Some(&barcode) {
                continue;
            }
            self.last = Some(barcode.clone());
            return Some(barcode);
        }
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
