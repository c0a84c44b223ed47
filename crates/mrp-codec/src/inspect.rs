use mrp_carrier::{extract_bytes, Raster};
use mrp_frame::{channel_name, crc_hex, FrameConfig, FrameReader};
use serde::Serialize;

/// Header-level view of one embedded frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    pub channel: char,
    pub name: &'static str,
    pub flags: u8,
    pub length: usize,
    pub stored_crc: Option<String>,
    pub crc_ok: bool,
    /// Bit offset of the frame header within the LSB stream.
    pub bit_offset: usize,
}

/// Frames found in a carrier, without ECC or sidecar evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    pub frames: Vec<FrameSummary>,
    /// Structural error that stopped the scan, if any.
    pub error: Option<String>,
    pub bits_used: usize,
    pub capacity_bits: usize,
}

/// Walk the `R`, `G`, `B` frame headers embedded in `raster`.
pub fn inspect_raster(raster: &Raster, config: &FrameConfig) -> Inspection {
    let capacity_bits = raster.capacity_bits();
    let stream = match extract_bytes(raster.pixels(), 0, capacity_bits / 8) {
        Ok(stream) => stream,
        Err(err) => {
            return Inspection {
                frames: Vec::new(),
                error: Some(err.to_string()),
                bits_used: 0,
                capacity_bits,
            }
        }
    };

    let mut reader = FrameReader::with_config(stream, config.clone());
    let mut frames = Vec::with_capacity(3);
    let mut error = None;

    while frames.len() < 3 {
        let offset = reader.position();
        match reader.read_frame(None) {
            Ok(decoded) => frames.push(FrameSummary {
                channel: decoded.frame.channel() as char,
                name: channel_name(decoded.frame.channel()),
                flags: decoded.frame.flags(),
                length: decoded.frame.payload().len(),
                stored_crc: decoded.frame.crc32().map(crc_hex),
                crc_ok: decoded.crc_ok,
                bit_offset: offset * 8,
            }),
            Err(err) => {
                tracing::debug!(offset, error = %err, "inspection stopped");
                error = Some(format!("frame at byte {offset}: {err}"));
                break;
            }
        }
    }

    Inspection {
        frames,
        error,
        bits_used: reader.position() * 8,
        capacity_bits,
    }
}

#[cfg(test)]
mod tests {
    use mrp_frame::HEADER_SIZE;
    use serde_json::json;

    use super::*;
    use crate::{encode_raster, EncodeOptions};

    #[test]
    fn lists_all_three_frames() {
        let embedded = encode_raster(
            &Raster::solid(50, 50, [9, 9, 9]),
            "hello world",
            &json!({"sequence": 1}),
            &EncodeOptions::default(),
        )
        .unwrap();
        let inspection = inspect_raster(&embedded.stego, &FrameConfig::default());

        assert!(inspection.error.is_none());
        assert_eq!(inspection.bits_used, embedded.bits_used);
        let channels: Vec<char> = inspection.frames.iter().map(|f| f.channel).collect();
        assert_eq!(channels, vec!['R', 'G', 'B']);
        assert_eq!(inspection.frames[0].name, "MESSAGE");
        assert_eq!(inspection.frames[0].bit_offset, 0);
        assert_eq!(inspection.frames[0].length, 16);
        assert_eq!(inspection.frames[1].bit_offset, (HEADER_SIZE + 16) * 8);
        assert!(inspection.frames.iter().all(|f| f.crc_ok));
    }

    #[test]
    fn stops_at_first_structural_error() {
        let inspection = inspect_raster(&Raster::solid(10, 10, [0, 0, 0]), &FrameConfig::default());
        assert!(inspection.frames.is_empty());
        assert!(inspection.error.unwrap().contains("magic"));
    }
}
