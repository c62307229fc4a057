use std::collections::BTreeSet;
use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};

use super::layout::CanvasGeometry;
use crate::error::{Error, Result};
use crate::model::ActivityRecord;

pub fn distinct_days<'a>(records: impl IntoIterator<Item = &'a ActivityRecord>) -> usize {
    records
        .into_iter()
        .map(|r| r.start_time.date_naive())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Encodes a raw RGB canvas as PNG.
pub fn encode_png(buffer: Vec<u8>, canvas: CanvasGeometry) -> Result<Vec<u8>> {
    let image: ImageBuffer<Rgb<u8>, _> = ImageBuffer::from_raw(canvas.width, canvas.height, buffer)
        .ok_or_else(|| Error::Drawing("canvas buffer does not match its size".to_string()))?;

    let mut png = Vec::new();
    image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn counts_calendar_days() {
        let t = Utc.with_ymd_and_hms(2022, 3, 1, 23, 0, 0).unwrap();
        let recs = vec![
            ActivityRecord::new(t, 1, "", ""),
            ActivityRecord::new(t + chrono::Duration::minutes(30), 1, "", ""),
            ActivityRecord::new(t + chrono::Duration::hours(2), 1, "", ""),
        ];

        assert_eq!(distinct_days(&recs), 2);
        assert_eq!(distinct_days(&recs[..2]), 1);
    }

    #[test]
    fn png_signature() {
        let canvas = CanvasGeometry {
            width: 4,
            height: 2,
            padding: 0,
            label_margin: 0,
        };

        let png = encode_png(vec![255; 4 * 2 * 3], canvas).unwrap();

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let canvas = CanvasGeometry::default();

        assert!(matches!(encode_png(vec![0; 3], canvas), Err(Error::Drawing(_))));
    }
}
