/// Fixed-layout binary encoding of the flattened cloud
///
/// The container is private to this pipeline: a 227-byte header followed by
/// one 28-byte record per point, every numeric field little-endian and all
/// unspecified bytes zero. It is only required to be self-consistent and
/// bit-exact to the layout below, not to conform to any published format.
use crate::constants::{COORD_SCALE, HEADER_SIZE, RECORD_STRIDE, SIGNATURE};
use crate::error::ExportError;
use crate::point::CloudPoint;

/// Encode the container header.
///
/// Byte 25 is a format sub-code and byte 105 the declared record stride;
/// they both relate to record size but are independent fields, so neither
/// is derived from the other.
pub fn encode_header(point_count: u32) -> [u8; HEADER_SIZE] {
    let mut header = [0u8; HEADER_SIZE];
    header[0..4].copy_from_slice(SIGNATURE);
    header[24] = 1; // point-data-format code
    header[25] = 2; // point-data-record-length sub-code
    header[105] = RECORD_STRIDE as u8;
    header[107..111].copy_from_slice(&point_count.to_le_bytes());
    header
}

/// Scale and round one coordinate into a signed 32-bit record field.
///
/// Rounding is round-half-away-from-zero. A value that leaves the i32 range
/// after scaling is rejected rather than wrapped.
fn scale_coordinate(axis: char, value: f64) -> Result<i32, ExportError> {
    let scaled = (value * COORD_SCALE).round();
    if scaled < i32::MIN as f64 || scaled > i32::MAX as f64 {
        return Err(ExportError::CoordinateRange { axis, value });
    }
    Ok(scaled as i32)
}

/// Append one 28-byte record: three scaled i32 coordinates, an 8-byte
/// reserved region, three colour channels widened into u16 fields, and a
/// 2-byte reserved tail.
fn encode_record(point: &CloudPoint, out: &mut Vec<u8>) -> Result<(), ExportError> {
    let (x, y, z) = point.position;
    out.extend_from_slice(&scale_coordinate('x', x)?.to_le_bytes());
    out.extend_from_slice(&scale_coordinate('y', y)?.to_le_bytes());
    out.extend_from_slice(&scale_coordinate('z', z)?.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
    out.extend_from_slice(&u16::from(point.red()).to_le_bytes());
    out.extend_from_slice(&u16::from(point.green()).to_le_bytes());
    out.extend_from_slice(&u16::from(point.blue()).to_le_bytes());
    out.extend_from_slice(&[0u8; 2]);
    Ok(())
}

/// Encode the header plus one record per point. The output length is
/// exactly `HEADER_SIZE + RECORD_STRIDE * points.len()`.
pub fn encode_cloud(points: &[CloudPoint]) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::with_capacity(HEADER_SIZE + RECORD_STRIDE * points.len());
    buffer.extend_from_slice(&encode_header(points.len() as u32));
    for point in points {
        encode_record(point, &mut buffer)?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(position: (f64, f64, f64), colour: u32) -> CloudPoint {
        CloudPoint { position, colour }
    }

    fn read_i32(bytes: &[u8], offset: usize) -> i32 {
        i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn read_u16(bytes: &[u8], offset: usize) -> u16 {
        u16::from_le_bytes(bytes[offset..offset + 2].try_into().unwrap())
    }

    #[test]
    fn buffer_length_matches_the_layout_formula() {
        assert_eq!(encode_cloud(&[]).unwrap().len(), HEADER_SIZE);

        let points = vec![point((0.0, 0.0, 0.0), 0); 13];
        assert_eq!(
            encode_cloud(&points).unwrap().len(),
            HEADER_SIZE + RECORD_STRIDE * 13
        );
    }

    #[test]
    fn header_carries_signature_codes_and_stride() {
        let header = encode_header(0);

        assert_eq!(&header[0..4], b"LASF");
        assert_eq!(header[24], 1);
        assert_eq!(header[25], 2);
        assert_eq!(header[105], 28);
    }

    #[test]
    fn header_count_field_round_trips() {
        for count in [0u32, 1, 100, u32::MAX] {
            let header = encode_header(count);
            let read = u32::from_le_bytes(header[107..111].try_into().unwrap());
            assert_eq!(read, count);
        }
    }

    #[test]
    fn unspecified_header_bytes_are_zero() {
        let header = encode_header(0);
        for (offset, &byte) in header.iter().enumerate() {
            if !(0..4).contains(&offset) && offset != 24 && offset != 25 && offset != 105 {
                assert_eq!(byte, 0, "header byte {} should be zero", offset);
            }
        }
    }

    #[test]
    fn single_point_record_is_bit_exact() {
        let buffer = encode_cloud(&[point((1.234, -5.678, 0.0), 0xAABBCC)]).unwrap();
        assert_eq!(buffer.len(), 255);

        let record = &buffer[HEADER_SIZE..];
        assert_eq!(read_i32(record, 0), 123);
        assert_eq!(read_i32(record, 4), -568);
        assert_eq!(read_i32(record, 8), 0);
        assert_eq!(&record[12..20], &[0u8; 8]);
        assert_eq!(read_u16(record, 20), 0x00AA);
        assert_eq!(read_u16(record, 22), 0x00BB);
        assert_eq!(read_u16(record, 24), 0x00CC);
        assert_eq!(&record[26..28], &[0u8; 2]);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 0.125 and 0.375 are exact in binary, so the scaled values land
        // exactly on the .5 boundary.
        let buffer =
            encode_cloud(&[point((0.125, -0.125, 0.375), 0), point((-0.375, 0.0, 0.0), 0)])
                .unwrap();

        let first = &buffer[HEADER_SIZE..];
        assert_eq!(read_i32(first, 0), 13);
        assert_eq!(read_i32(first, 4), -13);
        assert_eq!(read_i32(first, 8), 38);

        let second = &buffer[HEADER_SIZE + RECORD_STRIDE..];
        assert_eq!(read_i32(second, 0), -38);
    }

    #[test]
    fn scaled_coordinate_overflow_is_rejected() {
        // 21_474_837.0 scales to 2_147_483_700, just past i32::MAX.
        let result = encode_cloud(&[point((21_474_837.0, 0.0, 0.0), 0)]);
        assert!(matches!(
            result,
            Err(ExportError::CoordinateRange { axis: 'x', .. })
        ));

        let result = encode_cloud(&[point((0.0, -21_474_837.0, 0.0), 0)]);
        assert!(matches!(
            result,
            Err(ExportError::CoordinateRange { axis: 'y', .. })
        ));

        // A value comfortably inside the range still encodes.
        let buffer = encode_cloud(&[point((21_474_836.0, 0.0, 0.0), 0)]).unwrap();
        assert_eq!(read_i32(&buffer[HEADER_SIZE..], 0), 2_147_483_600);
    }
}
