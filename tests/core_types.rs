use blockmatch::image::MAX_DIMENSION;
use blockmatch::{BlockMatchError, OwnedBuffer, PixelBuffer, PixelFormat};

#[test]
fn pixel_buffer_rejects_invalid_dimensions() {
    let data = [0u8; 4];

    let err = PixelBuffer::from_slice(&data, 0, 1, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlockMatchError::InvalidDimensions {
            width: 0,
            height: 1,
        }
    );

    let err = PixelBuffer::from_slice(&[], MAX_DIMENSION + 1, 1, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlockMatchError::InvalidDimensions {
            width: MAX_DIMENSION + 1,
            height: 1,
        }
    );
}

#[test]
fn pixel_buffer_rejects_stride_shorter_than_a_row() {
    let data = [0u8; 12];

    let err = PixelBuffer::new(&data, 2, 2, 5, PixelFormat::Rgb24)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlockMatchError::InvalidStride {
            width: 2,
            bytes_per_pixel: 3,
            stride: 5,
        }
    );
}

#[test]
fn pixel_buffer_rejects_small_backing_slice() {
    let err = PixelBuffer::new(&[0u8; 5], 2, 2, 4, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(err, BlockMatchError::BufferTooSmall { needed: 6, got: 5 });

    let err = PixelBuffer::from_slice(&[0u8; 11], 2, 2, PixelFormat::Rgb24)
        .err()
        .unwrap();
    assert_eq!(err, BlockMatchError::BufferTooSmall { needed: 12, got: 11 });
}

#[test]
fn last_row_does_not_need_padding() {
    // Two rows of 3 bytes with stride 5: the final row ends at byte 8.
    let data: Vec<u8> = (0u8..8).collect();
    let buf = PixelBuffer::new(&data, 3, 2, 5, PixelFormat::Gray8).unwrap();
    assert_eq!(buf.row(1).unwrap(), &[5, 6, 7]);
    assert_eq!(buf.stride(), 5);
    assert_eq!(buf.format(), PixelFormat::Gray8);
}

#[test]
fn owned_buffer_requires_exact_length() {
    let err = OwnedBuffer::new(vec![0u8; 5], 2, 2, PixelFormat::Gray8)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BlockMatchError::InvalidDimensions {
            width: 2,
            height: 2,
        }
    );

    let owned = OwnedBuffer::new(vec![9u8; 12], 2, 2, PixelFormat::Rgb24).unwrap();
    let view = owned.view();
    assert_eq!(view.stride(), 6);
    assert_eq!(view.pixel(1, 1).unwrap(), &[9, 9, 9]);
}

#[test]
fn errors_render_readable_messages() {
    let err = BlockMatchError::DimensionMismatch {
        source_width: 10,
        source_height: 10,
        search_width: 12,
        search_height: 10,
    };
    assert_eq!(
        err.to_string(),
        "dimension mismatch: source is 10x10, search is 12x10"
    );
    let err = BlockMatchError::UnsupportedFormat {
        format: PixelFormat::Gray16,
    };
    assert_eq!(err.to_string(), "unsupported pixel format: Gray16");
}
