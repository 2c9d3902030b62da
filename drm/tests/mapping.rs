use image_drm::FourCC;
use image_format::color::{ChromaSubsampling, ColorModel, ColorSpec};
use image_format::{DataType, FormatError, ImageFormat, MemLayout, Packing, Swizzle};

#[test]
fn known_codes_round_trip() {
    for fourcc in FourCC::KNOWN {
        for mem_layout in [MemLayout::PL, MemLayout::BL] {
            let format = fourcc
                .image_format(ColorSpec::BT709, mem_layout)
                .unwrap_or_else(|err| panic!("{fourcc}: {err}"));
            assert_eq!(format.data_type(), DataType::Unsigned);
            assert_eq!(format.mem_layout(), mem_layout);
            assert_eq!(FourCC::from_image_format(format), Some(fourcc), "{format}");
        }
    }
}

#[test]
fn predefined_formats() {
    let nv12 = FourCC::NV12.image_format(ColorSpec::BT601, MemLayout::PL);
    assert_eq!(nv12, Ok(ImageFormat::NV12));
    let nv12 = FourCC::NV12.image_format(ColorSpec::BT601_ER, MemLayout::BL);
    assert_eq!(nv12, Ok(ImageFormat::NV12_ER_BL));

    let uyvy = FourCC::UYVY.image_format(ColorSpec::BT601, MemLayout::PL);
    assert_eq!(uyvy, Ok(ImageFormat::UYVY));
    let yuyv = FourCC::YUYV.image_format(ColorSpec::BT601_ER, MemLayout::BL);
    assert_eq!(yuyv, Ok(ImageFormat::YUYV_ER_BL));

    // DRM names rgb formats after the order within a little endian word.
    let rgb = FourCC::BGR888.image_format(ColorSpec::UNDEFINED, MemLayout::PL);
    assert_eq!(rgb, Ok(ImageFormat::RGB8));
    let bgr = FourCC::RGB888.image_format(ColorSpec::UNDEFINED, MemLayout::PL);
    assert_eq!(bgr, Ok(ImageFormat::BGR8));
    let bgra = FourCC::ARGB8888.image_format(ColorSpec::UNDEFINED, MemLayout::PL);
    assert_eq!(bgra, Ok(ImageFormat::BGRA8));
    let rgba = FourCC::ABGR8888.image_format(ColorSpec::UNDEFINED, MemLayout::PL);
    assert_eq!(rgba, Ok(ImageFormat::RGBA8));
}

#[test]
fn swapped_chroma_planes() {
    let nv21 = FourCC::NV21
        .image_format(ColorSpec::BT709, MemLayout::PL)
        .unwrap();
    assert_eq!(nv21.swizzle(), Swizzle::XZY0);
    assert_eq!(nv21.plane_count(), 2);
    assert_eq!(nv21.chroma_subsampling(), ChromaSubsampling::Css420);

    let yv12 = FourCC::YVU420
        .image_format(ColorSpec::BT709, MemLayout::PL)
        .unwrap();
    assert_eq!(yv12.swizzle(), Swizzle::XZY0);
    assert_eq!(yv12.plane_count(), 3);
    assert_eq!(yv12.plane_packing(2), Packing::X8);
    assert_eq!(yv12.color_model(), ColorModel::YCBCR);
    assert_eq!(yv12.color_spec(), ColorSpec::BT709);

    let vyuy = FourCC::VYUY
        .image_format(ColorSpec::BT709, MemLayout::PL)
        .unwrap();
    assert_eq!(vyuy.swizzle(), Swizzle::XZY1);
    assert_eq!(vyuy.chroma_subsampling(), ChromaSubsampling::Css422);
}

#[test]
fn single_channel_ignores_color() {
    let grey = FourCC::R8.image_format(ColorSpec::INVALID, MemLayout::PL);
    assert_eq!(grey, Ok(ImageFormat::U8));
    let grey = FourCC::R16.image_format(ColorSpec::BT2020, MemLayout::PL);
    assert_eq!(grey, Ok(ImageFormat::U16));
}

#[test]
fn rejected_requests() {
    let unknown = FourCC::from_bytes(*b"XR24");
    let err = unknown
        .image_format(ColorSpec::BT709, MemLayout::PL)
        .unwrap_err();
    assert_eq!(err.format_error(), None);
    assert_eq!(err.to_string(), "no image format is known for fourcc XR24");

    let err = FourCC::NV12
        .image_format(ColorSpec::INVALID, MemLayout::PL)
        .unwrap_err();
    assert_eq!(err.format_error(), Some(FormatError::InvalidColorSpec));

    let err = FourCC::NV12
        .image_format(ColorSpec::BT601, MemLayout::Invalid)
        .unwrap_err();
    assert_eq!(err.format_error(), Some(FormatError::InvalidMemLayout));
}

#[test]
fn codes_for_formats() {
    assert_eq!(FourCC::from_image_format(ImageFormat::RGB8), Some(FourCC::BGR888));
    assert_eq!(FourCC::from_image_format(ImageFormat::BGRA8), Some(FourCC::ARGB8888));
    assert_eq!(FourCC::from_image_format(ImageFormat::U8), Some(FourCC::R8));
    assert_eq!(FourCC::from_image_format(ImageFormat::NV12_BL), Some(FourCC::NV12));
    assert_eq!(FourCC::from_image_format(ImageFormat::UYVY_ER), Some(FourCC::UYVY));

    // The color specification is not part of the code.
    let rgba = ImageFormat::RGBA8.with_color_spec(ColorSpec::BT709_ER);
    assert_eq!(FourCC::from_image_format(rgba), Some(FourCC::ABGR8888));

    // No code describes float, signed or invalid data.
    assert_eq!(FourCC::from_image_format(ImageFormat::F32), None);
    assert_eq!(FourCC::from_image_format(ImageFormat::S8), None);
    assert_eq!(FourCC::from_image_format(ImageFormat::INVALID), None);
}

#[test]
fn raw_codes() {
    assert_eq!(u32::from(FourCC::YUV420), 0x3231_5559);
    assert_eq!(FourCC::from_code(0x3231_5559), FourCC::YUV420);
    assert_eq!(FourCC::YVU420.to_bytes(), *b"YV12");
}
