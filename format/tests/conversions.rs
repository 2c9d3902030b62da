use image_format::color::{ChromaSubsampling, ColorModel, ColorSpec, RawPattern};
use image_format::{
    ColorInfo, DataType, Endianness, FormatDescriptor, FormatError, ImageFormat, MemLayout,
    Packing, PackingParams, PixelType, Swizzle,
};

const NONE: Packing = Packing::NONE;

#[test]
fn descriptor_round_trip() {
    let desc = FormatDescriptor {
        color: ColorInfo::ycbcr(ColorSpec::BT601, ChromaSubsampling::Css420),
        mem_layout: MemLayout::PL,
        data_type: DataType::Unsigned,
        swizzle: Swizzle::XYZ0,
        packing: [Packing::X8, Packing::X8_Y8, NONE, NONE],
    };

    assert_eq!(desc.encode(), Ok(ImageFormat::NV12));
    assert_eq!(ImageFormat::NV12.descriptor(), Ok(desc));
    assert_eq!(desc.plane_count(), 2);
    assert_eq!(desc.plane_swizzle(1), Some(Swizzle::_0XY0));
    assert_eq!(desc.plane_swizzle(2), None);
    assert_eq!(
        desc.to_string(),
        "YCbCr, BT601, 420, PL, UNSIGNED, XYZ0, X8, X8_Y8"
    );

    let value = i64::from(ImageFormat::NV12);
    assert_eq!(ImageFormat::try_from(value), Ok(ImageFormat::NV12));
    assert!(ImageFormat::try_from(0).is_err());
}

#[test]
fn semi_planar_to_planar() {
    let planar = [Packing::X8, Packing::X8, Packing::X8, NONE];
    let i420 = ImageFormat::NV12.with_swizzle_and_packing(Swizzle::XYZ0, planar);

    assert!(i420.is_valid());
    assert_eq!(i420.plane_count(), 3);
    assert_eq!(i420.chroma_subsampling(), ChromaSubsampling::Css420);
    assert_eq!(i420.color_spec(), ColorSpec::BT601);
    assert_eq!(i420.plane_swizzle(2), Swizzle::_00X0);
    assert!(!i420.has_same_data_layout(ImageFormat::NV12));

    // Dropping a plane leaves the swizzle reading a missing channel.
    let short = [Packing::X8, Packing::X8, NONE, NONE];
    assert_eq!(
        ImageFormat::NV12.try_with_swizzle_and_packing(Swizzle::XYZ0, short),
        Err(FormatError::ChannelCountMismatch { swizzle: 3, planes: 2 })
    );
}

#[test]
fn sixteen_bit_ycbcr() {
    let p016 = ImageFormat::new_ycbcr(
        ColorSpec::BT2020_PQ,
        ChromaSubsampling::Css420,
        MemLayout::PL,
        DataType::Unsigned,
        Swizzle::XYZ0,
        [Packing::X16, Packing::X16_Y16, NONE, NONE],
    );

    assert!(p016.is_valid());
    assert_eq!(p016.bits_per_channel(), [16, 16, 16, 0]);
    assert_eq!(p016.plane_bits_per_pixel(1), 32);
    assert_eq!(p016.plane_pixel_type(1), PixelType::U16X2);
    assert_eq!(p016.with_plane_packing(0, Packing::X8).plane_packing(0), Packing::X8);
}

#[test]
fn raw_sensor_images() {
    let bayer = ImageFormat::new_raw(
        RawPattern::BayerGbrg,
        MemLayout::PL,
        DataType::Unsigned,
        Swizzle::X000,
        [Packing::X16, NONE, NONE, NONE],
    );

    assert_eq!(bayer.color_model(), ColorModel::RAW);
    assert_eq!(bayer.raw_pattern(), RawPattern::BayerGbrg);
    assert_eq!(
        bayer.with_raw_pattern(RawPattern::BayerRccb).raw_pattern(),
        RawPattern::BayerRccb
    );
    assert_eq!(
        bayer.try_with_color_spec(ColorSpec::BT709),
        Err(FormatError::NotApplicable {
            field: "color spec",
            model: ColorModel::RAW
        })
    );
    assert_eq!(bayer.with_raw_pattern(RawPattern::Invalid), ImageFormat::INVALID);
}

#[test]
fn packings_from_bit_widths() {
    let rgba = PackingParams::with_bits([8, 8, 8, 8]);
    assert_eq!(Packing::from_params(&rgba), Ok(Packing::X8_Y8_Z8_W8));

    let big = PackingParams {
        endianness: Endianness::Big,
        ..rgba
    };
    assert_eq!(Packing::from_params(&big), Ok(Packing::X8_Y8_Z8_W8));

    let odd = PackingParams::with_bits([7, 7, 0, 0]);
    assert_eq!(Packing::from_params(&odd), Err(FormatError::NoMatchingPacking));

    let params = Packing::X10Y10Z10W2.params().unwrap();
    assert_eq!(params.bits, [10, 10, 10, 2]);
    assert_eq!(Packing::from_params(&params), Ok(Packing::X10Y10Z10W2));
}

#[test]
fn pixel_types_of_planes() {
    for format in [ImageFormat::NV12, ImageFormat::RGBA8, ImageFormat::F32X2] {
        for plane in 0..format.plane_count() {
            let pixel = format.plane_pixel_type(plane);
            assert_eq!(pixel.packing(), format.plane_packing(plane), "{format}");
            assert_eq!(pixel.data_type(), format.data_type());
            assert_eq!(PixelType::from_raw(pixel.raw()), Some(pixel));
        }
    }

    assert_eq!(ImageFormat::RGBA8.plane_pixel_type(0), PixelType::U8X4);
    assert_eq!(ImageFormat::INVALID.plane_pixel_type(0), PixelType::INVALID);
}
