use core::fmt;

use crate::error::FormatError;
use crate::format::{ColorInfo, FormatDescriptor, ImageFormat};
use crate::layout::{DataType, MemLayout};
use crate::packing::Packing;
use crate::swizzle::Swizzle;

/// The type of a single pixel of one plane, without any color interpretation.
///
/// This is an [`ImageFormat`] with an undefined color model, a single plane and the swizzle that
/// reads the channels of the packing in order. The encoded values are interchangeable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct PixelType(i64);

const fn pixel_type(mem_layout: MemLayout, data_type: DataType, packing: Packing) -> PixelType {
    match PixelType::try_new(mem_layout, data_type, packing) {
        Ok(pixel) => pixel,
        Err(_) => panic!("invalid predefined pixel type"),
    }
}

macro_rules! pixel_types {
    ($($name:ident = $ty:ident $packing:ident;)*) => {
        impl PixelType {
            $(
                pub const $name: PixelType =
                    pixel_type(MemLayout::PL, DataType::$ty, Packing::$packing);
            )*
        }

        const PIXEL_TYPE_NAMES: &[(PixelType, &str)] = &[
            $((PixelType::$name, stringify!($name)),)*
        ];
    };
}

pixel_types! {
    U8 = Unsigned X8;
    U8X2 = Unsigned X8_Y8;
    U8X3 = Unsigned X8_Y8_Z8;
    U8X4 = Unsigned X8_Y8_Z8_W8;
    S8 = Signed X8;
    S8X2 = Signed X8_Y8;
    S8X3 = Signed X8_Y8_Z8;
    S8X4 = Signed X8_Y8_Z8_W8;
    U16 = Unsigned X16;
    U16X2 = Unsigned X16_Y16;
    U16X3 = Unsigned X16_Y16_Z16;
    U16X4 = Unsigned X16_Y16_Z16_W16;
    S16 = Signed X16;
    S16X2 = Signed X16_Y16;
    S16X3 = Signed X16_Y16_Z16;
    S16X4 = Signed X16_Y16_Z16_W16;
    U32 = Unsigned X32;
    U32X2 = Unsigned X32_Y32;
    U32X3 = Unsigned X32_Y32_Z32;
    U32X4 = Unsigned X32_Y32_Z32_W32;
    S32 = Signed X32;
    S32X2 = Signed X32_Y32;
    S32X3 = Signed X32_Y32_Z32;
    S32X4 = Signed X32_Y32_Z32_W32;
    F32 = Float X32;
    F32X2 = Float X32_Y32;
    F32X3 = Float X32_Y32_Z32;
    F32X4 = Float X32_Y32_Z32_W32;
    U64 = Unsigned X64;
    U64X2 = Unsigned X64_Y64;
    U64X3 = Unsigned X64_Y64_Z64;
    U64X4 = Unsigned X64_Y64_Z64_W64;
    S64 = Signed X64;
    S64X2 = Signed X64_Y64;
    S64X3 = Signed X64_Y64_Z64;
    S64X4 = Signed X64_Y64_Z64_W64;
    F64 = Float X64;
    F64X2 = Float X64_Y64;
    F64X3 = Float X64_Y64_Z64;
    F64X4 = Float X64_Y64_Z64_W64;
}

impl PixelType {
    pub const INVALID: Self = PixelType(0);

    /// Encode the pixel type of one plane.
    ///
    /// The swizzle reads every stored component in order. Packings of two pixels sharing
    /// channels therefore read four components of three channels, which no image format accepts.
    pub const fn try_new(
        mem_layout: MemLayout,
        data_type: DataType,
        packing: Packing,
    ) -> Result<Self, FormatError> {
        let swizzle = match packing.component_count() {
            1 => Swizzle::X000,
            2 => Swizzle::XY00,
            3 => Swizzle::XYZ0,
            4 => Swizzle::XYZW,
            _ if packing.is_none() => return Err(FormatError::NoPlanes),
            _ => return Err(FormatError::UnknownPacking { plane: 0, packing }),
        };

        let desc = FormatDescriptor {
            color: ColorInfo::Undefined,
            mem_layout,
            data_type,
            swizzle,
            packing: [packing, Packing::NONE, Packing::NONE, Packing::NONE],
        };

        match desc.encode_fields() {
            Ok((value, _)) => Ok(PixelType(value)),
            Err(err) => Err(err),
        }
    }

    pub const fn new(mem_layout: MemLayout, data_type: DataType, packing: Packing) -> Self {
        match Self::try_new(mem_layout, data_type, packing) {
            Ok(pixel) => pixel,
            Err(_) => PixelType::INVALID,
        }
    }

    /// Accept an encoded value that is the canonical encoding of a pixel type.
    pub fn from_raw(value: i64) -> Option<Self> {
        let desc = ImageFormat::from_raw_unchecked(value).decode_fields().ok()?;
        let pixel = PixelType::new(desc.mem_layout, desc.data_type, desc.packing[0]);
        (pixel != PixelType::INVALID && pixel.0 == value).then_some(pixel)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    /// The image format with the same encoding.
    ///
    /// Pixel types of packings with shared channels have no such format and give `INVALID`.
    pub const fn as_image_format(self) -> ImageFormat {
        let format = ImageFormat::from_raw_unchecked(self.0);
        if format.is_valid() {
            format
        } else {
            ImageFormat::INVALID
        }
    }

    fn fields(self) -> Option<FormatDescriptor> {
        ImageFormat::from_raw_unchecked(self.0).decode_fields().ok()
    }

    pub fn packing(self) -> Packing {
        self.fields().map_or(Packing::INVALID, |desc| desc.packing[0])
    }

    pub fn bits_per_pixel(self) -> u32 {
        self.packing().bits_per_pixel()
    }

    pub fn data_type(self) -> DataType {
        self.fields().map_or(DataType::Invalid, |desc| desc.data_type)
    }

    pub fn mem_layout(self) -> MemLayout {
        self.fields().map_or(MemLayout::Invalid, |desc| desc.mem_layout)
    }

    /// The number of distinct channels, three for packings sharing channels.
    pub fn channel_count(self) -> u32 {
        self.packing().channel_count()
    }

    fn name(self) -> Option<&'static str> {
        if self == PixelType::INVALID {
            return Some("INVALID");
        }

        PIXEL_TYPE_NAMES
            .iter()
            .find(|(pixel, _)| *pixel == self)
            .map(|(_, name)| *name)
    }
}

impl From<PixelType> for ImageFormat {
    fn from(pixel: PixelType) -> ImageFormat {
        pixel.as_image_format()
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "PixelType({}, {}, {})",
                self.mem_layout(),
                self.data_type(),
                self.packing()
            ),
        }
    }
}

impl fmt::Debug for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "PixelType::{name}"),
            None => fmt::Display::fmt(self, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_and_widths() {
        assert_eq!(PixelType::U8.bits_per_pixel(), 8);
        assert_eq!(PixelType::U8X3.channel_count(), 3);
        assert_eq!(PixelType::F64X4.bits_per_pixel(), 256);
        assert_eq!(PixelType::S16X2.data_type(), DataType::Signed);
        assert_eq!(PixelType::F32.mem_layout(), MemLayout::PitchLinear);
        assert_eq!(PixelType::U16X4.to_string(), "U16X4");
        assert_eq!(format!("{:?}", PixelType::S32), "PixelType::S32");
    }

    #[test]
    fn shares_encoding_with_image_formats() {
        assert_eq!(PixelType::U8.raw(), ImageFormat::U8.raw());
        assert_eq!(PixelType::F32X2.raw(), ImageFormat::F32X2.raw());
        assert_eq!(ImageFormat::from(PixelType::S16), ImageFormat::S16);
    }

    #[test]
    fn raw_values() {
        assert_eq!(PixelType::from_raw(PixelType::U32X3.raw()), Some(PixelType::U32X3));
        // A single plane format with color is not a pixel type.
        assert_eq!(PixelType::from_raw(ImageFormat::RGB8.raw()), None);
        assert_eq!(PixelType::from_raw(0), None);
    }

    #[test]
    fn rejects_missing_packing() {
        let none = PixelType::try_new(MemLayout::PL, DataType::Unsigned, Packing::NONE);
        assert_eq!(none, Err(FormatError::NoPlanes));
        assert_eq!(
            PixelType::new(MemLayout::Invalid, DataType::Unsigned, Packing::X8),
            PixelType::INVALID
        );
    }

    #[test]
    fn subsampled_packings_have_three_channels() {
        let pixel = PixelType::new(MemLayout::PL, DataType::Unsigned, Packing::X8_Y8__X8_Z8);
        assert_eq!(pixel.channel_count(), 3);
        assert_eq!(pixel.packing(), Packing::X8_Y8__X8_Z8);
        // Two pixels share four bytes.
        assert_eq!(pixel.bits_per_pixel(), 16);
    }

    #[test]
    fn shared_channel_packings_read_every_component() {
        let yuyv = PixelType::new(MemLayout::PL, DataType::Unsigned, Packing::X8_Y8__X8_Z8);
        let uyvy = PixelType::new(MemLayout::PL, DataType::Unsigned, Packing::Y8_X8__Z8_X8);
        assert_eq!(yuyv.raw() as u64, 0x2000_01ef_ffff_18d1);
        assert_eq!(uyvy.raw() as u64, 0x2000_01f7_ffff_18d1);

        assert_eq!(PixelType::from_raw(0x2000_01ef_ffff_18d1), Some(yuyv));
        assert_eq!(PixelType::from_raw(0x2000_01f7_ffff_18d1), Some(uyvy));
        assert_eq!(ImageFormat::YUYV.plane_pixel_type(0), yuyv);
        assert_eq!(ImageFormat::UYVY_BL.plane_pixel_type(0).packing(), Packing::Y8_X8__Z8_X8);

        // Four components of three channels are not an image format.
        assert_eq!(yuyv.as_image_format(), ImageFormat::INVALID);
        assert_eq!(yuyv.mem_layout(), MemLayout::PitchLinear);
        assert_eq!(yuyv.data_type(), DataType::Unsigned);
    }
}
