//! Linux DRM fourcc codes mapped onto encoded image formats.
//!
//! A fourcc only names the arrangement of bytes, the color specification and the memory layout
//! of an [`ImageFormat`] are supplied when converting.
//!
//! ```
//! use image_drm::FourCC;
//! use image_format::{ImageFormat, MemLayout};
//! use image_format::color::ColorSpec;
//!
//! let format = FourCC::NV12.image_format(ColorSpec::BT601, MemLayout::PL)?;
//! assert_eq!(format, ImageFormat::NV12);
//! assert_eq!(FourCC::from_image_format(ImageFormat::NV12_BL), Some(FourCC::NV12));
//! # Ok::<(), image_drm::BadFourCCError>(())
//! ```
use core::fmt;

use image_format::color::{ChromaSubsampling, ColorSpec};
use image_format::{ColorInfo, DataType, FormatError, ImageFormat, MemLayout, Packing, Swizzle};

/// A 4CC format identifier.
///
/// This exists to define the common formats as constants and to typify the conversion and
/// representation of values involved. The code is always stored as little endian.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCC(u32);

/// The reason a fourcc could not be turned into an image format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct BadFourCCError {
    kind: BadFourCCKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
enum BadFourCCKind {
    #[error("no image format is known for fourcc {0}")]
    Unknown(FourCC),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// How the color information of a fourcc is completed.
#[derive(Clone, Copy)]
enum Family {
    NonColor,
    Rgb,
    YCbCr(ChromaSubsampling),
}

/// Everything about an image format that the fourcc itself determines.
#[derive(Clone, Copy)]
struct Template {
    family: Family,
    swizzle: Swizzle,
    packing: [Packing; 4],
}

impl Template {
    const fn single(family: Family, swizzle: Swizzle, packing: Packing) -> Self {
        Template {
            family,
            swizzle,
            packing: [packing, Packing::NONE, Packing::NONE, Packing::NONE],
        }
    }

    /// Luma followed by interleaved chroma.
    const fn semi_planar(subsampling: ChromaSubsampling, swizzle: Swizzle) -> Self {
        Template {
            family: Family::YCbCr(subsampling),
            swizzle,
            packing: [Packing::X8, Packing::X8_Y8, Packing::NONE, Packing::NONE],
        }
    }

    /// One plane for each of luma and the two chroma channels.
    const fn planar(subsampling: ChromaSubsampling, swizzle: Swizzle) -> Self {
        Template {
            family: Family::YCbCr(subsampling),
            swizzle,
            packing: [Packing::X8, Packing::X8, Packing::X8, Packing::NONE],
        }
    }
}

impl FourCC {
    pub const INVALID: Self = FourCC(0);

    /* single channel */
    /// 8 bpp single channel, as used for grey or a separate alpha.
    pub const R8: Self = FourCC::from_bytes(*b"R8  ");
    /// 16 bpp single channel.
    pub const R16: Self = FourCC::from_bytes(*b"R16 ");

    /* 24 bpp rgb */

    /// 24 bpp rgb with 8 bits each, stored as blue, green, red.
    pub const RGB888: Self = FourCC::from_bytes(*b"RG24");
    /// 24 bpp bgr with 8 bits each, stored as red, green, blue.
    pub const BGR888: Self = FourCC::from_bytes(*b"BG24");

    /* 32 bpp rgb */

    /// 32 bpp argb with 8 bits each, stored as blue, green, red, alpha.
    pub const ARGB8888: Self = FourCC::from_bytes(*b"AR24");
    /// 32 bpp abgr with 8 bits each, stored as red, green, blue, alpha.
    pub const ABGR8888: Self = FourCC::from_bytes(*b"AB24");

    /* packed YCbCr 4:2:2 */

    pub const YUYV: Self = FourCC::from_bytes(*b"YUYV");
    pub const YVYU: Self = FourCC::from_bytes(*b"YVYU");
    pub const UYVY: Self = FourCC::from_bytes(*b"UYVY");
    pub const VYUY: Self = FourCC::from_bytes(*b"VYUY");

    /* 2 plane YCbCr */

    pub const NV12: Self = FourCC::from_bytes(*b"NV12");
    pub const NV21: Self = FourCC::from_bytes(*b"NV21");
    pub const NV16: Self = FourCC::from_bytes(*b"NV16");
    pub const NV61: Self = FourCC::from_bytes(*b"NV61");
    pub const NV24: Self = FourCC::from_bytes(*b"NV24");
    pub const NV42: Self = FourCC::from_bytes(*b"NV42");

    /* 3 plane YCbCr */

    pub const YUV420: Self = FourCC::from_bytes(*b"YU12");
    pub const YVU420: Self = FourCC::from_bytes(*b"YV12");
    pub const YUV422: Self = FourCC::from_bytes(*b"YU16");
    pub const YVU422: Self = FourCC::from_bytes(*b"YV16");
    pub const YUV444: Self = FourCC::from_bytes(*b"YU24");
    pub const YVU444: Self = FourCC::from_bytes(*b"YV24");

    /// Every code with a known image format, in the order searched by `from_image_format`.
    pub const KNOWN: [FourCC; 22] = [
        FourCC::R8,
        FourCC::R16,
        FourCC::RGB888,
        FourCC::BGR888,
        FourCC::ARGB8888,
        FourCC::ABGR8888,
        FourCC::YUYV,
        FourCC::YVYU,
        FourCC::UYVY,
        FourCC::VYUY,
        FourCC::NV12,
        FourCC::NV21,
        FourCC::NV16,
        FourCC::NV61,
        FourCC::NV24,
        FourCC::NV42,
        FourCC::YUV420,
        FourCC::YVU420,
        FourCC::YUV422,
        FourCC::YVU422,
        FourCC::YUV444,
        FourCC::YVU444,
    ];

    pub const fn from_bytes(arr: [u8; 4]) -> Self {
        FourCC(u32::from_le_bytes(arr))
    }

    pub const fn from_code(code: u32) -> Self {
        FourCC(code)
    }

    pub const fn code(self) -> u32 {
        self.0
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    fn template(self) -> Option<Template> {
        use ChromaSubsampling::{Css420, Css422, Css444};

        Some(match self {
            FourCC::R8 => Template::single(Family::NonColor, Swizzle::X000, Packing::X8),
            FourCC::R16 => Template::single(Family::NonColor, Swizzle::X000, Packing::X16),
            FourCC::RGB888 => Template::single(Family::Rgb, Swizzle::ZYX1, Packing::X8_Y8_Z8),
            FourCC::BGR888 => Template::single(Family::Rgb, Swizzle::XYZ1, Packing::X8_Y8_Z8),
            FourCC::ARGB8888 => {
                Template::single(Family::Rgb, Swizzle::ZYXW, Packing::X8_Y8_Z8_W8)
            }
            FourCC::ABGR8888 => {
                Template::single(Family::Rgb, Swizzle::XYZW, Packing::X8_Y8_Z8_W8)
            }
            FourCC::YUYV | FourCC::YVYU => Template::single(
                Family::YCbCr(Css422),
                swapped_chroma(self == FourCC::YVYU, Swizzle::XYZ1),
                Packing::X8_Y8__X8_Z8,
            ),
            FourCC::UYVY | FourCC::VYUY => Template::single(
                Family::YCbCr(Css422),
                swapped_chroma(self == FourCC::VYUY, Swizzle::XYZ1),
                Packing::Y8_X8__Z8_X8,
            ),
            FourCC::NV12 => Template::semi_planar(Css420, Swizzle::XYZ0),
            FourCC::NV21 => Template::semi_planar(Css420, Swizzle::XZY0),
            FourCC::NV16 => Template::semi_planar(Css422, Swizzle::XYZ0),
            FourCC::NV61 => Template::semi_planar(Css422, Swizzle::XZY0),
            FourCC::NV24 => Template::semi_planar(Css444, Swizzle::XYZ0),
            FourCC::NV42 => Template::semi_planar(Css444, Swizzle::XZY0),
            FourCC::YUV420 => Template::planar(Css420, Swizzle::XYZ0),
            FourCC::YVU420 => Template::planar(Css420, Swizzle::XZY0),
            FourCC::YUV422 => Template::planar(Css422, Swizzle::XYZ0),
            FourCC::YVU422 => Template::planar(Css422, Swizzle::XZY0),
            FourCC::YUV444 => Template::planar(Css444, Swizzle::XYZ0),
            FourCC::YVU444 => Template::planar(Css444, Swizzle::XZY0),
            _ => return None,
        })
    }

    /// The image format of unsigned data stored in this arrangement.
    ///
    /// The color specification only applies to codes with color, single channel codes ignore it.
    pub fn image_format(
        self,
        spec: ColorSpec,
        mem_layout: MemLayout,
    ) -> Result<ImageFormat, BadFourCCError> {
        let Some(template) = self.template() else {
            tracing::debug!(fourcc = %self, "no image format for fourcc");
            return Err(BadFourCCKind::Unknown(self).into());
        };

        let color = match template.family {
            Family::NonColor => ColorInfo::Undefined,
            Family::Rgb => ColorInfo::rgb(spec),
            Family::YCbCr(subsampling) => ColorInfo::ycbcr(spec, subsampling),
        };

        let format = ImageFormat::try_make(
            color,
            mem_layout,
            DataType::Unsigned,
            template.swizzle,
            template.packing,
        )
        .map_err(BadFourCCKind::from)?;

        Ok(format)
    }

    /// Find the code that stores the pixels of an image format.
    ///
    /// Memory layout and color specification are not part of a fourcc and are ignored.
    pub fn from_image_format(format: ImageFormat) -> Option<FourCC> {
        let spec = format.color_spec();
        let mem_layout = format.mem_layout();

        let found = FourCC::KNOWN.into_iter().find(|fourcc| {
            fourcc
                .image_format(spec, mem_layout)
                .is_ok_and(|candidate| {
                    candidate.color_model() == format.color_model()
                        && candidate.has_same_data_layout(format)
                })
        });

        if found.is_none() {
            tracing::debug!(%format, "no fourcc for image format");
        }

        found
    }
}

/// Exchange the sources of the two chroma slots.
const fn swapped_chroma(swap: bool, swizzle: Swizzle) -> Swizzle {
    if !swap {
        return swizzle;
    }

    let [x, y, z, w] = swizzle.channels();
    Swizzle::new(x, z, y, w)
}

impl BadFourCCError {
    /// The format error, when the fourcc is known but the format was rejected.
    pub fn format_error(&self) -> Option<FormatError> {
        match self.kind {
            BadFourCCKind::Format(err) => Some(err),
            BadFourCCKind::Unknown(_) => None,
        }
    }
}

impl From<BadFourCCKind> for BadFourCCError {
    fn from(kind: BadFourCCKind) -> Self {
        BadFourCCError { kind }
    }
}

impl From<FourCC> for u32 {
    fn from(fourcc: FourCC) -> u32 {
        fourcc.0
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for byte in self.to_bytes() {
            let ch = if byte.is_ascii_graphic() || byte == b' ' {
                char::from(byte)
            } else {
                '?'
            };
            write!(f, "{ch}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "FourCC({:?})", self.to_string())
    }
}

#[test]
fn codes_are_little_endian() {
    assert_eq!(FourCC::NV12.code(), 0x3231_564e);
    assert_eq!(FourCC::NV12.to_bytes(), *b"NV12");
    assert_eq!(FourCC::R8.to_string(), "R8  ");
    assert_eq!(FourCC::from_code(0x0001_4152).to_string(), "RA??");
    assert_eq!(format!("{:?}", FourCC::YUYV), "FourCC(\"YUYV\")");
}

#[test]
fn chroma_swaps() {
    assert_eq!(swapped_chroma(true, Swizzle::XYZ1), Swizzle::XZY1);
    assert_eq!(swapped_chroma(false, Swizzle::XYZ1), Swizzle::XYZ1);
}

#[test]
fn known_codes_have_templates() {
    for fourcc in FourCC::KNOWN {
        assert!(fourcc.template().is_some(), "{fourcc}");
    }

    assert!(FourCC::INVALID.template().is_none());
}
