use crate::color::ColorModel;
use crate::packing::Packing;

/// The reason a format could not be encoded or modified.
///
/// Every operation that returns [`ImageFormat::INVALID`](crate::ImageFormat::INVALID) has a
/// `try_` counterpart that reports one of these instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("swizzle reads {swizzle} channels but the planes store {planes}")]
    ChannelCountMismatch { swizzle: u32, planes: u32 },
    #[error("plane {plane} uses the unknown packing {packing}")]
    UnknownPacking { plane: usize, packing: Packing },
    #[error("no packing has the requested parameters")]
    NoMatchingPacking,
    #[error("packing {packing} can not be stored in plane {plane}")]
    PackingNotRepresentable { plane: usize, packing: Packing },
    #[error("the fourth plane holds at most 64 bits per pixel, not {bits}")]
    FourthPlaneTooWide { bits: u32 },
    #[error("plane {plane} follows an absent plane")]
    SparsePlanes { plane: usize },
    #[error("a format needs at least one plane")]
    NoPlanes,
    #[error("plane {plane} does not exist")]
    NoSuchPlane { plane: usize },
    #[error("invalid swizzle")]
    InvalidSwizzle,
    #[error("invalid memory layout")]
    InvalidMemLayout,
    #[error("invalid data type")]
    InvalidDataType,
    #[error("invalid color specification")]
    InvalidColorSpec,
    #[error("color model {0} can not be encoded")]
    InvalidColorModel(ColorModel),
    #[error("invalid raw pattern")]
    InvalidRawPattern,
    #[error("invalid chroma subsampling")]
    InvalidChromaSubsampling,
    #[error("{field} does not apply to the {model} color model")]
    NotApplicable {
        field: &'static str,
        model: ColorModel,
    },
    #[error("planes disagree on {0}")]
    PlaneMismatch(&'static str),
    #[error("not a valid image format")]
    InvalidFormat,
}
