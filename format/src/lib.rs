//! Image formats encoded into a single 64-bit integer.
//!
//! An [`ImageFormat`] describes everything needed to interpret the memory of an image: the color
//! model with its specification, chroma subsampling, memory layout, data type, the swizzle that
//! maps stored channels to `(x, y, z, w)` and the packing of up to four planes. The encoding is
//! bit-stable, so values can be stored, sent to other processes or compared with `==`.
//!
//! # Usage
//!
//! Predefined formats cover the common cases:
//!
//! ```
//! use image_format::ImageFormat;
//! use image_format::color::{ChromaSubsampling, ColorModel};
//!
//! let nv12 = ImageFormat::NV12;
//! assert_eq!(nv12.color_model(), ColorModel::YCBCR);
//! assert_eq!(nv12.chroma_subsampling(), ChromaSubsampling::Css420);
//! assert_eq!(nv12.plane_count(), 2);
//! ```
//!
//! Other formats are made from their fields, or derived from an existing format. Requests that
//! do not describe a valid format produce [`ImageFormat::INVALID`], the `try_` variants report
//! the reason instead:
//!
//! ```
//! use image_format::{DataType, FormatError, ImageFormat, MemLayout, Packing, Swizzle};
//! use image_format::color::{ColorModel, ColorSpec};
//!
//! let rgb = ImageFormat::new_color(
//!     ColorModel::RGB,
//!     ColorSpec::BT709_ER,
//!     MemLayout::PL,
//!     DataType::Unsigned,
//!     Swizzle::XYZ1,
//!     [Packing::X8_Y8_Z8, Packing::NONE, Packing::NONE, Packing::NONE],
//! );
//! assert!(rgb.has_same_data_layout(ImageFormat::RGB8));
//!
//! // A single channel can not fill a three channel swizzle.
//! let err = rgb.try_with_plane_packing(0, Packing::X8).unwrap_err();
//! assert!(matches!(err, FormatError::ChannelCountMismatch { .. }));
//! assert_eq!(rgb.with_plane_packing(0, Packing::X8), ImageFormat::INVALID);
//! ```

/// Field positions of the encoding.
mod bits;
/// Color models, color specifications and chroma subsampling.
pub mod color;
mod error;
/// The encoded image format and its decoded fields.
mod format;
mod layout;
/// Channel packings of a single plane.
mod packing;
mod pixel;
mod swizzle;


pub use self::error::FormatError;
pub use self::format::{ColorInfo, FormatDescriptor, ImageFormat};
pub use self::layout::{DataType, MemLayout};
pub use self::packing::{Endianness, Packing, PackingParams};
pub use self::pixel::PixelType;
pub use self::swizzle::{Channel, Swizzle};
