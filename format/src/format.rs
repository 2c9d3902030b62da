use core::fmt;

use crate::bits::{apply_sign, strip_sign, Field, PlaneField};
use crate::color::{ChromaSubsampling, ColorModel, ColorSpec, RawPattern};
use crate::error::FormatError;
use crate::layout::{DataType, MemLayout};
use crate::packing::Packing;
use crate::pixel::PixelType;
use crate::swizzle::{Channel, Swizzle};

/// The complete description of an image element encoded into one signed 64-bit integer.
///
/// The value is bit-stable, it can be stored or compared with `==` against values produced
/// elsewhere. Field layout, from the least significant bit:
///
/// | bits  | field |
/// |-------|-------|
/// | 0–11  | swizzle, three bits per output slot |
/// | 12–14 | memory layout |
/// | 16–34 | color model with its color specification, subsampling or raw pattern |
/// | 35–43 | packing of the first plane |
/// | 44–50 | packing of the second plane |
/// | 51–57 | packing of the third plane |
/// | 58–60 | packing of the fourth plane |
/// | 61–62 | data type |
/// | 63    | sign, set for data types whose code has bit 2 set |
///
/// All modifications are pure, they return a new value. Operations which can not produce a
/// valid format return [`ImageFormat::INVALID`] and have a `try_` form with the reason.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct ImageFormat(i64);

/// The color interpretation of a format.
///
/// Each model family stores a different payload in the shared color bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorInfo {
    /// Data without color semantics, such as depth or generic arrays.
    Undefined,
    YCbCr {
        spec: ColorSpec,
        subsampling: ChromaSubsampling,
    },
    /// `RGB` or another model sharing its encoding.
    RgbLike {
        model: ColorModel,
        spec: ColorSpec,
    },
    Raw {
        pattern: RawPattern,
    },
    /// `XYZ` or another model sharing its encoding. These carry no specification.
    Extended {
        model: ColorModel,
    },
}

/// The decoded fields of an [`ImageFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FormatDescriptor {
    pub color: ColorInfo,
    pub mem_layout: MemLayout,
    pub data_type: DataType,
    pub swizzle: Swizzle,
    /// Packing of each plane, absent planes are `Packing::NONE` and trail the present ones.
    pub packing: [Packing; 4],
}

impl ColorInfo {
    /* Positions within the color bits. */
    const FAMILY: Field = Field::new(0, 1);
    const SUBMODEL: Field = Field::new(1, 3);
    const SPEC: Field = Field::new(4, ColorSpec::BITS);
    const EXTENDED: Field = Field::new(4, 1);
    const PAYLOAD: Field = Field::new(5, 6);
    /// All color bits set, never produced by any other model.
    const UNDEFINED_BITS: u64 = (1 << 19) - 1;
    /// The sub-model which marks the raw and extended encodings.
    const WIDE_SUBMODEL: u64 = 0x7;

    pub const fn ycbcr(spec: ColorSpec, subsampling: ChromaSubsampling) -> Self {
        ColorInfo::YCbCr { spec, subsampling }
    }

    pub const fn rgb(spec: ColorSpec) -> Self {
        ColorInfo::RgbLike {
            model: ColorModel::RGB,
            spec,
        }
    }

    /// Assemble the color information from a model and its untyped payload.
    ///
    /// The payload is the bits of a [`ColorSpec`] for models with a specification, the code of a
    /// [`RawPattern`] for `RAW` and ignored otherwise. Subsampling only applies to `YCbCr`, other
    /// models must pass [`ChromaSubsampling::NONE`].
    pub const fn from_parts(
        model: ColorModel,
        spec_or_pattern: u32,
        subsampling: ChromaSubsampling,
    ) -> Result<Self, FormatError> {
        let spec = ColorSpec::from_bits(spec_or_pattern);

        if model.code() == ColorModel::YCBCR.code() {
            return Ok(ColorInfo::YCbCr { spec, subsampling });
        }

        if !matches!(subsampling, ChromaSubsampling::Css444) {
            return Err(FormatError::NotApplicable {
                field: "chroma subsampling",
                model,
            });
        }

        if model.code() == ColorModel::UNDEFINED.code() {
            Ok(ColorInfo::Undefined)
        } else if model.is_rgb_like() {
            Ok(ColorInfo::RgbLike { model, spec })
        } else if model.code() == ColorModel::RAW.code() {
            if spec_or_pattern > u8::MAX as u32 {
                return Err(FormatError::InvalidRawPattern);
            }
            Ok(ColorInfo::Raw {
                pattern: RawPattern::from_code(spec_or_pattern as u8),
            })
        } else if model.is_extended() {
            Ok(ColorInfo::Extended { model })
        } else {
            Err(FormatError::InvalidColorModel(model))
        }
    }

    pub const fn model(self) -> ColorModel {
        match self {
            ColorInfo::Undefined => ColorModel::UNDEFINED,
            ColorInfo::YCbCr { .. } => ColorModel::YCBCR,
            ColorInfo::RgbLike { model, .. } | ColorInfo::Extended { model } => model,
            ColorInfo::Raw { .. } => ColorModel::RAW,
        }
    }

    pub const fn spec(self) -> Option<ColorSpec> {
        match self {
            ColorInfo::YCbCr { spec, .. } | ColorInfo::RgbLike { spec, .. } => Some(spec),
            _ => None,
        }
    }

    /// The subsampling, always 4:4:4 for models other than `YCbCr`.
    pub const fn subsampling(self) -> ChromaSubsampling {
        match self {
            ColorInfo::YCbCr { subsampling, .. } => subsampling,
            _ => ChromaSubsampling::NONE,
        }
    }

    pub const fn raw_pattern(self) -> RawPattern {
        match self {
            ColorInfo::Raw { pattern } => pattern,
            _ => RawPattern::Invalid,
        }
    }

    const fn encode(self) -> Result<u64, FormatError> {
        match self {
            ColorInfo::Undefined => Ok(Self::UNDEFINED_BITS),
            ColorInfo::YCbCr { spec, subsampling } => {
                if !spec.is_valid() {
                    return Err(FormatError::InvalidColorSpec);
                }

                Ok(Self::SUBMODEL.put(subsampling.code() as u64)
                    | Self::SPEC.put(spec.bits() as u64))
            }
            ColorInfo::RgbLike { model, spec } => {
                if !model.is_rgb_like() {
                    return Err(FormatError::InvalidColorModel(model));
                }
                if !spec.is_valid() {
                    return Err(FormatError::InvalidColorSpec);
                }

                Ok(Self::FAMILY.put(1)
                    | Self::SUBMODEL.put(model.code() as u64 - 2)
                    | Self::SPEC.put(spec.bits() as u64))
            }
            ColorInfo::Raw { pattern } => {
                if !pattern.is_valid() {
                    return Err(FormatError::InvalidRawPattern);
                }

                Ok(Self::FAMILY.put(1)
                    | Self::SUBMODEL.put(Self::WIDE_SUBMODEL)
                    | Self::PAYLOAD.put(pattern.code() as u64))
            }
            ColorInfo::Extended { model } => {
                if !model.is_extended() {
                    return Err(FormatError::InvalidColorModel(model));
                }

                Ok(Self::FAMILY.put(1)
                    | Self::SUBMODEL.put(Self::WIDE_SUBMODEL)
                    | Self::EXTENDED.put(1)
                    | Self::PAYLOAD.put(model.code() as u64 - 10))
            }
        }
    }

    /// Resolve the color bits: the sentinel first, then the family bit, then the sub-model and
    /// finally the bit separating raw from extended models.
    const fn decode(bits: u64) -> Result<Self, FormatError> {
        if bits == Self::UNDEFINED_BITS {
            return Ok(ColorInfo::Undefined);
        }

        let spec = ColorSpec::from_bits(Self::SPEC.get(bits) as u32);
        let submodel = Self::SUBMODEL.get(bits);

        if Self::FAMILY.get(bits) == 0 {
            return match ChromaSubsampling::from_code(submodel as u8) {
                Some(subsampling) => Ok(ColorInfo::YCbCr { spec, subsampling }),
                None => Err(FormatError::InvalidChromaSubsampling),
            };
        }

        if submodel != Self::WIDE_SUBMODEL {
            return Ok(ColorInfo::RgbLike {
                model: ColorModel::new(submodel as u8 + 2),
                spec,
            });
        }

        let payload = Self::PAYLOAD.get(bits) as u8;
        if Self::EXTENDED.get(bits) == 0 {
            Ok(ColorInfo::Raw {
                pattern: RawPattern::from_code(payload),
            })
        } else {
            Ok(ColorInfo::Extended {
                model: ColorModel::new(payload + 10),
            })
        }
    }
}

impl FormatDescriptor {
    /// Encode the fields, checking every invariant of a format.
    pub const fn encode(&self) -> Result<ImageFormat, FormatError> {
        let (value, channels) = match self.encode_fields() {
            Ok(encoded) => encoded,
            Err(err) => return Err(err),
        };

        if channels != self.swizzle.channel_count() {
            return Err(FormatError::ChannelCountMismatch {
                swizzle: self.swizzle.channel_count(),
                planes: channels,
            });
        }

        Ok(ImageFormat(value))
    }

    /// Encode every field, returning the value and the channels stored in the planes.
    ///
    /// Whether the swizzle reads those channels is left to the caller.
    pub(crate) const fn encode_fields(&self) -> Result<(i64, u32), FormatError> {
        if !self.mem_layout.is_valid() {
            return Err(FormatError::InvalidMemLayout);
        }
        if !self.data_type.is_valid() {
            return Err(FormatError::InvalidDataType);
        }
        if !self.swizzle.is_valid() {
            return Err(FormatError::InvalidSwizzle);
        }
        if self.packing[0].is_none() {
            return Err(FormatError::NoPlanes);
        }

        let color = match self.color.encode() {
            Ok(color) => color,
            Err(err) => return Err(err),
        };

        let mut bits = Field::SWIZZLE.put(self.swizzle.bits() as u64)
            | Field::MEM_LAYOUT.put(self.mem_layout.code() as u64)
            | Field::COLOR.put(color)
            | Field::DATA_TYPE.put(self.data_type.code() as u64);

        let mut channels = 0;
        let mut absent = false;
        let mut plane = 0;
        while plane < 4 {
            let packing = self.packing[plane];
            if packing.is_none() {
                absent = true;
            } else if absent {
                return Err(FormatError::SparsePlanes { plane });
            } else {
                match encode_plane(plane, packing) {
                    Ok(field) => bits |= field,
                    Err(err) => return Err(err),
                }
                channels += packing.channel_count();
            }
            plane += 1;
        }

        let negative = self.data_type.code() & 0x4 != 0;
        Ok((apply_sign(bits, negative), channels))
    }

    pub fn plane_count(&self) -> usize {
        self.packing.iter().take_while(|p| !p.is_none()).count()
    }

    /// The swizzle of one plane on its own.
    ///
    /// Slots reading channels of the plane are renumbered to start at `X`, slots reading other
    /// planes become `0` and constants are kept.
    pub fn plane_swizzle(&self, plane: usize) -> Option<Swizzle> {
        let packing = *self.packing.get(plane)?;
        if packing.is_none() {
            return None;
        }

        let offset: u32 = self.packing[..plane].iter().map(|p| p.channel_count()).sum();
        let channels = offset + 1..=offset + packing.channel_count();

        let remapped = self.swizzle.channels().map(|ch| match ch.source() {
            Some(source) if channels.contains(&u32::from(source)) => {
                Channel::with_source((u32::from(source) - offset) as u8)
            }
            Some(_) => Channel::Zero,
            None => ch,
        });

        Some(Swizzle::from_channels(remapped))
    }

    fn data_layout(&self) -> (MemLayout, DataType, Swizzle, [Packing; 4], ChromaSubsampling) {
        (
            self.mem_layout,
            self.data_type,
            self.swizzle.normalize_alpha(),
            self.packing,
            self.color.subsampling(),
        )
    }
}

/// The field bits of one plane holding the packing.
const fn encode_plane(plane: usize, packing: Packing) -> Result<u64, FormatError> {
    if !packing.is_known() {
        return Err(FormatError::UnknownPacking { plane, packing });
    }

    if plane == 3 && packing.bits_per_pixel() > 64 {
        return Err(FormatError::FourthPlaneTooWide {
            bits: packing.bits_per_pixel(),
        });
    }

    let field = PlaneField::ALL[plane];
    let value = field.encode(packing.code());
    if field.decode(value) != packing.code() {
        return Err(FormatError::PackingNotRepresentable { plane, packing });
    }

    Ok(field.field.put(value))
}

const fn predefined(
    color: ColorInfo,
    mem_layout: MemLayout,
    data_type: DataType,
    swizzle: Swizzle,
    packing: [Packing; 4],
) -> ImageFormat {
    match ImageFormat::try_make(color, mem_layout, data_type, swizzle, packing) {
        Ok(format) => format,
        Err(_) => panic!("invalid predefined image format"),
    }
}

macro_rules! image_formats {
    ($($(#[$attr:meta])* $name:ident = $color:expr, $mem:ident, $ty:ident, $swizzle:ident, [$($packing:ident),+];)*) => {
        impl ImageFormat {
            $(
                $(#[$attr])*
                pub const $name: ImageFormat = predefined(
                    $color,
                    MemLayout::$mem,
                    DataType::$ty,
                    Swizzle::$swizzle,
                    image_formats!(@planes $(Packing::$packing),+),
                );
            )*
        }

        const FORMAT_NAMES: &[(ImageFormat, &str)] = &[
            $((ImageFormat::$name, stringify!($name)),)*
        ];
    };
    (@planes $p0:expr) => { [$p0, Packing::NONE, Packing::NONE, Packing::NONE] };
    (@planes $p0:expr, $p1:expr) => { [$p0, $p1, Packing::NONE, Packing::NONE] };
    (@planes $p0:expr, $p1:expr, $p2:expr) => { [$p0, $p1, $p2, Packing::NONE] };
    (@planes $p0:expr, $p1:expr, $p2:expr, $p3:expr) => { [$p0, $p1, $p2, $p3] };
}

const NV_LIMITED: ColorInfo = ColorInfo::ycbcr(ColorSpec::BT601, ChromaSubsampling::Css420);
const NV_FULL: ColorInfo = ColorInfo::ycbcr(ColorSpec::BT601_ER, ChromaSubsampling::Css420);
const PACKED_LIMITED: ColorInfo = ColorInfo::ycbcr(ColorSpec::BT601, ChromaSubsampling::Css422);
const PACKED_FULL: ColorInfo = ColorInfo::ycbcr(ColorSpec::BT601_ER, ChromaSubsampling::Css422);
const RGB: ColorInfo = ColorInfo::rgb(ColorSpec::UNDEFINED);

image_formats! {
    /// Single plane with one 8-bit unsigned channel.
    U8 = ColorInfo::Undefined, PL, Unsigned, X000, [X8];
    S8 = ColorInfo::Undefined, PL, Signed, X000, [X8];
    /// Single plane with one 16-bit unsigned channel.
    U16 = ColorInfo::Undefined, PL, Unsigned, X000, [X16];
    S16 = ColorInfo::Undefined, PL, Signed, X000, [X16];
    /// Single plane with one 32-bit float channel.
    F32 = ColorInfo::Undefined, PL, Float, X000, [X32];
    F64 = ColorInfo::Undefined, PL, Float, X000, [X64];
    /// Single plane with two interleaved 32-bit float channels.
    F32X2 = ColorInfo::Undefined, PL, Float, XY00, [X32_Y32];

    /// YCbCr 4:2:0 in limited range, a luma plane followed by interleaved chroma.
    NV12 = NV_LIMITED, PL, Unsigned, XYZ0, [X8, X8_Y8];
    NV12_BL = NV_LIMITED, BL, Unsigned, XYZ0, [X8, X8_Y8];
    /// YCbCr 4:2:0 in full range, a luma plane followed by interleaved chroma.
    NV12_ER = NV_FULL, PL, Unsigned, XYZ0, [X8, X8_Y8];
    NV12_ER_BL = NV_FULL, BL, Unsigned, XYZ0, [X8, X8_Y8];

    /// YCbCr 4:2:2 in limited range, ordered `U Y0 V Y1`.
    UYVY = PACKED_LIMITED, PL, Unsigned, XYZ1, [Y8_X8__Z8_X8];
    UYVY_BL = PACKED_LIMITED, BL, Unsigned, XYZ1, [Y8_X8__Z8_X8];
    UYVY_ER = PACKED_FULL, PL, Unsigned, XYZ1, [Y8_X8__Z8_X8];
    UYVY_ER_BL = PACKED_FULL, BL, Unsigned, XYZ1, [Y8_X8__Z8_X8];

    /// YCbCr 4:2:2 in limited range, ordered `Y0 U Y1 V`.
    YUYV = PACKED_LIMITED, PL, Unsigned, XYZ1, [X8_Y8__X8_Z8];
    YUYV_BL = PACKED_LIMITED, BL, Unsigned, XYZ1, [X8_Y8__X8_Z8];
    YUYV_ER = PACKED_FULL, PL, Unsigned, XYZ1, [X8_Y8__X8_Z8];
    YUYV_ER_BL = PACKED_FULL, BL, Unsigned, XYZ1, [X8_Y8__X8_Z8];

    /// Interleaved 8-bit red, green and blue.
    RGB8 = RGB, PL, Unsigned, XYZ1, [X8_Y8_Z8];
    /// Interleaved 8-bit blue, green and red.
    BGR8 = RGB, PL, Unsigned, ZYX1, [X8_Y8_Z8];
    RGBA8 = RGB, PL, Unsigned, XYZW, [X8_Y8_Z8_W8];
    BGRA8 = RGB, PL, Unsigned, ZYXW, [X8_Y8_Z8_W8];
}

impl ImageFormat {
    /// The value returned for every rejected request.
    ///
    /// No valid format encodes to zero, the first plane is never empty.
    pub const INVALID: Self = ImageFormat(0);

    pub const fn try_make(
        color: ColorInfo,
        mem_layout: MemLayout,
        data_type: DataType,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Result<Self, FormatError> {
        FormatDescriptor {
            color,
            mem_layout,
            data_type,
            swizzle,
            packing,
        }
        .encode()
    }

    /// Encode a format, or `INVALID` when the fields are inconsistent.
    pub const fn make(
        color: ColorInfo,
        mem_layout: MemLayout,
        data_type: DataType,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Self {
        match Self::try_make(color, mem_layout, data_type, swizzle, packing) {
            Ok(format) => format,
            Err(_) => ImageFormat::INVALID,
        }
    }

    pub const fn new_ycbcr(
        spec: ColorSpec,
        subsampling: ChromaSubsampling,
        mem_layout: MemLayout,
        data_type: DataType,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Self {
        let color = ColorInfo::ycbcr(spec, subsampling);
        Self::make(color, mem_layout, data_type, swizzle, packing)
    }

    /// A format of a model with a color specification and without subsampling.
    ///
    /// Extended models such as `XYZ` are accepted and do not store the specification.
    pub const fn new_color(
        model: ColorModel,
        spec: ColorSpec,
        mem_layout: MemLayout,
        data_type: DataType,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Self {
        let color = if model.code() == ColorModel::YCBCR.code() {
            ColorInfo::ycbcr(spec, ChromaSubsampling::NONE)
        } else if model.is_rgb_like() {
            ColorInfo::RgbLike { model, spec }
        } else if model.is_extended() {
            ColorInfo::Extended { model }
        } else {
            return ImageFormat::INVALID;
        };

        Self::make(color, mem_layout, data_type, swizzle, packing)
    }

    pub const fn new_non_color(
        mem_layout: MemLayout,
        data_type: DataType,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Self {
        Self::make(ColorInfo::Undefined, mem_layout, data_type, swizzle, packing)
    }

    pub const fn new_raw(
        pattern: RawPattern,
        mem_layout: MemLayout,
        data_type: DataType,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Self {
        let color = ColorInfo::Raw { pattern };
        Self::make(color, mem_layout, data_type, swizzle, packing)
    }

    /// Accept an encoded value if it is exactly what the encoder produces for its fields.
    pub fn from_raw(value: i64) -> Option<Self> {
        match Self::try_from(value) {
            Ok(format) => Some(format),
            Err(err) => {
                tracing::debug!(value, error = %err, "not an image format");
                None
            }
        }
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Wrap a value known to be an encoded format.
    pub(crate) const fn from_raw_unchecked(value: i64) -> Self {
        ImageFormat(value)
    }

    pub const fn is_valid(self) -> bool {
        self.descriptor().is_ok()
    }

    /// Decode all fields.
    ///
    /// Fails for values which are not the canonical encoding of a valid format.
    pub const fn descriptor(self) -> Result<FormatDescriptor, FormatError> {
        let desc = match self.decode_fields() {
            Ok(desc) => desc,
            Err(err) => return Err(err),
        };

        match desc.encode() {
            Ok(format) if format.0 == self.0 => Ok(desc),
            Ok(_) => Err(FormatError::InvalidFormat),
            Err(err) => Err(err),
        }
    }

    /// Extract every field without checking the result.
    pub(crate) const fn decode_fields(self) -> Result<FormatDescriptor, FormatError> {
        if self.0 == ImageFormat::INVALID.0 {
            return Err(FormatError::InvalidFormat);
        }

        let (bits, negative) = strip_sign(self.0);
        if Field::RESERVED.get(bits) != 0 {
            return Err(FormatError::InvalidFormat);
        }

        let color = match ColorInfo::decode(Field::COLOR.get(bits)) {
            Ok(color) => color,
            Err(err) => return Err(err),
        };

        let sign = if negative { 0x4 } else { 0 };
        let data_type = DataType::from_code(Field::DATA_TYPE.get(bits) as u8 | sign);

        let mut packing = [Packing::NONE; 4];
        let mut plane = 0;
        while plane < 4 {
            let field = PlaneField::ALL[plane];
            packing[plane] = Packing::from_code(field.decode(field.field.get(bits)));
            plane += 1;
        }

        Ok(FormatDescriptor {
            color,
            mem_layout: MemLayout::from_code(Field::MEM_LAYOUT.get(bits) as u8),
            data_type,
            swizzle: Swizzle::from_bits(Field::SWIZZLE.get(bits) as u16),
            packing,
        })
    }

    pub fn color_info(self) -> ColorInfo {
        self.descriptor()
            .map_or(ColorInfo::Undefined, |desc| desc.color)
    }

    pub fn color_model(self) -> ColorModel {
        self.color_info().model()
    }

    /// The color specification, or `ColorSpec::UNDEFINED` for models without one.
    pub fn color_spec(self) -> ColorSpec {
        self.color_info().spec().unwrap_or(ColorSpec::UNDEFINED)
    }

    pub fn chroma_subsampling(self) -> ChromaSubsampling {
        self.color_info().subsampling()
    }

    pub fn raw_pattern(self) -> RawPattern {
        self.color_info().raw_pattern()
    }

    pub fn data_type(self) -> DataType {
        self.descriptor()
            .map_or(DataType::Invalid, |desc| desc.data_type)
    }

    pub fn mem_layout(self) -> MemLayout {
        self.descriptor()
            .map_or(MemLayout::Invalid, |desc| desc.mem_layout)
    }

    pub fn swizzle(self) -> Swizzle {
        self.descriptor()
            .map_or(Swizzle::INVALID, |desc| desc.swizzle)
    }

    /// The packing of a plane, `NONE` for planes that do not exist.
    pub fn plane_packing(self, plane: usize) -> Packing {
        match self.descriptor() {
            Ok(desc) => desc.packing.get(plane).copied().unwrap_or(Packing::NONE),
            Err(_) => Packing::INVALID,
        }
    }

    pub fn plane_count(self) -> usize {
        self.descriptor().map_or(0, |desc| desc.plane_count())
    }

    /// The number of channels over all planes.
    pub fn channel_count(self) -> u32 {
        self.descriptor()
            .map_or(0, |desc| desc.swizzle.channel_count())
    }

    pub fn plane_channel_count(self, plane: usize) -> u32 {
        self.plane_packing(plane).channel_count()
    }

    pub fn plane_bits_per_pixel(self, plane: usize) -> u32 {
        self.plane_packing(plane).bits_per_pixel()
    }

    /// The bits of each channel, with the channels of all planes in order.
    pub fn bits_per_channel(self) -> [u32; 4] {
        let mut bits = [0; 4];
        let Ok(desc) = self.descriptor() else {
            return bits;
        };

        let mut next = 0;
        for packing in desc.packing {
            let count = packing.channel_count() as usize;
            let plane_bits = packing.bits_per_channel();
            for &b in &plane_bits[..count] {
                if let Some(slot) = bits.get_mut(next) {
                    *slot = b;
                }
                next += 1;
            }
        }

        bits
    }

    /// The swizzle of one plane on its own, `INVALID` for planes that do not exist.
    pub fn plane_swizzle(self, plane: usize) -> Swizzle {
        self.descriptor()
            .ok()
            .and_then(|desc| desc.plane_swizzle(plane))
            .unwrap_or(Swizzle::INVALID)
    }

    pub fn plane_pixel_type(self, plane: usize) -> PixelType {
        match self.descriptor() {
            Ok(desc) => PixelType::new(desc.mem_layout, desc.data_type, self.plane_packing(plane)),
            Err(_) => PixelType::INVALID,
        }
    }

    pub fn plane_format(self, plane: usize) -> Self {
        self.try_plane_format(plane)
            .unwrap_or_else(|err| self.rejected("plane format", err))
    }

    /// A single plane format with the color information of this format.
    pub fn try_plane_format(self, plane: usize) -> Result<Self, FormatError> {
        let desc = self.descriptor()?;
        let swizzle = desc
            .plane_swizzle(plane)
            .ok_or(FormatError::NoSuchPlane { plane })?;

        FormatDescriptor {
            swizzle,
            packing: [desc.packing[plane], Packing::NONE, Packing::NONE, Packing::NONE],
            ..desc
        }
        .encode()
    }

    /// Combine single plane formats, pass `INVALID` for planes that do not exist.
    pub fn from_planes(planes: [ImageFormat; 4]) -> Self {
        match Self::try_from_planes(planes) {
            Ok(format) => format,
            Err(err) => {
                tracing::debug!(error = %err, "planes do not combine to an image format");
                ImageFormat::INVALID
            }
        }
    }

    pub fn try_from_planes(planes: [ImageFormat; 4]) -> Result<Self, FormatError> {
        let first = planes[0].descriptor()?;

        let mut packing = [Packing::NONE; 4];
        let mut channels = [Channel::Zero; 4];
        let mut claimed = [false; 4];
        let mut offset = 0;
        let mut absent = false;

        for (idx, format) in planes.into_iter().enumerate() {
            if format == ImageFormat::INVALID {
                absent = true;
                continue;
            } else if absent {
                return Err(FormatError::SparsePlanes { plane: idx });
            }

            let desc = format.descriptor()?;
            if desc.plane_count() != 1 {
                return Err(FormatError::PlaneMismatch("plane count"));
            }
            if desc.mem_layout != first.mem_layout {
                return Err(FormatError::PlaneMismatch("memory layout"));
            }
            if desc.data_type != first.data_type {
                return Err(FormatError::PlaneMismatch("data type"));
            }
            if desc.color != first.color {
                return Err(FormatError::PlaneMismatch("color"));
            }

            for (slot, ch) in desc.swizzle.channels().into_iter().enumerate() {
                match ch.source() {
                    Some(_) if claimed[slot] => {
                        return Err(FormatError::PlaneMismatch("swizzle"));
                    }
                    Some(source) => {
                        claimed[slot] = true;
                        channels[slot] = Channel::with_source(source + offset);
                    }
                    None if !claimed[slot] && ch == Channel::One => channels[slot] = ch,
                    None => {}
                }
            }

            packing[idx] = desc.packing[0];
            offset += desc.packing[0].channel_count() as u8;
        }

        Self::try_make(
            first.color,
            first.mem_layout,
            first.data_type,
            Swizzle::from_channels(channels),
            packing,
        )
    }

    /// Whether both formats arrange their pixels identically in memory.
    ///
    /// Compares memory layout, data type, swizzle, packings and chroma subsampling while
    /// ignoring the color specification and whether a missing fourth channel reads as `0` or
    /// `1`. Invalid formats have no layout and never compare equal.
    pub fn has_same_data_layout(self, other: ImageFormat) -> bool {
        match (self.descriptor(), other.descriptor()) {
            (Ok(a), Ok(b)) => a.data_layout() == b.data_layout(),
            _ => false,
        }
    }

    fn update(
        self,
        change: impl FnOnce(&mut FormatDescriptor) -> Result<(), FormatError>,
    ) -> Result<Self, FormatError> {
        let mut desc = self.descriptor()?;
        change(&mut desc)?;
        desc.encode()
    }

    fn rejected(self, field: &'static str, err: FormatError) -> Self {
        tracing::debug!(format = %self, field, error = %err, "image format update rejected");
        ImageFormat::INVALID
    }

    pub fn try_with_data_type(self, data_type: DataType) -> Result<Self, FormatError> {
        self.update(|desc| {
            desc.data_type = data_type;
            Ok(())
        })
    }

    pub fn with_data_type(self, data_type: DataType) -> Self {
        self.try_with_data_type(data_type)
            .unwrap_or_else(|err| self.rejected("data type", err))
    }

    pub fn try_with_mem_layout(self, mem_layout: MemLayout) -> Result<Self, FormatError> {
        self.update(|desc| {
            desc.mem_layout = mem_layout;
            Ok(())
        })
    }

    pub fn with_mem_layout(self, mem_layout: MemLayout) -> Self {
        self.try_with_mem_layout(mem_layout)
            .unwrap_or_else(|err| self.rejected("memory layout", err))
    }

    pub fn try_with_swizzle(self, swizzle: Swizzle) -> Result<Self, FormatError> {
        self.update(|desc| {
            desc.swizzle = swizzle;
            Ok(())
        })
    }

    pub fn with_swizzle(self, swizzle: Swizzle) -> Self {
        self.try_with_swizzle(swizzle)
            .unwrap_or_else(|err| self.rejected("swizzle", err))
    }

    /// Replace the color specification of a `YCbCr` or RGB-like format.
    pub fn try_with_color_spec(self, spec: ColorSpec) -> Result<Self, FormatError> {
        self.update(|desc| match &mut desc.color {
            ColorInfo::YCbCr { spec: current, .. } | ColorInfo::RgbLike { spec: current, .. } => {
                *current = spec;
                Ok(())
            }
            other => Err(FormatError::NotApplicable {
                field: "color spec",
                model: other.model(),
            }),
        })
    }

    pub fn with_color_spec(self, spec: ColorSpec) -> Self {
        self.try_with_color_spec(spec)
            .unwrap_or_else(|err| self.rejected("color spec", err))
    }

    /// Replace the subsampling of a `YCbCr` format.
    pub fn try_with_chroma_subsampling(
        self,
        subsampling: ChromaSubsampling,
    ) -> Result<Self, FormatError> {
        self.update(|desc| match &mut desc.color {
            ColorInfo::YCbCr {
                subsampling: current,
                ..
            } => {
                *current = subsampling;
                Ok(())
            }
            other => Err(FormatError::NotApplicable {
                field: "chroma subsampling",
                model: other.model(),
            }),
        })
    }

    pub fn with_chroma_subsampling(self, subsampling: ChromaSubsampling) -> Self {
        self.try_with_chroma_subsampling(subsampling)
            .unwrap_or_else(|err| self.rejected("chroma subsampling", err))
    }

    /// Replace the pattern of a `RAW` format.
    pub fn try_with_raw_pattern(self, pattern: RawPattern) -> Result<Self, FormatError> {
        self.update(|desc| match &mut desc.color {
            ColorInfo::Raw { pattern: current } => {
                *current = pattern;
                Ok(())
            }
            other => Err(FormatError::NotApplicable {
                field: "raw pattern",
                model: other.model(),
            }),
        })
    }

    pub fn with_raw_pattern(self, pattern: RawPattern) -> Self {
        self.try_with_raw_pattern(pattern)
            .unwrap_or_else(|err| self.rejected("raw pattern", err))
    }

    /// Replace the whole color information, keeping the data layout.
    pub fn try_with_color(self, color: ColorInfo) -> Result<Self, FormatError> {
        self.update(|desc| {
            desc.color = color;
            Ok(())
        })
    }

    pub fn with_color(self, color: ColorInfo) -> Self {
        self.try_with_color(color)
            .unwrap_or_else(|err| self.rejected("color", err))
    }

    pub fn try_with_plane_packing(self, plane: usize, packing: Packing) -> Result<Self, FormatError> {
        self.update(|desc| {
            let current = desc
                .packing
                .get_mut(plane)
                .ok_or(FormatError::NoSuchPlane { plane })?;
            *current = packing;
            Ok(())
        })
    }

    pub fn with_plane_packing(self, plane: usize, packing: Packing) -> Self {
        self.try_with_plane_packing(plane, packing)
            .unwrap_or_else(|err| self.rejected("packing", err))
    }

    /// Replace swizzle and packings at once, `INVALID` arguments keep the current value.
    ///
    /// Changing the channel count of a format requires changing both together.
    pub fn try_with_swizzle_and_packing(
        self,
        swizzle: Swizzle,
        packing: [Packing; 4],
    ) -> Result<Self, FormatError> {
        self.update(|desc| {
            if swizzle != Swizzle::INVALID {
                desc.swizzle = swizzle;
            }

            for (current, new) in desc.packing.iter_mut().zip(packing) {
                if new != Packing::INVALID {
                    *current = new;
                }
            }

            Ok(())
        })
    }

    pub fn with_swizzle_and_packing(self, swizzle: Swizzle, packing: [Packing; 4]) -> Self {
        self.try_with_swizzle_and_packing(swizzle, packing)
            .unwrap_or_else(|err| self.rejected("swizzle and packing", err))
    }

    fn name(self) -> Option<&'static str> {
        if self == ImageFormat::INVALID {
            return Some("INVALID");
        }

        FORMAT_NAMES
            .iter()
            .find(|(format, _)| *format == self)
            .map(|(_, name)| *name)
    }
}

impl TryFrom<i64> for ImageFormat {
    type Error = FormatError;

    fn try_from(value: i64) -> Result<Self, FormatError> {
        let format = ImageFormat(value);
        format.descriptor()?;
        Ok(format)
    }
}

impl From<ImageFormat> for i64 {
    fn from(format: ImageFormat) -> i64 {
        format.0
    }
}

impl fmt::Display for ColorInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColorInfo::Undefined => f.write_str("UNDEFINED"),
            ColorInfo::YCbCr { spec, subsampling } => write!(f, "YCbCr, {spec}, {subsampling}"),
            ColorInfo::RgbLike { model, spec } => write!(f, "{model}, {spec}"),
            ColorInfo::Raw { pattern } => write!(f, "RAW, {pattern:?}"),
            ColorInfo::Extended { model } => write!(f, "{model}"),
        }
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}",
            self.color, self.mem_layout, self.data_type, self.swizzle
        )?;

        for packing in self.packing.iter().take_while(|p| !p.is_none()) {
            write!(f, ", {packing}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }

        match self.descriptor() {
            Ok(desc) => write!(f, "ImageFormat({desc})"),
            Err(_) => write!(f, "ImageFormat({:#018x})", self.0),
        }
    }
}

impl fmt::Debug for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "ImageFormat::{name}"),
            None => fmt::Display::fmt(self, f),
        }
    }
}
