//! Color models, color specifications and the chroma subsampling of YCbCr formats.
use core::fmt;

use crate::bits::Field;

/// The semantic family of the channels of a format.
///
/// Besides the named models, codes `2..=8` are reserved for RGB-like models which share the
/// encoding of `RGB` and codes `10..=73` for extended models which share the encoding of `XYZ`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct ColorModel(u8);

/// A color specification for formats carrying color.
///
/// This packs the color space, the transfer function, the YCbCr encoding, the location of chroma
/// samples and the quantization range into 15 bits. The named constants cover the common
/// standards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct ColorSpec(u32);

/// The color primaries and white point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum ColorSpace {
    /// The primaries of the sensor that captured the image.
    Sensor = 0,
    /// ITU-R BT.601/625, also known as EBU 3213-E.
    Bt601 = 1,
    /// ITU-R BT.709 with D65 white point.
    Bt709 = 2,
    /// ITU-R BT.2020 with D65 white point.
    Bt2020 = 3,
    /// DCI-P3 with D65 white point.
    DciP3 = 4,
    Undefined = 7,
}

/// The matrix relating YCbCr to the RGB values of the color space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum YCbCrEncoding {
    /// No encoding, used by specifications of non-YCbCr data.
    Undefined = 0,
    Bt601 = 1,
    Bt709 = 2,
    Bt2020 = 3,
    /// BT.2020 with constant luminance.
    Bt2020c = 4,
    Smpte240m = 5,
}

/// The opto-electronic transfer function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum TransferFunction {
    Linear = 0,
    Srgb = 1,
    Sycc = 2,
    /// Perceptual quantizer.
    Pq = 3,
    Bt709 = 4,
    Bt2020 = 5,
    Smpte240m = 6,
}

/// The quantization range of the channel values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorRange {
    /// Values cover the whole range of the underlying type.
    Full = 0,
    /// Values cover the studio swing, for example `16..=235` for 8-bit luma.
    Limited = 1,
}

/// Where a chroma sample sits relative to the luma samples it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChromaLocation {
    Even = 0,
    /// Exactly between the even and odd coordinate.
    Center = 1,
    Odd = 2,
    /// Sampled at even and odd coordinates, used when no subsampling takes place.
    Both = 3,
}

/// The arrangement of color filters of a raw sensor image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawPattern {
    Invalid = 0,
    BayerRggb = 1,
    BayerBggr = 2,
    BayerGrbg = 3,
    BayerGbrg = 4,
    BayerRccb = 5,
    BayerBccr = 6,
    BayerCrbc = 7,
    BayerCbrc = 8,
    BayerRccc = 9,
    BayerCrcc = 10,
    BayerCcrc = 11,
    BayerCccr = 12,
    /// Only clear pixels.
    BayerCccc = 13,
}

/// The resolution of the chroma planes relative to luma.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChromaSubsampling {
    /// Full chroma resolution.
    Css444 = 0,
    /// Half horizontal resolution.
    Css422 = 1,
    /// Half vertical resolution.
    Css422R = 2,
    /// Quarter horizontal resolution.
    Css411 = 3,
    /// Quarter vertical resolution.
    Css411R = 4,
    /// Half horizontal and vertical resolution.
    Css420 = 5,
}

impl ColorModel {
    pub const UNDEFINED: Self = ColorModel(0);
    /// Luma and two color differences, blue-luma and red-luma.
    pub const YCBCR: Self = ColorModel(1);
    pub const RGB: Self = ColorModel(2);
    /// Raw sensor data behind a color filter array.
    pub const RAW: Self = ColorModel(9);
    /// The CIE XYZ tristimulus values.
    pub const XYZ: Self = ColorModel(10);

    pub const fn new(code: u8) -> Self {
        ColorModel(code)
    }

    pub const fn code(self) -> u8 {
        self.0
    }

    /// Models that share the encoding of `RGB`.
    pub const fn is_rgb_like(self) -> bool {
        matches!(self.0, 2..=8)
    }

    /// Models that share the encoding of `XYZ`.
    pub const fn is_extended(self) -> bool {
        matches!(self.0, 10..=73)
    }

    /// Whether formats of this model carry a color specification.
    pub const fn has_color_spec(self) -> bool {
        self.0 == ColorModel::YCBCR.0 || self.is_rgb_like()
    }

    pub const fn is_valid(self) -> bool {
        self.0 <= ColorModel::RAW.0 || self.is_extended()
    }
}

impl fmt::Debug for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ColorModel({self})")
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ColorModel::UNDEFINED => f.write_str("UNDEFINED"),
            ColorModel::YCBCR => f.write_str("YCbCr"),
            ColorModel::RGB => f.write_str("RGB"),
            ColorModel::RAW => f.write_str("RAW"),
            ColorModel::XYZ => f.write_str("XYZ"),
            other => write!(f, "{}", other.0),
        }
    }
}

macro_rules! color_specs {
    ($($(#[$attr:meta])* $name:ident = $space:ident, $enc:ident, $xfer:ident, $range:ident, $h:ident, $v:ident;)*) => {
        impl ColorSpec {
            $(
                $(#[$attr])*
                pub const $name: ColorSpec = ColorSpec::new(
                    ColorSpace::$space,
                    YCbCrEncoding::$enc,
                    TransferFunction::$xfer,
                    ColorRange::$range,
                    ChromaLocation::$h,
                    ChromaLocation::$v,
                );
            )*
        }

        const COLOR_SPEC_NAMES: &[(ColorSpec, &str)] = &[
            $((ColorSpec::$name, stringify!($name)),)*
        ];
    };
}

color_specs! {
    /// Nothing is known about the color.
    DEFAULT = Undefined, Undefined, Linear, Full, Both, Both;
    /// BT.709 primaries with linear transfer and no YCbCr encoding.
    UNDEFINED = Bt709, Undefined, Linear, Full, Both, Both;
    BT601 = Bt709, Bt601, Bt709, Limited, Even, Even;
    /// BT.601 in full range, as used by JPEG.
    BT601_ER = Bt709, Bt601, Bt709, Full, Even, Even;
    BT709 = Bt709, Bt709, Bt709, Limited, Even, Even;
    BT709_ER = Bt709, Bt709, Bt709, Full, Even, Even;
    BT709_LINEAR = Bt709, Bt709, Linear, Limited, Even, Even;
    BT2020 = Bt2020, Bt2020, Bt2020, Limited, Even, Even;
    BT2020_ER = Bt2020, Bt2020, Bt2020, Full, Even, Even;
    BT2020_LINEAR = Bt2020, Bt2020, Linear, Limited, Even, Even;
    BT2020_PQ = Bt2020, Bt2020, Pq, Limited, Even, Even;
    BT2020_PQ_ER = Bt2020, Bt2020, Pq, Full, Even, Even;
    BT2020C = Bt2020, Bt2020c, Bt2020, Limited, Even, Even;
    BT2020C_ER = Bt2020, Bt2020c, Bt2020, Full, Even, Even;
    MPEG2_BT601 = Bt709, Bt601, Bt709, Full, Even, Center;
    MPEG2_BT709 = Bt709, Bt709, Bt709, Full, Even, Center;
    MPEG2_SMPTE240M = Bt709, Smpte240m, Smpte240m, Full, Even, Center;
    SRGB = Bt709, Undefined, Srgb, Full, Both, Both;
    SYCC = Bt709, Bt601, Sycc, Full, Center, Center;
    SMPTE240M = Bt709, Smpte240m, Smpte240m, Limited, Even, Even;
    DISPLAY_P3 = DciP3, Undefined, Srgb, Full, Both, Both;
    DISPLAY_P3_LINEAR = DciP3, Undefined, Linear, Full, Both, Both;
    SENSOR = Sensor, Undefined, Linear, Full, Both, Both;
}

impl ColorSpec {
    const SPACE: Field = Field::new(0, 3);
    const TRANSFER: Field = Field::new(3, 4);
    const ENCODING: Field = Field::new(7, 3);
    const LOC_HORIZ: Field = Field::new(10, 2);
    const LOC_VERT: Field = Field::new(12, 2);
    const RANGE: Field = Field::new(14, 1);

    /// The width of the packed specification.
    pub(crate) const BITS: u32 = 15;

    pub const INVALID: Self = ColorSpec(i32::MAX as u32);

    pub const fn new(
        space: ColorSpace,
        encoding: YCbCrEncoding,
        transfer: TransferFunction,
        range: ColorRange,
        loc_horiz: ChromaLocation,
        loc_vert: ChromaLocation,
    ) -> Self {
        let bits = Self::SPACE.put(space as u64)
            | Self::TRANSFER.put(transfer as u64)
            | Self::ENCODING.put(encoding as u64)
            | Self::LOC_HORIZ.put(loc_horiz as u64)
            | Self::LOC_VERT.put(loc_vert as u64)
            | Self::RANGE.put(range as u64);
        ColorSpec(bits as u32)
    }

    /// Reinterpret packed bits. Use [`ColorSpec::is_valid`] to check them.
    pub const fn from_bits(bits: u32) -> Self {
        ColorSpec(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The bits fit the packed width and every field holds an assigned code.
    pub const fn is_valid(self) -> bool {
        let bits = self.0 as u64;
        bits >> Self::BITS == 0
            && matches!(Self::SPACE.get(bits), 0..=4 | 7)
            && Self::TRANSFER.get(bits) <= TransferFunction::Smpte240m as u64
            && Self::ENCODING.get(bits) <= YCbCrEncoding::Smpte240m as u64
    }

    pub const fn space(self) -> ColorSpace {
        match Self::SPACE.get(self.0 as u64) {
            0 => ColorSpace::Sensor,
            1 => ColorSpace::Bt601,
            2 => ColorSpace::Bt709,
            3 => ColorSpace::Bt2020,
            4 => ColorSpace::DciP3,
            _ => ColorSpace::Undefined,
        }
    }

    pub const fn encoding(self) -> YCbCrEncoding {
        match Self::ENCODING.get(self.0 as u64) {
            1 => YCbCrEncoding::Bt601,
            2 => YCbCrEncoding::Bt709,
            3 => YCbCrEncoding::Bt2020,
            4 => YCbCrEncoding::Bt2020c,
            5 => YCbCrEncoding::Smpte240m,
            _ => YCbCrEncoding::Undefined,
        }
    }

    /// The transfer function, unassigned codes read as linear.
    pub const fn transfer_function(self) -> TransferFunction {
        match Self::TRANSFER.get(self.0 as u64) {
            1 => TransferFunction::Srgb,
            2 => TransferFunction::Sycc,
            3 => TransferFunction::Pq,
            4 => TransferFunction::Bt709,
            5 => TransferFunction::Bt2020,
            6 => TransferFunction::Smpte240m,
            _ => TransferFunction::Linear,
        }
    }

    pub const fn range(self) -> ColorRange {
        match Self::RANGE.get(self.0 as u64) {
            0 => ColorRange::Full,
            _ => ColorRange::Limited,
        }
    }

    pub const fn chroma_loc_horiz(self) -> ChromaLocation {
        ChromaLocation::from_code(Self::LOC_HORIZ.get(self.0 as u64) as u8)
    }

    pub const fn chroma_loc_vert(self) -> ChromaLocation {
        ChromaLocation::from_code(Self::LOC_VERT.get(self.0 as u64) as u8)
    }

    const fn with_field(self, field: Field, value: u64) -> Self {
        ColorSpec(field.set(self.0 as u64, value) as u32)
    }

    pub const fn with_space(self, space: ColorSpace) -> Self {
        self.with_field(Self::SPACE, space as u64)
    }

    pub const fn with_encoding(self, encoding: YCbCrEncoding) -> Self {
        self.with_field(Self::ENCODING, encoding as u64)
    }

    pub const fn with_transfer_function(self, transfer: TransferFunction) -> Self {
        self.with_field(Self::TRANSFER, transfer as u64)
    }

    pub const fn with_range(self, range: ColorRange) -> Self {
        self.with_field(Self::RANGE, range as u64)
    }

    pub const fn with_chroma_loc(self, horiz: ChromaLocation, vert: ChromaLocation) -> Self {
        self.with_field(Self::LOC_HORIZ, horiz as u64)
            .with_field(Self::LOC_VERT, vert as u64)
    }

    fn name(self) -> Option<&'static str> {
        if self == ColorSpec::INVALID {
            return Some("INVALID");
        }

        COLOR_SPEC_NAMES
            .iter()
            .find(|(spec, _)| *spec == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Debug for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "ColorSpec::{name}"),
            None => f
                .debug_struct("ColorSpec")
                .field("space", &self.space())
                .field("encoding", &self.encoding())
                .field("transfer", &self.transfer_function())
                .field("range", &self.range())
                .field("loc_horiz", &self.chroma_loc_horiz())
                .field("loc_vert", &self.chroma_loc_vert())
                .finish(),
        }
    }
}

impl fmt::Display for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "{:?}/{:?}/{:?}/{:?}/{:?},{:?}",
                self.space(),
                self.encoding(),
                self.transfer_function(),
                self.range(),
                self.chroma_loc_horiz(),
                self.chroma_loc_vert(),
            ),
        }
    }
}

impl ChromaLocation {
    pub const fn from_code(code: u8) -> Self {
        match code & 0x3 {
            0 => ChromaLocation::Even,
            1 => ChromaLocation::Center,
            2 => ChromaLocation::Odd,
            _ => ChromaLocation::Both,
        }
    }
}

impl RawPattern {
    pub const fn from_code(code: u8) -> Self {
        use RawPattern::*;
        const ALL: [RawPattern; 14] = [
            Invalid, BayerRggb, BayerBggr, BayerGrbg, BayerGbrg, BayerRccb, BayerBccr, BayerCrbc,
            BayerCbrc, BayerRccc, BayerCrcc, BayerCcrc, BayerCccr, BayerCccc,
        ];

        if (code as usize) < ALL.len() {
            ALL[code as usize]
        } else {
            Invalid
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, RawPattern::Invalid)
    }
}

impl ChromaSubsampling {
    /// No subsampling.
    pub const NONE: Self = ChromaSubsampling::Css444;

    pub const ALL: [Self; 6] = [
        ChromaSubsampling::Css444,
        ChromaSubsampling::Css422,
        ChromaSubsampling::Css422R,
        ChromaSubsampling::Css411,
        ChromaSubsampling::Css411R,
        ChromaSubsampling::Css420,
    ];

    pub const fn from_code(code: u8) -> Option<Self> {
        if (code as usize) < Self::ALL.len() {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Find the subsampling with the given number of chroma samples per four luma samples.
    pub fn from_samples(horiz: u32, vert: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|css| css.samples_horiz() == horiz && css.samples_vert() == vert)
    }

    /// Chroma samples in a horizontal run of four luma samples.
    pub const fn samples_horiz(self) -> u32 {
        match self {
            ChromaSubsampling::Css444
            | ChromaSubsampling::Css422R
            | ChromaSubsampling::Css411R => 4,
            ChromaSubsampling::Css422 | ChromaSubsampling::Css420 => 2,
            ChromaSubsampling::Css411 => 1,
        }
    }

    /// Chroma samples in a vertical run of four luma samples.
    pub const fn samples_vert(self) -> u32 {
        match self {
            ChromaSubsampling::Css444 | ChromaSubsampling::Css422 | ChromaSubsampling::Css411 => 4,
            ChromaSubsampling::Css422R | ChromaSubsampling::Css420 => 2,
            ChromaSubsampling::Css411R => 1,
        }
    }
}

impl fmt::Display for ChromaSubsampling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ChromaSubsampling::Css444 => "444",
            ChromaSubsampling::Css422 => "422",
            ChromaSubsampling::Css422R => "422R",
            ChromaSubsampling::Css411 => "411",
            ChromaSubsampling::Css411R => "411R",
            ChromaSubsampling::Css420 => "420",
        })
    }
}

#[test]
fn spec_codes() {
    // Space, transfer, encoding, locations and range in ascending bit order.
    assert_eq!(ColorSpec::BT601.bits(), 2 | 4 << 3 | 1 << 7 | 1 << 14);
    assert_eq!(ColorSpec::DEFAULT.bits(), 7 | 3 << 10 | 3 << 12);
    assert_eq!(ColorSpec::SENSOR.bits(), 3 << 10 | 3 << 12);
}

#[test]
fn spec_fields_round_trip() {
    let spec = ColorSpec::BT709
        .with_space(ColorSpace::DciP3)
        .with_transfer_function(TransferFunction::Pq)
        .with_range(ColorRange::Full)
        .with_chroma_loc(ChromaLocation::Odd, ChromaLocation::Center);

    assert_eq!(spec.space(), ColorSpace::DciP3);
    assert_eq!(spec.encoding(), YCbCrEncoding::Bt709);
    assert_eq!(spec.transfer_function(), TransferFunction::Pq);
    assert_eq!(spec.range(), ColorRange::Full);
    assert_eq!(spec.chroma_loc_horiz(), ChromaLocation::Odd);
    assert_eq!(spec.chroma_loc_vert(), ChromaLocation::Center);
    assert!(spec.is_valid());

    assert_eq!(ColorSpec::BT709.with_range(ColorRange::Full), ColorSpec::BT709_ER);
    assert_eq!(ColorSpec::BT601.with_space(ColorSpec::BT601.space()), ColorSpec::BT601);
}

#[test]
fn spec_names_are_distinct() {
    for (idx, (a, name)) in COLOR_SPEC_NAMES.iter().enumerate() {
        assert!(a.is_valid(), "{name}");
        for (b, other) in &COLOR_SPEC_NAMES[idx + 1..] {
            assert_ne!(a, b, "{name} and {other}");
        }
    }

    assert_eq!(ColorSpec::MPEG2_BT709.to_string(), "MPEG2_BT709");
    assert!(!ColorSpec::INVALID.is_valid());
}

#[test]
fn subsampling_samples() {
    for css in ChromaSubsampling::ALL {
        let found = ChromaSubsampling::from_samples(css.samples_horiz(), css.samples_vert());
        assert_eq!(found, Some(css));
    }

    assert_eq!(ChromaSubsampling::from_samples(2, 2), Some(ChromaSubsampling::Css420));
    assert_eq!(ChromaSubsampling::from_samples(3, 4), None);
}

#[test]
fn model_families() {
    assert!(ColorModel::RGB.is_rgb_like());
    assert!(ColorModel::new(8).is_rgb_like());
    assert!(!ColorModel::RAW.is_rgb_like());
    assert!(ColorModel::XYZ.is_extended());
    assert!(!ColorModel::new(74).is_valid());
    assert!(ColorModel::YCBCR.has_color_spec());
    assert!(!ColorModel::RAW.has_color_spec());
}
