use core::fmt;

use crate::bits::{decode_bpp, packing_code};
use crate::error::FormatError;
use crate::swizzle::Swizzle;

/// How the channels of one plane are packed into a storage word.
///
/// The value is a compact code `bpp << 6 | (components - 1) << 4 | variant`, where `bpp` is the
/// exponent-like width code of the whole pixel. Only the predefined packings are meaningful.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Packing(u32);

/// The order of components within a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endianness {
    Invalid,
    /// Components are ordered as in the native integer of the machine.
    Host,
    /// The most significant byte has the lowest address.
    Big,
}

/// The decoded form of a packing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PackingParams {
    pub endianness: Endianness,
    /// Which channel each stored component belongs to.
    pub swizzle: Swizzle,
    /// Bits of each component, `0` for components that do not exist.
    pub bits: [u32; 4],
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PackingInfo {
    pub(crate) packing: Packing,
    pub(crate) name: &'static str,
    pub(crate) swizzle: Swizzle,
    pub(crate) bits: [u32; 4],
}

macro_rules! packings {
    ($($(#[$attr:meta])* $name:ident = $code:expr => $swizzle:ident [$($bits:expr),*];)*) => {
        impl Packing {
            $($(#[$attr])* pub const $name: Packing = Packing($code);)*
        }

        pub(crate) const PACKINGS: &[PackingInfo] = &[
            $(PackingInfo {
                packing: Packing::$name,
                name: stringify!($name),
                swizzle: Swizzle::$swizzle,
                bits: packings!(@bits $($bits),*),
            },)*
        ];
    };
    (@bits $b0:expr) => { [$b0, 0, 0, 0] };
    (@bits $b0:expr, $b1:expr) => { [$b0, $b1, 0, 0] };
    (@bits $b0:expr, $b1:expr, $b2:expr) => { [$b0, $b1, $b2, 0] };
    (@bits $b0:expr, $b1:expr, $b2:expr, $b3:expr) => { [$b0, $b1, $b2, $b3] };
}

packings! {
    /// One 1-bit channel.
    X1 = packing_code(1, 1) => X000 [1];
    X2 = packing_code(2, 1) => X000 [2];
    X4 = packing_code(4, 1) => X000 [4];
    /// One 8-bit channel.
    X8 = packing_code(8, 1) => X000 [8];
    /// Two 4-bit channels in one byte.
    X4Y4 = packing_code(8, 2) => XY00 [4, 4];
    X3Y3Z2 = packing_code(8, 3) => XYZ0 [3, 3, 2];

    X16 = packing_code(16, 1) => X000 [16];
    /// One 10-bit channel in the least significant bits of a 16-bit word.
    B6X10 = packing_code(16, 1) + 1 => X000 [10];
    /// One 10-bit channel in the most significant bits of a 16-bit word.
    X10B6 = packing_code(16, 1) + 2 => X000 [10];
    B4X12 = packing_code(16, 1) + 3 => X000 [12];
    X12B4 = packing_code(16, 1) + 4 => X000 [12];
    B2X14 = packing_code(16, 1) + 5 => X000 [14];
    /// Two 8-bit channels in two bytes.
    X8_Y8 = packing_code(16, 2) => XY00 [8, 8];
    X5Y5Z6 = packing_code(16, 3) => XYZ0 [5, 5, 6];
    X5Y6Z5 = packing_code(16, 3) + 1 => XYZ0 [5, 6, 5];
    X6Y5Z5 = packing_code(16, 3) + 2 => XYZ0 [6, 5, 5];
    B4X4Y4Z4 = packing_code(16, 3) + 3 => XYZ0 [4, 4, 4];
    B1X5Y5Z5 = packing_code(16, 3) + 4 => XYZ0 [5, 5, 5];
    X5Y5B1Z5 = packing_code(16, 3) + 5 => XYZ0 [5, 5, 5];
    X1Y5Z5W5 = packing_code(16, 4) => XYZW [1, 5, 5, 5];
    X4Y4Z4W4 = packing_code(16, 4) + 1 => XYZW [4, 4, 4, 4];
    X5Y1Z5W5 = packing_code(16, 4) + 2 => XYZW [5, 1, 5, 5];
    X5Y5Z1W5 = packing_code(16, 4) + 3 => XYZW [5, 5, 1, 5];
    X5Y5Z5W1 = packing_code(16, 4) + 4 => XYZW [5, 5, 5, 1];
    /// Two pixels sharing their second and third channel, as in YUYV.
    X8_Y8__X8_Z8 = packing_code(16, 4) + 5 => XYXZ [8, 8, 8, 8];
    /// Two pixels sharing their second and third channel, as in UYVY.
    Y8_X8__Z8_X8 = packing_code(16, 4) + 6 => YXZX [8, 8, 8, 8];

    X24 = packing_code(24, 1) => X000 [24];
    X8_Y8_Z8 = packing_code(24, 3) => XYZ0 [8, 8, 8];

    X32 = packing_code(32, 1) => X000 [32];
    B12X20 = packing_code(32, 1) + 1 => X000 [20];
    X16_Y16 = packing_code(32, 2) => XY00 [16, 16];
    X10B6_Y10B6 = packing_code(32, 2) + 1 => XY00 [10, 10];
    X12B4_Y12B4 = packing_code(32, 2) + 2 => XY00 [12, 12];
    X10Y11Z11 = packing_code(32, 3) => XYZ0 [10, 11, 11];
    X11Y11Z10 = packing_code(32, 3) + 1 => XYZ0 [11, 11, 10];
    X8_Y8_Z8_W8 = packing_code(32, 4) => XYZW [8, 8, 8, 8];
    X2Y10Z10W10 = packing_code(32, 4) + 1 => XYZW [2, 10, 10, 10];
    X10Y10Z10W2 = packing_code(32, 4) + 2 => XYZW [10, 10, 10, 2];

    X48 = packing_code(48, 1) => X000 [48];
    X16_Y16_Z16 = packing_code(48, 3) => XYZ0 [16, 16, 16];

    X64 = packing_code(64, 1) => X000 [64];
    X32_Y32 = packing_code(64, 2) => XY00 [32, 32];
    X16_Y16_Z16_W16 = packing_code(64, 4) => XYZW [16, 16, 16, 16];

    X96 = packing_code(96, 1) => X000 [96];
    X32_Y32_Z32 = packing_code(96, 3) => XYZ0 [32, 32, 32];

    X128 = packing_code(128, 1) => X000 [128];
    X64_Y64 = packing_code(128, 2) => XY00 [64, 64];
    X32_Y32_Z32_W32 = packing_code(128, 4) => XYZW [32, 32, 32, 32];

    X192 = packing_code(192, 1) => X000 [192];
    X64_Y64_Z64 = packing_code(192, 3) => XYZ0 [64, 64, 64];

    X256 = packing_code(256, 1) => X000 [256];
    X64_Y64_Z64_W64 = packing_code(256, 4) => XYZW [64, 64, 64, 64];
}

impl Packing {
    /// An absent plane without channels.
    pub const NONE: Self = Packing(0);
    pub const INVALID: Self = Packing(i32::MAX as u32);

    /// Reinterpret a code. Use [`Packing::is_known`] to check that it names a packing.
    pub const fn from_code(code: u32) -> Self {
        Packing(code)
    }

    pub const fn code(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this is one of the predefined packings, or `NONE`.
    pub const fn is_known(self) -> bool {
        self.is_none() || self.info().is_some()
    }

    pub(crate) const fn info(self) -> Option<&'static PackingInfo> {
        let mut idx = 0;
        while idx < PACKINGS.len() {
            if PACKINGS[idx].packing.0 == self.0 {
                return Some(&PACKINGS[idx]);
            }
            idx += 1;
        }
        None
    }

    /// The number of components stored per pixel, counting shared channels once per pixel.
    pub const fn component_count(self) -> u32 {
        match self.info() {
            Some(_) => ((self.0 >> 4) & 0x3) + 1,
            None => 0,
        }
    }

    /// The number of distinct channels of the packing.
    ///
    /// Packings of two pixels that share channels, such as `X8_Y8__X8_Z8`, hold three channels
    /// in four components.
    pub const fn channel_count(self) -> u32 {
        match self.info() {
            Some(info) => info.swizzle.channel_count(),
            None => 0,
        }
    }

    pub const fn bits_per_component(self) -> [u32; 4] {
        match self.info() {
            Some(info) => info.bits,
            None => [0; 4],
        }
    }

    /// Storage bits per pixel, including padding bits.
    pub const fn bits_per_pixel(self) -> u32 {
        match self.info() {
            Some(_) => decode_bpp((self.0 >> 6) & 0xf, self.0 & 0xf),
            None => 0,
        }
    }

    /// Bits of each distinct channel, in channel order.
    pub(crate) const fn bits_per_channel(self) -> [u32; 4] {
        let mut out = [0; 4];
        if let Some(info) = self.info() {
            let mut slot = 0;
            while slot < 4 {
                if let Some(source) = info.swizzle.channel(slot).source() {
                    out[source as usize - 1] = info.bits[slot];
                }
                slot += 1;
            }
        }
        out
    }

    pub fn params(self) -> Option<PackingParams> {
        if self.is_none() {
            return Some(PackingParams {
                endianness: Endianness::Host,
                swizzle: Swizzle::_0000,
                bits: [0; 4],
            });
        }

        self.info().map(|info| PackingParams {
            endianness: Endianness::Host,
            swizzle: info.swizzle,
            bits: info.bits,
        })
    }

    /// Find the predefined packing with the given parameters.
    ///
    /// A swizzle of `0000` or `INVALID` is inferred from the number of bits, the first packing
    /// that matches wins. Packings of shared channels are only found with an explicit swizzle.
    /// Big endian components are only accepted when the byte order of the packing does not
    /// depend on it.
    pub fn from_params(params: &PackingParams) -> Result<Self, FormatError> {
        let infer = matches!(params.swizzle, Swizzle::_0000 | Swizzle::INVALID);

        let found = PACKINGS.iter().find(|info| {
            let swizzle = if infer {
                info.swizzle.channel_count() == info.packing.component_count()
            } else {
                info.swizzle == params.swizzle
            };
            info.bits == params.bits && swizzle
        });

        let info = match found {
            Some(info) => info,
            None if params.bits == [0; 4] => return Ok(Packing::NONE),
            None => return Err(FormatError::NoMatchingPacking),
        };

        match params.endianness {
            Endianness::Host => Ok(info.packing),
            Endianness::Big if info.packing.is_byte_ordered() => Ok(info.packing),
            Endianness::Big | Endianness::Invalid => Err(FormatError::NoMatchingPacking),
        }
    }

    /// Every component occupies whole bytes of its own.
    fn is_byte_ordered(self) -> bool {
        let bits = self.bits_per_component();
        let components = self.component_count() as usize;
        bits[..components].iter().all(|&b| b == 8) || (components == 1 && bits[0] <= 8)
    }

    fn name(self) -> Option<&'static str> {
        match self {
            Packing::NONE => Some("NONE"),
            Packing::INVALID => Some("INVALID"),
            _ => self.info().map(|info| info.name),
        }
    }
}

impl PackingParams {
    /// Parameters with the given bits and a swizzle inferred from them.
    pub const fn with_bits(bits: [u32; 4]) -> Self {
        PackingParams {
            endianness: Endianness::Host,
            swizzle: Swizzle::_0000,
            bits,
        }
    }
}

impl fmt::Debug for Packing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Packing::{name}"),
            None => write!(f, "Packing({:#x})", self.0),
        }
    }
}

impl fmt::Display for Packing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_abi() {
        assert_eq!(Packing::X1.code(), 1);
        assert_eq!(Packing::X8.code(), 4);
        assert_eq!(Packing::X4Y4.code(), 20);
        assert_eq!(Packing::X3Y3Z2.code(), 36);
        assert_eq!(Packing::X16.code(), 64);
        assert_eq!(Packing::X8_Y8.code(), 80);
        assert_eq!(Packing::Y8_X8__Z8_X8.code(), 118);
        assert_eq!(Packing::X8_Y8_Z8.code(), 160);
        assert_eq!(Packing::X8_Y8_Z8_W8.code(), 240);
        assert_eq!(Packing::X48.code(), 256);
        assert_eq!(Packing::X64.code(), 320);
        assert_eq!(Packing::X96.code(), 384);
        assert_eq!(Packing::X256.code(), 576);
        assert_eq!(Packing::X64_Y64_Z64_W64.code(), 624);
    }

    #[test]
    fn codes_are_unique() {
        for (idx, a) in PACKINGS.iter().enumerate() {
            for b in &PACKINGS[idx + 1..] {
                assert_ne!(a.packing, b.packing, "{} and {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn table_is_consistent() {
        for info in PACKINGS {
            let packing = info.packing;
            let components = packing.component_count() as usize;
            assert!(info.bits[..components].iter().all(|&b| b > 0), "{}", info.name);
            assert!(info.bits[components..].iter().all(|&b| b == 0), "{}", info.name);

            let used: u32 = info.bits.iter().sum();
            assert!(used <= packing.bits_per_pixel() * 2, "{}", info.name);
        }
    }

    #[test]
    fn width_and_channels_round_trip() {
        let widths = [1, 2, 4, 8, 16, 24, 32, 48, 64, 96, 128, 192, 256];
        for bpp in widths {
            for channels in 1..=4 {
                let packing = Packing::from_code(packing_code(bpp, channels));
                if !packing.is_known() {
                    continue;
                }

                assert_eq!(packing.bits_per_pixel(), bpp, "{packing}");
                assert_eq!(packing.component_count(), channels, "{packing}");
            }
        }
    }

    #[test]
    fn shared_channels() {
        assert_eq!(Packing::X8_Y8__X8_Z8.component_count(), 4);
        assert_eq!(Packing::X8_Y8__X8_Z8.channel_count(), 3);
        assert_eq!(Packing::X8_Y8__X8_Z8.bits_per_pixel(), 16);
        assert_eq!(Packing::Y8_X8__Z8_X8.bits_per_channel(), [8, 8, 8, 0]);
    }

    #[test]
    fn params_round_trip() {
        for info in PACKINGS {
            let params = info.packing.params().unwrap();
            let found = Packing::from_params(&params).unwrap();
            // Padding position is not part of the parameters, B6X10 and X10B6 look the same.
            assert_eq!(found.params(), Some(params), "{}", info.name);
            assert_eq!(found.bits_per_pixel(), info.packing.bits_per_pixel());
        }
    }

    #[test]
    fn params_inference() {
        let params = PackingParams::with_bits([8, 8, 8, 0]);
        assert_eq!(Packing::from_params(&params), Ok(Packing::X8_Y8_Z8));

        let params = PackingParams::with_bits([10, 0, 0, 0]);
        assert_eq!(Packing::from_params(&params), Ok(Packing::B6X10));

        let params = PackingParams::with_bits([0; 4]);
        assert_eq!(Packing::from_params(&params), Ok(Packing::NONE));

        let params = PackingParams::with_bits([7, 0, 0, 0]);
        assert_eq!(Packing::from_params(&params), Err(FormatError::NoMatchingPacking));
    }

    #[test]
    fn shared_channels_need_swizzle() {
        let mut params = PackingParams::with_bits([8, 8, 8, 8]);
        assert_eq!(Packing::from_params(&params), Ok(Packing::X8_Y8_Z8_W8));

        params.swizzle = Swizzle::YXZX;
        assert_eq!(Packing::from_params(&params), Ok(Packing::Y8_X8__Z8_X8));
    }

    #[test]
    fn big_endian_only_for_bytes() {
        let mut params = PackingParams::with_bits([8, 8, 8, 8]);
        params.endianness = Endianness::Big;
        assert_eq!(Packing::from_params(&params), Ok(Packing::X8_Y8_Z8_W8));

        params.bits = [5, 6, 5, 0];
        assert!(Packing::from_params(&params).is_err());
    }

    #[test]
    fn unknown_codes() {
        let bogus = Packing::from_code(packing_code(16, 2) + 7);
        assert!(!bogus.is_known());
        assert_eq!(bogus.bits_per_pixel(), 0);
        assert_eq!(bogus.params(), None);
        assert_eq!(Packing::INVALID.to_string(), "INVALID");
    }
}
