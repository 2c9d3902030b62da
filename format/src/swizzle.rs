use core::fmt;

/// The source of one output channel of a swizzle.
///
/// Channels are agnostic of the color model, `X` is the first channel of whatever model the
/// format uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channel {
    /// The constant zero.
    Zero = 0,
    X = 1,
    Y = 2,
    Z = 3,
    W = 4,
    /// The constant maximum value of the channel.
    One = 5,
    Invalid = 7,
}

/// Maps the channels of the stored planes onto the canonical `(x, y, z, w)` vector.
///
/// Each of the four output slots either selects one of the stored channels or a constant. For
/// example `XYZ1` reads three channels and sets the fourth to its maximum, `ZYXW` swaps the first
/// and third channel as needed for BGRA data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(transparent)]
pub struct Swizzle(u16);

impl Channel {
    pub const fn from_code(code: u8) -> Self {
        match code {
            0 => Channel::Zero,
            1 => Channel::X,
            2 => Channel::Y,
            3 => Channel::Z,
            4 => Channel::W,
            5 => Channel::One,
            _ => Channel::Invalid,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// The 1-based index of the stored channel that is read, if any.
    pub const fn source(self) -> Option<u8> {
        match self {
            Channel::X | Channel::Y | Channel::Z | Channel::W => Some(self as u8),
            _ => None,
        }
    }

    pub const fn is_constant(self) -> bool {
        matches!(self, Channel::Zero | Channel::One)
    }

    /// The channel reading the given 1-based source index.
    pub(crate) const fn with_source(index: u8) -> Self {
        match index {
            1 => Channel::X,
            2 => Channel::Y,
            3 => Channel::Z,
            4 => Channel::W,
            _ => Channel::Invalid,
        }
    }

    const fn letter(self) -> char {
        match self {
            Channel::Zero => '0',
            Channel::X => 'X',
            Channel::Y => 'Y',
            Channel::Z => 'Z',
            Channel::W => 'W',
            Channel::One => '1',
            Channel::Invalid => '?',
        }
    }
}

macro_rules! swizzles {
    ($($name:ident = $x:ident $y:ident $z:ident $w:ident;)*) => {
        impl Swizzle {
            $(
                pub const $name: Swizzle = Swizzle::new(
                    Channel::$x,
                    Channel::$y,
                    Channel::$z,
                    Channel::$w,
                );
            )*
        }

        #[cfg(test)]
        pub(crate) const NAMED_SWIZZLES: &[Swizzle] = &[$(Swizzle::$name,)*];
    };
}

swizzles! {
    _0000 = Zero Zero Zero Zero;
    _1000 = One Zero Zero Zero;
    _0001 = Zero Zero Zero One;
    XYZW = X Y Z W;
    ZYXW = Z Y X W;
    WXYZ = W X Y Z;
    WZYX = W Z Y X;
    YZWX = Y Z W X;
    XYZ1 = X Y Z One;
    XYZ0 = X Y Z Zero;
    YZW1 = Y Z W One;
    XXX1 = X X X One;
    XZY1 = X Z Y One;
    ZYX1 = Z Y X One;
    ZYX0 = Z Y X Zero;
    WZY1 = W Z Y One;
    X000 = X Zero Zero Zero;
    _0X00 = Zero X Zero Zero;
    _00X0 = Zero Zero X Zero;
    _000X = Zero Zero Zero X;
    Y000 = Y Zero Zero Zero;
    _0Y00 = Zero Y Zero Zero;
    _00Y0 = Zero Zero Y Zero;
    _000Y = Zero Zero Zero Y;
    _0XY0 = Zero X Y Zero;
    XXXY = X X X Y;
    YYYX = Y Y Y X;
    _0YX0 = Zero Y X Zero;
    X00Y = X Zero Zero Y;
    Y00X = Y Zero Zero X;
    X001 = X Zero Zero One;
    XY01 = X Y Zero One;
    XY00 = X Y Zero Zero;
    _0XZ0 = Zero X Z Zero;
    _0ZX0 = Zero Z X Zero;
    XZY0 = X Z Y Zero;
    YZX1 = Y Z X One;
    ZYW1 = Z Y W One;
    _0YX1 = Zero Y X One;
    XYXZ = X Y X Z;
    YXZX = Y X Z X;
    XZ00 = X Z Zero Zero;
    WYXZ = W Y X Z;
    YX00 = Y X Zero Zero;
    YX01 = Y X Zero One;
    _00YX = Zero Zero Y X;
    _00XY = Zero Zero X Y;
    _0XY1 = Zero X Y One;
    _0X01 = Zero X Zero One;
    YZXW = Y Z X W;
    YW00 = Y W Zero Zero;
    XYW0 = X Y W Zero;
    YZW0 = Y Z W Zero;
}

impl Swizzle {
    /// All four slots invalid.
    pub const INVALID: Self = Swizzle::new(
        Channel::Invalid,
        Channel::Invalid,
        Channel::Invalid,
        Channel::Invalid,
    );

    pub const fn new(x: Channel, y: Channel, z: Channel, w: Channel) -> Self {
        Swizzle(
            (x as u16 & 0x7)
                | (y as u16 & 0x7) << 3
                | (z as u16 & 0x7) << 6
                | (w as u16 & 0x7) << 9,
        )
    }

    pub const fn from_channels([x, y, z, w]: [Channel; 4]) -> Self {
        Swizzle::new(x, y, z, w)
    }

    /// Reinterpret a 12-bit pattern, higher bits are ignored.
    pub const fn from_bits(bits: u16) -> Self {
        Swizzle(bits & 0xfff)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn channel(self, slot: usize) -> Channel {
        Channel::from_code(((self.0 >> (3 * slot)) & 0x7) as u8)
    }

    pub const fn channels(self) -> [Channel; 4] {
        [
            self.channel(0),
            self.channel(1),
            self.channel(2),
            self.channel(3),
        ]
    }

    /// Every slot holds one of the six meaningful channel codes.
    pub const fn is_valid(self) -> bool {
        let mut slot = 0;
        while slot < 4 {
            if matches!(self.channel(slot), Channel::Invalid) {
                return false;
            }
            slot += 1;
        }
        true
    }

    /// The number of stored channels the swizzle reads.
    ///
    /// This is the highest source referenced by any slot. `XXX1` reads a single channel while
    /// `YZW1` expects four stored channels of which the first is dropped.
    pub const fn channel_count(self) -> u32 {
        let mut count = 0;
        let mut slot = 0;
        while slot < 4 {
            if let Some(source) = self.channel(slot).source() {
                if source as u32 > count {
                    count = source as u32;
                }
            }
            slot += 1;
        }
        count
    }

    /// Replace a constant `1` in the last slot by `0`.
    ///
    /// Formats which only differ in whether a missing alpha reads as opaque share their memory
    /// layout.
    pub(crate) const fn normalize_alpha(self) -> Self {
        match self.channel(3) {
            Channel::One => {
                let [x, y, z, _] = self.channels();
                Swizzle::new(x, y, z, Channel::Zero)
            }
            _ => self,
        }
    }
}

impl fmt::Debug for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Swizzle({self})")
    }
}

impl fmt::Display for Swizzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if *self == Swizzle::INVALID {
            return f.write_str("INVALID");
        }

        for channel in self.channels() {
            write!(f, "{}", channel.letter())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_counts() {
        assert_eq!(Swizzle::_0000.channel_count(), 0);
        assert_eq!(Swizzle::X000.channel_count(), 1);
        assert_eq!(Swizzle::XXX1.channel_count(), 1);
        assert_eq!(Swizzle::XY00.channel_count(), 2);
        assert_eq!(Swizzle::XYZ0.channel_count(), 3);
        assert_eq!(Swizzle::XYXZ.channel_count(), 3);
        assert_eq!(Swizzle::YZW1.channel_count(), 4);
        assert_eq!(Swizzle::ZYXW.channel_count(), 4);
    }

    #[test]
    fn encoding_matches_slots() {
        assert_eq!(Swizzle::XYZW.bits(), 1 | 2 << 3 | 3 << 6 | 4 << 9);
        assert_eq!(Swizzle::INVALID.bits(), 0xfff);
        assert_eq!(
            Swizzle::YZWX.channels(),
            [Channel::Y, Channel::Z, Channel::W, Channel::X]
        );
    }

    #[test]
    fn validity() {
        assert!(Swizzle::_0000.is_valid());
        assert!(!Swizzle::INVALID.is_valid());
        // Code 6 is not assigned to any channel.
        assert!(!Swizzle::from_bits(6).is_valid());
    }

    #[test]
    fn names() {
        assert_eq!(Swizzle::_0XY0.to_string(), "0XY0");
        assert_eq!(Swizzle::XYZ1.to_string(), "XYZ1");
        assert_eq!(Swizzle::INVALID.to_string(), "INVALID");
    }

    #[test]
    fn alpha_normalization() {
        assert_eq!(Swizzle::XYZ1.normalize_alpha(), Swizzle::XYZ0);
        assert_eq!(Swizzle::XYZW.normalize_alpha(), Swizzle::XYZW);
        assert_eq!(Swizzle::X001.normalize_alpha(), Swizzle::X000);
    }
}
