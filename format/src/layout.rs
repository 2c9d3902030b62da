use core::fmt;

/// The numeric interpretation of each channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DataType {
    Invalid = 0,
    /// Channels are unsigned integers.
    Unsigned = 1,
    /// Channels are signed integers.
    Signed = 2,
    /// Channels are IEEE floating point values.
    Float = 3,
    /// A vendor floating point representation used by image signal processors.
    ///
    /// This is the only data type with bit 2 set, formats using it have a negative encoding.
    FloatIsp = 4,
}

/// How the pixels of a plane are addressed in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MemLayout {
    Invalid = 0,
    /// Row-major, the address is `y * pitch + x * stride`.
    PitchLinear = 1,
    /// An opaque tiled layout with blocks of height 1.
    Block1Linear = 2,
    Block2Linear = 3,
    Block4Linear = 4,
    Block8Linear = 5,
    Block16Linear = 6,
    Block32Linear = 7,
}

impl DataType {
    pub const ALL: [Self; 4] = [
        DataType::Unsigned,
        DataType::Signed,
        DataType::Float,
        DataType::FloatIsp,
    ];

    /// Unassigned codes map to `Invalid`.
    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => DataType::Unsigned,
            2 => DataType::Signed,
            3 => DataType::Float,
            4 => DataType::FloatIsp,
            _ => DataType::Invalid,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, DataType::Invalid)
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            DataType::Invalid => "INVALID",
            DataType::Unsigned => "UNSIGNED",
            DataType::Signed => "SIGNED",
            DataType::Float => "FLOAT",
            DataType::FloatIsp => "FLOATISP",
        }
    }
}

impl MemLayout {
    /// The block-linear layout every block-linear consumer supports.
    pub const BLOCK_LINEAR: Self = MemLayout::Block2Linear;
    pub const PL: Self = MemLayout::PitchLinear;
    pub const BL: Self = MemLayout::BLOCK_LINEAR;

    pub const ALL: [Self; 7] = [
        MemLayout::PitchLinear,
        MemLayout::Block1Linear,
        MemLayout::Block2Linear,
        MemLayout::Block4Linear,
        MemLayout::Block8Linear,
        MemLayout::Block16Linear,
        MemLayout::Block32Linear,
    ];

    pub const fn from_code(code: u8) -> Self {
        match code {
            1 => MemLayout::PitchLinear,
            2 => MemLayout::Block1Linear,
            3 => MemLayout::Block2Linear,
            4 => MemLayout::Block4Linear,
            5 => MemLayout::Block8Linear,
            6 => MemLayout::Block16Linear,
            7 => MemLayout::Block32Linear,
            _ => MemLayout::Invalid,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self, MemLayout::Invalid)
    }

    pub const fn is_block_linear(self) -> bool {
        self.code() >= MemLayout::Block1Linear.code()
    }

    /// The height of one block in GOBs (groups of eight rows), for block-linear layouts.
    pub const fn block_height(self) -> Option<u32> {
        if self.is_block_linear() {
            Some(1 << (self.code() - MemLayout::Block1Linear.code()))
        } else {
            None
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            MemLayout::Invalid => "INVALID",
            MemLayout::PitchLinear => "PL",
            MemLayout::Block1Linear => "BL1",
            MemLayout::Block2Linear => "BL",
            MemLayout::Block4Linear => "BL4",
            MemLayout::Block8Linear => "BL8",
            MemLayout::Block16Linear => "BL16",
            MemLayout::Block32Linear => "BL32",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for MemLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn block_heights() {
    assert_eq!(MemLayout::PL.block_height(), None);
    assert_eq!(MemLayout::Block1Linear.block_height(), Some(1));
    assert_eq!(MemLayout::BL.block_height(), Some(2));
    assert_eq!(MemLayout::Block32Linear.block_height(), Some(32));
}

#[test]
fn codes_round_trip() {
    for layout in MemLayout::ALL {
        assert_eq!(MemLayout::from_code(layout.code()), layout);
    }

    for ty in DataType::ALL {
        assert_eq!(DataType::from_code(ty.code()), ty);
    }

    assert_eq!(DataType::from_code(5), DataType::Invalid);
}
