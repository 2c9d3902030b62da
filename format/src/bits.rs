//! Field positions within the encoded 64-bit pattern and the arithmetic shared by all of them.

/// Specifies a run of bits within the unsigned encoding of a format.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Field {
    pub(crate) begin: u32,
    pub(crate) len: u32,
}

/// The sign bit. It carries bit 2 of the data type code.
pub(crate) const SIGN: u64 = 1 << 63;

impl Field {
    pub(crate) const SWIZZLE: Self = Field::new(0, 12);
    pub(crate) const MEM_LAYOUT: Self = Field::new(12, 3);
    /// Never set by the encoder, a set bit here is not a format.
    pub(crate) const RESERVED: Self = Field::new(15, 1);
    pub(crate) const COLOR: Self = Field::new(16, 19);
    pub(crate) const DATA_TYPE: Self = Field::new(61, 2);

    pub(crate) const fn new(begin: u32, len: u32) -> Self {
        Field { begin, len }
    }

    pub(crate) const fn mask(self) -> u64 {
        (1u64 << self.len) - 1
    }

    pub(crate) const fn get(self, bits: u64) -> u64 {
        (bits >> self.begin) & self.mask()
    }

    /// Overwrite the field, truncating `value` to the width of the field.
    pub(crate) const fn set(self, bits: u64, value: u64) -> u64 {
        (bits & !(self.mask() << self.begin)) | ((value & self.mask()) << self.begin)
    }

    pub(crate) const fn put(self, value: u64) -> u64 {
        self.set(0, value)
    }
}

/// How a packing code is squeezed into the field of one particular plane.
///
/// The code of a packing is `bpp << 6 | (channels - 1) << 4 | pack`. Planes past the first have
/// less room, each of the three parts is truncated to the width given here and a packing that
/// loses information on the way in can not be stored in that plane.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlaneField {
    pub(crate) field: Field,
    pack_len: u32,
    channel_len: u32,
    bpp_len: u32,
}

impl PlaneField {
    pub(crate) const ALL: [Self; 4] = [
        PlaneField::new(35, 3, 2, 4),
        PlaneField::new(44, 3, 1, 3),
        PlaneField::new(51, 3, 1, 3),
        PlaneField::new(58, 0, 0, 3),
    ];

    const fn new(begin: u32, pack_len: u32, channel_len: u32, bpp_len: u32) -> Self {
        PlaneField {
            field: Field::new(begin, pack_len + channel_len + bpp_len),
            pack_len,
            channel_len,
            bpp_len,
        }
    }

    /// The field value for a packing code.
    pub(crate) const fn encode(self, code: u32) -> u64 {
        let code = code as u64;
        let pack = code & 0xf;
        let channels = (code >> 4) & 0x3;
        let mut bpp = (code >> 6) & 0xf;

        // Without room for the pack bits, a single 8-bit channel takes the all-ones code.
        if self.pack_len == 0 && bpp == 0 && pack == 4 {
            bpp = u64::MAX;
        }

        Field::new(self.pack_len + self.channel_len, self.bpp_len).put(bpp)
            | Field::new(self.pack_len, self.channel_len).put(channels)
            | Field::new(0, self.pack_len).put(pack)
    }

    /// The packing code stored in a field value.
    pub(crate) const fn decode(self, value: u64) -> u32 {
        let pack = Field::new(0, self.pack_len).get(value);
        let channels = Field::new(self.pack_len, self.channel_len).get(value);
        let bpp_field = Field::new(self.pack_len + self.channel_len, self.bpp_len);
        let bpp = bpp_field.get(value);

        if self.pack_len == 0 && bpp == bpp_field.mask() {
            return 4;
        }

        (bpp << 6 | channels << 4 | pack) as u32
    }
}

/// Compact code of a bit width, the exponent-like part of a packing code.
pub(crate) const fn encode_bpp(bpp: u32) -> u32 {
    if bpp <= 8 {
        0
    } else if bpp <= 32 {
        bpp / 8 - 1
    } else if bpp <= 64 {
        bpp / 16 + 1
    } else if bpp <= 128 {
        bpp / 32 + 3
    } else {
        bpp / 64 + 5
    }
}

/// The low pack bits which distinguish the widths that share the code `0`.
pub(crate) const fn encode_small_bpp(bpp: u32) -> u32 {
    match bpp {
        1 | 2 => bpp,
        4 => 3,
        8 => 4,
        _ => 0,
    }
}

/// Invert `encode_bpp`, using the pack bits for widths up to a byte.
pub(crate) const fn decode_bpp(code: u32, pack: u32) -> u32 {
    match code {
        0 => match pack {
            1 | 2 => pack,
            3 => 4,
            4 => 8,
            _ => 0,
        },
        1..=3 => (code + 1) * 8,
        4..=5 => (code - 1) * 16,
        6..=7 => (code - 3) * 32,
        _ => (code - 5) * 64,
    }
}

/// The packing code of the first packing with the given width and channel count.
pub(crate) const fn packing_code(bpp: u32, channels: u32) -> u32 {
    (encode_bpp(bpp) & 0xf) << 6 | ((channels - 1) & 0x3) << 4 | encode_small_bpp(bpp)
}

/// Combine an unsigned pattern with the sign that bit 2 of the data type asks for.
///
/// The negative form is `-(1 + (!rest & !SIGN))` which is the same pattern with the sign bit set.
pub(crate) const fn apply_sign(rest: u64, negative: bool) -> i64 {
    if negative {
        let magnitude = (!rest & !SIGN) as i64;
        1i64.wrapping_add(magnitude).wrapping_neg()
    } else {
        (rest & !SIGN) as i64
    }
}

/// Split an encoded value into its unsigned pattern and the sign.
pub(crate) const fn strip_sign(value: i64) -> (u64, bool) {
    (value as u64 & !SIGN, value < 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTHS: [u32; 13] = [1, 2, 4, 8, 16, 24, 32, 48, 64, 96, 128, 192, 256];

    #[test]
    fn bpp_round_trip() {
        for bpp in WIDTHS {
            let code = encode_bpp(bpp);
            assert!(code < 16, "{bpp} does not fit four bits");
            assert_eq!(decode_bpp(code, encode_small_bpp(bpp)), bpp);
        }
    }

    #[test]
    fn bpp_codes_are_monotonic() {
        let codes = WIDTHS.map(encode_bpp);
        assert!(codes.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(codes, [0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn sign_is_a_single_bit() {
        for rest in [0, 1, 0x1234_5678, (1 << 63) - 1] {
            let negative = apply_sign(rest, true);
            assert!(negative < 0);
            assert_eq!(negative as u64, rest | SIGN);
            assert_eq!(strip_sign(negative), (rest, true));
            assert_eq!(strip_sign(apply_sign(rest, false)), (rest, false));
        }
    }

    #[test]
    fn field_set_leaves_neighbours() {
        let bits = u64::MAX;
        let cleared = Field::COLOR.set(bits, 0);
        assert_eq!(Field::COLOR.get(cleared), 0);
        assert_eq!(Field::MEM_LAYOUT.get(cleared), 0x7);
        assert_eq!(cleared >> 35, u64::MAX >> 35);
    }

    #[test]
    fn fourth_plane_byte() {
        let plane = PlaneField::ALL[3];
        let x8 = packing_code(8, 1);
        assert_eq!(plane.encode(x8), 0x7);
        assert_eq!(plane.decode(0x7), x8);
        assert_eq!(plane.decode(plane.encode(packing_code(16, 1))), packing_code(16, 1));
    }
}
