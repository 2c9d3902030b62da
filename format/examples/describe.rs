//! Prints the fields of encoded image formats.
//!
//! Values are given as arguments, in decimal or as `0x` prefixed hexadecimal. Without arguments
//! a few predefined formats are described.
use image_format::{FormatError, ImageFormat};

fn parse(arg: &str) -> Option<i64> {
    match arg.strip_prefix("0x") {
        // Encoded formats with a negative sign are usually written as unsigned hex.
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16)
            .ok()
            .map(|value| value as i64),
        None => arg.parse().ok(),
    }
}

fn describe(value: i64) -> Result<(), FormatError> {
    let format = ImageFormat::try_from(value)?;
    let desc = format.descriptor()?;

    println!("{:#018x} {format}", value as u64);
    println!("  color:       {}", desc.color);
    println!("  memory:      {}", desc.mem_layout);
    println!("  data type:   {}", desc.data_type);
    println!("  swizzle:     {}", desc.swizzle);
    for plane in 0..desc.plane_count() {
        println!(
            "  plane {plane}:     {} ({} bits, {})",
            desc.packing[plane],
            format.plane_bits_per_pixel(plane),
            format.plane_pixel_type(plane),
        );
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let values: Vec<Option<i64>> = if args.is_empty() {
        [ImageFormat::NV12, ImageFormat::UYVY_ER_BL, ImageFormat::BGRA8]
            .map(|format| Some(format.raw()))
            .to_vec()
    } else {
        args.iter().map(String::as_str).map(parse).collect()
    };

    for (idx, value) in values.into_iter().enumerate() {
        match value {
            Some(value) => {
                if let Err(err) = describe(value) {
                    println!("{value:#018x} is not an image format: {err}");
                }
            }
            None => println!("{:?} is not an integer", args.get(idx)),
        }
    }
}
