//! Benchmarks encoding, decoding and modifying image formats.
use brunch::Bench;

use image_format::color::ColorSpec;
use image_format::{ImageFormat, MemLayout, Packing, PackingParams};

const FORMATS: [ImageFormat; 6] = [
    ImageFormat::U8,
    ImageFormat::F32X2,
    ImageFormat::NV12,
    ImageFormat::UYVY_ER_BL,
    ImageFormat::RGB8,
    ImageFormat::BGRA8,
];

fn main() {
    let mut benches = brunch::Benches::default();

    benches.extend(FORMATS.map(|format| {
        Bench::new(format!("format::codec::descriptor::{format}"))
            .run(move || format.descriptor())
    }));

    benches.extend(FORMATS.map(|format| {
        let desc = format.descriptor().expect("Predefined formats decode");
        Bench::new(format!("format::codec::encode::{format}")).run(move || desc.encode())
    }));

    benches.push(
        Bench::new("format::codec::from_raw::all").run(|| {
            FORMATS
                .iter()
                .filter_map(|format| ImageFormat::from_raw(format.raw()))
                .count()
        }),
    );

    benches.push(Bench::new("format::codec::with_mem_layout::NV12").run(|| {
        ImageFormat::NV12.with_mem_layout(MemLayout::BL)
    }));

    benches.push(Bench::new("format::codec::with_color_spec::NV12").run(|| {
        ImageFormat::NV12.with_color_spec(ColorSpec::BT709)
    }));

    benches.push(Bench::new("format::codec::has_same_data_layout").run(|| {
        ImageFormat::NV12.has_same_data_layout(ImageFormat::NV12_ER)
    }));

    benches.push(Bench::new("format::codec::packing_from_params").run(|| {
        Packing::from_params(&PackingParams::with_bits([16, 16, 16, 16]))
    }));

    benches.finish();
}
