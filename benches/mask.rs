use bencher::{benchmark_group, benchmark_main, Bencher};

use tonemask::{ImageRef, ToneParams, RGBA8};

fn gradient(width: u32, height: u32) -> Vec<RGBA8> {
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width) as u8;
            let g = (y * 255 / height) as u8;
            data.push(RGBA8::new(r, g, r ^ g, 255));
        }
    }
    data
}

macro_rules! bench_mask {
    ($name:ident, $size:expr) => {
        fn $name(bencher: &mut Bencher) {
            let data = gradient($size, $size);
            let src = ImageRef::new(&data, $size, $size).unwrap();
            let params = ToneParams::default();
            let mut mask = vec![0; src.pixel_count()];
            bencher.iter(|| {
                tonemask::tone_mask(src, &params, &mut mask).unwrap();
                bencher::black_box(&mask);
            })
        }
    };
}

bench_mask!(mask_100px, 100);
bench_mask!(mask_500px, 500);
bench_mask!(mask_1000px, 1000);

fn luminance_500px(bencher: &mut Bencher) {
    let data = gradient(500, 500);
    let src = ImageRef::new(&data, 500, 500).unwrap();
    let mut lum = vec![0.0; src.pixel_count()];
    bencher.iter(|| {
        tonemask::luminance_map(src, &mut lum).unwrap();
        bencher::black_box(&lum);
    })
}

benchmark_group!(benches, mask_100px, mask_500px, mask_1000px, luminance_500px);
benchmark_main!(benches);
