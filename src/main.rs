// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path;

use rgb::FromSlice;

use tonemask::{ImageRef, ToneParams, RGBA8};

macro_rules! timed {
    ($args:expr, $name:expr, $task:expr) => {
        if $args.perf {
            let now = std::time::Instant::now();
            let res = $task;
            println!("{}: {:.2}ms", $name, now.elapsed().as_micros() as f64 / 1000.0);
            res
        } else {
            $task
        }
    };
}

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let png_data = timed!(args, "Reading", {
        if args.in_png == "-" {
            use std::io::Read;
            let mut buf = Vec::new();
            let stdin = std::io::stdin();
            let mut handle = stdin.lock();
            handle.read_to_end(&mut buf).map_err(|_| "failed to read stdin")?;
            buf
        } else {
            std::fs::read(&args.in_png).map_err(|_| "failed to open the provided file")?
        }
    });

    let image = timed!(args, "Decoding", decode_png(&png_data))?;
    let src = ImageRef::new(&image.data, image.width, image.height)
        .map_err(|e| e.to_string())?;

    let out = if args.luminance {
        timed!(args, "Luminance", luminance_image(src))?
    } else {
        timed!(args, "Masking", tonemask::tone_mask_to_vec(src, &args.params))
            .map_err(|e| e.to_string())?
    };

    timed!(args, "Saving", save_png(&out, image.width, image.height, &args.out_png))
}

const HELP: &str = "\
tonemask creates a binary alpha mask from an image luminance.

USAGE:
  tonemask [OPTIONS] <in-png> <out-png>  # from file to file
  tonemask [OPTIONS] - <out-png>         # from stdin to file

  tonemask in.png mask.png
  tonemask --gamma 2.2 --threshold 0.4 in.png mask.png

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version

  --gamma GAMMA                 Sets the gamma. The luminance is raised to 1/GAMMA
                                [default: 1.8] [cannot be zero]
  --contrast FACTOR             Sets the contrast around the 0.5 midpoint
                                [default: 1.2]
  --brightness FACTOR           Sets the brightness. 1 is neutral
                                [default: 1]
  --threshold VALUE             Pixels with an adjusted luminance above
                                this value become opaque
                                [default: 0.1]
  --luminance                   Saves a raw luminance instead of a mask

  --perf                        Prints performance stats
  --quiet                       Disables warnings

ARGS:
  <in-png>                      Input file
  <out-png>                     Output file
";

#[derive(Debug)]
struct CliArgs {
    gamma: Option<f32>,
    contrast: Option<f32>,
    brightness: Option<f32>,
    threshold: Option<f32>,
    luminance: bool,

    perf: bool,
    quiet: bool,

    input: String,
    output: path::PathBuf,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        gamma:      input.opt_value_from_fn("--gamma", parse_gamma)?,
        contrast:   input.opt_value_from_fn("--contrast", parse_number)?,
        brightness: input.opt_value_from_fn("--brightness", parse_number)?,
        threshold:  input.opt_value_from_fn("--threshold", parse_number)?,
        luminance:  input.contains("--luminance"),

        perf:       input.contains("--perf"),
        quiet:      input.contains("--quiet"),

        input:      input.free_from_str()?,
        output:     input.free_from_str()?,
    })
}

fn parse_number(s: &str) -> Result<f32, String> {
    let n: f32 = s.parse().map_err(|_| "invalid number")?;

    if n.is_finite() {
        Ok(n)
    } else {
        Err("number must be finite".to_string())
    }
}

fn parse_gamma(s: &str) -> Result<f32, String> {
    let n = parse_number(s)?;

    if n != 0.0 {
        Ok(n)
    } else {
        Err("GAMMA cannot be zero".to_string())
    }
}

struct Args {
    in_png: String,
    out_png: path::PathBuf,
    params: ToneParams,
    luminance: bool,
    perf: bool,
    quiet: bool,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    let defaults = ToneParams::default();
    let params = ToneParams {
        gamma: args.gamma.unwrap_or(defaults.gamma),
        contrast: args.contrast.unwrap_or(defaults.contrast),
        brightness: args.brightness.unwrap_or(defaults.brightness),
        alpha_threshold: args.threshold.unwrap_or(defaults.alpha_threshold),
    };

    if args.luminance && (args.gamma.is_some() || args.contrast.is_some()
        || args.brightness.is_some() || args.threshold.is_some()) {
        println!("Warning: tone options have no effect with --luminance.");
    }

    Ok(Args {
        in_png: args.input,
        out_png: args.output,
        params,
        luminance: args.luminance,
        perf: args.perf,
        quiet: args.quiet,
    })
}

struct Image {
    data: Vec<RGBA8>,
    width: u32,
    height: u32,
}

fn decode_png(data: &[u8]) -> Result<Image, String> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| e.to_string())?;

    let mut img_data = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut img_data).map_err(|e| e.to_string())?;
    img_data.truncate(info.buffer_size());

    let data = match info.color_type {
        png::ColorType::Rgb => {
            img_data.as_rgb().iter().map(|p| RGBA8::new(p.r, p.g, p.b, 255)).collect()
        }
        png::ColorType::Rgba => {
            img_data.as_rgba().to_vec()
        }
        png::ColorType::Grayscale => {
            img_data.iter().map(|&gray| RGBA8::new(gray, gray, gray, 255)).collect()
        }
        png::ColorType::GrayscaleAlpha => {
            img_data.chunks_exact(2).map(|p| RGBA8::new(p[0], p[0], p[0], p[1])).collect()
        }
        png::ColorType::Indexed => {
            return Err("indexed PNG is not supported".to_string());
        }
    };

    Ok(Image {
        data,
        width: info.width,
        height: info.height,
    })
}

fn luminance_image(src: ImageRef) -> Result<Vec<u8>, String> {
    let mut lum = vec![0.0; src.pixel_count()];
    tonemask::luminance_map(src, &mut lum).map_err(|e| e.to_string())?;
    Ok(lum.iter().map(|v| (v.max(0.0).min(1.0) * 255.0 + 0.5) as u8).collect())
}

fn save_png(data: &[u8], width: u32, height: u32, path: &path::Path) -> Result<(), String> {
    let file = std::fs::File::create(path)
        .map_err(|_| format!("failed to create a file {:?}", path))?;
    let w = std::io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().map_err(|e| e.to_string())?;
    writer.write_image_data(data).map_err(|e| e.to_string())
}


/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, record.args()),
                log::Level::Warn  => eprintln!("Warning (in {}:{}): {}", target, line, record.args()),
                log::Level::Info  => eprintln!("Info (in {}:{}): {}", target, line, record.args()),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, record.args()),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
