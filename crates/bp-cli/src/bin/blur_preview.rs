use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use blur_preview::{
    BlurConfig, BorderMode, Encoding, PassMode, PreviewConfig, RgbaImage, decode,
    downsample_mean, encode, expand, gaussian_blur, render_preview,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "blur_preview")]
#[command(about = "Build blurred low-resolution previews of PNG images")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Gaussian-blur an image at its own resolution.
    #[command(name = "blur")]
    Blur(BlurArgs),
    /// Block-upscale an image to a target size.
    #[command(name = "expand")]
    Expand(ExpandArgs),
    /// Box-downsample an image by an integer factor.
    #[command(name = "shrink")]
    Shrink(ShrinkArgs),
    /// Write an image's RGBA samples as text.
    #[command(name = "encode")]
    Encode(EncodeArgs),
    /// Rebuild a PNG from encoded text.
    #[command(name = "decode")]
    Decode(DecodeArgs),
    /// Downsample, blur and expand in one go.
    #[command(name = "preview")]
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Clone)]
struct IoArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, required = true)]
    out: PathBuf,
}

#[derive(Args, Debug, Clone, Default)]
struct BlurOpts {
    /// Odd kernel width/height in pixels.
    #[arg(long)]
    kernel_size: Option<usize>,
    /// Gaussian standard deviation.
    #[arg(long)]
    theta: Option<f32>,
    /// Intensity multiplier; 1.0 keeps brightness.
    #[arg(long, allow_hyphen_values = true)]
    phi: Option<f32>,
    #[arg(long, value_enum)]
    border: Option<BorderArg>,
    #[arg(long, value_enum)]
    pass: Option<PassArg>,
}

#[derive(Args, Debug, Clone)]
struct BlurArgs {
    #[command(flatten)]
    io: IoArgs,
    #[command(flatten)]
    blur: BlurOpts,
}

#[derive(Args, Debug, Clone)]
struct ExpandArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long)]
    width: usize,
    #[arg(long)]
    height: usize,
}

#[derive(Args, Debug, Clone)]
struct ShrinkArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, default_value_t = 8)]
    factor: usize,
}

#[derive(Args, Debug, Clone)]
struct EncodeArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long, value_enum, default_value_t = EncodingArg::Packed)]
    encoding: EncodingArg,
}

#[derive(Args, Debug, Clone)]
struct DecodeArgs {
    #[command(flatten)]
    io: IoArgs,
    #[arg(long)]
    width: usize,
    #[arg(long)]
    height: usize,
    #[arg(long, value_enum, default_value_t = EncodingArg::Packed)]
    encoding: EncodingArg,
}

#[derive(Args, Debug, Clone)]
struct PreviewArgs {
    #[command(flatten)]
    io: IoArgs,
    /// JSON file with a preview config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    downsample: Option<usize>,
    #[command(flatten)]
    blur: BlurOpts,
    /// Display width to expand the preview to (requires --height).
    #[arg(long, requires = "height")]
    width: Option<usize>,
    /// Display height to expand the preview to (requires --width).
    #[arg(long, requires = "width")]
    height: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum BorderArg {
    AsymmetricWrap,
    Wrap,
    Clamp,
    #[value(name = "reflect101")]
    Reflect101,
    Zero,
}

impl From<BorderArg> for BorderMode {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::AsymmetricWrap => BorderMode::AsymmetricWrap,
            BorderArg::Wrap => BorderMode::Wrap,
            BorderArg::Clamp => BorderMode::Clamp,
            BorderArg::Reflect101 => BorderMode::Reflect101,
            BorderArg::Zero => BorderMode::Zero,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PassArg {
    DoubleBuffer,
    InPlace,
}

impl From<PassArg> for PassMode {
    fn from(arg: PassArg) -> Self {
        match arg {
            PassArg::DoubleBuffer => PassMode::DoubleBuffer,
            PassArg::InPlace => PassMode::InPlace,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum EncodingArg {
    Packed,
    PerSample,
}

impl From<EncodingArg> for Encoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Packed => Encoding::Packed,
            EncodingArg::PerSample => Encoding::PerSample,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct MetaPreview {
    source_size: [usize; 2],
    output_size: [usize; 2],
    config: PreviewConfig,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Blur(args) => run_blur(args),
        Command::Expand(args) => run_expand(args),
        Command::Shrink(args) => run_shrink(args),
        Command::Encode(args) => run_encode(args),
        Command::Decode(args) => run_decode(args),
        Command::Preview(args) => run_preview(args),
    }
}

fn run_blur(args: BlurArgs) -> Result<()> {
    let img = load_input_rgba(&args.io.input)?;
    let cfg = apply_blur_opts(BlurConfig::default(), &args.blur);

    let (w, h) = img.dimensions();
    let out = gaussian_blur(img, &cfg)
        .with_context(|| format!("blurring {}", args.io.input.display()))?;
    info!(
        "blurred {w}x{h} with n={} theta={} phi={}",
        cfg.kernel_size, cfg.theta, cfg.phi
    );

    save_rgba(&args.io.out, &out)
}

fn run_expand(args: ExpandArgs) -> Result<()> {
    let img = load_input_rgba(&args.io.input)?;
    let out = expand(&img, args.width, args.height).with_context(|| {
        format!(
            "expanding {} to {}x{}",
            args.io.input.display(),
            args.width,
            args.height
        )
    })?;
    info!(
        "expanded {}x{} to {}x{}",
        img.width(),
        img.height(),
        out.width(),
        out.height()
    );

    save_rgba(&args.io.out, &out)
}

fn run_shrink(args: ShrinkArgs) -> Result<()> {
    let img = load_input_rgba(&args.io.input)?;
    let out = downsample_mean(&img, args.factor).with_context(|| {
        format!(
            "downsampling {} by {}",
            args.io.input.display(),
            args.factor
        )
    })?;
    info!(
        "downsampled {}x{} to {}x{}",
        img.width(),
        img.height(),
        out.width(),
        out.height()
    );

    save_rgba(&args.io.out, &out)
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let img = load_input_rgba(&args.io.input)?;
    let encoding = Encoding::from(args.encoding);
    let text = encode(img.as_raw(), encoding);

    fs::write(&args.io.out, &text)
        .with_context(|| format!("writing {}", args.io.out.display()))?;
    info!(
        "encoded {}x{} as {} ({} chars)",
        img.width(),
        img.height(),
        encoding.name(),
        text.len()
    );
    Ok(())
}

fn run_decode(args: DecodeArgs) -> Result<()> {
    ensure_file_exists(&args.io.input, "encoded text")?;
    let text = fs::read_to_string(&args.io.input)
        .with_context(|| format!("reading {}", args.io.input.display()))?;
    let img = decode(text.trim_end(), args.width, args.height, args.encoding.into())
        .with_context(|| {
            format!(
                "decoding {} as {}x{}",
                args.io.input.display(),
                args.width,
                args.height
            )
        })?;

    save_rgba(&args.io.out, &img)
}

fn run_preview(args: PreviewArgs) -> Result<()> {
    let mut cfg = match &args.config {
        Some(path) => {
            ensure_file_exists(path, "config")?;
            read_json::<PreviewConfig>(path)?
        }
        None => PreviewConfig::default(),
    };

    if let Some(factor) = args.downsample {
        cfg.downsample = factor;
    }
    cfg.blur = apply_blur_opts(cfg.blur, &args.blur);
    if let (Some(w), Some(h)) = (args.width, args.height) {
        cfg.target = Some((w, h));
    }

    let img = load_input_rgba(&args.io.input)?;
    let source_size = [img.width(), img.height()];
    let out = render_preview(img, &cfg)
        .with_context(|| format!("rendering preview of {}", args.io.input.display()))?;
    info!(
        "preview {}x{} -> {}x{}",
        source_size[0],
        source_size[1],
        out.width(),
        out.height()
    );

    save_rgba(&args.io.out, &out)?;
    write_json(
        meta_path(&args.io.out),
        &MetaPreview {
            source_size,
            output_size: [out.width(), out.height()],
            config: cfg,
        },
    )
}

/// `meta.json` in the same directory as the preview PNG.
fn meta_path(out: &Path) -> PathBuf {
    out.with_file_name("meta.json")
}

fn apply_blur_opts(mut cfg: BlurConfig, opts: &BlurOpts) -> BlurConfig {
    if let Some(n) = opts.kernel_size {
        cfg.kernel_size = n;
    }
    if let Some(theta) = opts.theta {
        cfg.theta = theta;
    }
    if let Some(phi) = opts.phi {
        cfg.phi = phi;
    }
    if let Some(border) = opts.border {
        cfg.border = border.into();
    }
    if let Some(pass) = opts.pass {
        cfg.pass = pass.into();
    }
    cfg
}

fn load_input_rgba(path: &Path) -> Result<RgbaImage> {
    ensure_file_exists(path, "input image")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let data = rgba.into_raw();

    RgbaImage::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing rgba buffer from {}", path.display()))
}

fn save_rgba(path: &Path, img: &RgbaImage) -> Result<()> {
    let rgba = image::RgbaImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.as_raw().to_vec(),
    )
    .context("constructing RgbaImage from raw bytes")?;
    rgba.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use blur_preview::{BorderMode, PassMode};
    use clap::Parser;

    use std::path::{Path, PathBuf};

    use super::{BlurConfig, Cli, Command, apply_blur_opts, meta_path};

    #[test]
    fn blur_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "blur_preview",
            "blur",
            "--input",
            "in.png",
            "--out",
            "out.png",
            "--kernel-size",
            "5",
            "--phi",
            "-0.5",
            "--border",
            "reflect101",
            "--pass",
            "in-place",
        ])
        .expect("valid args");

        let Command::Blur(args) = cli.cmd else {
            panic!("expected blur subcommand");
        };
        let cfg = apply_blur_opts(BlurConfig::default(), &args.blur);
        assert_eq!(cfg.kernel_size, 5);
        assert_eq!(cfg.theta, 1.0);
        assert_eq!(cfg.phi, -0.5);
        assert_eq!(cfg.border, BorderMode::Reflect101);
        assert_eq!(cfg.pass, PassMode::InPlace);
    }

    #[test]
    fn preview_target_needs_both_dimensions() {
        let err = Cli::try_parse_from([
            "blur_preview",
            "preview",
            "--input",
            "in.png",
            "--out",
            "out.png",
            "--width",
            "640",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn preview_meta_lands_next_to_png() {
        assert_eq!(
            meta_path(Path::new("renders/cat_preview.png")),
            PathBuf::from("renders/meta.json")
        );
        assert_eq!(meta_path(Path::new("out.png")), PathBuf::from("meta.json"));
    }
}
