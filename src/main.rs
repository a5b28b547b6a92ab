//! `citywalk [preset.toml] [--reduced-motion] [--schema <out.json>]`
//!
//! Opens the city walk window. A preset overrides the default options,
//! `--reduced-motion` starts with the camera paused, and `--schema` writes
//! the options JSON Schema to a file and exits.

use std::path::PathBuf;

use citywalk::{options::Options, CityError, Viewer};

#[derive(Debug, Default)]
struct Args {
    preset: Option<PathBuf>,
    reduced_motion: bool,
    schema_out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--reduced-motion" => parsed.reduced_motion = true,
            "--schema" => {
                let out = args
                    .next()
                    .ok_or_else(|| "--schema needs an output path".to_owned())?;
                parsed.schema_out = Some(PathBuf::from(out));
            }
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag: {flag}"));
            }
            path => {
                if parsed.preset.is_some() {
                    return Err(format!("unexpected argument: {path}"));
                }
                parsed.preset = Some(PathBuf::from(path));
            }
        }
    }
    Ok(parsed)
}

fn run(args: &Args) -> Result<(), CityError> {
    if let Some(out) = &args.schema_out {
        Options::save_schema(out)?;
        log::info!("options schema written to {}", out.display());
        return Ok(());
    }

    let mut options = match &args.preset {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if args.reduced_motion {
        options.accessibility.reduced_motion = true;
    }

    Viewer::builder().with_options(options).build().run()
}

fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: citywalk [preset.toml] [--reduced-motion] [--schema <out.json>]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
