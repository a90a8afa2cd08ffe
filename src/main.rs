// SPDX-License-Identifier: MPL-2.0
use folio_gallery::app::{self, Flags};
use folio_gallery::gallery::Layout;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
folio_gallery - portfolio media viewer

USAGE:
  folio_gallery [OPTIONS] [IMAGE...]

OPTIONS:
  -h, --help              Print help information
      --lang <LOCALE>     UI language (e.g. en-US, ko)
      --layout <LAYOUT>   Default layout: vertical or horizontal
      --title <TITLE>     Title of the gallery built from IMAGE arguments
      --config-dir <DIR>  Directory holding settings.toml
      --manifest <FILE>   TOML manifest listing portfolio entries

ARGS:
  IMAGE                   Local path or http(s) URL of an image
";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        layout: args.opt_value_from_fn("--layout", |raw| raw.parse::<Layout>())?,
        title: args.opt_value_from_str("--title")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        manifest: args.opt_value_from_os_str("--manifest", |raw| {
            Ok::<_, std::convert::Infallible>(PathBuf::from(raw))
        })?,
        images: args
            .finish()
            .into_iter()
            .filter_map(|arg| arg.into_string().ok())
            .collect(),
    };
    Ok(flags)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut probe = pico_args::Arguments::from_env();
    if probe.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };
    log::debug!("starting with {flags:?}");

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
