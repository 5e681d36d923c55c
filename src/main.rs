//! `vitrine` command line: open one exhibit asset in a window.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use vitrine::options::Options;
use vitrine::{Viewer, VitrineError};

#[derive(Parser, Debug)]
#[command(about = "Interactive 3D exhibit viewer", version)]
struct Args {
    /// glTF or GLB asset to display
    #[arg(required_unless_present_any = [
        "print_schema",
        "save_options",
        "list_presets",
    ])]
    model: Option<PathBuf>,

    /// TOML options file (camera, tour, display, keybindings)
    #[arg(long)]
    options: Option<PathBuf>,

    /// Directory screenshots are written to
    #[arg(long, default_value = ".")]
    screenshot_dir: PathBuf,

    /// Window title
    #[arg(long, default_value = "Vitrine")]
    title: String,

    /// Print the options JSON schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Write the effective options (defaults merged with --options) to a
    /// TOML file and exit
    #[arg(long, value_name = "PATH")]
    save_options: Option<PathBuf>,

    /// List the option presets (TOML files) in a directory and exit
    #[arg(long, value_name = "DIR")]
    list_presets: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), VitrineError> {
    if args.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        writeln!(std::io::stdout().lock(), "{schema}")?;
        return Ok(());
    }

    if let Some(dir) = &args.list_presets {
        let mut out = std::io::stdout().lock();
        for name in Options::list_presets(dir) {
            writeln!(out, "{name}")?;
        }
        return Ok(());
    }

    let options = match &args.options {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };

    if let Some(path) = &args.save_options {
        options.save(path)?;
        log::info!("options written to {}", path.display());
        return Ok(());
    }

    let mut builder = Viewer::builder()
        .with_options(options)
        .with_title(args.title)
        .with_screenshot_dir(args.screenshot_dir);
    if let Some(model) = args.model {
        builder = builder.with_path(model);
    }
    builder.build().run()
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_early_flags_need_no_model() {
        let args =
            Args::try_parse_from(["vitrine", "--list-presets", "presets"])
                .unwrap();
        assert_eq!(args.list_presets, Some(PathBuf::from("presets")));
        assert!(args.model.is_none());

        let args = Args::try_parse_from([
            "vitrine",
            "--options",
            "a.toml",
            "--save-options",
            "b.toml",
        ])
        .unwrap();
        assert_eq!(args.save_options, Some(PathBuf::from("b.toml")));
    }

    #[test]
    fn viewing_needs_a_model() {
        let parsed = Args::try_parse_from(["vitrine", "--title", "Room 4"]);
        assert!(parsed.is_err());
    }
}
