//! `toolbar-inspect`: resolve a toolbar snapshot into its view model.
//!
//! Reads the snapshot from the file, or from stdin when no file is given, and
//! prints the resolved view as pretty JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let args = native::Args::parse();
    if let Err(e) = native::run(args) {
        log::error!("{}", e);
        eprintln!("toolbar-inspect: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::Read;
    use std::path::PathBuf;

    use clap::Parser;

    use annotation_toolbar::{Result, ToolbarConfig, toolbar::resolve_json};

    #[derive(Parser, Debug)]
    #[command(name = "toolbar-inspect")]
    #[command(version, about = "Resolve a toolbar snapshot into the view the header renders")]
    pub struct Args {
        /// Snapshot JSON file (reads stdin when omitted)
        #[arg(value_name = "SNAPSHOT")]
        pub snapshot: Option<PathBuf>,

        /// Configuration file (defaults to the per-user config, if any)
        #[arg(long, short = 'c', value_name = "PATH")]
        pub config: Option<PathBuf>,
    }

    pub fn run(args: Args) -> Result<()> {
        let config = match &args.config {
            Some(path) => ToolbarConfig::from_file(path)?,
            None => ToolbarConfig::load_from_default_path().unwrap_or_default(),
        };

        env_logger::Builder::new()
            .filter_level(config.log_level.to_level_filter())
            .parse_default_env()
            .init();

        let snapshot = match &args.snapshot {
            Some(path) => {
                log::debug!("Reading snapshot from {:?}", path);
                std::fs::read_to_string(path)?
            }
            None => {
                let mut input = String::new();
                std::io::stdin().read_to_string(&mut input)?;
                input
            }
        };

        println!("{}", resolve_json(&snapshot, &config.labels)?);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_snapshot_and_config() {
            let args =
                Args::try_parse_from(["toolbar-inspect", "snap.json", "--config", "cfg.json"])
                    .unwrap();
            assert_eq!(args.snapshot, Some(PathBuf::from("snap.json")));
            assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        }

        #[test]
        fn test_stdin_when_no_snapshot() {
            let args = Args::try_parse_from(["toolbar-inspect"]).unwrap();
            assert_eq!(args.snapshot, None);
            assert_eq!(args.config, None);
        }

        #[test]
        fn test_config_flag_needs_a_value() {
            let parsed = Args::try_parse_from(["toolbar-inspect", "snap.json", "--config"]);
            assert!(parsed.is_err());
        }

        #[test]
        fn test_unknown_flag_is_rejected() {
            let err = Args::try_parse_from(["toolbar-inspect", "--verbose"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        }

        #[test]
        fn test_help_is_not_a_snapshot_path() {
            let err = Args::try_parse_from(["toolbar-inspect", "--help"]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
