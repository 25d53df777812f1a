use std::process::ExitCode;

use yoshimi_core::{BuildError, ConfigError};

mod cmd;
mod config;

/// Exit status for a failed run: 1 when a file could not be read or written,
/// 2 for anything else.
fn exit_code(err: &anyhow::Error) -> u8 {
    let is_io = err.chain().any(|cause| {
        if let Some(ConfigError::Io(_)) = cause.downcast_ref::<ConfigError>() {
            return true;
        }
        cause
            .downcast_ref::<BuildError>()
            .is_some_and(BuildError::is_io)
    });

    if is_io { 1 } else { 2 }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Trying to generate site!");

    let args = cmd::build::make_command().get_matches();

    match cmd::build::execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            if code == 1 {
                log::error!("{err:#}");
                log::error!("Double check file paths.");
            } else {
                log::error!("An error occurred: {err:#}");
                log::error!("Failed to fully generate site!");
            }
            ExitCode::from(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unreadable_config_exits_with_one() {
        let err = yoshimi_core::SiteConfig::read("/definitely/not/here/site.json").unwrap_err();
        let err = anyhow::Error::new(err).context("Failed to load site.json");
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_malformed_config_exits_with_two() {
        let err = yoshimi_core::SiteConfig::from_json("[").unwrap_err();
        assert_eq!(exit_code(&anyhow::Error::new(err)), 2);
    }

    #[test]
    fn test_non_utf8_config_exits_with_two() {
        let err = ConfigError::Encoding(PathBuf::from("site.json"));
        assert_eq!(exit_code(&anyhow::Error::new(err)), 2);
    }

    #[test]
    fn test_build_errors_are_classified() {
        let io = BuildError::Io {
            path: PathBuf::from("a.html"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(exit_code(&anyhow::Error::new(io)), 1);

        let copy = BuildError::Copy {
            from: PathBuf::from("css"),
            to: PathBuf::from("out/css"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(exit_code(&anyhow::Error::new(copy)), 2);

        let invalid = BuildError::InvalidPath(PathBuf::from(".."));
        assert_eq!(exit_code(&anyhow::Error::new(invalid)), 2);

        let encoding = BuildError::Encoding(PathBuf::from("a.html"));
        assert_eq!(exit_code(&anyhow::Error::new(encoding)), 2);
    }

    #[test]
    fn test_other_errors_exit_with_two() {
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 2);
    }
}
