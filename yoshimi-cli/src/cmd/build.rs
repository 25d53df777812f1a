use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use yoshimi_core::{BuildOptions, SiteConfig, build_site};

use crate::config::BuildConfig;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("site")
                .short('s')
                .long("site")
                .value_name("FILE")
                .help("Site description to build from [default: site.json]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory, overrides BUILD_DIR [default: out]"),
        )
}

pub fn make_command() -> Command {
    add_build_args(Command::new("gen-site"))
        .about("Build the Yoshimi web site from the pages listed in site.json")
        .version(env!("CARGO_PKG_VERSION"))
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let build_config = BuildConfig::load(args).context("Failed to resolve build configuration")?;

    let site = SiteConfig::read(&build_config.site)
        .with_context(|| format!("Failed to load {}", build_config.site.display()))?;

    let options = BuildOptions::new(&build_config.dir);
    let summary = build_site(&site, &options)?;

    for page in &summary.pages {
        log::debug!("Wrote {}", summary.output_dir.join(page).display());
    }
    log::info!(
        "Website files successfully written to \"{}/\".",
        summary.output_dir.display()
    );

    Ok(())
}
