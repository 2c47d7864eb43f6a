// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use openstack_compose::render::render_text;
use openstack_compose::{audit, compose_deployment, resolve_roles, ParameterSet};
use slog::{o, Drain, Level, Logger};

#[derive(Debug, Parser)]
#[clap(about, version)]
/// Derive OpenStack service configuration for a host
struct Opt {
    /// Enable debugging
    #[clap(short, long, action)]
    debug: bool,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compose the deployment for a parameter file
    Compose {
        /// TOML parameter file
        #[clap(action)]
        params: PathBuf,

        /// Output format
        #[clap(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Treat empty credentials on enabled services as errors
        #[clap(long, action)]
        strict: bool,
    },

    /// Show the role flags resolved from a parameter file
    Roles {
        /// TOML parameter file
        #[clap(action)]
        params: PathBuf,
    },

    /// Print the default parameters as TOML
    Defaults,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn create_logger(opt: &Opt) -> Logger {
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let level = if opt.debug { Level::Debug } else { Level::Info };
    let drain = slog::LevelFilter(drain, level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

fn load_params(path: &Path, log: &Logger) -> anyhow::Result<ParameterSet> {
    let params = openstack_params_toml::parse(path).with_context(|| {
        format!("failed to load parameters from {}", path.display())
    })?;
    slog::debug!(log, "loaded parameters"; "path" => %path.display());
    Ok(params)
}

fn compose(
    path: &Path,
    format: Format,
    strict: bool,
    log: &Logger,
) -> anyhow::Result<String> {
    let params = load_params(path, log)?;

    let findings = audit(&params);
    for finding in &findings {
        slog::warn!(log, "{}", finding;
            "service" => finding.service,
            "field" => finding.field);
    }
    if strict && !findings.is_empty() {
        bail!("{} empty credential(s) on enabled services", findings.len());
    }

    let deployment = compose_deployment(&params, log)?;
    let output = match format {
        Format::Json => serde_json::to_string_pretty(&deployment)? + "\n",
        Format::Text => render_text(&deployment),
    };
    Ok(output)
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();
    let log = create_logger(&opt);

    let output = match opt.cmd {
        Command::Compose { params, format, strict } => {
            compose(&params, format, strict, &log)?
        }
        Command::Roles { params } => {
            let params = load_params(&params, &log)?;
            let flags = resolve_roles(&params)?;
            serde_json::to_string_pretty(&flags)? + "\n"
        }
        Command::Defaults => {
            openstack_params_toml::to_string(&ParameterSet::default())?
        }
    };

    std::io::stdout().write_all(output.as_bytes())?;
    Ok(())
}
