//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ServeConfig;
use crate::task::Task;

/// Static site asset pipeline
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the working directory
    #[arg(short = 'C', long, global = true, default_value = "sitepipe.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Task to run (default: full build, then watch)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run every task in order, then serve and watch
    Default {
        #[command(flatten)]
        serve_args: ServeArgs,
    },

    /// Empty the output directory, keeping preserved entries
    Clean,

    /// Render Tera templates to HTML
    #[command(visible_alias = "pug")]
    Templates,

    /// Collapse whitespace in plain HTML files
    #[command(visible_alias = "html")]
    Markup,

    /// Compile, prefix and minify stylesheets
    Styles,

    /// Down-level, minify and bundle scripts
    Scripts,

    /// Optimize changed images
    #[command(visible_alias = "img")]
    Images,

    /// Copy font files
    Fonts,

    /// Generate sitemap.xml from the output tree
    Sitemap,

    /// Generate robots.txt
    Robots,

    /// Serve the output directory and re-run tasks on change, without an initial build
    Watch {
        #[command(flatten)]
        serve_args: ServeArgs,
    },
}

/// Preview server overrides shared by `default` and `watch`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
    #[arg(short, long)]
    pub interface: Option<std::net::IpAddr>,

    /// HTTP port number
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Live-reload WebSocket port number
    #[arg(long)]
    pub reload_port: Option<u16>,
}

impl ServeArgs {
    /// Override the `[serve]` section with the flags that were given.
    pub fn apply(&self, serve: &mut ServeConfig) {
        if let Some(interface) = self.interface {
            serve.interface = interface;
        }
        if let Some(port) = self.port {
            serve.port = port;
        }
        if let Some(reload_port) = self.reload_port {
            serve.reload_port = reload_port;
        }
    }
}

impl Commands {
    /// Server overrides of the serving commands.
    pub fn serve_args(&self) -> Option<&ServeArgs> {
        match self {
            Self::Default { serve_args } | Self::Watch { serve_args } => Some(serve_args),
            _ => None,
        }
    }

    /// The single task a command runs, if it runs exactly one.
    pub fn task(&self) -> Option<Task> {
        match self {
            Self::Clean => Some(Task::Clean),
            Self::Templates => Some(Task::Templates),
            Self::Markup => Some(Task::Markup),
            Self::Styles => Some(Task::Styles),
            Self::Scripts => Some(Task::Scripts),
            Self::Images => Some(Task::Images),
            Self::Fonts => Some(Task::Fonts),
            Self::Sitemap => Some(Task::Sitemap),
            Self::Robots => Some(Task::Robots),
            Self::Default { .. } | Self::Watch { .. } => None,
        }
    }
}
