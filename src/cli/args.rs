// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for docbars

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docbars")]
#[command(about = "Render Handlebars templates with markdown, JSON and sorting helpers")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template against a JSON or YAML data file
    Render {
        #[arg(help = "Path to the Handlebars template")]
        template: PathBuf,

        #[arg(short, long, help = "Data file (.json, .yaml or .yml)")]
        data: Option<PathBuf>,

        #[arg(short, long, help = "Write the result to this file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, help = "Do not HTML-escape template values")]
        no_escape: bool,
    },

    /// Check templates for syntax errors without rendering
    Check {
        #[arg(required = true, help = "Template files to check")]
        templates: Vec<PathBuf>,
    },

    /// List the helpers available to templates
    Helpers,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
