use crate::config::DEFAULT_PORT;
use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::net::{IpAddr, SocketAddr};
use std::num::ParseIntError;

#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    after_help = r"Example:
    rerouted --base https://example.com '/path/:user' '/redirecthere/:user'"
)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL prepended to every target (e.g. https://example.com)
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub base: String,

    /// Port to listen on (an empty value means the default)
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT, value_parser = port)]
    pub port: u16,

    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    #[arg(
        help = "Path/target pairs (--help for more)",
        long_help = r"Path/target pairs:
    - each path is followed by the target it redirects to
    - named segments (:name) in the path are substituted into the target
    - the query string of the request is appended to the target
Examples:
    - /path/:user /redirecthere/:user
    - /old /new",
        required = true,
        value_name = "MAPPING"
    )]
    pub mappings: Vec<String>,
}

impl Options {
    /// Parses the process arguments, exiting with usage on invalid input.
    pub fn parse_valid() -> Self {
        let options = Self::parse();
        if let Err(e) = options.validate() {
            e.exit();
        }
        options
    }

    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.mappings.len() % 2 != 0 {
            return Err(Self::command().error(
                ErrorKind::WrongNumberOfValues,
                "redirect mappings must be in pairs (path, target)",
            ));
        }
        Ok(())
    }

    pub fn listen(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

fn port(arg: &str) -> Result<u16, ParseIntError> {
    match arg.trim() {
        "" => Ok(DEFAULT_PORT),
        arg => arg.parse(),
    }
}
