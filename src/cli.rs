use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zipdoc")]
#[command(version)]
#[command(about = "Read and write entries of ZIP-packaged documents", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipdoc list book.zip                       list entry paths\n  \
  zipdoc cat book.zip meta/info.json --json  pretty-print a JSON entry\n  \
  zipdoc pack out.zip --root site index.html css/site.css")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List entry paths in archive order
    List {
        /// ZIP file
        #[arg(value_name = "ZIP")]
        zip: PathBuf,
    },

    /// Write one entry to stdout
    Cat {
        /// ZIP file
        #[arg(value_name = "ZIP")]
        zip: PathBuf,

        /// Entry path inside the archive
        #[arg(value_name = "PATH")]
        path: String,

        /// Parse the entry as JSON and pretty-print it
        #[arg(long)]
        json: bool,
    },

    /// Create an archive from files on disk
    Pack {
        /// Output ZIP file
        #[arg(value_name = "OUT")]
        out: PathBuf,

        /// Files to add
        #[arg(value_name = "FILES", required = true)]
        files: Vec<PathBuf>,

        /// Resolve relative FILES under DIR and name entries relative to it
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Store entries without compression
        #[arg(long)]
        store: bool,
    },
}

impl Cli {
    /// Default `tracing` filter for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "zipdoc=debug",
            _ => "zipdoc=trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pack_with_root() {
        let cli = Cli::parse_from([
            "zipdoc", "pack", "out.zip", "--root", "data", "-v", "a.txt", "b/c.json",
        ]);
        assert_eq!(cli.log_filter(), "zipdoc=debug");
        match cli.command {
            Command::Pack {
                out, files, root, store,
            } => {
                assert_eq!(out, PathBuf::from("out.zip"));
                assert_eq!(files, vec![PathBuf::from("a.txt"), PathBuf::from("b/c.json")]);
                assert_eq!(root, Some(PathBuf::from("data")));
                assert!(!store);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn pack_requires_files() {
        assert!(Cli::try_parse_from(["zipdoc", "pack", "out.zip"]).is_err());
    }
}
