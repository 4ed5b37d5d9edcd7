use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

use crate::compression::container::{CodecOptions, FreqWidth};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map a count of -v flags to a level. No flag reports errors only.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Everything the user can set on the command line.
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// Vec of names of files to read for input. Empty means stdin to stdout.
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
    /// Header format settings
    pub codec: CodecOptions,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Errors,
            codec: CodecOptions::default(),
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A static Huffman file compressor",
    long_about = "
    huffzip compresses files with a static Huffman code built from the byte frequencies of the
    whole input. The frequencies are stored in the file header so the decoder can rebuild the code.

    If no file names are given, huffzip works from standard input to standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Force compression (the default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Force decompression
    #[clap(short = 'd', long = "decompress", conflicts_with = "compress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test", conflicts_with_all = &["compress", "decompress"])]
    test: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Store frequencies in 4 bytes instead of 1, for inputs with a byte occurring over 255 times.
    /// Files written with -w must be decompressed with -w.
    #[clap(short = 'w', long = "wide")]
    wide: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

impl Args {
    /// Put command line information from CLAP into our internal structure.
    pub fn into_opts(self) -> HuffOpts {
        let mut opts = HuffOpts::new();
        opts.files = self.files;
        opts.op_mode = if self.test {
            Mode::Test
        } else if self.decompress {
            Mode::Unzip
        } else {
            Mode::Zip
        };
        opts.keep_input_files = self.keep;
        opts.force_overwrite = self.force;
        if self.stdout {
            opts.output = Output::Stdout;
        }
        if self.wide {
            opts.codec.freq_width = FreqWidth::Wide;
        }
        opts.verbose = if self.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::from_count(self.verbose)
        };
        opts
    }
}

/// Parse the command line, set the log level and report what we are going to do.
pub fn huffopts_init() -> HuffOpts {
    let opts = Args::parse().into_opts();
    log::set_max_level(opts.verbose.level_filter());

    info!("---- huffzip initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Output goes to {}", opts.output);
    info!("Frequency field is {:?}", opts.codec.freq_width);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    opts
}
