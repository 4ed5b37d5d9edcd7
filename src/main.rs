//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use huffzip::compression::compress::compress_files;
use huffzip::compression::decompress::{decompress_files, test_files};
use huffzip::tools::cli::{huffopts_init, Mode};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Log to stderr so -c output on stdout stays clean. The real level is set from the flags below.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start the logger: {}", e);
    }

    let opts = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Zip => compress_files(&opts),
        Mode::Unzip => decompress_files(&opts),
        Mode::Test => test_files(&opts),
    };

    match result {
        Ok(()) => info!("Done."),
        Err(e) => {
            error!("{} ({})", e, e.kind());
            std::process::exit(1);
        }
    }
}
