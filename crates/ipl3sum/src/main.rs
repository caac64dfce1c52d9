//! IPL3SUM - N64 boot code checksum calculator
//!
//! Usage: ipl3sum [OPTIONS] <ROMS>...

use anyhow::Context;
use clap::{ArgAction, Parser as ClapParser, ValueEnum};
use ipl3_checksum::checksum::Checksum;
use ipl3_checksum::common::DiagnosticReporter;
use ipl3_checksum::driver::{self, ChecksumConfig, ChecksumReport, DEFAULT_SEED};
use ipl3_checksum::rom::CicVariant;
use ipl3_checksum::source::ByteOrder;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Byte order of the input image
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Order {
    /// Detect from the header magic
    #[default]
    Auto,
    /// Big-endian (.z64)
    Big,
    /// Byte-swapped (.v64)
    ByteSwapped,
    /// Little-endian (.n64)
    Little,
}

impl Order {
    fn byte_order(self) -> Option<ByteOrder> {
        match self {
            Order::Auto => None,
            Order::Big => Some(ByteOrder::BigEndian),
            Order::ByteSwapped => Some(ByteOrder::ByteSwapped),
            Order::Little => Some(ByteOrder::LittleEndian),
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "ipl3sum")]
#[command(author = "IPL3SUM Team")]
#[command(version)]
#[command(about = "Compute the N64 boot code (IPL3) checksum checked by the PIF", long_about = None)]
struct Args {
    /// ROM images (.z64, .v64 or .n64)
    #[arg(required = true)]
    roms: Vec<PathBuf>,

    /// Seed in hex, e.g. 3f or 3f3f (only the low 8 bits are used)
    #[arg(short, long, value_parser = driver::parse_seed, conflicts_with = "cic")]
    seed: Option<u32>,

    /// Take the seed from a known CIC (6101, 6102, 7101, 7102, 6103, 6105, 6106)
    #[arg(short, long)]
    cic: Option<CicVariant>,

    /// Byte order of the images
    #[arg(short, long, value_enum, default_value = "auto")]
    byte_order: Order,

    /// Expected checksum, e.g. A536C0F1D859; exit with status 1 on mismatch
    #[arg(short, long)]
    expect: Option<Checksum>,

    /// Report which known CIC the boot code belongs to
    #[arg(short, long)]
    identify: bool,

    /// Verbose output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Returns `Ok(false)` if any image failed to load or verify.
fn run(args: &Args) -> anyhow::Result<bool> {
    let reporter = DiagnosticReporter::new();

    let seed = match (args.seed, args.cic) {
        (Some(seed), _) => seed,
        (None, Some(cic)) => cic.seed(),
        (None, None) => DEFAULT_SEED,
    };
    let config = ChecksumConfig {
        seed,
        byte_order: args.byte_order.byte_order(),
        expected: args.expect,
        identify: args.identify,
    };
    log::info!("using seed {:#04x}", config.seed & 0xff);

    let mut out = std::io::stdout().lock();
    let mut all_ok = true;

    for path in &args.roms {
        let report = match driver::checksum_file(path, &config) {
            Ok(report) => report,
            Err(e) => {
                reporter.report_error(&e);
                all_ok = false;
                continue;
            }
        };

        log::info!("{}: read as {}", path.display(), report.byte_order);
        if report.byte_order_guessed() {
            reporter.report_warning(
                format!("could not recognize byte order of {}", path.display()),
                vec![format!("using {} reads", report.byte_order)],
            );
        }

        print_report(&mut out, path, &report, args.identify)
            .with_context(|| format!("writing result for {}", path.display()))?;

        if let Err(e) = report.verify() {
            reporter.report_error(&e);
            all_ok = false;
        }
    }

    Ok(all_ok)
}

fn print_report(
    out: &mut impl Write,
    path: &Path,
    report: &ChecksumReport,
    identify: bool,
) -> std::io::Result<()> {
    writeln!(out, "{}: Checksum: 0x{}", path.display(), report.checksum)?;

    if identify {
        match report.cic {
            Some(cic) => writeln!(out, "{}: CIC: {}", path.display(), cic)?,
            None => writeln!(out, "{}: CIC: unknown", path.display())?,
        }
    }

    Ok(())
}
