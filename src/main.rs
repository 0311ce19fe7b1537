use clap::Parser;
use tracing_subscriber::EnvFilter;

use netcdf_smoke::smoke;

/// Create `simple.nc` (or `test.nc`) in the working directory to check that libnetcdf works
#[derive(Debug, Parser)]
#[command(version)]
struct Opt {
    /// Log more to stderr, repeat for more detail. `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Write `test.nc` through the `hdf5` backed format instead of the classic `simple.nc`
    #[arg(long)]
    netcdf4: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opt = Opt::parse();
    init_logging(opt.verbose);

    tracing::debug!(
        runtime = %netcdf_smoke::library_version(),
        linked = netcdf_smoke::LINKED_VERSION,
        "libnetcdf versions"
    );

    let check = if opt.netcdf4 {
        smoke::Check::Netcdf4
    } else {
        smoke::Check::Classic
    };

    match check.run_in(".") {
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(2);
        }
        Ok(_) => {
            println!("{}", check.success_message());
            std::process::exit(0);
        }
    }
}
