//! Offline routes-file validator: loads a CSV without starting the
//! facade, reports counts and timing, and exits non-zero on the first
//! malformed line. Useful for validating a routes file before deploying
//! it, or for sizing a table without paying for a server bind.

use std::process;
use std::time::Instant;

use clap::Parser;
use log::error;

use radix_route_store::loader;
use radix_route_store::store::RouteStore;

#[derive(Parser)]
#[command(about = "Validate a routes file and report load statistics", long_about = None)]
struct Args {
    /// Path to the `;`-separated routes file.
    routes_file: String,

    /// Maximum accepted metric value, mirroring MAX_METRIC.
    #[arg(long, default_value_t = 32768)]
    max_metric: u16,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let store = RouteStore::new(args.max_metric, 1);
    let started = Instant::now();

    match loader::load_routes(&store, &args.routes_file) {
        Ok(count) => {
            println!(
                "ok: {count} routes loaded from {} in {:.3}s ({} total entries)",
                args.routes_file,
                started.elapsed().as_secs_f64(),
                store.route_count()
            );
        }
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
