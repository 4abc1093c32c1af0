//! skein entry point.

fn main() {
    if let Err(err) = skein::cli::run_cli() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
