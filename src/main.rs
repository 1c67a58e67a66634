fn main() {
    if let Err(err) = csv2hatchbuck::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
