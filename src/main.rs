fn main() {
    if let Err(e) = ponder::cli::main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
