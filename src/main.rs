fn main() {
    payergen::app::cli::run();
}
