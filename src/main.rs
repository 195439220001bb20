fn main() {
    chan_export::cli::run();
}
