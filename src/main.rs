fn main() {
    facgen::app::cli::run();
}
