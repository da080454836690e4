fn main() {
    formtree::cli::run();
}
