fn main() {
    hailstone::cli::run();
}
