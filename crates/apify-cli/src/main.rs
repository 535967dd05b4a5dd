fn main() -> std::process::ExitCode {
    apify_cli::run()
}
