fn main() -> anyhow::Result<()> {
    blinky_cli::run_cli()
}
