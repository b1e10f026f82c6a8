fn main() -> anyhow::Result<()> {
    forkline_lib::run()
}
