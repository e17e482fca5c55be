fn main() -> anyhow::Result<()> {
    pkgworld_lib::main()
}
