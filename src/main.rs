fn main() -> anyhow::Result<()> {
    gender_ratio_lib::run()
}
