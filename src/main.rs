use anyhow::Context;

fn main() -> anyhow::Result<()> {
    tokensmith::run().context("token build failed")?;
    Ok(())
}
