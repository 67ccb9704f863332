use anyhow::Result;

fn main() -> Result<()> {
    gridate::tui::run()
}
