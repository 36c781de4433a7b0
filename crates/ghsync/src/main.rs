//! Entrypoint.

fn main() -> anyhow::Result<()> {
    ghsync::initialize_command_line()
}
