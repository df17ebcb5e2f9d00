use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let build = vergen_gitcl::BuildBuilder::default().build_date(true).build()?;
    let git = vergen_gitcl::GitclBuilder::default().sha(true).build()?;

    vergen_gitcl::Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&git)?
        .emit()?;
    Ok(())
}
