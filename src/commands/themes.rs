use super::common::{Common, CommonArgs};
use clap::Parser;
use repo_traffic::Result;
use repo_traffic::themes::BuiltinTheme;

#[derive(Parser, Debug)]
pub struct ThemesArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print the names of every available theme.
pub fn list_themes(args: &ThemesArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    for name in common.themes.names()? {
        if BuiltinTheme::find(&name).is_some() {
            println!("{name} (built-in)");
        } else {
            println!("{name}");
        }
    }

    Ok(())
}
