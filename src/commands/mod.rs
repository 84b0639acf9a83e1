mod common;
mod generate;
mod init;
mod serve;
mod themes;

pub use generate::{GenerateArgs, process_generate};
pub use init::{InitArgs, init_settings};
pub use serve::{ServeArgs, process_serve};
pub use themes::{ThemesArgs, list_themes};
